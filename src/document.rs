//! JSON spec documents.
//!
//! Only the serialisable part of `Spec` can be written down this way:
//! predicates and hand-built validators exist in code only.
//!
//! ```json
//! {"mapping": {
//!     "keys": {
//!         "name":  {"type": "str"},
//!         "phone": {"all": [{"type": "str"}, {"pattern": "\\d{10}"}]},
//!         "likes": {"optional": {"type": "map", "default": {}}}
//!     },
//!     "types": {"str": {"type": "any"}},
//!     "ignore_unknown": false
//! }}
//! ```
//!
//! Bare scalars and `null` are literals, a bare array is a list spec, and an
//! object must carry exactly one form key (`{"literal": {...}}` for a literal
//! object).
use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::error::SchemaError;
use crate::spec::{MapKey, Spec};
use crate::validator::Validator;
use crate::value::{Container, Type, Value};

const FORMS: &[&str] = &[
    "type", "literal", "pattern", "length", "list", "tuple", "sequence",
    "mapping", "all", "any", "optional",
];

/// Parse a spec document, naming the JSON path of the first problem.
pub fn from_str(src: &str) -> Result<Spec, SchemaError> {
    let mut de = serde_json::Deserializer::from_str(src);
    let spec = read(&mut de)?;
    de.end().map_err(|e| SchemaError::Document { path: ".".to_string(), reason: e.to_string() })?;
    Ok(spec)
}

pub fn from_json(json: serde_json::Value) -> Result<Spec, SchemaError> {
    read(json)
}

fn read<'de, D>(de: D) -> Result<Spec, SchemaError>
where
    D: Deserializer<'de>,
    D::Error: fmt::Display,
{
    match serde_path_to_error::deserialize::<_, SpecDocument>(de) {
        Ok(SpecDocument(spec)) => Ok(spec),
        Err(err) => {
            let path = err.path().to_string();
            Err(SchemaError::Document { path, reason: err.into_inner().to_string() })
        }
    }
}

// ------------------------------ Documents -------------------------------- //

pub struct SpecDocument(pub Spec);

#[derive(Deserialize)]
#[serde(transparent)]
struct SpecList(Vec<SpecDocument>);

impl SpecList {
    fn specs(self) -> Vec<Spec> {
        self.0.into_iter().map(|SpecDocument(spec)| spec).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TypeName(Type);

impl<'de> Deserialize<'de> for TypeName {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let name = String::deserialize(de)?;
        Type::from_name(&name)
            .map(TypeName)
            .ok_or_else(|| de::Error::custom(format!("unknown type '{name}'")))
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SequenceDoc {
    items: SpecList,
    #[serde(default)]
    tuple: bool,
    #[serde(default)]
    ignore_type: bool,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MappingDoc {
    #[serde(default)]
    keys: IndexMap<String, SpecDocument>,
    #[serde(default)]
    types: IndexMap<TypeName, SpecDocument>,
    #[serde(default)]
    ignore_unknown: bool,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionalDoc {
    #[serde(rename = "type")]
    ty: TypeName,
    #[serde(default)]
    default: serde_json::Value,
}

impl<'de> Deserialize<'de> for SpecDocument {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        de.deserialize_any(SpecVisitor).map(SpecDocument)
    }
}

struct SpecVisitor;

impl<'de> Visitor<'de> for SpecVisitor {
    type Value = Spec;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a literal, a list of specs, or an object with one of {FORMS:?}")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Spec, E> {
        Ok(Spec::Literal(Value::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Spec, E> {
        Ok(Spec::Literal(Value::Null))
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Spec, E> {
        Ok(Spec::literal(b))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<Spec, E> {
        Ok(Spec::literal(i))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> Result<Spec, E> {
        match i64::try_from(u) {
            Ok(i) => Ok(Spec::literal(i)),
            Err(_) => Ok(Spec::literal(u as f64)),
        }
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<Spec, E> {
        Ok(Spec::literal(f))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Spec, E> {
        Ok(Spec::literal(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Spec, A::Error> {
        let mut items = Vec::new();
        while let Some(SpecDocument(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Spec::list(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Spec, A::Error> {
        let Some(form) = map.next_key::<String>()? else {
            return Err(de::Error::custom(r#"an empty object is not a spec (write {"literal": {}})"#));
        };
        let spec = match form.as_str() {
            "type" => Spec::Type(map.next_value::<TypeName>()?.0),
            "literal" => Spec::Literal(Value::from(map.next_value::<serde_json::Value>()?)),
            "pattern" => Spec::pattern(map.next_value::<String>()?),
            "length" => Spec::Validator(Validator::length(map.next_value::<usize>()?)),
            "list" => Spec::list(map.next_value::<SpecList>()?.specs()),
            "tuple" => Spec::tuple(map.next_value::<SpecList>()?.specs()),
            "sequence" => {
                let doc = map.next_value::<SequenceDoc>()?;
                let container = if doc.tuple { Container::Tuple } else { Container::List };
                let spec = Spec::sequence(container, doc.items.specs());
                if doc.ignore_type { spec.ignore_type() } else { spec }
            }
            "all" => Spec::All(map.next_value::<SpecList>()?.specs()),
            "any" => Spec::Any(map.next_value::<SpecList>()?.specs()),
            "optional" => {
                let doc = map.next_value::<OptionalDoc>()?;
                Spec::optional(doc.ty.0, Value::from(doc.default))
            }
            "mapping" => {
                let doc = map.next_value::<MappingDoc>()?;
                let exact = doc.keys.into_iter().map(|(k, SpecDocument(s))| (MapKey::from(k), s));
                let typed = doc.types.into_iter().map(|(TypeName(t), SpecDocument(s))| (MapKey::from(t), s));
                let spec = Spec::mapping(exact.chain(typed));
                if doc.ignore_unknown { spec.ignore_unknown() } else { spec }
            }
            other => return Err(de::Error::unknown_field(other, FORMS)),
        };
        if let Some(extra) = map.next_key::<String>()? {
            return Err(de::Error::custom(format!(
                "unexpected key '{extra}' next to '{form}'; a spec object has exactly one form key"
            )));
        }
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scheme;
    use crate::error::ErrorKind;
    use crate::spec::Category;
    use crate::value::Key;
    use serde_json::json;

    const PERSON: &str = r#"{"mapping": {
        "keys": {
            "height": {"all": [{"any": [{"type": "int"}, {"type": "float"}]}]},
            "name": {"type": "str"},
            "phone": {"all": [{"type": "str"}, {"pattern": "\\d{10}"}]},
            "likes": {"optional": {"type": "map", "default": {}}}
        }
    }}"#;

    #[test]
    fn reads_a_mapping_document() {
        let scheme = Scheme::new(from_str(PERSON).unwrap()).unwrap();
        let out = scheme
            .validate(Value::from(json!({"height": 6.7, "name": "bob", "phone": "0123456789"})))
            .unwrap();
        assert_eq!(out.as_map().unwrap()[&Key::from("likes")], Value::from(json!({})));
        let err = scheme
            .validate(Value::from(json!({"height": 6, "name": "bob", "phone": "12345"})))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PatternMismatch);
        assert_eq!(err.pointer(), "/phone");
    }

    #[test]
    fn scalars_and_arrays_are_literals_and_lists() {
        assert!(matches!(from_json(json!(5)).unwrap(), Spec::Literal(Value::Int(5))));
        assert!(matches!(from_json(json!(null)).unwrap(), Spec::Literal(Value::Null)));
        let spec = from_json(json!([{"type": "str"}, 2])).unwrap();
        assert_eq!(spec.category(), Category::Sequence);
        let spec = from_json(json!({"literal": {"a": 1}})).unwrap();
        assert!(matches!(spec, Spec::Literal(Value::Map(_))));
    }

    #[test]
    fn sequence_and_type_catch_all_forms() {
        let spec = from_json(json!({"sequence": {"items": [{"type": "int"}], "tuple": true, "ignore_type": true}})).unwrap();
        assert!(matches!(spec, Spec::Sequence { container: Container::Tuple, ignore_type: true, .. }));
        let spec = from_json(json!({"mapping": {"types": {"str": {"type": "int"}}, "ignore_unknown": true}})).unwrap();
        let Spec::Mapping { rules, ignore_unknown } = spec else { panic!("expected a mapping") };
        assert!(ignore_unknown);
        assert_eq!(rules[0].0, MapKey::OfType(Type::Str));
    }

    #[test]
    fn errors_name_the_json_path() {
        let err = from_str(r#"{"mapping": {"keys": {"phone": {"type": "strr"}}}}"#).unwrap_err();
        let SchemaError::Document { path, reason } = err else { panic!("expected a document error") };
        assert!(path.contains("phone"), "{path}");
        assert!(reason.contains("unknown type 'strr'"), "{reason}");

        let err = from_str(r#"{"all": 5}"#).unwrap_err();
        assert!(matches!(err, SchemaError::Document { .. }));
        assert!(from_str(r#"{"type": "int", "pattern": "x"}"#).is_err());
        assert!(from_str(r#"{"nope": 1}"#).is_err());
        assert!(from_str("{}").is_err());
        assert!(from_str(r#"{"type": "int"} trailing"#).is_err());
    }

    #[test]
    fn length_documents_are_prebuilt_validators() {
        let spec = from_json(json!({"length": 3})).unwrap();
        assert!(matches!(spec, Spec::Validator(Validator::Length(_))));
    }
}
