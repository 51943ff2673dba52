//! Keyed validation with type catch-alls and default backfill.
use indexmap::IndexMap;
use tracing::trace;

use super::Validator;
use crate::error::{ErrorKind, SchemaError, ValidationError};
use crate::spec::{MapKey, Spec};
use crate::value::{Key, Type, Value};

#[derive(Debug, Clone)]
pub struct MappingValidator {
    /// literal-key rules, in spec order; these keys are required
    exact: IndexMap<Key, Validator>,
    /// catch-alls by concrete key type; never required
    typed: IndexMap<Type, Validator>,
    ignore_unknown: bool,
}

impl MappingValidator {
    pub fn new(rules: Vec<(MapKey, Spec)>, ignore_unknown: bool) -> Result<Self, SchemaError> {
        let mut exact = IndexMap::new();
        let mut typed = IndexMap::new();
        for (key, spec) in rules {
            let node = Validator::create(spec)?;
            let duplicate = match key {
                MapKey::Exact(key) => {
                    let label = key.to_string();
                    exact.insert(key.normalized().into_owned(), node).map(|_| label)
                }
                MapKey::OfType(ty) => typed.insert(ty, node).map(|_| format!("<{}>", ty.name())),
            };
            if let Some(label) = duplicate {
                return Err(SchemaError::DuplicateKey(label));
            }
        }
        Ok(Self { exact, typed, ignore_unknown })
    }

    pub fn exact_rules(&self) -> impl Iterator<Item = (&Key, &Validator)> {
        self.exact.iter()
    }

    pub fn type_rules(&self) -> impl Iterator<Item = (&Type, &Validator)> {
        self.typed.iter()
    }

    pub fn ignores_unknown(&self) -> bool { self.ignore_unknown }

    fn exact_index(&self, key: &Key) -> Option<usize> {
        self.exact.get_index_of(key.normalized().as_ref())
    }

    /// Checks present entries in insertion order (fail-fast), then fills in
    /// defaults for absent optional keys. Returns the map, extended with any
    /// defaults; validating that result again changes nothing.
    pub fn validate(&self, value: Value) -> Result<Value, ValidationError> {
        let mut map = match value {
            Value::Map(map) => map,
            other => return Err(ValidationError::type_mismatch(Type::Map, other.type_of())),
        };

        let mut present = vec![false; self.exact.len()];
        for (key, entry) in map.iter_mut() {
            let rule = match self.exact_index(key) {
                Some(index) => {
                    present[index] = true;
                    self.exact.get_index(index).map(|(_, rule)| rule)
                }
                None => self.typed.get(&key.type_of()),
            };
            let Some(rule) = rule else {
                if self.ignore_unknown {
                    continue;
                }
                return Err(ValidationError::new(ErrorKind::UnknownKey, "not allowed").at_key(key.clone()));
            };
            let checked = rule
                .validate(std::mem::take(entry))
                .map_err(|e| e.at_key(key.clone()))?;
            *entry = checked;
        }

        for ((key, rule), present) in self.exact.iter().zip(present) {
            if present {
                continue;
            }
            match rule {
                Validator::Optional(optional) => {
                    let default = optional.validate(None)?;
                    trace!(%key, %default, "backfilling default");
                    map.insert(key.clone(), default);
                }
                _ => {
                    return Err(ValidationError::new(
                        ErrorKind::MissingKey,
                        format!("missing key '{key}'"),
                    ));
                }
            }
        }

        Ok(Value::Map(map))
    }
}
