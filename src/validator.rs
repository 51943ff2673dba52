//! Validator nodes and the factory that builds them from specs.
//!
//! Every node is one variant of a closed enum and is checked by `match`.
//! Nodes are built once, eagerly (composites materialise their children at
//! construction), and are immutable afterwards, so a tree can be shared
//! across threads. `validate` takes the value by value and hands back the
//! validated value: unchanged for most nodes, rebuilt by sequences, and
//! extended with defaults by mappings.
pub mod leaf;
pub mod logic;
pub mod mapping;
pub mod optional;
pub mod sequence;

use std::fmt;

use crate::error::{SchemaError, ValidationError};
use crate::spec::{Category, Spec};
use crate::value::{Type, Value};

pub use leaf::{LengthValidator, LiteralValidator, PatternValidator, PredicateValidator, TypeValidator};
pub use logic::{AllValidator, AnyValidator};
pub use mapping::MappingValidator;
pub use optional::OptionalValidator;
pub use sequence::SequenceValidator;

#[derive(Debug, Clone)]
pub enum Validator {
    Type(TypeValidator),
    Literal(LiteralValidator),
    Length(LengthValidator),
    Predicate(PredicateValidator),
    Pattern(PatternValidator),
    All(AllValidator),
    Any(AnyValidator),
    Sequence(SequenceValidator),
    Mapping(MappingValidator),
    Optional(OptionalValidator),
}

impl Validator {
    /// Factory: build the node for `spec`, recursing into child specs.
    /// Arms are listed in classification precedence.
    pub fn create(spec: Spec) -> Result<Self, SchemaError> {
        let node = match spec {
            Spec::Sequence { container, items, ignore_type } => {
                Validator::Sequence(SequenceValidator::new(container, items, ignore_type)?)
            }
            Spec::Mapping { rules, ignore_unknown } => {
                Validator::Mapping(MappingValidator::new(rules, ignore_unknown)?)
            }
            Spec::Type(ty) => Validator::Type(TypeValidator::new(ty)),
            Spec::Validator(node) => node,
            Spec::All(items) => Validator::All(AllValidator::new(items)?),
            Spec::Any(items) => Validator::Any(AnyValidator::new(items)?),
            Spec::Optional { ty, default } => Validator::Optional(OptionalValidator::new(ty, default)),
            Spec::Pattern(pattern) => Validator::Pattern(PatternValidator::new(&pattern)?),
            Spec::Predicate(predicate) => Validator::Predicate(PredicateValidator::new(predicate)),
            Spec::Literal(value) => Validator::Literal(LiteralValidator::new(value)),
        };
        Ok(node)
    }

    pub fn of_type(ty: Type) -> Self {
        Validator::Type(TypeValidator::new(ty))
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Validator::Literal(LiteralValidator::new(value.into()))
    }

    pub fn length(length: usize) -> Self {
        Validator::Length(LengthValidator::new(length))
    }

    pub fn validate(&self, value: Value) -> Result<Value, ValidationError> {
        match self {
            Validator::Type(v) => v.check(&value).map(|_| value),
            Validator::Literal(v) => v.check(&value).map(|_| value),
            Validator::Length(v) => v.check(&value).map(|_| value),
            Validator::Predicate(v) => v.check(&value).map(|_| value),
            Validator::Pattern(v) => v.check(&value).map(|_| value),
            Validator::All(v) => v.validate(value),
            Validator::Any(v) => v.validate(value),
            Validator::Sequence(v) => v.validate(value),
            Validator::Mapping(v) => v.validate(value),
            Validator::Optional(v) => v.validate(Some(value)),
        }
    }

    /// The spec class this node was built from.
    pub fn category(&self) -> Category {
        match self {
            Validator::Sequence(_) => Category::Sequence,
            Validator::Mapping(_) => Category::Mapping,
            Validator::Type(_) => Category::Type,
            Validator::Predicate(_) => Category::Predicate,
            Validator::Literal(_) => Category::Literal,
            _ => Category::Validator,
        }
    }
}

/// Compact one-line rendering of the tree, e.g.
/// `mapping{'name': str, 'likes': optional(map, {})}`.
impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Type(v) => f.write_str(v.ty().name()),
            Validator::Literal(v) => write!(f, "'{}'", v.expected()),
            Validator::Length(v) => write!(f, "length({})", v.length()),
            Validator::Predicate(v) => write!(f, "predicate({})", v.predicate().name()),
            Validator::Pattern(v) => write!(f, "pattern({:?})", v.pattern()),
            Validator::All(v) => write_list(f, "all[", v.children(), "]"),
            Validator::Any(v) => write_list(f, "any[", v.children(), "]"),
            Validator::Sequence(v) => {
                write_list(f, &format!("{}[", v.expected_type().name()), v.positions(), "]")
            }
            Validator::Mapping(v) => {
                f.write_str("mapping{")?;
                let mut first = true;
                for (key, rule) in v.exact_rules() {
                    if !first { f.write_str(", ")?; }
                    first = false;
                    write!(f, "'{key}': {rule}")?;
                }
                for (ty, rule) in v.type_rules() {
                    if !first { f.write_str(", ")?; }
                    first = false;
                    write!(f, "<{}>: {rule}", ty.name())?;
                }
                if v.ignores_unknown() {
                    f.write_str(if first { ".." } else { ", .." })?;
                }
                f.write_str("}")
            }
            Validator::Optional(v) => write!(f, "optional({}, {})", v.ty().name(), v.default_value()),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, open: &str, items: &[Validator], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 { f.write_str(", ")?; }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}
