use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::Value;

/// Type descriptors. Concrete types name exactly one `Value` variant;
/// `Any`, `Number` and `Sequence` are abstract and accept several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Any,
    Null,
    Bool,
    Int,
    Float,
    Number,
    Str,
    List,
    Tuple,
    Sequence,
    Map,
}

// canonical name first; the rest are accepted aliases
static TYPE_NAMES: Lazy<IndexMap<&'static str, Type>> = Lazy::new(|| {
    IndexMap::from([
        ("any", Type::Any),
        ("null", Type::Null),
        ("bool", Type::Bool),
        ("int", Type::Int),
        ("float", Type::Float),
        ("number", Type::Number),
        ("str", Type::Str),
        ("list", Type::List),
        ("tuple", Type::Tuple),
        ("sequence", Type::Sequence),
        ("map", Type::Map),
        ("object", Type::Any),
        ("none", Type::Null),
        ("boolean", Type::Bool),
        ("integer", Type::Int),
        ("string", Type::Str),
        ("array", Type::List),
        ("dict", Type::Map),
    ])
});

impl Type {
    /// Instance check.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Type::Any => true,
            Type::Number => matches!(value, Value::Int(_) | Value::Float(_)),
            Type::Sequence => matches!(value, Value::List(_) | Value::Tuple(_)),
            concrete => value.type_of() == concrete,
        }
    }

    pub fn name(self) -> &'static str {
        TYPE_NAMES
            .iter()
            .find(|(_, ty)| **ty == self)
            .map(|(name, _)| *name)
            .unwrap_or("any")
    }

    pub fn from_name(name: &str) -> Option<Type> {
        TYPE_NAMES.get(name.to_ascii_lowercase().as_str()).copied()
    }
}
