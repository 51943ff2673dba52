use std::borrow::Cow;
use std::fmt;
use ordered_float::OrderedFloat;

use super::Type;

/// Hashable scalar usable as a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(String),
}

impl Key {
    /// Concrete type of the key; type catch-all rules are looked up by this.
    pub fn type_of(&self) -> Type {
        match self {
            Key::Null => Type::Null,
            Key::Bool(_) => Type::Bool,
            Key::Int(_) => Type::Int,
            Key::Float(_) => Type::Float,
            Key::Str(_) => Type::Str,
        }
    }

    /// The key a mapping looks this one up by: an integral float becomes the
    /// equal int, so `1.0` finds a rule written for `1`.
    pub fn normalized(&self) -> Cow<'_, Key> {
        match self {
            Key::Float(f) => match super::exact_int(f.0) {
                Some(i) => Cow::Owned(Key::Int(i)),
                None => Cow::Borrowed(self),
            },
            _ => Cow::Borrowed(self),
        }
    }

    pub(super) fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => write!(f, "{s:?}"),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Null => f.write_str("null"),
            Key::Bool(b) => write!(f, "{b}"),
            Key::Int(i) => write!(f, "{i}"),
            Key::Float(x) => write!(f, "{:?}", x.0),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self { Key::Str(s.to_string()) }
}

impl From<String> for Key {
    fn from(s: String) -> Self { Key::Str(s) }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self { Key::Int(i) }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self { Key::Int(i as i64) }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self { Key::Bool(b) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_float_keys_normalize_to_ints() {
        assert_eq!(Key::Float(OrderedFloat(1.0)).normalized().as_ref(), &Key::Int(1));
        assert_eq!(Key::Float(OrderedFloat(-0.0)).normalized().as_ref(), &Key::Int(0));
        assert_eq!(Key::Float(OrderedFloat(1.5)).normalized().as_ref(), &Key::Float(OrderedFloat(1.5)));
        assert_eq!(Key::Bool(true).normalized().as_ref(), &Key::Bool(true));
        assert_eq!(Key::from("1").normalized().as_ref(), &Key::from("1"));
    }
}
