//! In-memory values that schemes are checked against.
//!
//! `Value` is an explicit tagged union: two ordered containers (`List`,
//! `Tuple`) that are distinct runtime types, an insertion-ordered `Map`
//! keyed by hashable scalars, and the usual scalars. JSON only enters or
//! leaves at the edges (`From<serde_json::Value>`, `Value::to_json`).
pub mod key;
pub mod ty;

use std::fmt;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;

pub use key::Key;
pub use ty::Type;

// ------------------------------- Value ----------------------------------- //

#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Map(IndexMap<Key, Value>),
}

/// The two ordered container types a sequence scheme can demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    List,
    Tuple,
}

impl Container {
    pub fn ty(self) -> Type {
        match self {
            Container::List => Type::List,
            Container::Tuple => Type::Tuple,
        }
    }

    /// Rebuild a container of this kind around `elements`.
    pub fn wrap(self, elements: Vec<Value>) -> Value {
        match self {
            Container::List => Value::List(elements),
            Container::Tuple => Value::Tuple(elements),
        }
    }
}

impl Value {
    pub fn type_of(&self) -> Type {
        match self {
            Value::Null => Type::Null,
            Value::Bool(_) => Type::Bool,
            Value::Int(_) => Type::Int,
            Value::Float(_) => Type::Float,
            Value::Str(_) => Type::Str,
            Value::List(_) => Type::List,
            Value::Tuple(_) => Type::Tuple,
            Value::Map(_) => Type::Map,
        }
    }

    /// Number of chars, elements or entries; `None` for unsized values.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(xs) | Value::Tuple(xs) => Some(xs.len()),
            Value::Map(m) => Some(m.len()),
            _ => None,
        }
    }

    pub fn container(&self) -> Option<Container> {
        match self {
            Value::List(_) => Some(Container::List),
            Value::Tuple(_) => Some(Container::Tuple),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(f.0),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<Key, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Equality used when comparing a predicate's result with its fail flag:
    /// like `==`, but booleans also compare as the numbers 0 and 1, so a
    /// predicate returning `0` trips a `false` flag.
    pub fn matches_flag(&self, flag: &Value) -> bool {
        match (self, flag) {
            (Value::Bool(b), number) | (number, Value::Bool(b)) if number.as_f64().is_some() => {
                Value::Int(*b as i64) == *number
            }
            _ => self == flag,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(f.0)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Str(s) => Json::String(s.clone()),
            Value::List(xs) | Value::Tuple(xs) => {
                Json::Array(xs.iter().map(Value::to_json).collect())
            }
            Value::Map(m) => Json::Object(
                m.iter()
                    .map(|(k, v)| (k.to_string(), v.to_json()))
                    .collect(),
            ),
        }
    }

    // nested rendering: strings quoted, tuples in parens
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn seq(f: &mut fmt::Formatter<'_>, xs: &[Value], open: &str, close: &str) -> fmt::Result {
            f.write_str(open)?;
            for (i, x) in xs.iter().enumerate() {
                if i > 0 { f.write_str(", ")?; }
                x.fmt_nested(f)?;
            }
            if open == "(" && xs.len() == 1 { f.write_str(",")?; }
            f.write_str(close)
        }
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(xs) => seq(f, xs, "[", "]"),
            Value::Tuple(xs) => seq(f, xs, "(", ")"),
            Value::Map(m) => {
                f.write_str("{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    k.fmt_nested(f)?;
                    f.write_str(": ")?;
                    v.fmt_nested(f)?;
                }
                f.write_str("}")
            }
            scalar => fmt::Display::fmt(scalar, f),
        }
    }
}

/// The `i64` a float is exactly equal to, if any.
fn exact_int(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

/// Structural equality with exact int/float comparison (`1 == 1.0`, and NaN
/// equals nothing). `Bool` never equals a number here, unlike in
/// [`Value::matches_flag`].
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.0 == b.0,
            (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => {
                exact_int(f.0) == Some(*i)
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            // IndexMap equality ignores insertion order
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

/// Top-level strings render bare so they read naturally inside quoted
/// messages; anything nested renders in a compact literal form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{:?}", x.0),
            Value::Str(s) => f.write_str(s),
            nested => nested.fmt_nested(f),
        }
    }
}

// ----------------------------- Conversions ------------------------------- //

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(OrderedFloat(n.as_f64().unwrap_or(f64::NAN))),
            },
            Json::String(s) => Value::Str(s),
            Json::Array(xs) => Value::List(xs.into_iter().map(Value::from).collect()),
            Json::Object(m) => Value::Map(
                m.into_iter()
                    .map(|(k, v)| (Key::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self { Value::Int(i) }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self { Value::Int(i as i64) }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self { Value::Int(n as i64) }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self { Value::Float(OrderedFloat(f)) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Str(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::Str(s) }
}

impl From<()> for Value {
    fn from(_: ()) -> Self { Value::Null }
}

impl From<Vec<Value>> for Value {
    fn from(xs: Vec<Value>) -> Self { Value::List(xs) }
}

impl From<IndexMap<Key, Value>> for Value {
    fn from(m: IndexMap<Key, Value>) -> Self { Value::Map(m) }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Null => Value::Null,
            Key::Bool(b) => Value::Bool(b),
            Key::Int(i) => Value::Int(i),
            Key::Float(f) => Value::Float(f),
            Key::Str(s) => Value::Str(s),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
