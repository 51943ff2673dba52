//! Declarative specs: what a value is expected to look like.
//!
//! A `Spec` is written by the schema author as an explicit tagged union;
//! nothing is inferred from the runtime shape of a value. `Spec::category`
//! reports which of the six classes a spec falls into, and the validator
//! factory dispatches in that same precedence.
use std::fmt;
use std::sync::Arc;

use crate::validator::Validator;
use crate::value::{Container, Key, Type, Value};

// ------------------------------ Predicate -------------------------------- //

pub type PredicateFn = dyn Fn(&Value) -> anyhow::Result<Value> + Send + Sync;

/// A named check function. Validation fails when the function's result
/// equals `fail_flag` (`false` unless changed), not when it is "falsy".
#[derive(Clone)]
pub struct Predicate {
    name: String,
    func: Arc<PredicateFn>,
    fail_flag: Value,
}

impl Predicate {
    pub fn new<F, R>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self::fallible(name, move |v| Ok(func(v)))
    }

    /// A predicate that may itself error; such errors surface as
    /// `ErrorKind::PredicateRaised`.
    pub fn fallible<F, R>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> anyhow::Result<R> + Send + Sync + 'static,
        R: Into<Value>,
    {
        let func: Arc<PredicateFn> =
            Arc::new(move |v: &Value| -> anyhow::Result<Value> { func(v).map(Into::into) });
        Self { name: name.into(), func, fail_flag: Value::Bool(false) }
    }

    pub fn with_fail_flag(mut self, flag: impl Into<Value>) -> Self {
        self.fail_flag = flag.into();
        self
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn fail_flag(&self) -> &Value { &self.fail_flag }

    pub fn call(&self, value: &Value) -> anyhow::Result<Value> {
        (self.func)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("name", &self.name)
            .field("fail_flag", &self.fail_flag)
            .finish_non_exhaustive()
    }
}

// -------------------------------- Spec ----------------------------------- //

/// Key side of a mapping rule.
#[derive(Debug, Clone, PartialEq)]
pub enum MapKey {
    /// A literal key. Required unless its rule is `Optional`.
    Exact(Key),
    /// Catch-all for any present key of this concrete type. Never required.
    OfType(Type),
}

#[derive(Debug, Clone)]
pub enum Spec {
    Literal(Value),
    Type(Type),
    Predicate(Predicate),
    /// Whole-string regular expression.
    Pattern(String),
    Sequence {
        container: Container,
        items: Vec<Spec>,
        ignore_type: bool,
    },
    Mapping {
        rules: Vec<(MapKey, Spec)>,
        ignore_unknown: bool,
    },
    /// An already-built node, used as is.
    Validator(Validator),
    All(Vec<Spec>),
    Any(Vec<Spec>),
    Optional {
        ty: Type,
        default: Value,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Sequence,
    Mapping,
    Type,
    Validator,
    Predicate,
    Literal,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Sequence => "sequence",
            Category::Mapping => "mapping",
            Category::Type => "type",
            Category::Validator => "validator",
            Category::Predicate => "predicate",
            Category::Literal => "literal",
        })
    }
}

impl Spec {
    /// Classification, checked in fixed precedence: containers, then types,
    /// then validator objects (the combinators, optional and pattern
    /// wrappers included), then callables, then literals.
    pub fn category(&self) -> Category {
        match self {
            Spec::Sequence { .. } => Category::Sequence,
            Spec::Mapping { .. } => Category::Mapping,
            Spec::Type(_) => Category::Type,
            Spec::Validator(_)
            | Spec::All(_)
            | Spec::Any(_)
            | Spec::Optional { .. }
            | Spec::Pattern(_) => Category::Validator,
            Spec::Predicate(_) => Category::Predicate,
            Spec::Literal(_) => Category::Literal,
        }
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Spec::Literal(value.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Spec>,
    {
        Self::sequence(Container::List, items)
    }

    pub fn tuple<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Spec>,
    {
        Self::sequence(Container::Tuple, items)
    }

    pub fn sequence<I, S>(container: Container, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Spec>,
    {
        Spec::Sequence {
            container,
            items: items.into_iter().map(Into::into).collect(),
            ignore_type: false,
        }
    }

    pub fn mapping<I, K, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<MapKey>,
        S: Into<Spec>,
    {
        Spec::Mapping {
            rules: rules.into_iter().map(|(k, s)| (k.into(), s.into())).collect(),
            ignore_unknown: false,
        }
    }

    pub fn all<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Spec>,
    {
        Spec::All(items.into_iter().map(Into::into).collect())
    }

    pub fn any<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Spec>,
    {
        Spec::Any(items.into_iter().map(Into::into).collect())
    }

    pub fn optional(ty: Type, default: impl Into<Value>) -> Self {
        Spec::Optional { ty, default: default.into() }
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Spec::Pattern(pattern.into())
    }

    pub fn predicate<F, R>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        Spec::Predicate(Predicate::new(name, func))
    }

    pub fn try_predicate<F, R>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> anyhow::Result<R> + Send + Sync + 'static,
        R: Into<Value>,
    {
        Spec::Predicate(Predicate::fallible(name, func))
    }

    /// Accept either container type in a sequence spec. No-op on other specs.
    pub fn ignore_type(mut self) -> Self {
        if let Spec::Sequence { ignore_type, .. } = &mut self {
            *ignore_type = true;
        }
        self
    }

    /// Skip keys with no matching rule in a mapping spec. No-op on other specs.
    pub fn ignore_unknown(mut self) -> Self {
        if let Spec::Mapping { ignore_unknown, .. } = &mut self {
            *ignore_unknown = true;
        }
        self
    }
}

// ----------------------------- Conversions ------------------------------- //

impl From<Type> for Spec {
    fn from(ty: Type) -> Self { Spec::Type(ty) }
}

impl From<Value> for Spec {
    fn from(value: Value) -> Self { Spec::Literal(value) }
}

impl From<Validator> for Spec {
    fn from(validator: Validator) -> Self { Spec::Validator(validator) }
}

impl From<Predicate> for Spec {
    fn from(predicate: Predicate) -> Self { Spec::Predicate(predicate) }
}

impl From<&str> for Spec {
    fn from(s: &str) -> Self { Spec::Literal(s.into()) }
}

impl From<i64> for Spec {
    fn from(i: i64) -> Self { Spec::Literal(i.into()) }
}

impl From<i32> for Spec {
    fn from(i: i32) -> Self { Spec::Literal(i.into()) }
}

impl From<f64> for Spec {
    fn from(f: f64) -> Self { Spec::Literal(f.into()) }
}

impl From<bool> for Spec {
    fn from(b: bool) -> Self { Spec::Literal(b.into()) }
}

impl From<Key> for MapKey {
    fn from(key: Key) -> Self { MapKey::Exact(key) }
}

impl From<Type> for MapKey {
    fn from(ty: Type) -> Self { MapKey::OfType(ty) }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self { MapKey::Exact(s.into()) }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self { MapKey::Exact(s.into()) }
}

impl From<i64> for MapKey {
    fn from(i: i64) -> Self { MapKey::Exact(i.into()) }
}

impl From<i32> for MapKey {
    fn from(i: i32) -> Self { MapKey::Exact(i.into()) }
}
