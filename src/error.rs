//! Construction and validation errors.
use std::fmt;
use thiserror::Error;

use crate::spec::Category;
use crate::value::{Key, Type};

// --------------------------- Construction ------------------------------- //

/// Raised while building a validator tree from a spec.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("element at index {index}: a {category} spec cannot be checked positionally")]
    UnsupportedPosition { index: usize, category: Category },

    #[error("duplicate rule for key '{0}'")]
    DuplicateKey(String),

    #[error("spec document at JSON path {path}: {reason}")]
    Document { path: String, reason: String },
}

// ---------------------------- Validation -------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TypeMismatch,
    ValueMismatch,
    LengthMismatch,
    PredicateFailed,
    PredicateRaised,
    PatternMismatch,
    MissingKey,
    UnknownKey,
    NoAlternative,
}

/// Shape problems (wrong type, container or length) versus content problems
/// (everything else).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Shape,
    Content,
}

impl ErrorKind {
    pub fn class(self) -> ErrorClass {
        match self {
            ErrorKind::TypeMismatch | ErrorKind::LengthMismatch => ErrorClass::Shape,
            _ => ErrorClass::Content,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::TypeMismatch => "type-mismatch",
            ErrorKind::ValueMismatch => "value-mismatch",
            ErrorKind::LengthMismatch => "length-mismatch",
            ErrorKind::PredicateFailed => "predicate-failed",
            ErrorKind::PredicateRaised => "predicate-raised",
            ErrorKind::PatternMismatch => "pattern-mismatch",
            ErrorKind::MissingKey => "missing-key",
            ErrorKind::UnknownKey => "unknown-key",
            ErrorKind::NoAlternative => "no-alternative",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the breadcrumb from the root value to the failure.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    Key(Key),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => write!(f, "at key '{k}'"),
            PathSegment::Index(i) => write!(f, "element at index {i}"),
        }
    }
}

/// A failed validation. The kind never changes while the error unwinds;
/// composite validators only prepend path segments.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    kind: ErrorKind,
    path: Vec<PathSegment>,
    message: String,
    alternatives: Vec<ValidationError>,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, path: Vec::new(), message: message.into(), alternatives: Vec::new() }
    }

    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!("expected type: '{}', got '{}'", expected.name(), actual.name()),
        )
    }

    pub fn no_alternative(alternatives: Vec<ValidationError>) -> Self {
        Self {
            alternatives,
            ..Self::new(ErrorKind::NoAlternative, "value did not pass any validation")
        }
    }

    pub fn at_key(mut self, key: Key) -> Self {
        self.path.insert(0, PathSegment::Key(key));
        self
    }

    pub fn at_index(mut self, index: usize) -> Self {
        self.path.insert(0, PathSegment::Index(index));
        self
    }

    pub fn kind(&self) -> ErrorKind { self.kind }

    /// Outermost segment first.
    pub fn path(&self) -> &[PathSegment] { &self.path }

    /// The innermost message, without path context.
    pub fn message(&self) -> &str { &self.message }

    /// Errors of each rejected alternative, in trial order. Only populated
    /// for `NoAlternative`, and never part of `Display`.
    pub fn alternatives(&self) -> &[ValidationError] { &self.alternatives }

    /// Path as a JSON-pointer-like string, e.g. `/likes/movie` or `/2`.
    pub fn pointer(&self) -> String {
        self.path
            .iter()
            .map(|seg| match seg {
                PathSegment::Key(k) => format!("/{k}"),
                PathSegment::Index(i) => format!("/{i}"),
            })
            .collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = self.message.clone();
        for seg in self.path.iter().rev() {
            out = format!("{seg} ({out})");
        }
        f.write_str(&out)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_nests_outermost_first() {
        let err = ValidationError::new(ErrorKind::ValueMismatch, "expected value '5', got '4'")
            .at_index(2)
            .at_key(Key::from("scores"));
        assert_eq!(
            err.to_string(),
            "at key 'scores' (element at index 2 (expected value '5', got '4'))"
        );
        assert_eq!(err.kind(), ErrorKind::ValueMismatch);
        assert_eq!(err.pointer(), "/scores/2");
        assert_eq!(err.path()[0], PathSegment::Key(Key::from("scores")));
    }

    #[test]
    fn no_alternative_hides_details_from_display() {
        let inner = ValidationError::type_mismatch(Type::Int, Type::Str);
        let err = ValidationError::no_alternative(vec![inner.clone()]);
        assert_eq!(err.to_string(), "value did not pass any validation");
        assert_eq!(err.alternatives(), &[inner]);
        assert_eq!(err.kind().class(), ErrorClass::Content);
    }
}
