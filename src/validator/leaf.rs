//! Terminal checks. Each borrows the value and never changes it.
use regex::Regex;

use crate::error::{ErrorKind, SchemaError, ValidationError};
use crate::spec::Predicate;
use crate::value::{Type, Value};

#[derive(Debug, Clone)]
pub struct TypeValidator {
    ty: Type,
}

impl TypeValidator {
    pub fn new(ty: Type) -> Self { Self { ty } }

    pub fn ty(&self) -> Type { self.ty }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        if self.ty.accepts(value) {
            Ok(())
        } else {
            Err(ValidationError::type_mismatch(self.ty, value.type_of()))
        }
    }
}

#[derive(Debug, Clone)]
pub struct LiteralValidator {
    expected: Value,
}

impl LiteralValidator {
    pub fn new(expected: Value) -> Self { Self { expected } }

    pub fn expected(&self) -> &Value { &self.expected }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        if *value == self.expected {
            return Ok(());
        }
        Err(ValidationError::new(
            ErrorKind::ValueMismatch,
            format!("expected value '{}', got '{}'", self.expected, value),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct LengthValidator {
    length: usize,
}

impl LengthValidator {
    pub fn new(length: usize) -> Self { Self { length } }

    pub fn length(&self) -> usize { self.length }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match value.len() {
            Some(actual) if actual == self.length => Ok(()),
            Some(actual) => Err(ValidationError::new(
                ErrorKind::LengthMismatch,
                format!("expected length '{}', got '{}'", self.length, actual),
            )),
            None => Err(ValidationError::new(
                ErrorKind::TypeMismatch,
                format!("expected a sized value, got '{}'", value.type_of().name()),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PredicateValidator {
    predicate: Predicate,
}

impl PredicateValidator {
    pub fn new(predicate: Predicate) -> Self { Self { predicate } }

    pub fn predicate(&self) -> &Predicate { &self.predicate }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let name = self.predicate.name();
        match self.predicate.call(value) {
            Err(error) => Err(ValidationError::new(
                ErrorKind::PredicateRaised,
                format!("validator '{name}' raised for value '{value}': {error:#}"),
            )),
            Ok(result) if result.matches_flag(self.predicate.fail_flag()) => Err(ValidationError::new(
                ErrorKind::PredicateFailed,
                format!("validator '{name}' failed for value '{value}'"),
            )),
            Ok(_) => Ok(()),
        }
    }
}

/// Whole-string regex match on `Str` values.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    pattern: String,
    regex: Regex,
}

impl PatternValidator {
    pub fn new(pattern: &str) -> Result<Self, SchemaError> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .or_else(|err| match enables_verbose(pattern) {
                // a trailing `# comment` in verbose mode swallows the closing `)$`
                true => Regex::new(&format!("^(?:{pattern}\n)$")),
                false => Err(err),
            })
            .map_err(|source| SchemaError::InvalidPattern { pattern: pattern.to_string(), source })?;
        Ok(Self { pattern: pattern.to_string(), regex })
    }

    pub fn pattern(&self) -> &str { &self.pattern }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let Some(s) = value.as_str() else {
            return Err(ValidationError::type_mismatch(Type::Str, value.type_of()));
        };
        if self.regex.is_match(s) {
            return Ok(());
        }
        Err(ValidationError::new(
            ErrorKind::PatternMismatch,
            format!("value '{s}' does not match pattern '{}'", self.pattern),
        ))
    }
}

fn enables_verbose(pattern: &str) -> bool {
    pattern.match_indices("(?").any(|(i, _)| {
        pattern[i + 2..].chars().take_while(|c| c.is_ascii_alphabetic()).any(|c| c == 'x')
    })
}
