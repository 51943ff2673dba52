//! Conjunction and disjunction over child validators.
use tracing::trace;

use super::Validator;
use crate::error::{SchemaError, ValidationError};
use crate::spec::Spec;
use crate::value::Value;

fn build_children(items: Vec<Spec>) -> Result<Vec<Validator>, SchemaError> {
    items.into_iter().map(Validator::create).collect()
}

/// Every child must accept the value. The value is threaded through the
/// children in order, so defaults filled in by a nested mapping survive.
#[derive(Debug, Clone)]
pub struct AllValidator {
    children: Vec<Validator>,
}

impl AllValidator {
    pub fn new(items: Vec<Spec>) -> Result<Self, SchemaError> {
        Ok(Self { children: build_children(items)? })
    }

    pub fn children(&self) -> &[Validator] { &self.children }

    /// The first failing child's error is returned as is.
    pub fn validate(&self, value: Value) -> Result<Value, ValidationError> {
        self.children
            .iter()
            .try_fold(value, |value, child| child.validate(value))
    }
}

/// The first child to accept the value wins.
#[derive(Debug, Clone)]
pub struct AnyValidator {
    children: Vec<Validator>,
}

impl AnyValidator {
    pub fn new(items: Vec<Spec>) -> Result<Self, SchemaError> {
        Ok(Self { children: build_children(items)? })
    }

    pub fn children(&self) -> &[Validator] { &self.children }

    /// Individual failures are swallowed; if nothing matches the result is a
    /// single `NoAlternative` error that keeps the rejected attempts only as
    /// diagnostics.
    pub fn validate(&self, value: Value) -> Result<Value, ValidationError> {
        let mut rejected = Vec::with_capacity(self.children.len());
        for (i, child) in self.children.iter().enumerate() {
            match child.validate(value.clone()) {
                Ok(validated) => return Ok(validated),
                Err(error) => {
                    trace!(alternative = i, %error, "alternative rejected");
                    rejected.push(error);
                }
            }
        }
        Err(ValidationError::no_alternative(rejected))
    }
}
