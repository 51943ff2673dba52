//! Declarative shape validation for in-memory values.
//!
//! Describe the expected shape once as a [`Spec`], build a [`Scheme`] from
//! it, then validate any number of values against it:
//!
//! ```
//! use schemes::{Scheme, Spec, Type, Value};
//!
//! let scheme = Scheme::new(Spec::mapping([
//!     ("name", Spec::from(Type::Str)),
//!     ("likes", Spec::optional(Type::Map, Value::Map(Default::default()))),
//! ]))
//! .unwrap();
//!
//! let person = Value::from(serde_json::json!({"name": "bob"}));
//! let person = scheme.validate(person).unwrap();
//! assert_eq!(person, Value::from(serde_json::json!({"name": "bob", "likes": {}})));
//! ```
//!
//! Failures carry a kind and a breadcrumb path, e.g.
//! `at key 'phone' (expected type: 'str', got 'int')`.
pub mod cli;
pub mod document;
pub mod error;
pub mod jq_exec;
pub mod spec;
pub mod validator;
pub mod value;

use rayon::prelude::*;
use tracing::debug;

pub use error::{ErrorClass, ErrorKind, PathSegment, SchemaError, ValidationError};
pub use spec::{Category, MapKey, Predicate, Spec};
pub use validator::Validator;
pub use value::{Container, Key, Type, Value};

/// A validator tree built once from a spec and reused for every value.
///
/// The tree is immutable and `Send + Sync`. Values are moved in and handed
/// back, so default backfill never touches data shared with another caller.
#[derive(Debug, Clone)]
pub struct Scheme {
    root: Validator,
}

pub type Schema = Scheme;

impl Scheme {
    pub fn new(spec: Spec) -> Result<Self, SchemaError> {
        let category = spec.category();
        let root = Validator::create(spec)?;
        debug!(%category, tree = %root, "built scheme");
        Ok(Self { root })
    }

    pub fn validate(&self, value: Value) -> Result<Value, ValidationError> {
        self.root.validate(value)
    }

    /// Validate independent values in parallel. Results keep input order.
    pub fn validate_many(&self, values: Vec<Value>) -> Vec<Result<Value, ValidationError>> {
        values
            .into_par_iter()
            .map(|value| self.validate(value))
            .collect()
    }

    pub fn validator(&self) -> &Validator {
        &self.root
    }
}

impl From<Validator> for Scheme {
    fn from(root: Validator) -> Self {
        Self { root }
    }
}
