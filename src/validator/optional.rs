use super::TypeValidator;
use crate::error::ValidationError;
use crate::value::{Type, Value};

/// A type check that carries a default. Called with a value it type-checks
/// it; called with nothing it yields the default unchecked. Mappings use the
/// latter to backfill absent keys.
#[derive(Debug, Clone)]
pub struct OptionalValidator {
    check: TypeValidator,
    default: Value,
}

impl OptionalValidator {
    pub fn new(ty: Type, default: Value) -> Self {
        Self { check: TypeValidator::new(ty), default }
    }

    pub fn ty(&self) -> Type { self.check.ty() }

    pub fn default_value(&self) -> &Value { &self.default }

    pub fn validate(&self, value: Option<Value>) -> Result<Value, ValidationError> {
        match value {
            Some(value) => self.check.check(&value).map(|_| value),
            None => Ok(self.default.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn checks_a_value_or_yields_the_default() {
        let optional = OptionalValidator::new(Type::Str, Value::from("hello"));
        assert_eq!(optional.validate(Some("world".into())).unwrap(), Value::from("world"));
        assert_eq!(optional.validate(None).unwrap(), Value::from("hello"));
        let err = optional.validate(Some(10.into())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn the_default_is_not_type_checked() {
        let optional = OptionalValidator::new(Type::Int, Value::Null);
        assert_eq!(optional.validate(None).unwrap(), Value::Null);
    }
}
