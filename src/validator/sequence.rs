//! Positional checks over lists and tuples.
use super::{LengthValidator, LiteralValidator, TypeValidator, Validator};
use crate::error::{SchemaError, ValidationError};
use crate::spec::Spec;
use crate::value::{Container, Type, Value};

/// Fixed-arity positional validator.
///
/// Positions hold type or literal checks, or a check-style node (All, Any,
/// predicate, pattern, pre-built validator). Nested sequence, mapping and
/// optional specs are not expanded positionally and are rejected when the
/// validator is built.
#[derive(Debug, Clone)]
pub struct SequenceValidator {
    container: Container,
    ignore_type: bool,
    length: LengthValidator,
    positions: Vec<Validator>,
}

impl SequenceValidator {
    pub fn new(container: Container, items: Vec<Spec>, ignore_type: bool) -> Result<Self, SchemaError> {
        let positions = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Spec::Type(ty) => Ok(Validator::Type(TypeValidator::new(ty))),
                Spec::Literal(value) => Ok(Validator::Literal(LiteralValidator::new(value))),
                nested @ (Spec::Sequence { .. } | Spec::Mapping { .. } | Spec::Optional { .. }) => {
                    Err(SchemaError::UnsupportedPosition { index, category: nested.category() })
                }
                check => Validator::create(check),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            container,
            ignore_type,
            length: LengthValidator::new(positions.len()),
            positions,
        })
    }

    pub fn container(&self) -> Container { self.container }

    pub fn ignores_type(&self) -> bool { self.ignore_type }

    pub fn positions(&self) -> &[Validator] { &self.positions }

    /// The container type a value must have: the spec's own, or any
    /// sequence when the container type is ignored.
    pub fn expected_type(&self) -> Type {
        if self.ignore_type { Type::Sequence } else { self.container.ty() }
    }

    /// Returns a fresh container of the input's own kind holding the
    /// validated elements.
    pub fn validate(&self, value: Value) -> Result<Value, ValidationError> {
        let expected = self.expected_type();
        if !expected.accepts(&value) {
            return Err(ValidationError::type_mismatch(expected, value.type_of()));
        }
        self.length.check(&value)?;
        let (container, elements) = match value {
            Value::List(xs) => (Container::List, xs),
            Value::Tuple(xs) => (Container::Tuple, xs),
            other => return Err(ValidationError::type_mismatch(expected, other.type_of())),
        };
        let validated = elements
            .into_iter()
            .zip(&self.positions)
            .enumerate()
            .map(|(i, (element, position))| position.validate(element).map_err(|e| e.at_index(i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(container.wrap(validated))
    }
}
