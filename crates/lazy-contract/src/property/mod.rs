//! Property kinds: the per-field serialize/deserialize contract.
//!
//! A property converts between a raw document [`Value`] and a typed domain
//! value. Scalars terminate recursion; [`ObjectProperty`] recurses into a
//! nested [`Contract`](crate::contract::Contract) and the container kinds
//! recurse element-wise into an inner property.
//!
//! Property descriptors are immutable once built and hold no interior
//! mutability, so a single descriptor can be shared across threads and
//! used by any number of concurrent calls.

pub mod container;
pub mod object;
pub mod scalar;

pub use container::{Container, DictProperty, ListProperty, SetProperty};
pub use object::ObjectProperty;
pub use scalar::{
    BooleanProperty, EnumerationProperty, FloatProperty, IntegerProperty, StringProperty,
};

use crate::error::Result;
use crate::model::{TypeTag, Value};

/// Input to [`Property::accept`]: either a raw document value or a domain
/// value that is already of the property's output type.
#[derive(Debug, Clone, PartialEq)]
pub enum Incoming<T> {
    Document(Value),
    Native(T),
}

impl<T> From<Value> for Incoming<T> {
    fn from(value: Value) -> Self {
        Incoming::Document(value)
    }
}

/// A single field's type contract.
pub trait Property {
    /// The domain value produced by deserialization.
    type Output;

    /// The type tag this property coerces to.
    fn expected_type(&self) -> TypeTag;

    /// Projects a domain value back into the document representation.
    fn serialize(&self, value: &Self::Output) -> Value;

    /// Coerces a raw value into the domain type.
    fn deserialize(&self, raw: &Value) -> Result<Self::Output>;

    /// True only for a property whose deserialize and serialize both return
    /// their input unchanged.
    fn is_identity(&self) -> bool {
        false
    }

    /// Like [`deserialize`](Property::deserialize), but a value that is
    /// already of the output type is returned unchanged.
    fn accept(&self, incoming: Incoming<Self::Output>) -> Result<Self::Output> {
        match incoming {
            Incoming::Native(value) => Ok(value),
            Incoming::Document(raw) => self.deserialize(&raw),
        }
    }
}

impl<P: Property + ?Sized> Property for &P {
    type Output = P::Output;

    fn expected_type(&self) -> TypeTag {
        (**self).expected_type()
    }

    fn serialize(&self, value: &Self::Output) -> Value {
        (**self).serialize(value)
    }

    fn deserialize(&self, raw: &Value) -> Result<Self::Output> {
        (**self).deserialize(raw)
    }

    fn is_identity(&self) -> bool {
        (**self).is_identity()
    }
}

/// The identity property. Containers built without an inner property use
/// this, so raw elements pass through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Passthrough;

impl Property for Passthrough {
    type Output = Value;

    fn expected_type(&self) -> TypeTag {
        TypeTag::Any
    }

    fn serialize(&self, value: &Value) -> Value {
        value.clone()
    }

    fn deserialize(&self, raw: &Value) -> Result<Value> {
        Ok(raw.clone())
    }

    fn is_identity(&self) -> bool {
        true
    }
}

/// Makes a property nullable: `null` reads as `None`, anything else is
/// delegated to the wrapped property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionalProperty<P> {
    inner: P,
}

impl<P: Property> OptionalProperty<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: Property> Property for OptionalProperty<P> {
    type Output = Option<P::Output>;

    fn expected_type(&self) -> TypeTag {
        self.inner.expected_type()
    }

    fn serialize(&self, value: &Self::Output) -> Value {
        match value {
            Some(v) => self.inner.serialize(v),
            None => Value::Null,
        }
    }

    fn deserialize(&self, raw: &Value) -> Result<Self::Output> {
        if raw.is_null() {
            return Ok(None);
        }
        self.inner.deserialize(raw).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_passthrough_is_identity() {
        let raw = Value::List(vec![Value::Int(1), Value::from("two")]);
        assert_eq!(Passthrough.deserialize(&raw).unwrap(), raw);
        assert_eq!(Passthrough.serialize(&raw), raw);
        assert_eq!(Passthrough.expected_type(), TypeTag::Any);
        assert!(Passthrough.is_identity());
        assert!((&Passthrough).is_identity());
    }

    #[test]
    fn test_optional_passthrough_is_not_identity() {
        let prop = OptionalProperty::new(Passthrough);
        assert_eq!(prop.expected_type(), TypeTag::Any);
        assert!(!prop.is_identity());
        assert_eq!(prop.deserialize(&Value::Null).unwrap(), None);
    }

    #[test]
    fn test_accept_native_skips_coercion() {
        let prop = IntegerProperty;
        assert_eq!(prop.accept(Incoming::Native(7)).unwrap(), 7);
        assert_eq!(prop.accept(Value::from("8").into()).unwrap(), 8);
    }

    #[test]
    fn test_optional_property() {
        let prop = OptionalProperty::new(IntegerProperty);
        assert_eq!(prop.deserialize(&Value::Null).unwrap(), None);
        assert_eq!(prop.deserialize(&Value::from("5")).unwrap(), Some(5));
        assert_eq!(prop.serialize(&None), Value::Null);
        assert_eq!(prop.serialize(&Some(5)), Value::Int(5));

        let err = prop.deserialize(&Value::from("five")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Coercion { .. }));
        assert_eq!(err.path(), "");
    }

    #[test]
    fn test_reference_delegates() {
        fn read<P: Property>(prop: P, raw: &Value) -> Result<P::Output> {
            prop.deserialize(raw)
        }

        let prop = StringProperty;
        assert_eq!(read(&prop, &Value::Int(3)).unwrap(), "3");
        assert_eq!(read(&&prop, &Value::Bool(true)).unwrap(), "true");
    }
}
