//! Nested contract property.

use std::fmt;
use std::marker::PhantomData;

use crate::contract::Contract;
use crate::error::{Result, ValidationError};
use crate::model::{TypeTag, Value};
use crate::property::Property;

/// Wraps a nested contract type `K`.
///
/// Serialization delegates to [`Contract::to_document`]; deserialization to
/// [`Contract::from_document`]. Failures inside the nested contract
/// propagate unmodified: this property adds no path segment of its own.
pub struct ObjectProperty<K> {
    kind: PhantomData<fn() -> K>,
}

impl<K: Contract> ObjectProperty<K> {
    pub fn new() -> Self {
        Self { kind: PhantomData }
    }
}

impl<K: Contract> Default for ObjectProperty<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for ObjectProperty<K> {
    fn clone(&self) -> Self {
        Self { kind: PhantomData }
    }
}

impl<K> Copy for ObjectProperty<K> {}

impl<K> fmt::Debug for ObjectProperty<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectProperty")
            .field("kind", &std::any::type_name::<K>())
            .finish()
    }
}

impl<K: Contract> Property for ObjectProperty<K> {
    type Output = K;

    fn expected_type(&self) -> TypeTag {
        TypeTag::Object
    }

    fn serialize(&self, value: &K) -> Value {
        Value::Map(value.to_document())
    }

    fn deserialize(&self, raw: &Value) -> Result<K> {
        match raw {
            Value::Map(document) => K::from_document(document),
            other => Err(ValidationError::shape_mismatch("mapping", other.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{DocumentBuilder, FieldReader};
    use crate::error::ErrorKind;
    use crate::model::Map;
    use crate::property::{Incoming, IntegerProperty, StringProperty};

    #[derive(Debug, Clone, PartialEq)]
    struct Point {
        label: String,
        x: i64,
    }

    impl Contract for Point {
        fn from_document(document: &Map) -> Result<Self> {
            let fields = FieldReader::new(document);
            Ok(Self {
                label: fields.read("label", &StringProperty)?,
                x: fields.read("x", &IntegerProperty)?,
            })
        }

        fn to_document(&self) -> Map {
            DocumentBuilder::new()
                .field("label", &StringProperty, &self.label)
                .field("x", &IntegerProperty, &self.x)
                .build()
        }
    }

    #[test]
    fn test_roundtrip_through_document() {
        let prop = ObjectProperty::<Point>::new();
        let point = Point { label: "origin".into(), x: 0 };
        let raw = prop.serialize(&point);
        assert_eq!(prop.deserialize(&raw).unwrap(), point);
        assert_eq!(prop.expected_type(), TypeTag::Object);
    }

    #[test]
    fn test_native_instance_passes_through() {
        let prop = ObjectProperty::<Point>::new();
        let point = Point { label: "p".into(), x: 3 };
        assert_eq!(prop.accept(Incoming::Native(point.clone())).unwrap(), point);
    }

    #[test]
    fn test_nested_error_is_not_prefixed_by_object() {
        let prop = ObjectProperty::<Point>::new();
        let mut doc = Map::new();
        doc.insert("label".into(), Value::from("p"));
        doc.insert("x".into(), Value::from("left"));
        let err = prop.deserialize(&Value::Map(doc)).unwrap_err();
        // Only the contract's own field segment.
        assert_eq!(err.path(), "x");
    }

    #[test]
    fn test_non_mapping_is_shape_mismatch() {
        let prop = ObjectProperty::<Point>::new();
        let err = prop.deserialize(&Value::Int(1)).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::ShapeMismatch { expected: "mapping", found: "integer" }
        );
    }
}
