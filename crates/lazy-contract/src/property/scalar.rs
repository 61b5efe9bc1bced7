//! Scalar properties: leaf coercions to and from primitive domain types.

use std::collections::BTreeSet;

use crate::error::{Result, ValidationError};
use crate::model::{Float, TypeTag, Value};
use crate::property::Property;

/// Coerces any raw value to its textual representation. Never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringProperty;

impl Property for StringProperty {
    type Output = String;

    fn expected_type(&self) -> TypeTag {
        TypeTag::String
    }

    fn serialize(&self, value: &String) -> Value {
        Value::Text(value.clone())
    }

    fn deserialize(&self, raw: &Value) -> Result<String> {
        Ok(match raw {
            Value::Text(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Strings read as `true` only when they equal `"true"` ignoring case;
/// every other raw value is coerced by truthiness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanProperty;

impl Property for BooleanProperty {
    type Output = bool;

    fn expected_type(&self) -> TypeTag {
        TypeTag::Boolean
    }

    fn serialize(&self, value: &bool) -> Value {
        Value::Bool(*value)
    }

    fn deserialize(&self, raw: &Value) -> Result<bool> {
        Ok(match raw {
            Value::Text(s) => s.eq_ignore_ascii_case("true"),
            other => other.truthy(),
        })
    }
}

/// 64-bit signed integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerProperty;

impl Property for IntegerProperty {
    type Output = i64;

    fn expected_type(&self) -> TypeTag {
        TypeTag::Integer
    }

    fn serialize(&self, value: &i64) -> Value {
        Value::Int(*value)
    }

    fn deserialize(&self, raw: &Value) -> Result<i64> {
        match raw {
            Value::Int(i) => Ok(*i),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Float(x) => {
                truncate_float(*x).ok_or_else(|| coercion_failure(TypeTag::Integer, raw))
            }
            Value::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| coercion_failure(TypeTag::Integer, raw)),
            _ => Err(coercion_failure(TypeTag::Integer, raw)),
        }
    }
}

/// 64-bit IEEE 754 float, carried as [`Float`] so that it can be a set
/// element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatProperty;

impl Property for FloatProperty {
    type Output = Float;

    fn expected_type(&self) -> TypeTag {
        TypeTag::Float
    }

    fn serialize(&self, value: &Float) -> Value {
        Value::Float(value.get())
    }

    fn deserialize(&self, raw: &Value) -> Result<Float> {
        let x = match raw {
            Value::Float(x) => *x,
            Value::Int(i) => *i as f64,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| coercion_failure(TypeTag::Float, raw))?,
            _ => return Err(coercion_failure(TypeTag::Float, raw)),
        };
        Ok(Float(x))
    }
}

/// Truncates toward zero. Non-finite and out-of-range floats yield `None`.
fn truncate_float(x: f64) -> Option<i64> {
    let t = x.trunc();
    // i64::MAX as f64 rounds up to 2^63, hence the strict bound.
    if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

fn coercion_failure(expected: TypeTag, raw: &Value) -> ValidationError {
    let found = match raw {
        Value::Text(s) => format!("{:?}", s),
        other => format!("{} {}", other.kind(), other),
    };
    ValidationError::coercion(expected, found)
}

/// A string restricted to a fixed set of permitted values.
///
/// `null` is always accepted and reads as `None`. Matching is exact; no
/// case normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationProperty {
    options: BTreeSet<String>,
}

impl EnumerationProperty {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn options(&self) -> &BTreeSet<String> {
        &self.options
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.contains(value)
    }

    fn rejection(&self, value: String) -> ValidationError {
        ValidationError::membership(value, self.options.iter().cloned().collect())
    }
}

impl Property for EnumerationProperty {
    type Output = Option<String>;

    fn expected_type(&self) -> TypeTag {
        TypeTag::String
    }

    fn serialize(&self, value: &Option<String>) -> Value {
        value.clone().map_or(Value::Null, Value::Text)
    }

    fn deserialize(&self, raw: &Value) -> Result<Option<String>> {
        match raw {
            Value::Null => Ok(None),
            Value::Text(s) if self.contains(s) => Ok(Some(s.clone())),
            Value::Text(s) => Err(self.rejection(s.clone())),
            other => Err(self.rejection(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    #[test]
    fn test_string_coercion() {
        let prop = StringProperty;
        assert_eq!(prop.deserialize(&Value::from("abc")).unwrap(), "abc");
        assert_eq!(prop.deserialize(&Value::Int(12)).unwrap(), "12");
        assert_eq!(prop.deserialize(&Value::Float(1.5)).unwrap(), "1.5");
        assert_eq!(prop.deserialize(&Value::Bool(false)).unwrap(), "false");
        assert_eq!(prop.deserialize(&Value::Null).unwrap(), "null");
        assert_eq!(
            prop.deserialize(&Value::List(vec![Value::Int(1), Value::Int(2)])).unwrap(),
            "[1, 2]"
        );
    }

    #[test]
    fn test_boolean_strings() {
        let prop = BooleanProperty;
        assert!(prop.deserialize(&Value::from("True")).unwrap());
        assert!(prop.deserialize(&Value::from("TRUE")).unwrap());
        assert!(!prop.deserialize(&Value::from("false")).unwrap());
        assert!(!prop.deserialize(&Value::from("yes")).unwrap());
        assert!(!prop.deserialize(&Value::from("1")).unwrap());
        assert!(!prop.deserialize(&Value::from("")).unwrap());
    }

    #[test]
    fn test_boolean_truthiness() {
        let prop = BooleanProperty;
        assert!(prop.deserialize(&Value::Bool(true)).unwrap());
        assert!(prop.deserialize(&Value::Int(2)).unwrap());
        assert!(!prop.deserialize(&Value::Int(0)).unwrap());
        assert!(!prop.deserialize(&Value::Null).unwrap());
        assert!(prop.deserialize(&Value::List(vec![Value::Null])).unwrap());
    }

    #[test]
    fn test_integer_coercion() {
        let prop = IntegerProperty;
        assert_eq!(prop.deserialize(&Value::Int(5)).unwrap(), 5);
        assert_eq!(prop.deserialize(&Value::from(" 42 ")).unwrap(), 42);
        assert_eq!(prop.deserialize(&Value::from("-7")).unwrap(), -7);
        assert_eq!(prop.deserialize(&Value::Float(3.9)).unwrap(), 3);
        assert_eq!(prop.deserialize(&Value::Float(-3.9)).unwrap(), -3);
        assert_eq!(prop.deserialize(&Value::Bool(true)).unwrap(), 1);
    }

    #[test]
    fn test_integer_rejects() {
        let prop = IntegerProperty;
        for raw in [
            Value::from("x"),
            Value::from("1.5"),
            Value::Null,
            Value::Float(f64::NAN),
            Value::Float(1e300),
            Value::List(vec![]),
        ] {
            let err = prop.deserialize(&raw).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::Coercion { expected: TypeTag::Integer, .. }),
                "{raw:?} should not coerce"
            );
            assert_eq!(err.path(), "");
        }
    }

    #[test]
    fn test_float_coercion() {
        let prop = FloatProperty;
        assert_eq!(prop.deserialize(&Value::Float(2.5)).unwrap(), 2.5);
        assert_eq!(prop.deserialize(&Value::Int(2)).unwrap(), 2.0);
        assert_eq!(prop.deserialize(&Value::from("0.25")).unwrap(), 0.25);
        assert!(prop.deserialize(&Value::from("abc")).is_err());
        assert!(prop.deserialize(&Value::Map(Default::default())).is_err());
    }

    #[test]
    fn test_coercion_message() {
        let err = IntegerProperty.deserialize(&Value::from("x")).unwrap_err();
        assert_eq!(err.to_string(), "[E001] cannot coerce \"x\" to integer");
    }

    #[test]
    fn test_enumeration() {
        let prop = EnumerationProperty::new(["a", "b"]);
        assert_eq!(prop.deserialize(&Value::from("a")).unwrap(), Some("a".to_string()));
        assert_eq!(prop.deserialize(&Value::Null).unwrap(), None);

        let err = prop.deserialize(&Value::from("c")).unwrap_err();
        match err.kind() {
            ErrorKind::Membership { value, options } => {
                assert_eq!(value, "c");
                assert_eq!(options, &vec!["a".to_string(), "b".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // No case normalization.
        assert!(prop.deserialize(&Value::from("A")).is_err());
        assert!(prop.deserialize(&Value::Int(1)).is_err());

        assert_eq!(prop.serialize(&Some("b".into())), Value::from("b"));
        assert_eq!(prop.serialize(&None), Value::Null);
    }

    proptest! {
        #[test]
        fn prop_string_roundtrip(s in ".*") {
            let prop = StringProperty;
            prop_assert_eq!(prop.deserialize(&prop.serialize(&s)).unwrap(), s);
        }

        #[test]
        fn prop_integer_roundtrip(i in any::<i64>()) {
            let prop = IntegerProperty;
            prop_assert_eq!(prop.deserialize(&prop.serialize(&i)).unwrap(), i);
        }

        #[test]
        fn prop_integer_parses_own_text(i in any::<i64>()) {
            prop_assert_eq!(IntegerProperty.deserialize(&Value::Text(i.to_string())).unwrap(), i);
        }

        #[test]
        fn prop_float_roundtrip(x in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
            let prop = FloatProperty;
            prop_assert_eq!(prop.deserialize(&prop.serialize(&Float(x))).unwrap(), x);
        }
    }
}
