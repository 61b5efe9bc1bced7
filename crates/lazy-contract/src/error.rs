//! Error types for property deserialization.
//!
//! Every failure surfaces as a [`ValidationError`]: an [`ErrorKind`] raised at
//! the leaf plus a structural path that grows by one locator per enclosing
//! frame as the error unwinds.

use thiserror::Error;

use crate::model::TypeTag;

/// Stable error codes, one per [`ErrorKind`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Scalar could not be coerced to its declared type
    Coercion,
    /// E002: Enumeration value outside the permitted set
    Membership,
    /// E003: Raw value has the wrong gross shape
    ShapeMismatch,
    /// E004: Failure reported by a contract implementation
    Contract,
    /// E005: Required field absent from the document
    Missing,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::Coercion => "E001",
            ErrorCode::Membership => "E002",
            ErrorCode::ShapeMismatch => "E003",
            ErrorCode::Contract => "E004",
            ErrorCode::Missing => "E005",
        }
    }
}

/// What went wrong at the leaf.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    #[error("[E001] cannot coerce {found} to {expected}")]
    Coercion { expected: TypeTag, found: String },

    #[error("[E002] enumeration option {value} not in accepted options: {options:?}")]
    Membership { value: String, options: Vec<String> },

    #[error("[E003] expected {expected}, found {found}")]
    ShapeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("[E004] {0}")]
    Contract(String),

    #[error("[E005] required field is missing")]
    Missing,
}

impl ErrorKind {
    /// Returns the error code for this kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            ErrorKind::Coercion { .. } => ErrorCode::Coercion,
            ErrorKind::Membership { .. } => ErrorCode::Membership,
            ErrorKind::ShapeMismatch { .. } => ErrorCode::ShapeMismatch,
            ErrorKind::Contract(_) => ErrorCode::Contract,
            ErrorKind::Missing => ErrorCode::Missing,
        }
    }
}

/// A deserialization failure annotated with the path at which it occurred.
///
/// The path starts empty ("at this property") and is extended outward:
/// containers prepend `[index]` or `[key]`, contracts prepend the field
/// name. A segment is joined to a non-empty existing path with `.`, so a
/// failure two lists deep reads `[1].[0]` and one inside a field of a list
/// element reads `[2].name`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}{}", located(.path), .kind)]
pub struct ValidationError {
    kind: ErrorKind,
    path: String,
}

impl ValidationError {
    /// Creates an error with an empty path.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: String::new(),
        }
    }

    pub fn coercion(expected: TypeTag, found: impl Into<String>) -> Self {
        Self::new(ErrorKind::Coercion {
            expected,
            found: found.into(),
        })
    }

    pub fn membership(value: impl Into<String>, options: Vec<String>) -> Self {
        Self::new(ErrorKind::Membership {
            value: value.into(),
            options,
        })
    }

    pub fn shape_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::new(ErrorKind::ShapeMismatch { expected, found })
    }

    /// Creates an error for a contract-level failure that is not tied to a
    /// single property (e.g. a constructor precondition).
    pub fn contract(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Contract(message.into()))
    }

    pub fn missing() -> Self {
        Self::new(ErrorKind::Missing)
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// The accumulated structural path; empty when the failure is at the
    /// property that reported it.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The human-readable message without the path.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Prepends a sequence index locator (`[i]`).
    pub fn at_index(self, index: usize) -> Self {
        self.prefixed(format!("[{}]", index))
    }

    /// Prepends a mapping key locator (`[key]`, the literal key).
    pub fn at_key(self, key: &str) -> Self {
        self.prefixed(format!("[{}]", key))
    }

    /// Prepends a contract field name.
    pub fn at_field(self, name: &str) -> Self {
        self.prefixed(name.to_owned())
    }

    fn prefixed(self, mut segment: String) -> Self {
        if !self.path.is_empty() {
            segment.push('.');
            segment.push_str(&self.path);
        }
        Self {
            kind: self.kind,
            path: segment,
        }
    }
}

fn located(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!("{}: ", path)
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = ValidationError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_on_empty_path() {
        let err = ValidationError::coercion(TypeTag::Integer, "\"x\"").at_index(1);
        assert_eq!(err.path(), "[1]");
    }

    #[test]
    fn test_nested_locators_join_with_dot() {
        let err = ValidationError::coercion(TypeTag::Integer, "\"x\"")
            .at_index(0)
            .at_index(1);
        assert_eq!(err.path(), "[1].[0]");

        let err = ValidationError::coercion(TypeTag::Integer, "\"x\"")
            .at_index(3)
            .at_key("key");
        assert_eq!(err.path(), "[key].[3]");

        let err = ValidationError::coercion(TypeTag::String, "null")
            .at_field("name")
            .at_index(2);
        assert_eq!(err.path(), "[2].name");
    }

    #[test]
    fn test_display_includes_path() {
        let err = ValidationError::membership("c", vec!["a".into(), "b".into()]);
        assert_eq!(
            err.to_string(),
            "[E002] enumeration option c not in accepted options: [\"a\", \"b\"]"
        );
        let err = err.at_key("mode");
        assert!(err.to_string().starts_with("[mode]: [E002]"));
        assert_eq!(err.code(), ErrorCode::Membership);
        assert_eq!(err.code().code(), "E002");
    }

    #[test]
    fn test_missing_display() {
        let err = ValidationError::missing().at_field("title").at_index(0);
        assert_eq!(err.to_string(), "[0].title: [E005] required field is missing");
        assert_eq!(err.code().code(), "E005");
    }

    #[test]
    fn test_annotation_keeps_kind() {
        let err = ValidationError::shape_mismatch("sequence", "integer");
        let annotated = err.clone().at_index(4);
        assert_eq!(annotated.kind(), err.kind());
        assert_eq!(annotated.message(), err.message());
    }
}
