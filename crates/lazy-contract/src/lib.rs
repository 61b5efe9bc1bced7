//! Lazy contracts: typed objects over loosely-typed documents.
//!
//! A contract declares named fields, each with a [`Property`] describing how
//! a raw document value is coerced into a typed domain value and projected
//! back again. Documents are trees of [`Value`]s (primitives, sequences and
//! string-keyed mappings); contracts are ordinary Rust structs.
//!
//! # Quick Start
//!
//! ```rust
//! use lazy_contract::{
//!     Contract, DocumentBuilder, EnumerationProperty, FieldReader, IntegerProperty,
//!     ListProperty, Map, ObjectProperty, Property, Result, StringProperty, Value,
//! };
//!
//! #[derive(Debug, PartialEq)]
//! struct Member {
//!     name: String,
//!     role: Option<String>,
//! }
//!
//! fn role() -> EnumerationProperty {
//!     EnumerationProperty::new(["lead", "crew"])
//! }
//!
//! impl Contract for Member {
//!     fn from_document(document: &Map) -> Result<Self> {
//!         let fields = FieldReader::new(document);
//!         Ok(Self {
//!             name: fields.read("name", &StringProperty)?,
//!             role: fields.read_or("role", &role(), None)?,
//!         })
//!     }
//!
//!     fn to_document(&self) -> Map {
//!         DocumentBuilder::new()
//!             .field("name", &StringProperty, &self.name)
//!             .field("role", &role(), &self.role)
//!             .build()
//!     }
//! }
//!
//! let members = ListProperty::of(ObjectProperty::<Member>::new());
//!
//! let raw: Value = serde_json::json!([
//!     {"name": "Ada", "role": "lead"},
//!     {"name": 7, "role": null},
//! ])
//! .into();
//! let decoded = members.deserialize(&raw).unwrap();
//! assert_eq!(decoded[1].name, "7");
//! assert_eq!(members.serialize(&decoded).as_list().unwrap().len(), 2);
//!
//! // Failures carry the structural path to the offending value.
//! let bad: Value = serde_json::json!([{"name": "Ada"}, {"name": "Bo", "role": "chief"}]).into();
//! let err = members.deserialize(&bad).unwrap_err();
//! assert_eq!(err.path(), "[1].role");
//! ```
//!
//! # Modules
//!
//! - [`model`]: The document representation ([`Value`], [`Map`], [`TypeTag`])
//! - [`property`]: Scalar, object and container property kinds
//! - [`contract`]: The [`Contract`] trait and field helpers
//! - [`error`]: [`ValidationError`] and its structural path
//!
//! # Error paths
//!
//! List and dict frames prepend `[index]` / `[key]`, contracts prepend the
//! field name, and segments after the first are joined with `.`: a bad
//! integer in the first element of the second inner list reads `[1].[0]`.
//! Set frames and object frames add no segment.

pub mod contract;
pub mod error;
pub mod model;
pub mod property;

// Re-export commonly used types at crate root
pub use contract::{Contract, DocumentBuilder, FieldReader};
pub use error::{ErrorCode, ErrorKind, Result, ValidationError};
pub use model::{Float, Map, TypeTag, Value};
pub use property::{
    BooleanProperty, Container, DictProperty, EnumerationProperty, FloatProperty, Incoming,
    IntegerProperty, ListProperty, ObjectProperty, OptionalProperty, Passthrough, Property,
    SetProperty, StringProperty,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
