//! The contract interface and helpers for implementing it.
//!
//! A contract is a typed object whose declared fields each have a
//! [`Property`]. Construction from a document reads every field through its
//! property; projection writes every field back.
//!
//! # Example
//!
//! ```rust
//! use lazy_contract::{Contract, DocumentBuilder, FieldReader, Map, Result};
//! use lazy_contract::{IntegerProperty, ListProperty, StringProperty};
//!
//! struct Track {
//!     title: String,
//!     ratings: Vec<i64>,
//! }
//!
//! impl Contract for Track {
//!     fn from_document(document: &Map) -> Result<Self> {
//!         let fields = FieldReader::new(document);
//!         Ok(Self {
//!             title: fields.read("title", &StringProperty)?,
//!             ratings: fields.read("ratings", &ListProperty::of(IntegerProperty))?,
//!         })
//!     }
//!
//!     fn to_document(&self) -> Map {
//!         DocumentBuilder::new()
//!             .field("title", &StringProperty, &self.title)
//!             .field("ratings", &ListProperty::of(IntegerProperty), &self.ratings)
//!             .build()
//!     }
//! }
//! ```

use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::model::{Map, Value};
use crate::property::Property;

/// A schema-defined object type built from, and projected to, a document.
pub trait Contract: Sized {
    /// Constructs an instance by deserializing each declared field.
    ///
    /// Failures carry the path to the offending field, starting with the
    /// field name.
    fn from_document(document: &Map) -> Result<Self>;

    /// Projects this instance into a document by serializing each field.
    fn to_document(&self) -> Map;
}

/// Reads named fields out of a document through their properties.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    document: &'a Map,
}

impl<'a> FieldReader<'a> {
    pub fn new(document: &'a Map) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &'a Map {
        self.document
    }

    /// Deserializes the field `name`. An absent field is an
    /// [`ErrorKind::Missing`](crate::error::ErrorKind::Missing) failure; an
    /// explicit `null` is handed to the property like any other value.
    /// Any failure gets `name` prepended to its path.
    pub fn read<P: Property>(&self, name: &str, property: &P) -> Result<P::Output> {
        self.read_optional(name, property)?
            .ok_or_else(|| located(ValidationError::missing(), name))
    }

    /// Like [`read`](Self::read), but an absent field yields `None`.
    pub fn read_optional<P: Property>(
        &self,
        name: &str,
        property: &P,
    ) -> Result<Option<P::Output>> {
        match self.document.get(name) {
            Some(raw) => property
                .deserialize(raw)
                .map(Some)
                .map_err(|err| located(err, name)),
            None => Ok(None),
        }
    }

    /// Like [`read`](Self::read), but an absent field yields `default`.
    pub fn read_or<P: Property>(
        &self,
        name: &str,
        property: &P,
        default: P::Output,
    ) -> Result<P::Output> {
        Ok(self.read_optional(name, property)?.unwrap_or(default))
    }
}

fn located(err: ValidationError, name: &str) -> ValidationError {
    let err = err.at_field(name);
    debug!(field = name, path = err.path(), "field failed to deserialize");
    err
}

/// Builds a document field by field.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    document: Map,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes `value` through `property` and stores it under `name`.
    pub fn field<P: Property>(mut self, name: &str, property: &P, value: &P::Output) -> Self {
        self.document.insert(name.to_owned(), property.serialize(value));
        self
    }

    /// Stores an already-raw value under `name`.
    pub fn raw(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.document.insert(name.to_owned(), value.into());
        self
    }

    pub fn build(self) -> Map {
        self.document
    }
}
