//! Data model types for documents.
//!
//! - Raw values and mappings (the document tree)
//! - Type tags describing what a property expects

pub mod value;

pub use value::{Float, Map, TypeTag, Value};
