//! Container properties: list, dict and set.
//!
//! Each container delegates element-wise to an inner property. Built with
//! `new()` the inner property is [`Passthrough`] and elements are carried
//! through untouched; built with `of(inner)` every element goes through
//! `inner`.
//!
//! List and dict frames catch a failing element and prepend its locator
//! (`[index]` or `[key]`) to the error path before returning it. Set frames
//! do not: a set has no stable locator, so element failures propagate with
//! whatever path the inner property attached.

use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::hash::Hash;
use tracing::trace;

use crate::error::{Result, ValidationError};
use crate::model::{Map, TypeTag, Value};
use crate::property::{Passthrough, Property};

/// Capability shared by the container kinds: element-wise delegation to an
/// inner property.
pub trait Container {
    type Inner: Property;

    fn inner(&self) -> &Self::Inner;

    /// True when elements are carried through without transformation.
    fn is_passthrough(&self) -> bool {
        self.inner().is_identity()
    }
}

fn expect_sequence(raw: &Value) -> Result<&[Value]> {
    match raw {
        Value::List(items) => Ok(items.as_slice()),
        other => Err(ValidationError::shape_mismatch("sequence", other.kind())),
    }
}

fn expect_mapping(raw: &Value) -> Result<&Map> {
    match raw {
        Value::Map(map) => Ok(map),
        other => Err(ValidationError::shape_mismatch("mapping", other.kind())),
    }
}

fn element_at_index(err: ValidationError, index: usize) -> ValidationError {
    let err = err.at_index(index);
    trace!(path = err.path(), "list element failed");
    err
}

fn element_at_key(err: ValidationError, key: &str) -> ValidationError {
    let err = err.at_key(key);
    trace!(path = err.path(), "dict entry failed");
    err
}

// =============================================================================
// LIST
// =============================================================================

/// An ordered sequence of elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListProperty<P = Passthrough> {
    inner: P,
}

impl ListProperty {
    /// A list whose elements pass through unchanged.
    pub fn new() -> Self {
        Self { inner: Passthrough }
    }
}

impl<P: Property> ListProperty<P> {
    pub fn of(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Property> Container for ListProperty<P> {
    type Inner = P;

    fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: Property> Property for ListProperty<P> {
    type Output = Vec<P::Output>;

    fn expected_type(&self) -> TypeTag {
        TypeTag::List
    }

    fn serialize(&self, value: &Self::Output) -> Value {
        Value::List(value.iter().map(|e| self.inner.serialize(e)).collect())
    }

    /// Stops at the first failing element.
    fn deserialize(&self, raw: &Value) -> Result<Self::Output> {
        expect_sequence(raw)?
            .iter()
            .enumerate()
            .map(|(i, e)| {
                self.inner
                    .deserialize(e)
                    .map_err(|err| element_at_index(err, i))
            })
            .collect()
    }
}

// =============================================================================
// DICT
// =============================================================================

/// A string-keyed mapping of elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictProperty<P = Passthrough> {
    inner: P,
}

impl DictProperty {
    /// A dict whose values pass through unchanged.
    pub fn new() -> Self {
        Self { inner: Passthrough }
    }
}

impl<P: Property> DictProperty<P> {
    pub fn of(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Property> Container for DictProperty<P> {
    type Inner = P;

    fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: Property> Property for DictProperty<P> {
    type Output = BTreeMap<String, P::Output>;

    fn expected_type(&self) -> TypeTag {
        TypeTag::Dict
    }

    fn serialize(&self, value: &Self::Output) -> Value {
        Value::Map(
            value
                .iter()
                .map(|(k, e)| (k.clone(), self.inner.serialize(e)))
                .collect(),
        )
    }

    /// Entries are visited in key order; the first failing entry aborts.
    fn deserialize(&self, raw: &Value) -> Result<Self::Output> {
        expect_mapping(raw)?
            .iter()
            .map(|(k, e)| {
                self.inner
                    .deserialize(e)
                    .map(|v| (k.clone(), v))
                    .map_err(|err| element_at_key(err, k))
            })
            .collect()
    }
}

// =============================================================================
// SET
// =============================================================================

/// An unordered collection of distinct elements, carried in the document as
/// a sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetProperty<P = Passthrough> {
    inner: P,
}

impl SetProperty {
    /// A set whose elements pass through unchanged.
    pub fn new() -> Self {
        Self { inner: Passthrough }
    }
}

impl<P: Property> SetProperty<P> {
    pub fn of(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Property> Container for SetProperty<P> {
    type Inner = P;

    fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P> Property for SetProperty<P>
where
    P: Property,
    P::Output: Eq + Hash,
{
    type Output = FxHashSet<P::Output>;

    fn expected_type(&self) -> TypeTag {
        TypeTag::Set
    }

    /// Element order in the output sequence follows set iteration order.
    fn serialize(&self, value: &Self::Output) -> Value {
        Value::List(value.iter().map(|e| self.inner.serialize(e)).collect())
    }

    /// Elements that coerce to equal values collapse. Failures are returned
    /// without a locator.
    fn deserialize(&self, raw: &Value) -> Result<Self::Output> {
        expect_sequence(raw)?
            .iter()
            .map(|e| self.inner.deserialize(e))
            .collect()
    }
}
