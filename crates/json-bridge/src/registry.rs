//! Static type-dispatch table for typed Python wrappers.
//!
//! Each wrapper kind the binding layer hands around (`bool`, `int`, `list`, ...)
//! gets one `{encode, decode}` pair. The pairs are not written per type: they
//! are instantiations of [`encode_as`] and [`decode_as`] over the
//! [`BridgeType`] trait, collected once into [`ENTRIES`]. There is no way to
//! register further kinds at runtime.

use std::fmt;

use pyo3::prelude::*;
use pyo3::type_object::PyTypeCheck;
use pyo3::types::{PyBool, PyByteArray, PyBytes, PyDict, PyFloat, PyInt, PyList, PyString, PyTuple};

use crate::decoder::decode;
use crate::document::Document;
use crate::encoder::{describe, encode, type_name};
use crate::error::{ConvertError, Result};

/// A Python wrapper type the bridge converts to and from.
pub trait BridgeType: PyTypeCheck + Sized {
    /// Kind tag, as Python spells the type.
    const KIND: &'static str;

    /// Whether some document decodes into this kind.
    const DECODABLE: bool = true;

    /// Turn a freshly decoded object into this kind, if its shape allows.
    fn from_decoded(obj: Bound<'_, PyAny>) -> Option<Bound<'_, Self>> {
        obj.downcast_into::<Self>().ok()
    }
}

impl BridgeType for PyAny {
    const KIND: &'static str = "object";
}

impl BridgeType for PyBool {
    const KIND: &'static str = "bool";
}

impl BridgeType for PyInt {
    const KIND: &'static str = "int";

    // `bool` subclasses `int` in Python but is its own document kind.
    fn from_decoded(obj: Bound<'_, PyAny>) -> Option<Bound<'_, Self>> {
        if obj.is_instance_of::<PyBool>() {
            return None;
        }
        obj.downcast_into::<Self>().ok()
    }
}

impl BridgeType for PyFloat {
    const KIND: &'static str = "float";
}

impl BridgeType for PyString {
    const KIND: &'static str = "str";
}

// base64 strings are never turned back into bytes or bytearrays.
impl BridgeType for PyBytes {
    const KIND: &'static str = "bytes";
    const DECODABLE: bool = false;
}

impl BridgeType for PyByteArray {
    const KIND: &'static str = "bytearray";
    const DECODABLE: bool = false;
}

impl BridgeType for PyList {
    const KIND: &'static str = "list";
}

impl BridgeType for PyTuple {
    const KIND: &'static str = "tuple";

    fn from_decoded(obj: Bound<'_, PyAny>) -> Option<Bound<'_, Self>> {
        obj.downcast_into::<PyList>().ok().map(|list| list.to_tuple())
    }
}

impl BridgeType for PyDict {
    const KIND: &'static str = "dict";
}

/// Encode a typed wrapper.
pub fn encode_as<T: BridgeType>(obj: &Bound<'_, T>) -> Result<Document> {
    encode(obj.as_any())
}

/// Decode a document into a specific wrapper kind.
///
/// Fails with `KindMismatch` when the document's shape cannot become `T`,
/// e.g. an `Object` requested as a `list`.
pub fn decode_as<'py, T: BridgeType>(py: Python<'py>, doc: &Document) -> Result<Bound<'py, T>> {
    let mismatch = || ConvertError::KindMismatch {
        expected: T::KIND,
        found: doc.kind_name(),
    };
    if !T::DECODABLE {
        return Err(mismatch());
    }
    T::from_decoded(decode(py, doc)?).ok_or_else(mismatch)
}

pub type MatchFn = for<'py> fn(&Bound<'py, PyAny>) -> bool;
pub type EncodeFn = for<'py> fn(&Bound<'py, PyAny>) -> Result<Document>;
pub type DecodeFn = for<'py> fn(Python<'py>, &Document) -> Result<Bound<'py, PyAny>>;

/// One row of the dispatch table.
#[derive(Clone, Copy)]
pub struct Entry {
    pub name: &'static str,
    /// Whether an object is an instance of this kind (subclasses included).
    pub matches: MatchFn,
    pub encode: EncodeFn,
    /// `None` for encode-only kinds.
    pub decode: Option<DecodeFn>,
}

impl Entry {
    const fn of<T: BridgeType>() -> Self {
        Entry {
            name: T::KIND,
            matches: T::type_check,
            encode: encode_entry::<T>,
            decode: if T::DECODABLE {
                Some(decode_entry::<T> as DecodeFn)
            } else {
                None
            },
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("decodable", &self.decode.is_some())
            .finish()
    }
}

fn encode_entry<T: BridgeType>(obj: &Bound<'_, PyAny>) -> Result<Document> {
    let typed = obj
        .downcast::<T>()
        .map_err(|_| ConvertError::UnsupportedType {
            type_name: type_name(obj),
            repr: describe(obj),
        })?;
    encode_as(typed)
}

fn decode_entry<'py, T: BridgeType>(py: Python<'py>, doc: &Document) -> Result<Bound<'py, PyAny>> {
    decode_as::<T>(py, doc).map(Bound::into_any)
}

const OBJECT: Entry = Entry::of::<PyAny>();

/// Every wrapper kind, most specific first; the generic `object` row is last
/// and matches anything.
pub static ENTRIES: &[Entry] = &[
    Entry::of::<PyBool>(),
    Entry::of::<PyInt>(),
    Entry::of::<PyFloat>(),
    Entry::of::<PyBytes>(),
    Entry::of::<PyByteArray>(),
    Entry::of::<PyString>(),
    Entry::of::<PyList>(),
    Entry::of::<PyTuple>(),
    Entry::of::<PyDict>(),
    OBJECT,
];

static FALLBACK: Entry = OBJECT;

/// The most specific entry for an object.
pub fn lookup(obj: &Bound<'_, PyAny>) -> &'static Entry {
    ENTRIES
        .iter()
        .find(|entry| (entry.matches)(obj))
        .unwrap_or(&FALLBACK)
}

/// The entry for a kind tag such as `"list"`.
pub fn entry(name: &str) -> Option<&'static Entry> {
    ENTRIES.iter().find(|entry| entry.name == name)
}
