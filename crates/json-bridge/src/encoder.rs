//! Encoder: Python object → document.
//!
//! Dispatches on the object's runtime kind and recurses into containers:
//!
//! - `None` → `Null`
//! - `bool` → `Bool` (checked before `int`, since `bool` subclasses `int`)
//! - `int` → `Int` or `UInt` by [`classify`]; anything wider fails
//! - `float` → `Float`, NaN and infinities passed through
//! - `bytes` / `bytearray` → `String` holding standard base64 of the payload
//! - `str` → `String`
//! - `list` / `tuple` → `Array`
//! - `dict` → `Object` in iteration order, keys via `str()` unless already `str`
//!
//! Everything else fails with `UnsupportedType`. Any failure aborts the whole
//! call; no partial document is returned.
//!
//! # Example
//! ```
//! use json_bridge::encode;
//! use pyo3::prelude::*;
//!
//! Python::with_gil(|py| {
//!     let obj = py.eval(c"{'name': 'Alice', 'tags': ('a', b'\\x00')}", None, None).unwrap();
//!     let doc = encode(&obj).unwrap();
//!     assert_eq!(doc.to_json_string().unwrap(), r#"{"name":"Alice","tags":["a","AA=="]}"#);
//! });
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pyo3::exceptions::PyOverflowError;
use pyo3::prelude::*;
use pyo3::types::{
    PyBool, PyByteArray, PyBytes, PyDict, PyFloat, PyInt, PyList, PyString, PyTuple,
};
use serde::Deserialize;

use crate::cycle::{Identity, IdentitySet};
use crate::document::Document;
use crate::error::{ConvertError, Result};
use crate::numeric::{classify, NumericBand};

/// Knobs for a single encode call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Maximum number of nested containers on any path. `None` means no
    /// limit beyond the native stack; set one for untrusted object graphs.
    pub max_depth: Option<usize>,
}

/// Encode a Python object into a document with default options.
pub fn encode(obj: &Bound<'_, PyAny>) -> Result<Document> {
    encode_with(obj, &EncodeOptions::default())
}

/// Encode a Python object into a document.
///
/// The cycle-detection state lives only for the duration of this call.
pub fn encode_with(obj: &Bound<'_, PyAny>, options: &EncodeOptions) -> Result<Document> {
    tracing::trace!(max_depth = ?options.max_depth, "encoding object");
    let mut path = IdentitySet::new();
    encode_node(obj, &mut path, options)
}

/// Encode a Python object straight to compact JSON text.
pub fn encode_to_json_string(obj: &Bound<'_, PyAny>) -> Result<String> {
    encode(obj)?.to_json_string()
}

fn encode_node(
    obj: &Bound<'_, PyAny>,
    path: &mut IdentitySet,
    options: &EncodeOptions,
) -> Result<Document> {
    if obj.is_none() {
        return Ok(Document::Null);
    }
    if let Ok(b) = obj.downcast::<PyBool>() {
        return Ok(Document::Bool(b.is_true()));
    }
    if obj.is_instance_of::<PyInt>() {
        return encode_int(obj);
    }
    if let Ok(f) = obj.downcast::<PyFloat>() {
        return Ok(Document::Float(f.value()));
    }
    if let Ok(bytes) = obj.downcast::<PyBytes>() {
        return Ok(Document::String(STANDARD.encode(bytes.as_bytes())));
    }
    if let Ok(bytes) = obj.downcast::<PyByteArray>() {
        return Ok(Document::String(STANDARD.encode(bytes.to_vec())));
    }
    if let Ok(s) = obj.downcast::<PyString>() {
        return Ok(Document::String(s.to_cow()?.into_owned()));
    }
    if let Ok(list) = obj.downcast::<PyList>() {
        return enter_container(obj, path, options, |path| {
            let mut items = Vec::with_capacity(list.len());
            for item in list.iter() {
                items.push(encode_node(&item, path, options)?);
            }
            Ok(Document::Array(items))
        });
    }
    if let Ok(tuple) = obj.downcast::<PyTuple>() {
        return enter_container(obj, path, options, |path| {
            let mut items = Vec::with_capacity(tuple.len());
            for item in tuple.iter() {
                items.push(encode_node(&item, path, options)?);
            }
            Ok(Document::Array(items))
        });
    }
    if let Ok(dict) = obj.downcast::<PyDict>() {
        return enter_container(obj, path, options, |path| {
            // Snapshot: key `str()` and value `repr()` run Python code that
            // may resize the dict.
            let items = dict.items();
            let mut entries = Vec::with_capacity(items.len());
            for item in items.iter() {
                let (key, value): (Bound<'_, PyAny>, Bound<'_, PyAny>) = item.extract()?;
                let key = key_to_string(&key)?;
                entries.push((key, encode_node(&value, path, options)?));
            }
            Ok(Document::Object(entries))
        });
    }

    let type_name = type_name(obj);
    tracing::debug!(type_name = %type_name, "unsupported object type");
    Err(ConvertError::UnsupportedType {
        type_name,
        repr: describe(obj),
    })
}

/// Push the container onto the active path for the duration of `f`.
fn enter_container(
    obj: &Bound<'_, PyAny>,
    path: &mut IdentitySet,
    options: &EncodeOptions,
    f: impl FnOnce(&mut IdentitySet) -> Result<Document>,
) -> Result<Document> {
    let identity = obj.as_ptr() as Identity;
    path.visit(identity, |path| {
        if let Some(limit) = options.max_depth {
            if path.depth() > limit {
                tracing::debug!(limit, "nesting depth limit exceeded");
                return Err(ConvertError::DepthLimitExceeded { limit });
            }
        }
        f(path)
    })
}

fn encode_int(obj: &Bound<'_, PyAny>) -> Result<Document> {
    // Anything wider than i128 is out of both bands anyway.
    let band = match obj.extract::<i128>() {
        Ok(value) => classify(value),
        Err(err) if err.is_instance_of::<PyOverflowError>(obj.py()) => NumericBand::OutOfRange,
        Err(err) => return Err(err.into()),
    };
    match band {
        NumericBand::FitsSigned64(i) => Ok(Document::Int(i)),
        NumericBand::FitsUnsigned64Only(u) => Ok(Document::UInt(u)),
        NumericBand::OutOfRange => {
            let repr = describe(obj);
            tracing::debug!(value = %repr, "integer outside 64-bit range");
            Err(ConvertError::IntegerOutOfRange(repr))
        }
    }
}

fn key_to_string(key: &Bound<'_, PyAny>) -> Result<String> {
    let text = match key.downcast::<PyString>() {
        Ok(s) => Ok(s.clone()),
        Err(_) => key.str(),
    };
    text.and_then(|s| s.to_cow().map(|cow| cow.into_owned()))
        .map_err(|source| {
            let key = describe(key);
            tracing::debug!(key = %key, "mapping key not convertible to string");
            ConvertError::KeyNotStringConvertible { key, source }
        })
}

pub(crate) fn type_name(obj: &Bound<'_, PyAny>) -> String {
    obj.get_type()
        .name()
        .map(|name| name.to_string())
        .unwrap_or_else(|_| "<unknown>".to_string())
}

/// `repr()` for diagnostics; never fails.
pub(crate) fn describe(obj: &Bound<'_, PyAny>) -> String {
    obj.repr()
        .map(|repr| repr.to_string())
        .unwrap_or_else(|_| "<unrepresentable>".to_string())
}
