//! Decoder: document → Python object.
//!
//! Leaf-first and allocation-only. Every document node maps to exactly one
//! fresh Python object:
//!
//! | Document        | Python                        |
//! |-----------------|-------------------------------|
//! | `Null`          | `None`                        |
//! | `Bool`          | `bool`                        |
//! | `Int` / `UInt`  | `int` (unbounded, so `UInt` above `i64::MAX` stays exact) |
//! | `Float`         | `float`, NaN and infinities included |
//! | `String`        | `str`, embedded NULs included |
//! | `Array`         | new `list`                    |
//! | `Object`        | new `dict`, document key order |
//!
//! Duplicate object keys resolve last-write-wins through `dict` assignment.
//! Strings are never base64-decoded back into `bytes`.

use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyList, PyString};

use crate::document::Document;
use crate::error::Result;

/// Decode a document into a new Python object.
///
/// Never fails on document shape; an `Err` only carries an interpreter
/// allocation failure.
pub fn decode<'py>(py: Python<'py>, doc: &Document) -> Result<Bound<'py, PyAny>> {
    tracing::trace!(kind = doc.kind_name(), "decoding document");
    decode_node(py, doc)
}

/// Parse JSON text and decode the resulting document.
pub fn decode_json_str<'py>(py: Python<'py>, text: &str) -> Result<Bound<'py, PyAny>> {
    let doc = Document::from_json_str(text)?;
    decode(py, &doc)
}

fn decode_node<'py>(py: Python<'py>, doc: &Document) -> Result<Bound<'py, PyAny>> {
    let obj = match doc {
        Document::Null => py.None().into_bound(py),
        Document::Bool(b) => PyBool::new(py, *b).to_owned().into_any(),
        Document::Int(i) => i.into_pyobject(py)?.into_any(),
        Document::UInt(u) => u.into_pyobject(py)?.into_any(),
        Document::Float(f) => PyFloat::new(py, *f).into_any(),
        Document::String(s) => PyString::new(py, s).into_any(),
        Document::Array(items) => {
            let list = PyList::empty(py);
            for item in items {
                list.append(decode_node(py, item)?)?;
            }
            list.into_any()
        }
        Document::Object(entries) => {
            let dict = PyDict::new(py);
            for (key, value) in entries {
                dict.set_item(PyString::new(py, key), decode_node(py, value)?)?;
            }
            dict.into_any()
        }
    };
    Ok(obj)
}
