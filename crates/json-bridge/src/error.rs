//! Error types for document/object conversion.

use std::convert::Infallible;

use pyo3::exceptions::{PyOverflowError, PyTypeError, PyValueError};
use pyo3::{PyErr, Python};
use thiserror::Error;

/// Errors that can occur while converting between documents and Python objects.
///
/// Every variant except `Host` and `Json` is raised by the encoder or the
/// typed registry helpers; decoding a well-formed document only fails when the
/// interpreter itself cannot allocate.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A container was reached twice on the same root-to-node path.
    #[error("circular reference detected")]
    CycleDetected,

    /// An integer outside both the signed and unsigned 64-bit bands.
    #[error("integer out of range for a 64-bit document number: {0}")]
    IntegerOutOfRange(String),

    /// A mapping key whose `str()` raised.
    #[error("mapping key {key} cannot be converted to a string")]
    KeyNotStringConvertible {
        key: String,
        #[source]
        source: PyErr,
    },

    /// An object kind outside none/bool/int/float/str/bytes/sequence/mapping.
    #[error("cannot convert object of type {type_name} to a document: {repr}")]
    UnsupportedType { type_name: String, repr: String },

    /// Nesting went deeper than `EncodeOptions::max_depth`.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// A typed registry conversion got a document of the wrong shape.
    #[error("expected a document convertible to {expected}, found {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The textual JSON layer failed to parse or print.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The interpreter raised while being queried or allocating.
    #[error("Python error: {0}")]
    Host(#[from] PyErr),
}

/// Convenience alias used throughout json-bridge.
pub type Result<T> = std::result::Result<T, ConvertError>;

// Infallible host conversions (e.g. `i64` into a Python `int`).
impl From<Infallible> for ConvertError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

impl From<ConvertError> for PyErr {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::Host(inner) => inner,
            ConvertError::IntegerOutOfRange(_) => PyOverflowError::new_err(err.to_string()),
            ConvertError::UnsupportedType { .. } | ConvertError::KindMismatch { .. } => {
                PyTypeError::new_err(err.to_string())
            }
            ConvertError::KeyNotStringConvertible { key, source } => {
                let py_err = PyValueError::new_err(format!(
                    "mapping key {key} cannot be converted to a string"
                ));
                Python::with_gil(|py| py_err.set_cause(py, Some(source)));
                py_err
            }
            ConvertError::CycleDetected
            | ConvertError::DepthLimitExceeded { .. }
            | ConvertError::Json(_) => PyValueError::new_err(err.to_string()),
        }
    }
}
