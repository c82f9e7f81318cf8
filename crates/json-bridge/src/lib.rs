//! # json-bridge
//!
//! Bidirectional conversion between JSON-like documents and Python objects.
//!
//! The [`Document`] tree is a JSON value that keeps signed/unsigned integers,
//! floats (NaN and infinities included) and key order distinct. The bridge
//! converts it to and from live Python objects via pyo3:
//!
//! - [`decode`] builds fresh `None`/`bool`/`int`/`float`/`str`/`list`/`dict`
//!   objects and cannot fail on document shape.
//! - [`encode`] walks an object graph, rejects cycles on the current path,
//!   sorts integers into 64-bit bands, base64-encodes `bytes`, and fails
//!   closed on anything it does not recognize.
//!
//! ## Quick start
//!
//! ```rust
//! use json_bridge::{decode, encode, Document};
//! use pyo3::prelude::*;
//!
//! Python::with_gil(|py| {
//!     let doc = Document::from_json_str(r#"{"b":1,"a":[true,null,2.5]}"#).unwrap();
//!     let obj = decode(py, &doc).unwrap();
//!     assert_eq!(obj.repr().unwrap().to_string(), "{'b': 1, 'a': [True, None, 2.5]}");
//!     assert_eq!(encode(&obj).unwrap(), doc);
//! });
//! ```
//!
//! ## Modules
//!
//! - [`document`] -- the `Document` tree and its JSON text form
//! - [`decoder`] -- document → Python object
//! - [`encoder`] -- Python object → document
//! - [`numeric`] -- 64-bit band classification for integers
//! - [`cycle`] -- path-scoped identity set for cycle detection
//! - [`registry`] -- static dispatch table for typed wrappers
//! - [`error`] -- `ConvertError` and its mapping to Python exceptions

mod caster;
pub mod cycle;
pub mod decoder;
pub mod document;
pub mod encoder;
pub mod error;
pub mod numeric;
pub mod registry;

pub use decoder::{decode, decode_json_str};
pub use document::Document;
pub use encoder::{encode, encode_to_json_string, encode_with, EncodeOptions};
pub use error::{ConvertError, Result};
pub use numeric::{classify, NumericBand};
pub use registry::{decode_as, encode_as, BridgeType};
