/// Property-based tests for the document/object bridge.
///
/// Strategies generate arbitrary documents (NaN excluded, since it never
/// compares equal; object keys unique, since a Python dict collapses
/// duplicates) and check that `encode(decode(doc)) == doc`, plus a few
/// per-kind properties that hand-written tests only sample.
use std::collections::HashSet;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use json_bridge::{classify, decode, encode, Document, NumericBand};
use proptest::prelude::*;
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict, PyList};

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z_][a-zA-Z0-9_]{0,12}",
        Just(String::new()),
        Just("with space".to_string()),
        Just("nul\0key".to_string()),
        Just("caf\u{e9}".to_string()),
    ]
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,30}",
        any::<String>(),
        Just(String::new()),
        Just("a\0b".to_string()),
        Just("\u{4f60}\u{597d}".to_string()),
    ]
}

fn arb_integer() -> impl Strategy<Value = Document> {
    prop_oneof![
        any::<i64>().prop_map(Document::Int),
        Just(Document::Int(i64::MIN)),
        Just(Document::Int(i64::MAX)),
        ((i64::MAX as u64 + 1)..=u64::MAX).prop_map(Document::UInt),
        Just(Document::UInt(u64::MAX)),
    ]
}

fn arb_float() -> impl Strategy<Value = Document> {
    prop_oneof![
        any::<f64>()
            .prop_filter("NaN never compares equal", |f| !f.is_nan())
            .prop_map(Document::Float),
        Just(Document::Float(f64::INFINITY)),
        Just(Document::Float(f64::NEG_INFINITY)),
    ]
}

fn arb_leaf() -> impl Strategy<Value = Document> {
    prop_oneof![
        Just(Document::Null),
        any::<bool>().prop_map(Document::Bool),
        arb_integer(),
        arb_float(),
        arb_string().prop_map(Document::String),
    ]
}

/// Drop repeated keys, keeping the first occurrence and its position.
fn unique_entries(pairs: Vec<(String, Document)>) -> Vec<(String, Document)> {
    let mut seen = HashSet::new();
    pairs
        .into_iter()
        .filter(|(key, _)| seen.insert(key.clone()))
        .collect()
}

fn arb_document() -> impl Strategy<Value = Document> {
    arb_leaf().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Document::Array),
            prop::collection::vec((arb_key(), inner), 0..8)
                .prop_map(|pairs| Document::Object(unique_entries(pairs))),
        ]
    })
}

fn kind_matches(doc: &Document, obj: &Bound<'_, PyAny>) -> bool {
    match doc {
        Document::Null => obj.is_none(),
        Document::Bool(_) => obj.is_exact_instance_of::<pyo3::types::PyBool>(),
        Document::Int(_) | Document::UInt(_) => obj.is_exact_instance_of::<pyo3::types::PyInt>(),
        Document::Float(_) => obj.is_exact_instance_of::<pyo3::types::PyFloat>(),
        Document::String(_) => obj.is_exact_instance_of::<pyo3::types::PyString>(),
        Document::Array(_) => obj.is_exact_instance_of::<PyList>(),
        Document::Object(_) => obj.is_exact_instance_of::<PyDict>(),
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Decoding is total and the Python kind follows the document tag.
    #[test]
    fn decode_is_total_and_kind_preserving(doc in arb_document()) {
        Python::with_gil(|py| {
            let obj = decode(py, &doc);
            prop_assert!(obj.is_ok(), "decode failed for {:?}", doc);
            prop_assert!(kind_matches(&doc, &obj.unwrap()));
            Ok(())
        })?;
    }

    /// A decoded document encodes back to itself.
    #[test]
    fn document_roundtrip(doc in arb_document()) {
        Python::with_gil(|py| {
            let obj = decode(py, &doc).unwrap();
            let back = encode(&obj);
            prop_assert!(back.is_ok(), "encode failed for {:?}: {:?}", doc, back);
            prop_assert_eq!(back.unwrap(), doc);
            Ok(())
        })?;
    }

    /// Float payloads keep their exact bit pattern.
    #[test]
    fn float_bits_survive(f in any::<f64>()) {
        Python::with_gil(|py| {
            let obj = decode(py, &Document::Float(f)).unwrap();
            match encode(&obj).unwrap() {
                Document::Float(back) if f.is_nan() => prop_assert!(back.is_nan()),
                Document::Float(back) => prop_assert_eq!(back.to_bits(), f.to_bits()),
                other => prop_assert!(false, "expected a float, got {:?}", other),
            }
            Ok(())
        })?;
    }

    /// Arbitrary bytes encode to their standard base64 text.
    #[test]
    fn bytes_encode_to_base64(raw in prop::collection::vec(any::<u8>(), 0..256)) {
        Python::with_gil(|py| {
            let bytes = PyBytes::new(py, &raw);
            prop_assert_eq!(encode(bytes.as_any()).unwrap(), Document::String(STANDARD.encode(&raw)));
            Ok(())
        })?;
    }

    /// Shared acyclic sub-containers never trip cycle detection.
    #[test]
    fn shared_siblings_encode(doc in arb_document(), copies in 1usize..6) {
        Python::with_gil(|py| {
            let shared = decode(py, &doc).unwrap();
            let parent = PyList::empty(py);
            for _ in 0..copies {
                parent.append(&shared).unwrap();
            }
            let encoded = encode(parent.as_any());
            prop_assert!(encoded.is_ok(), "false cycle for {:?}", doc);
            prop_assert_eq!(encoded.unwrap(), Document::Array(vec![doc.clone(); copies]));
            Ok(())
        })?;
    }

    /// The classifier agrees with the standard narrowing conversions.
    #[test]
    fn classify_matches_narrowing(value in any::<i128>()) {
        let expected = match (i64::try_from(value), u64::try_from(value)) {
            (Ok(i), _) => NumericBand::FitsSigned64(i),
            (Err(_), Ok(u)) => NumericBand::FitsUnsigned64Only(u),
            (Err(_), Err(_)) => NumericBand::OutOfRange,
        };
        prop_assert_eq!(classify(value), expected);
    }
}
