//! Conversion throughput for a realistic API-response-shaped document.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use json_bridge::{decode, encode, Document};
use pyo3::prelude::*;

fn sample_document() -> Document {
    let events: Vec<serde_json::Value> = (0..200)
        .map(|i| {
            serde_json::json!({
                "id": format!("evt_{i:04}"),
                "sequence": i,
                "weight": i as f64 / 7.0,
                "confirmed": i % 3 == 0,
                "tags": ["work", "recurring", null],
                "attendees": [{"email": "a@example.com", "optional": false}],
            })
        })
        .collect();
    Document::from(serde_json::json!({ "kind": "calendar#events", "items": events }))
}

fn bench_convert(c: &mut Criterion) {
    let doc = sample_document();
    Python::with_gil(|py| {
        c.bench_function("decode_200_events", |b| {
            b.iter(|| decode(py, black_box(&doc)).unwrap())
        });

        let obj = decode(py, &doc).unwrap();
        c.bench_function("encode_200_events", |b| {
            b.iter(|| encode(black_box(&obj)).unwrap())
        });
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
