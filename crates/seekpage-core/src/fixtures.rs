//! Record builders shared by the unit tests.

use serde_json::{Value, json};

use crate::memory::MemorySource;

/// Builds `n` records `{ "id": i, "name": "object {i - 1}" }` with ids
/// starting at `1`.
pub(crate) fn simple_source(n: u64) -> MemorySource {
    (1..=n)
        .map(|id| json!({ "id": id, "name": format!("object {}", id - 1) }))
        .collect()
}

/// Builds `simples * per_simple` related records.
///
/// Each record carries its own `id`, a `number` within its group and the
/// nested `simple` record it belongs to, e.g.
/// `{ "id": 6, "number": 0, "simple": { "id": 2, "name": "object 1" } }`.
pub(crate) fn related_source(simples: u64, per_simple: u64) -> MemorySource {
    let mut id = 0;
    let mut records = Vec::new();
    for simple in 1..=simples {
        for number in 0..per_simple {
            id += 1;
            records.push(json!({
                "id": id,
                "number": number,
                "simple": { "id": simple, "name": format!("object {}", simple - 1) },
            }));
        }
    }

    MemorySource::new(records)
}

/// Returns the integer `id` of each record.
pub(crate) fn ids(records: &[Value]) -> Vec<i64> {
    records
        .iter()
        .map(|record| record["id"].as_i64().unwrap())
        .collect()
}
