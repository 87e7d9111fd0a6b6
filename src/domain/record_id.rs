// Record identifiers shared by classes and announcements
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;

/// A record that lives in an id-keyed dashboard collection.
pub trait Record {
    fn id(&self) -> &str;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

/// Older documents carry numeric ids (creation timestamps); normalise to strings.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// Allocate an id from a creation timestamp, moving to the next free
/// millisecond when the timestamp is already taken.
pub fn unique_timestamp_id<R: Record>(records: &[R], timestamp_ms: i64) -> String {
    let taken: HashSet<&str> = records.iter().map(Record::id).collect();
    let mut candidate = timestamp_ms;
    loop {
        let id = candidate.to_string();
        if !taken.contains(id.as_str()) {
            return id;
        }
        candidate += 1;
    }
}

/// Keep the first occurrence of every id, preserving order.
pub fn dedup_by_id<R: Record>(records: Vec<R>) -> Vec<R> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.id().to_string()))
        .collect()
}
