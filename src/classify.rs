// cw_seeder/src/classify.rs
// Discriminator-based partitioning of mixed feed payloads.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

/// Result of partitioning a mixed feed by its discriminator field.
///
/// Original order is preserved within each partition. Entries that carry no
/// discriminator, or a value outside `recognized`, land in `skipped` instead
/// of silently vanishing; callers decide what to do with them.
#[derive(Debug, Default,)]
pub struct Partitions {
    pub by_kind: HashMap<String, Vec<Value,>,>,
    pub skipped: Vec<Value,>,
}

impl Partitions {
    /// Take the partition for one discriminator value, empty if absent.
    pub fn take(&mut self, kind: &str,) -> Vec<Value,> {
        self.by_kind.remove(kind,).unwrap_or_default()
    }
}

/// Partition `entries` by the value of `field`, keeping only the values
/// listed in `recognized`.
pub fn partition_by(entries: Vec<Value,>, field: &str, recognized: &[&str],) -> Partitions {
    let mut partitions = Partitions::default();
    for entry in entries {
        let kind = entry
            .as_object()
            .and_then(|obj| obj.get(field,),)
            .and_then(Value::as_str,)
            .map(str::to_owned,);
        match kind {
            Some(kind,) if recognized.contains(&kind.as_str(),) => {
                partitions.by_kind.entry(kind,).or_default().push(entry,);
            },
            _ => partitions.skipped.push(entry,),
        }
    }
    if !partitions.skipped.is_empty() {
        warn!(
            "Skipped {} feed entries with a missing or unrecognized '{}' discriminator",
            partitions.skipped.len(),
            field
        );
    }
    partitions
}
