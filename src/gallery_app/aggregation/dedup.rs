use std::collections::HashSet;

use crate::shared::ImageRecord;

/// Drop records whose id was already seen. The first occurrence wins and the
/// relative order of survivors is preserved.
pub fn dedup_by_id(records: Vec<ImageRecord>) -> Vec<ImageRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}
