// cw_seeder/src/batch.rs
// Builds idempotent upsert batches out of validated record lists.

use mongodb::bson::Document;

use crate::error::Result;
use crate::records::Record;

/// One "replace on match, insert on no match" write, keyed on `_id`.
///
/// The replacement is the record's full serialized form, so applying the op
/// over a stale document discards fields the record no longer carries. Ops
/// in one batch target disjoint identifiers, which makes the batch
/// order-independent and applying it twice equivalent to applying it once.
#[derive(Debug, Clone, PartialEq,)]
pub struct UpsertOp {
    pub id:          String,
    pub replacement: Document,
}

/// Build one upsert op per record.
pub fn build_upsert_batch<T: Record,>(records: &[T],) -> Result<Vec<UpsertOp,>,> {
    records
        .iter()
        .map(|record| {
            Ok(UpsertOp {
                id:          record.id().to_string(),
                replacement: record.to_document()?,
            },)
        },)
        .collect()
}
