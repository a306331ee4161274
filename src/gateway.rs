// cw_seeder/src/gateway.rs
// The store gateway seam the loader writes through.

use async_trait::async_trait;

use crate::batch::UpsertOp;
use crate::error::Result;

/// Pure I/O sink for the document store. Owns no business logic.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    /// Delete every document in the named collection, unconditionally.
    /// Returns the number of deleted documents.
    async fn purge(&self, collection: &str,) -> Result<u64,>;

    /// Execute a batch of upsert operations against the named collection.
    ///
    /// Operations are applied in order with no rollback: on failure,
    /// operations before the failure point have already taken effect and the
    /// returned `Store` error carries the count that were not applied.
    async fn apply_batch(&self, collection: &str, batch: &[UpsertOp],) -> Result<(),>;
}
