// cw_seeder/tests/common/mod.rs
// In-memory stand-in for the document store, good enough to observe upsert
// semantics without a running MongoDB.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use cw_seeder::batch::UpsertOp;
use cw_seeder::error::Result;
use cw_seeder::gateway::StoreGateway;
use mongodb::bson::Document;

#[derive(Default,)]
pub struct MemoryGateway {
    collections: Mutex<HashMap<String, BTreeMap<String, Document,>,>,>,
}

#[allow(dead_code)]
impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a document, bypassing the gateway contract.
    pub fn insert_raw(&self, collection: &str, id: &str, document: Document,) {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string(),)
            .or_default()
            .insert(id.to_string(), document,);
    }

    pub fn count(&self, collection: &str,) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection,)
            .map_or(0, BTreeMap::len,)
    }

    pub fn get(&self, collection: &str, id: &str,) -> Option<Document,> {
        self.collections
            .lock()
            .unwrap()
            .get(collection,)
            .and_then(|docs| docs.get(id,).cloned(),)
    }

    /// Full snapshot of one collection, ordered by identifier.
    pub fn snapshot(&self, collection: &str,) -> BTreeMap<String, Document,> {
        self.collections
            .lock()
            .unwrap()
            .get(collection,)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl StoreGateway for MemoryGateway {
    async fn purge(&self, collection: &str,) -> Result<u64,> {
        let mut collections = self.collections.lock().unwrap();
        let deleted = collections
            .remove(collection,)
            .map_or(0, |docs| docs.len() as u64,);
        Ok(deleted,)
    }

    async fn apply_batch(&self, collection: &str, batch: &[UpsertOp],) -> Result<(),> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string(),).or_default();
        for op in batch {
            // Full-document replace on match, insert on no match.
            docs.insert(op.id.clone(), op.replacement.clone(),);
        }
        Ok((),)
    }
}
