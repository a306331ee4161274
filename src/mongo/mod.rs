// cw_seeder/src/mongo/mod.rs
// MongoDB implementation of the store gateway.

use async_trait::async_trait;
use mongodb::bson::{Document, doc};
use mongodb::options::{ClientOptions, ReplaceOptions};
use mongodb::{Client, Collection, Database};
use tracing::info;

use crate::batch::UpsertOp;
use crate::error::{Result, SeederError};
use crate::gateway::StoreGateway;

/// Connection settings for the gateway. The URI is expected to already carry
/// its credentials; see `cli::resolve_connection_uri`.
#[derive(Debug, Clone,)]
pub struct GatewayConfig {
    pub uri:           String,
    pub database_name: String,
}

/// Single shared connection handle, acquired once per run and released via
/// `close`.
pub struct MongoGateway {
    client:   Client,
    database: Database,
}

impl MongoGateway {
    pub async fn connect(config: &GatewayConfig,) -> Result<Self,> {
        let client_options = ClientOptions::parse(&config.uri,).await.map_err(|e| {
            SeederError::Configuration(format!("Failed to parse MongoDB URI: {}", e),)
        },)?;
        let client = Client::with_options(client_options,).map_err(|e| {
            SeederError::Connection(format!("Failed to create MongoDB client: {}", e),)
        },)?;

        client
            .database("admin",)
            .run_command(doc! {"ping": 1}, None,)
            .await
            .map_err(|e| {
                SeederError::Connection(format!("Failed to connect to MongoDB: {}", e),)
            },)?;

        let database = client.database(&config.database_name,);
        info!("Connected to MongoDB database '{}'", config.database_name);
        Ok(MongoGateway { client, database, },)
    }

    /// Raw collection handle, for ad-hoc reads outside the reload pipeline.
    pub fn collection(&self, name: &str,) -> Collection<Document,> {
        self.database.collection(name,)
    }

    pub async fn count(&self, collection: &str,) -> Result<u64,> {
        self.collection(collection,)
            .count_documents(None, None,)
            .await
            .map_err(|e| SeederError::Store {
                collection: collection.to_string(),
                unapplied:  0,
                message:    e.to_string(),
            },)
    }

    /// Drop the whole database. Only the CRUD demo uses this.
    pub async fn drop_database(&self,) -> Result<(),> {
        self.database.drop(None,).await.map_err(|e| SeederError::Store {
            collection: self.database.name().to_string(),
            unapplied:  0,
            message:    e.to_string(),
        },)
    }

    /// Release the connection. Dropping the gateway releases it too; this
    /// just makes the open → use → close lifecycle explicit.
    pub async fn close(self,) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl StoreGateway for MongoGateway {
    async fn purge(&self, collection: &str,) -> Result<u64,> {
        let result = self
            .collection(collection,)
            .delete_many(doc! {}, None,)
            .await
            .map_err(|e| SeederError::Store {
                collection: collection.to_string(),
                unapplied:  0,
                message:    format!("purge failed: {}", e),
            },)?;
        info!(
            "Purged {} documents from collection '{}'",
            result.deleted_count, collection
        );
        Ok(result.deleted_count,)
    }

    async fn apply_batch(&self, collection: &str, batch: &[UpsertOp],) -> Result<(),> {
        let handle = self.collection(collection,);
        let options = ReplaceOptions::builder().upsert(true,).build();

        for (applied, op,) in batch.iter().enumerate() {
            handle
                .replace_one(doc! {"_id": &op.id}, op.replacement.clone(), options.clone(),)
                .await
                .map_err(|e| SeederError::Store {
                    collection: collection.to_string(),
                    unapplied:  (batch.len() - applied) as u64,
                    message:    format!("upsert of '{}' failed: {}", op.id, e),
                },)?;
        }

        info!(
            "Applied {} upsert operations to collection '{}'",
            batch.len(),
            collection
        );
        Ok((),)
    }
}
