//! MongoDB implementation of the todo store
//!
//! Thin wrapper over a typed `Collection<TodoDocument>`. Update and delete
//! inspect the matched/deleted counts reported by the server and turn zero
//! into `StoreError::NotFound`.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection};
use std::time::Instant;
use tracing::info;

use crate::config::StorageConfig;
use crate::metrics;
use crate::model::TodoDocument;
use crate::storage::{StoreError, TodoStore};

/// Todo store backed by a MongoDB collection
pub struct MongoTodoStore {
    collection: Collection<TodoDocument>,
}

impl MongoTodoStore {
    /// Connect to MongoDB and select the configured database and collection
    ///
    /// Issues a ping so an unreachable server fails at startup rather than
    /// on the first request.
    pub async fn connect(config: &StorageConfig) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(&config.uri).await?;
        let db = client.database(&config.database);
        db.run_command(doc! { "ping": 1 }, None).await?;

        info!(
            database = %config.database,
            collection = %config.collection,
            "Connected to MongoDB"
        );

        Ok(Self {
            collection: db.collection(&config.collection),
        })
    }
}

#[async_trait]
impl TodoStore for MongoTodoStore {
    async fn insert(&self, todo: &TodoDocument) -> Result<(), StoreError> {
        let start = Instant::now();
        let result = self.collection.insert_one(todo, None).await;
        metrics::observe_storage("insert", start, result.is_ok());
        result?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TodoDocument>, StoreError> {
        let start = Instant::now();
        let result = match self.collection.find(None, None).await {
            Ok(cursor) => cursor.try_collect().await,
            Err(e) => Err(e),
        };
        metrics::observe_storage("find", start, result.is_ok());
        Ok(result?)
    }

    async fn update(&self, id: ObjectId, title: &str, completed: bool) -> Result<(), StoreError> {
        let start = Instant::now();
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "title": title, "completed": completed } },
                None,
            )
            .await;
        metrics::observe_storage("update", start, result.is_ok());

        if result?.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> Result<(), StoreError> {
        let start = Instant::now();
        let result = self.collection.delete_one(doc! { "_id": id }, None).await;
        metrics::observe_storage("delete", start, result.is_ok());

        if result?.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
