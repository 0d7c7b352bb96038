//! Document store abstraction layer
//!
//! Provides the trait seam between the HTTP handlers and the MongoDB
//! collection holding todo items. Handlers depend on a shared store handle
//! constructed once at startup; tests substitute an in-memory
//! implementation behind the same trait.

mod mongo;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;
use crate::model::TodoDocument;

pub use mongo::MongoTodoStore;

/// Errors surfaced by document store operations
///
/// Absence gets its own variant so callers can tell a missing document
/// apart from a failed operation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document matched the given id
    #[error("no document matched the given id")]
    NotFound,

    /// Driver-level failure
    #[error(transparent)]
    Backend(#[from] mongodb::error::Error),
}

/// Document store operations over the todo collection
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Persist a new todo document
    async fn insert(&self, todo: &TodoDocument) -> Result<(), StoreError>;

    /// Fetch every todo document, in storage order
    async fn find_all(&self) -> Result<Vec<TodoDocument>, StoreError>;

    /// Set title and completed on the document with the given id
    async fn update(&self, id: ObjectId, title: &str, completed: bool) -> Result<(), StoreError>;

    /// Remove the document with the given id
    async fn delete(&self, id: ObjectId) -> Result<(), StoreError>;
}

/// Create the document store from configuration
///
/// A connection failure here is fatal; the process exits rather than serve
/// requests without a reachable store.
pub async fn create_store(
    config: &Config,
) -> Result<Arc<dyn TodoStore>, Box<dyn std::error::Error>> {
    let store = MongoTodoStore::connect(&config.storage).await?;
    Ok(Arc::new(store))
}
