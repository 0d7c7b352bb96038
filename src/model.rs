//! Todo item model and codec
//!
//! Converts between the storage representation (BSON object id, BSON
//! datetime) and the wire representation (hex string id, RFC 3339
//! timestamp), and defines the request/response JSON shapes.

use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Stored form of a todo item, as persisted in the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub completed: bool,
    pub created_at: bson::DateTime,
}

/// Wire form of a todo item, as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<TodoDocument> for Todo {
    fn from(doc: TodoDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            title: doc.title,
            completed: doc.completed,
            created_at: doc.created_at.to_chrono(),
        }
    }
}

/// Request payload for create and update
///
/// Fields are serde-defaulted so a body without a title decodes cleanly and
/// fails title validation instead of body decoding.
#[derive(Debug, Deserialize)]
pub struct TodoInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Response body for the list operation
#[derive(Debug, Serialize)]
pub struct TodoListResponse {
    pub data: Vec<Todo>,
}

/// Response body for a successful create
#[derive(Debug, Serialize)]
pub struct TodoCreatedResponse {
    pub message: String,
    pub todo_id: String,
}

/// Response body carrying only a message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
