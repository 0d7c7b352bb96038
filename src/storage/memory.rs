//! In-memory todo store used as a test substitute

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

use crate::model::TodoDocument;
use crate::storage::{StoreError, TodoStore};

/// Test double holding documents in a mutex-guarded vec
pub struct MemoryTodoStore {
    todos: Mutex<Vec<TodoDocument>>,
    fail: bool,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self {
            todos: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A store whose every operation reports a backend failure
    pub fn failing() -> Self {
        Self {
            todos: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Backend(mongodb::error::Error::custom(
                "simulated backend failure",
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn insert(&self, todo: &TodoDocument) -> Result<(), StoreError> {
        self.check()?;
        self.todos.lock().unwrap().push(todo.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TodoDocument>, StoreError> {
        self.check()?;
        Ok(self.todos.lock().unwrap().clone())
    }

    async fn update(&self, id: ObjectId, title: &str, completed: bool) -> Result<(), StoreError> {
        self.check()?;
        let mut todos = self.todos.lock().unwrap();
        match todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.title = title.to_string();
                todo.completed = completed;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<(), StoreError> {
        self.check()?;
        let mut todos = self.todos.lock().unwrap();
        let before = todos.len();
        todos.retain(|t| t.id != id);
        if todos.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
