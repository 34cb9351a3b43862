/*
 * Responsibility
 * - comments ストレージの契約 (create / get / list / update / delete)
 * - 実装は Postgres (pg.rs) と in-memory (memory.rs)
 * - not found は Option / bool で、失敗は RepoError で返す
 */
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::repos::error::RepoError;

/// A stored comment. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRow {
    pub id: u64,
    // any JSON value; "" when the client sent none
    pub body: Value,
    // client supplied fields other than `id` / `body`, kept as-is
    pub fields: Map<String, Value>,
}

/// Content of a comment without an id (create payload / full replacement).
#[derive(Debug, Clone, PartialEq)]
pub struct CommentInput {
    pub body: Value,
    pub fields: Map<String, Value>,
}

impl Default for CommentInput {
    fn default() -> Self {
        Self {
            body: empty_body(),
            fields: Map::new(),
        }
    }
}

/// Structural default of `body`.
pub fn empty_body() -> Value {
    Value::String(String::new())
}

impl CommentInput {
    pub fn into_row(self, id: u64) -> CommentRow {
        CommentRow {
            id,
            body: self.body,
            fields: self.fields,
        }
    }
}

/// Storage collaborator for comments.
///
/// Implementations must be cheap to share (`Arc<dyn CommentRepo>`).
#[async_trait]
pub trait CommentRepo: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Insert and return the stored row with its new id.
    async fn create(&self, input: CommentInput) -> Result<CommentRow, RepoError>;

    async fn get(&self, id: u64) -> Result<Option<CommentRow>, RepoError>;

    // All rows in the store's natural order.
    async fn list(&self) -> Result<Vec<CommentRow>, RepoError>;

    // Replace the whole row. `Ok(None)` when `id` does not exist.
    async fn update(&self, id: u64, input: CommentInput) -> Result<Option<CommentRow>, RepoError>;

    // `Ok(false)` when `id` does not exist.
    async fn delete(&self, id: u64) -> Result<bool, RepoError>;
}
