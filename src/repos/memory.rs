//! In-memory `CommentRepo` (local runs without Postgres, and tests).
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::repos::{
    comment_repo::{CommentInput, CommentRepo, CommentRow},
    error::RepoError,
};

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    rows: BTreeMap<u64, CommentRow>,
}

/// Rows are listed in ascending id order. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryCommentRepo {
    inner: RwLock<Inner>,
}

impl InMemoryCommentRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepo for InMemoryCommentRepo {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, input: CommentInput) -> Result<CommentRow, RepoError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let row = input.into_row(inner.next_id);
        inner.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get(&self, id: u64) -> Result<Option<CommentRow>, RepoError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<CommentRow>, RepoError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, id: u64, input: CommentInput) -> Result<Option<CommentRow>, RepoError> {
        let mut inner = self.inner.write().await;
        match inner.rows.get_mut(&id) {
            Some(slot) => {
                *slot = input.into_row(id);
                Ok(Some(slot.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: u64) -> Result<bool, RepoError> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }
}
