/*
 * Responsibility
 * - comments のビジネスロジック層
 * - repo の Option / bool / RepoError を NotFound / Storage に揃えて返す
 * - id は採番しない (repo に任せる)
 */
use std::sync::Arc;

use thiserror::Error;

use crate::repos::{CommentInput, CommentRepo, CommentRow, RepoError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("comment {id} not found")]
    NotFound { id: u64 },
    #[error("storage failure")]
    Storage(#[from] RepoError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Clone)]
pub struct CommentService {
    repo: Arc<dyn CommentRepo>,
}

impl std::fmt::Debug for CommentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentService")
            .field("backend", &self.repo.backend_name())
            .finish()
    }
}

impl CommentService {
    pub fn new(repo: Arc<dyn CommentRepo>) -> Self {
        Self { repo }
    }

    pub async fn get_comment(&self, id: u64) -> Result<CommentRow> {
        self.repo
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound { id })
    }

    pub async fn get_all_comments(&self) -> Result<Vec<CommentRow>> {
        Ok(self.repo.list().await?)
    }

    pub async fn post_comment(&self, input: CommentInput) -> Result<CommentRow> {
        let row = self.repo.create(input).await?;
        tracing::debug!(id = row.id, "comment created");
        Ok(row)
    }

    pub async fn update_comment(&self, id: u64, input: CommentInput) -> Result<CommentRow> {
        self.repo
            .update(id, input)
            .await?
            .ok_or(ServiceError::NotFound { id })
    }

    pub async fn delete_comment(&self, id: u64) -> Result<()> {
        if self.repo.delete(id).await? {
            tracing::debug!(id, "comment deleted");
            Ok(())
        } else {
            Err(ServiceError::NotFound { id })
        }
    }
}
