/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - not found は Option / bool で返すので、ここには「失敗」だけを置く
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("stored id is out of range: {0}")]
    IdOutOfRange(i64),
}
