/*
 * Responsibility
 * - Path の `{id}` を String として受け、u64 に変換する
 * - 失敗時は service を呼ぶ前に 400 を返す
 */
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

const PARSE_FAILURE: &str = "Could not parse the supplied ID to uint";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentId(pub u64);

impl<S> FromRequestParts<S> for CommentId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::bad_request(PARSE_FAILURE, e.body_text()))?;

        parse_id(&raw).map(Self)
    }
}

// ASCII digits only: `u64::from_str` alone would also take a leading `+`.
fn parse_id(raw: &str) -> Result<u64, AppError> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::bad_request(
            PARSE_FAILURE,
            format!("invalid digit in {raw:?}"),
        ));
    }

    raw.parse::<u64>()
        .map_err(|e| AppError::bad_request(PARSE_FAILURE, e))
}
