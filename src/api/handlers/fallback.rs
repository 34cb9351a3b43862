/*
 * Responsibility
 * - route / method が一致しないリクエストを 404 + envelope にする
 */
use axum::http::{Method, Uri};

use crate::error::AppError;

pub async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::not_found("Not found", format!("no route for {method} {}", uri.path()))
}
