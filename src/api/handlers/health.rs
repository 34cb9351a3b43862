/*
 * Responsibility
 * - GET /api/health (疎通用)
 * - storage / 認証には依存しない
 */
use axum::response::Response;

use crate::response::{self, Envelope};

pub async fn health() -> Response {
    response::ok(&Envelope::message("Healthy!"))
}
