/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON envelope)
 * - ServiceError / 入力エラー / 認証エラーを統一的に変換
 *
 * status の対応
 * - BadRequest   (id / body が読めない)  -> 400
 * - NotFound     (comment が無い, route 不一致) -> 404
 * - PayloadTooLarge (body が上限超え)   -> 413
 * - Unauthorized (資格情報 / token 不正)  -> 401
 * - Internal     (storage 失敗)          -> 500
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::{self, Envelope};
use crate::services::ServiceError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}: {detail}")]
    BadRequest { message: &'static str, detail: String },
    #[error("{message}: {detail}")]
    NotFound { message: &'static str, detail: String },
    #[error("{message}: {detail}")]
    PayloadTooLarge { message: &'static str, detail: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("{message}: internal server error")]
    Internal { message: &'static str },
}

impl AppError {
    pub fn bad_request(message: &'static str, detail: impl ToString) -> Self {
        Self::BadRequest {
            message,
            detail: detail.to_string(),
        }
    }

    pub fn not_found(message: &'static str, detail: impl ToString) -> Self {
        Self::NotFound {
            message,
            detail: detail.to_string(),
        }
    }

    /// Attach a handler-level summary to a service failure.
    pub fn from_service(message: &'static str, err: ServiceError) -> Self {
        match &err {
            ServiceError::NotFound { .. } => Self::not_found(message, &err),
            ServiceError::Storage(source) => {
                // storage details stay in the log, not in the response
                tracing::error!(error = ?source, "{message}");
                Self::Internal { message }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn envelope(self) -> Envelope {
        match self {
            AppError::BadRequest { message, detail }
            | AppError::NotFound { message, detail }
            | AppError::PayloadTooLarge { message, detail } => Envelope::error(message, detail),
            AppError::Unauthorized => Envelope::error("unauthorized", "unauthorized"),
            AppError::Internal { message } => Envelope::error(message, "internal server error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        response::json(status, &self.envelope())
    }
}
