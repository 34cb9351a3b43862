/*
 * Responsibility
 * - request body を JSON として decode する
 * - Content-Type は問わない。壊れた JSON は 400 + envelope
 * - body 上限 (DefaultBodyLimit) 超えは 413 + envelope
 */
use axum::{
    body::Bytes,
    extract::{FromRequest, Request, rejection::BytesRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

const DECODE_FAILURE: &str = "Failed decoding incoming request";

#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(reject)?;

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| AppError::bad_request(DECODE_FAILURE, e))
    }
}

fn reject(e: BytesRejection) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge {
            message: DECODE_FAILURE,
            detail: e.body_text(),
        }
    } else {
        AppError::bad_request(DECODE_FAILURE, e.body_text())
    }
}
