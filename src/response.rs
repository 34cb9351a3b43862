/*
 * Responsibility
 * - 成功 / 失敗共通の JSON envelope ({"message", "error"})
 * - status + Content-Type + body を 1 つの Response にまとめて返す
 * - シリアライズ失敗はそのリクエストだけ 500 にして、プロセスは落とさない
 */
use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

// Pre-encoded so the fallback itself can never fail to serialize.
const ENCODING_FAILURE_BODY: &str =
    r#"{"message":"Failed encoding response","error":"internal server error"}"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

/// Serialize `payload` into a JSON response with the given status.
pub fn encode<T: Serialize>(status: StatusCode, payload: &T) -> Result<Response, serde_json::Error> {
    let bytes = serde_json::to_vec(payload)?;

    let mut res = Response::new(Body::from(bytes));
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    *res.status_mut() = status;
    Ok(res)
}

/// Like [`encode`], but an encoding failure is logged and answered with a fixed 500 envelope.
pub fn json<T: Serialize>(status: StatusCode, payload: &T) -> Response {
    match encode(status, payload) {
        Ok(res) => res,
        Err(err) => {
            tracing::error!(error = %err, "failed to encode response body");
            encoding_failure()
        }
    }
}

fn encoding_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "application/json")],
        ENCODING_FAILURE_BODY,
    )
        .into_response()
}

pub fn ok<T: Serialize>(payload: &T) -> Response {
    json(StatusCode::OK, payload)
}
