//! `Authorization: Bearer <jwt>` の署名検証 → 失敗なら 401
//!
//! - header が無い / 2 語でない / 1 語目が bearer (大小無視) でない → 401
//! - 2 語目が共有 secret で HMAC 検証できない → 401
//! - 成功時は claims を extensions に入れず、そのまま handler へ

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::error::AppError;
use crate::middleware::Interceptor;
use crate::services::auth::TokenVerifier;
use crate::state::AppState;

#[derive(Clone, Debug)]
pub struct BearerAuth {
    verifier: Arc<TokenVerifier>,
}

impl BearerAuth {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }
}

impl Interceptor for BearerAuth {
    fn wrap(&self, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
        route.route_layer(middleware::from_fn_with_state(self.clone(), bearer_middleware))
    }
}

/// Pull the token out of an `Authorization` value: exactly `<bearer> <token>`.
fn bearer_token(value: &str) -> Option<&str> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => None,
    }
}

async fn bearer_middleware(
    State(auth): State<BearerAuth>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = bearer_token(value).ok_or(AppError::Unauthorized)?;

    if let Err(err) = auth.verifier.verify(token) {
        tracing::warn!(error = %err, "bearer token verification failed");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(req).await)
}
