//! `Authorization: Basic ...` を設定済みの username/password と完全一致で照合 → 失敗なら 401
//!
//! create route の認証方式として bearer と差し替え可能 (CREATE_COMMENT_AUTH=basic)

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
use crate::services::auth::BasicCredentials;
use crate::state::AppState;

#[derive(Clone, Debug)]
pub struct BasicAuth {
    credentials: Arc<BasicCredentials>,
}

impl BasicAuth {
    pub fn new(credentials: BasicCredentials) -> Self {
        Self {
            credentials: Arc::new(credentials),
        }
    }
}

impl Interceptor for BasicAuth {
    fn wrap(&self, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
        route.route_layer(middleware::from_fn_with_state(self.clone(), basic_middleware))
    }
}

async fn basic_middleware(
    State(auth): State<BasicAuth>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| auth.credentials.matches_header(v));

    if !authorized {
        tracing::warn!("basic auth rejected");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(req).await)
}
