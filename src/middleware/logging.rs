//! Per-request log line (method + path) for every registered route.
//!
//! Applied with `route_layer`, so it wraps whatever auth interceptor a route already has
//! and never sees requests that fell through to the fallback.

use axum::{Router, extract::Request, middleware::Next, response::Response};

use crate::state::AppState;

pub fn apply(router: Router<AppState>) -> Router<AppState> {
    router.route_layer(axum::middleware::from_fn(log_request))
}

async fn log_request(req: Request, next: Next) -> Response {
    tracing::info!(method = %req.method(), path = %req.uri().path(), "request received");
    next.run(req).await
}
