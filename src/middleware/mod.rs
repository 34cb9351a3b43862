/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - route 単位で掛ける interceptor の契約 (Interceptor)
 *   - logging は router 全体、auth は route ごとに 0 or 1 個
 */
use axum::routing::MethodRouter;

use crate::state::AppState;

pub mod auth;
pub mod http;
pub mod logging;

pub use auth::{basic::BasicAuth, bearer::BearerAuth};

/// A request interceptor that wraps a route's handler and may reject before delegating.
pub trait Interceptor: Send + Sync {
    fn wrap(&self, route: MethodRouter<AppState>) -> MethodRouter<AppState>;
}

/// Wrap `route` with `interceptors`; the first one listed runs first.
pub fn chain(
    route: MethodRouter<AppState>,
    interceptors: &[&dyn Interceptor],
) -> MethodRouter<AppState> {
    interceptors
        .iter()
        .rev()
        .fold(route, |route, interceptor| interceptor.wrap(route))
}
