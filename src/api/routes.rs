/*
 * Responsibility
 * - URL 構造 (route table) を定義
 * - /api/health, /api/comment, /api/comment/{id}
 * - 認証が必要な route に interceptor を掛ける (create のみ。PUT / DELETE は意図的に open)
 * - logging は全 route の一番外側、一致しない route / method は 404 envelope
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    comments::{delete_comment, get_all_comments, get_comment, post_comment, update_comment},
    fallback::not_found,
    health::health,
};
use crate::middleware::{self, Interceptor};
use crate::state::AppState;

/// Build the route table once. `create_guard` protects `POST /api/comment`.
pub fn routes(create_guard: &dyn Interceptor) -> Router<AppState> {
    let router = Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/comment",
            middleware::chain(post(post_comment), &[create_guard]).get(get_all_comments),
        )
        .route(
            "/api/comment/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        );

    middleware::logging::apply(router)
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
        response::Response,
    };
    use base64::{Engine, engine::general_purpose::STANDARD};
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::{BasicAuth, BearerAuth};
    use crate::repos::InMemoryCommentRepo;
    use crate::services::{
        CommentService,
        auth::{BasicCredentials, TokenVerifier},
    };

    const SECRET: &[u8] = b"secretsecret";

    fn state() -> AppState {
        AppState::new(CommentService::new(Arc::new(InMemoryCommentRepo::new())))
    }

    fn app() -> Router {
        let guard = BearerAuth::new(TokenVerifier::new(SECRET).unwrap());
        routes(&guard).with_state(state())
    }

    fn bearer() -> String {
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &json!({ "sub": "tester" }),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        format!("Bearer {token}")
    }

    fn request(method: Method, uri: &str, body: Option<Value>, auth: Option<String>) -> Request<Body> {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(value) = auth {
            req = req.header(header::AUTHORIZATION, value);
        }
        let body = match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        };
        req.body(body).unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res: Response = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_needs_nothing() {
        let app = app();
        let (status, body) = send(&app, request(Method::GET, "/api/health", None, None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Healthy!" }));
    }

    #[tokio::test]
    async fn comment_lifecycle() {
        let app = app();

        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/api/comment",
                Some(json!({ "body": "hello" })),
                Some(bearer()),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 1, "body": "hello" }));

        let (status, body) = send(&app, request(Method::GET, "/api/comment/1", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 1, "body": "hello" }));

        let (status, body) =
            send(&app, request(Method::DELETE, "/api/comment/1", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Comment deleted successfully" }));

        let (status, body) = send(&app, request(Method::GET, "/api/comment/1", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Error retrieving comment by id");
        assert_eq!(body["error"], "comment 1 not found");
    }

    #[tokio::test]
    async fn create_requires_a_token_but_update_and_delete_do_not() {
        let app = app();

        let (status, body) = send(
            &app,
            request(Method::POST, "/api/comment", Some(json!({ "body": "x" })), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "message": "unauthorized", "error": "unauthorized" }));

        send(
            &app,
            request(
                Method::POST,
                "/api/comment",
                Some(json!({ "body": "x", "author": "ann" })),
                Some(bearer()),
            ),
        )
        .await;

        let (status, body) = send(
            &app,
            request(Method::PUT, "/api/comment/1", Some(json!({ "body": "y" })), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // full replacement: `author` is gone
        assert_eq!(body, json!({ "id": 1, "body": "y" }));

        let (status, _) = send(&app, request(Method::DELETE, "/api/comment/1", None, None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn listing_returns_every_comment_in_order() {
        let app = app();

        let (_, body) = send(&app, request(Method::GET, "/api/comment", None, None)).await;
        assert_eq!(body, json!([]));

        for text in ["a", "b"] {
            send(
                &app,
                request(
                    Method::POST,
                    "/api/comment",
                    Some(json!({ "id": 77, "body": text })),
                    Some(bearer()),
                ),
            )
            .await;
        }

        let (status, body) = send(&app, request(Method::GET, "/api/comment", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{ "id": 1, "body": "a" }, { "id": 2, "body": "b" }])
        );
    }

    #[tokio::test]
    async fn null_body_is_stored_as_empty_and_other_json_is_kept() {
        let app = app();

        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/api/comment",
                Some(json!({ "body": null })),
                Some(bearer()),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 1, "body": "" }));

        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/api/comment",
                Some(json!({ "body": 5 })),
                Some(bearer()),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 2, "body": 5 }));

        let (status, body) = send(
            &app,
            request(Method::PUT, "/api/comment/2", Some(json!({ "body": null })), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 2, "body": "" }));

        let (status, body) = send(
            &app,
            request(Method::PUT, "/api/comment/1", Some(Value::Null), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 1, "body": "" }));
    }

    #[tokio::test]
    async fn bad_ids_are_rejected_before_the_service() {
        let app = app();

        for uri in [
            "/api/comment/abc",
            "/api/comment/-1",
            "/api/comment/+1",
            "/api/comment/1.5",
        ] {
            let (status, body) = send(&app, request(Method::GET, uri, None, None)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["message"], "Could not parse the supplied ID to uint");
        }

        let (status, _) = send(
            &app,
            request(Method::PUT, "/api/comment/abc", Some(json!({ "body": "y" })), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let app = app();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/comment")
            .header(header::AUTHORIZATION, bearer())
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Failed decoding incoming request");
    }

    #[tokio::test]
    async fn updating_or_deleting_a_missing_comment_is_not_found() {
        let app = app();

        let (status, _) = send(
            &app,
            request(Method::PUT, "/api/comment/5", Some(json!({ "body": "y" })), None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, request(Method::DELETE, "/api/comment/5", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_routes_and_methods_are_not_found() {
        let app = app();

        let (status, body) = send(&app, request(Method::GET, "/api/nope", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Not found");

        let (status, _) = send(&app, request(Method::PATCH, "/api/comment/1", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn basic_auth_can_guard_the_create_route_instead() {
        let guard = BasicAuth::new(BasicCredentials::new("admin", "password"));
        let app = routes(&guard).with_state(state());

        let (status, _) = send(
            &app,
            request(Method::POST, "/api/comment", Some(json!({ "body": "x" })), Some(bearer())),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let basic = format!("Basic {}", STANDARD.encode("admin:password"));
        let (status, body) = send(
            &app,
            request(Method::POST, "/api/comment", Some(json!({ "body": "x" })), Some(basic)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 1, "body": "x" }));
    }
}
