/*
 * Responsibility
 * - Config読み込み → 依存生成 (repo / service / interceptor) → Router 組み立て
 * - Middleware の適用 (request-id / trace / body limit, logging, 認証)
 * - axum::serve() で起動
 */
use std::{panic, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::{Config, CreateAuth, StoreKind},
    middleware::{self, BasicAuth, BearerAuth, Interceptor},
    repos::{CommentRepo, InMemoryCommentRepo, PgCommentRepo},
    services::{
        CommentService,
        auth::{BasicCredentials, TokenVerifier},
    },
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,comments_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook() {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost".
        // axum/hyper only tear down the task that panicked; the server keeps running.
        tracing::error!(?info, "panic");
        default_hook(info);
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    init_panic_hook();

    let config = Config::from_env()?;

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let create_guard = build_create_guard(&config)?;
    let app = build_router(state, create_guard.as_ref());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_repo(config: &Config) -> Result<Arc<dyn CommentRepo>> {
    match config.store {
        StoreKind::Memory => {
            if config.app_env.is_production() {
                tracing::warn!("in-memory comment store in production: data is lost on restart");
            }
            Ok(Arc::new(InMemoryCommentRepo::new()))
        }
        StoreKind::Postgres => {
            let options = config.database.connect_options()?;
            // connect() fails fast when the database is unreachable
            let pool = PgPoolOptions::new()
                .connect_with(options)
                .await
                .context("failed to connect to postgres")?;

            let repo = PgCommentRepo::new(pool);
            repo.migrate()
                .await
                .context("failed to run database migrations")?;

            Ok(Arc::new(repo))
        }
    }
}

async fn build_state(config: &Config) -> Result<AppState> {
    // Build process-level services here and inject them into the shared application state.
    let repo = build_repo(config).await?;
    tracing::info!(backend = repo.backend_name(), "comment store ready");

    Ok(AppState::new(CommentService::new(repo)))
}

fn build_create_guard(config: &Config) -> Result<Box<dyn Interceptor>> {
    let guard: Box<dyn Interceptor> = match &config.create_auth {
        CreateAuth::Bearer => {
            let verifier = TokenVerifier::new(config.jwt_secret.as_bytes())?;
            Box::new(BearerAuth::new(verifier))
        }
        CreateAuth::Basic { username, password } => Box::new(BasicAuth::new(
            BasicCredentials::new(username.clone(), password.clone()),
        )),
    };
    Ok(guard)
}

fn build_router(state: AppState, create_guard: &dyn Interceptor) -> Router {
    let router = api::routes(create_guard).with_state(state);

    middleware::http::apply(router)
}
