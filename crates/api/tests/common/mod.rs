#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use marquee_db::PoolConfig;
use sqlx::PgPool;
use tower::ServiceExt;

use marquee_api::background::BackgroundTasks;
use marquee_api::config::{LogFormat, ServerConfig};
use marquee_api::mailer::{LogMailer, Mailer};
use marquee_api::router::build_app_router;
use marquee_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_body_bytes: 1_048_576,
        shutdown_timeout_secs: 5,
        log_format: LogFormat::Pretty,
        database_url: String::new(),
        pool: PoolConfig::default(),
    }
}

pub fn test_state(pool: PgPool, config: ServerConfig, mailer: Arc<dyn Mailer>) -> AppState {
    AppState {
        pool,
        config: Arc::new(config),
        background: BackgroundTasks::new(),
        mailer,
    }
}

/// Build the full application router, with the production middleware
/// stack, over the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(test_state(pool, test_config(), Arc::new(LogMailer)))
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a raw body with a JSON content type.
pub async fn send_raw(app: Router, method: Method, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_raw(app, Method::POST, uri, &body.to_string()).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_raw(app, Method::PATCH, uri, &body.to_string()).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A valid movie payload for create requests.
pub fn movie_body(title: &str, year: i32, genres: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "year": year,
        "runtime": "102 min",
        "genres": genres,
    })
}
