use std::convert::Infallible;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::{Service, ServiceExt};
use tower_http::normalize_path::NormalizePath;

use crate::config::{AppConfig, DatabaseConfig};
use crate::state::AppState;
use crate::{db, routes};

/// A pool over a throwaway database file; the directory lives as long as this.
pub struct TestDb {
    pub pool: SqlitePool,
    _dir: TempDir,
}

pub async fn setup_test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("test.db").display());
    let cfg = DatabaseConfig { url, max_connections: 4, acquire_timeout_secs: 5 };

    let pool = db::connect(&cfg).await.unwrap();
    db::init_db(&pool).await.unwrap();

    TestDb { pool, _dir: dir }
}

pub fn test_config(auth_enabled: bool) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.auth.enabled = auth_enabled;
    cfg.auth.jwt_secret = "test-secret".to_string();
    cfg
}

/// The full API as served, including trailing-slash normalization.
pub type TestApp = NormalizePath<Router>;

pub async fn setup_test_app(auth_enabled: bool) -> (TestApp, TestDb) {
    let test_db = setup_test_db().await;
    let state = AppState::new(test_db.pool.clone(), test_config(auth_enabled));
    (routes::service(routes::api(state)), test_db)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send<S>(app: &S, method: Method, uri: &str, body: Option<&str>, token: Option<&str>) -> TestResponse
where
    S: Service<Request<Body>, Response = Response, Error = Infallible> + Clone,
{
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder.body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty)).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    TestResponse { status, headers, body }
}

/// Inserts a user row directly, skipping password hashing.
pub async fn seed_user(pool: &SqlitePool, username: &str) -> i64 {
    let now = Utc::now();
    sqlx::query(
        r#"INSERT INTO users (username, email, year, admin, picture, password, created_at, updated_at)
           VALUES (?1, ?2, 1, 0, '', 'not-a-hash', ?3, ?4)"#,
    )
    .bind(username)
    .bind(format!("{}@example.com", username))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

pub async fn seed_subject(pool: &SqlitePool, name: &str, year: i32) -> i64 {
    sqlx::query("INSERT INTO subjects (name, year) VALUES (?1, ?2)")
        .bind(name)
        .bind(year)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table)).fetch_one(pool).await.unwrap()
}
