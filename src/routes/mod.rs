//! HTTP route handlers for the microblog API.
//!
//! Each entity router is bound to its repository trait object and mounted
//! under its own prefix:
//!
//! - `users`: `/users`
//! - `subjects`: `/subjects`
//! - `posts`: `/posts`
//! - `replies`: `/replies`
//!
//! All four groups sit behind [`require_auth`]. `auth` (signup/login) and
//! `health` are public.

pub mod auth;
pub mod extract;
pub mod health;
pub mod posts;
pub mod replies;
pub mod subjects;
pub mod users;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, StatusCode, Uri},
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tower::Layer;
use tower_http::{
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use crate::config::AuthConfig;
use crate::middleware::{auth::require_auth, security_headers::security_headers_middleware};
use crate::state::AppState;

/// Request bodies above this size are rejected before they reach a handler.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Assembles the full API from the shared state.
pub fn api(state: AppState) -> Router {
    let auth_cfg = state.auth_config();

    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/version", get(health::version))
        .nest(
            "/auth",
            auth::router(auth::AuthState { users: state.users.clone(), config: auth_cfg.clone() }),
        )
        .nest("/users", protected(users::router(state.users.clone()), &auth_cfg))
        .nest("/subjects", protected(subjects::router(state.subjects.clone()), &auth_cfg))
        .nest("/posts", protected(posts::router(state.posts.clone()), &auth_cfg))
        .nest("/replies", protected(replies::router(state.replies.clone()), &auth_cfg))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(state.config.clone(), security_headers_middleware))
}

/// Wraps the assembled router so `/subjects/` and `/subjects` reach the same
/// handler. Path normalization has to run before routing, so it sits outside
/// the `Router`.
pub fn service(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

fn protected(router: Router, auth: &Arc<AuthConfig>) -> Router {
    router.route_layer(from_fn_with_state(auth.clone(), require_auth))
}

/// 201 response with `Location` set to the request path plus the new id.
pub(crate) fn created(uri: &Uri, id: i64, body: Value) -> Response {
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), id);
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response()
}
