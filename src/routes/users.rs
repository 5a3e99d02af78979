use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    response::Response,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use super::created;
use super::extract::{AppJson, AppPath};
use crate::error::{validation, AppResult, RepoResultExt};
use crate::repository::UserRepository;
use crate::types::User;

const ENTITY: &str = "user";

type Repo = Arc<dyn UserRepository>;

pub fn router(repo: Repo) -> Router {
    Router::new()
        .route("/", get(get_all).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete))
        .route("/username/{username}", get(get_by_username))
        .route("/year/{year}", get(get_by_year))
        .with_state(repo)
}

pub async fn get_all(State(repo): State<Repo>) -> AppResult<Json<Value>> {
    let users = repo.get_all().await.on_read(ENTITY)?;
    Ok(Json(json!({ "users": users })))
}

pub async fn get_one(State(repo): State<Repo>, AppPath(id): AppPath<i64>) -> AppResult<Json<Value>> {
    let user = repo.get_one(id).await.on_read(ENTITY)?;
    Ok(Json(json!({ "user": user })))
}

pub async fn get_by_username(
    State(repo): State<Repo>,
    AppPath(username): AppPath<String>,
) -> AppResult<Json<Value>> {
    let user = repo.get_by_username(&username).await.on_read(ENTITY)?;
    Ok(Json(json!({ "user": user })))
}

pub async fn get_by_year(State(repo): State<Repo>, AppPath(year): AppPath<i32>) -> AppResult<Json<Value>> {
    let users = repo.get_by_year(year).await.on_read(ENTITY)?;
    Ok(Json(json!({ "users": users })))
}

pub async fn create(
    State(repo): State<Repo>,
    OriginalUri(uri): OriginalUri,
    AppJson(mut user): AppJson<User>,
) -> AppResult<Response> {
    validation::validate_username(&user.username)?;
    validation::validate_password(&user.password)?;
    user.admin = false;

    repo.create(&mut user).await.on_write(ENTITY)?;
    tracing::info!(user_id = user.id, username = %user.username, "User created");

    Ok(created(&uri, user.id, json!({ "user": user })))
}

/// Only email, year and picture are persisted; the stored record is returned.
pub async fn update(
    State(repo): State<Repo>,
    AppPath(id): AppPath<i64>,
    AppJson(user): AppJson<User>,
) -> AppResult<Json<Value>> {
    repo.update(id, &user).await.on_write(ENTITY)?;
    let stored = repo.get_one(id).await.on_read(ENTITY)?;
    Ok(Json(json!({ "user": stored })))
}

pub async fn delete(State(repo): State<Repo>, AppPath(id): AppPath<i64>) -> AppResult<Json<Value>> {
    repo.delete(id).await.on_write(ENTITY)?;
    tracing::info!(user_id = id, "User deleted");
    Ok(Json(json!({})))
}
