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
use crate::error::{AppResult, RepoResultExt};
use crate::repository::ReplyRepository;
use crate::types::Reply;

const ENTITY: &str = "reply";

type Repo = Arc<dyn ReplyRepository>;

pub fn router(repo: Repo) -> Router {
    Router::new()
        .route("/", get(get_all).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete))
        .route("/post/{post_id}", get(get_by_post))
        .route("/user/{user_id}", get(get_by_user))
        .with_state(repo)
}

pub async fn get_all(State(repo): State<Repo>) -> AppResult<Json<Value>> {
    let replies = repo.get_all().await.on_read(ENTITY)?;
    Ok(Json(json!({ "replies": replies })))
}

pub async fn get_one(State(repo): State<Repo>, AppPath(id): AppPath<i64>) -> AppResult<Json<Value>> {
    let reply = repo.get_one(id).await.on_read(ENTITY)?;
    Ok(Json(json!({ "reply": reply })))
}

pub async fn get_by_post(State(repo): State<Repo>, AppPath(post_id): AppPath<i64>) -> AppResult<Json<Value>> {
    let replies = repo.get_by_post(post_id).await.on_read(ENTITY)?;
    Ok(Json(json!({ "replies": replies })))
}

pub async fn get_by_user(State(repo): State<Repo>, AppPath(user_id): AppPath<i64>) -> AppResult<Json<Value>> {
    let replies = repo.get_by_user(user_id).await.on_read(ENTITY)?;
    Ok(Json(json!({ "replies": replies })))
}

pub async fn create(
    State(repo): State<Repo>,
    OriginalUri(uri): OriginalUri,
    AppJson(mut reply): AppJson<Reply>,
) -> AppResult<Response> {
    repo.create(&mut reply).await.on_write(ENTITY)?;
    Ok(created(&uri, reply.id, json!({ "reply": reply })))
}

pub async fn update(
    State(repo): State<Repo>,
    AppPath(id): AppPath<i64>,
    AppJson(reply): AppJson<Reply>,
) -> AppResult<Json<Value>> {
    repo.update(id, &reply).await.on_write(ENTITY)?;
    let stored = repo.get_one(id).await.on_read(ENTITY)?;
    Ok(Json(json!({ "reply": stored })))
}

pub async fn delete(State(repo): State<Repo>, AppPath(id): AppPath<i64>) -> AppResult<Json<Value>> {
    repo.delete(id).await.on_write(ENTITY)?;
    Ok(Json(json!({})))
}
