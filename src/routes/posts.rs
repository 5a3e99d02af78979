use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    response::Response,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use super::created;
use super::extract::{AppJson, AppPath, AppQuery};
use crate::error::{AppResult, RepoResultExt};
use crate::repository::{PostOrder, PostRepository};
use crate::types::{Post, PostOrderQuery};

const ENTITY: &str = "post";

type Repo = Arc<dyn PostRepository>;

pub fn router(repo: Repo) -> Router {
    Router::new()
        .route("/", get(get_all).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete))
        .route("/user/{user_id}", get(get_by_user))
        .route("/subject/{subject_id}", get(get_by_subject))
        .route("/subject/{subject_id}/category/{category}", get(get_by_category))
        .route("/subject/{subject_id}/title/{title}", get(get_by_title))
        .with_state(repo)
}

pub async fn get_all(State(repo): State<Repo>) -> AppResult<Json<Value>> {
    let posts = repo.get_all().await.on_read(ENTITY)?;
    Ok(Json(json!({ "posts": posts })))
}

pub async fn get_one(State(repo): State<Repo>, AppPath(id): AppPath<i64>) -> AppResult<Json<Value>> {
    let post = repo.get_one(id).await.on_read(ENTITY)?;
    Ok(Json(json!({ "post": post })))
}

pub async fn get_by_user(State(repo): State<Repo>, AppPath(user_id): AppPath<i64>) -> AppResult<Json<Value>> {
    let posts = repo.get_by_user(user_id).await.on_read(ENTITY)?;
    Ok(Json(json!({ "posts": posts })))
}

/// `?order=created` sorts by creation time; any other value by last update.
pub async fn get_by_subject(
    State(repo): State<Repo>,
    AppPath(subject_id): AppPath<i64>,
    AppQuery(query): AppQuery<PostOrderQuery>,
) -> AppResult<Json<Value>> {
    let order = PostOrder::from_flag(query.order.as_deref().unwrap_or_default());
    let posts = repo.get_by_subject(subject_id, order).await.on_read(ENTITY)?;
    Ok(Json(json!({ "posts": posts })))
}

pub async fn get_by_category(
    State(repo): State<Repo>,
    AppPath((subject_id, category)): AppPath<(i64, String)>,
) -> AppResult<Json<Value>> {
    let posts = repo.get_by_category(subject_id, &category).await.on_read(ENTITY)?;
    Ok(Json(json!({ "posts": posts })))
}

pub async fn get_by_title(
    State(repo): State<Repo>,
    AppPath((subject_id, title)): AppPath<(i64, String)>,
) -> AppResult<Json<Value>> {
    let posts = repo.get_by_title(subject_id, &title).await.on_read(ENTITY)?;
    Ok(Json(json!({ "posts": posts })))
}

pub async fn create(
    State(repo): State<Repo>,
    OriginalUri(uri): OriginalUri,
    AppJson(mut post): AppJson<Post>,
) -> AppResult<Response> {
    repo.create(&mut post).await.on_write(ENTITY)?;
    tracing::debug!(post_id = post.id, subject_id = post.subject_id, "Post created");
    Ok(created(&uri, post.id, json!({ "post": post })))
}

pub async fn update(
    State(repo): State<Repo>,
    AppPath(id): AppPath<i64>,
    AppJson(post): AppJson<Post>,
) -> AppResult<Json<Value>> {
    repo.update(id, &post).await.on_write(ENTITY)?;
    let stored = repo.get_one(id).await.on_read(ENTITY)?;
    Ok(Json(json!({ "post": stored })))
}

pub async fn delete(State(repo): State<Repo>, AppPath(id): AppPath<i64>) -> AppResult<Json<Value>> {
    repo.delete(id).await.on_write(ENTITY)?;
    Ok(Json(json!({})))
}
