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
use crate::repository::SubjectRepository;
use crate::types::Subject;

const ENTITY: &str = "subject";

type Repo = Arc<dyn SubjectRepository>;

pub fn router(repo: Repo) -> Router {
    Router::new()
        .route("/", get(get_all).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete))
        .route("/subject/{year}", get(get_by_year))
        .with_state(repo)
}

pub async fn get_all(State(repo): State<Repo>) -> AppResult<Json<Value>> {
    let subjects = repo.get_all().await.on_read(ENTITY)?;
    Ok(Json(json!({ "subjects": subjects })))
}

pub async fn get_one(State(repo): State<Repo>, AppPath(id): AppPath<i64>) -> AppResult<Json<Value>> {
    let subject = repo.get_one(id).await.on_read(ENTITY)?;
    Ok(Json(json!({ "subject": subject })))
}

pub async fn get_by_year(State(repo): State<Repo>, AppPath(year): AppPath<i32>) -> AppResult<Json<Value>> {
    let subjects = repo.get_by_year(year).await.on_read(ENTITY)?;
    Ok(Json(json!({ "subjects": subjects })))
}

pub async fn create(
    State(repo): State<Repo>,
    OriginalUri(uri): OriginalUri,
    AppJson(mut subject): AppJson<Subject>,
) -> AppResult<Response> {
    repo.create(&mut subject).await.on_write(ENTITY)?;
    Ok(created(&uri, subject.id, json!({ "subject": subject })))
}

pub async fn update(
    State(repo): State<Repo>,
    AppPath(id): AppPath<i64>,
    AppJson(subject): AppJson<Subject>,
) -> AppResult<Json<Value>> {
    repo.update(id, &subject).await.on_write(ENTITY)?;
    let stored = repo.get_one(id).await.on_read(ENTITY)?;
    Ok(Json(json!({ "subject": stored })))
}

pub async fn delete(State(repo): State<Repo>, AppPath(id): AppPath<i64>) -> AppResult<Json<Value>> {
    repo.delete(id).await.on_write(ENTITY)?;
    Ok(Json(json!({})))
}
