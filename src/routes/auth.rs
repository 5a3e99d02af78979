//! Public signup and login endpoints issuing bearer tokens.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use super::extract::AppJson;
use crate::auth::{password, token};
use crate::config::AuthConfig;
use crate::error::{validation, Access, AppError, AppResult, RepoResultExt};
use crate::repository::{RepoError, UserRepository};
use crate::types::{AuthResponse, LoginRequest, SignupRequest, User};

const ENTITY: &str = "user";

#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<dyn UserRepository>,
    pub config: Arc<AuthConfig>,
}

pub fn router(state: AuthState) -> Router {
    Router::new().route("/signup", post(signup)).route("/login", post(login)).with_state(state)
}

pub async fn signup(State(state): State<AuthState>, AppJson(req): AppJson<SignupRequest>) -> AppResult<Response> {
    validation::validate_username(&req.username)?;
    validation::validate_password(&req.password)?;

    let mut user = User {
        username: req.username.trim().to_string(),
        password: req.password,
        email: req.email,
        year: req.year,
        picture: req.picture.unwrap_or_default(),
        admin: false,
        ..User::default()
    };
    state.users.create(&mut user).await.on_write(ENTITY)?;
    tracing::info!(user_id = user.id, username = %user.username, "User signed up");

    let token = token::issue(&state.config, &user)?;
    let location = format!("/users/{}", user.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(AuthResponse { user, token })).into_response())
}

pub async fn login(State(state): State<AuthState>, AppJson(req): AppJson<LoginRequest>) -> AppResult<Json<AuthResponse>> {
    let user = match state.users.get_by_username(req.username.trim()).await {
        Ok(user) => user,
        Err(RepoError::NotFound) => return Err(invalid_credentials()),
        Err(e) => return Err(AppError::from_repo(e, ENTITY, Access::Read)),
    };

    if !password::verify(&req.password, &user.password_hash) {
        tracing::info!(username = %user.username, "Login rejected");
        return Err(invalid_credentials());
    }

    let token = token::issue(&state.config, &user)?;
    Ok(Json(AuthResponse { user, token }))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid username or password".to_string())
}
