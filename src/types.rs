use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Picture assigned to users that sign up without one.
pub const DEFAULT_PICTURE: &str = "https://placekitten.com/g/300/300";

/// A registered account.
///
/// `password` is only ever read from request bodies; the repository hashes it
/// into `password_hash` and clears it. Neither is serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub year: i32,
    pub admin: bool,
    pub picture: String,
    #[serde(skip_serializing)]
    #[sqlx(skip)]
    pub password: String,
    #[serde(skip)]
    #[sqlx(rename = "password")]
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A topic that owns posts, scoped to a school year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub year: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub body: String,
    pub user_id: i64,
    pub subject_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Reply {
    pub id: i64,
    pub body: String,
    pub user_id: i64,
    pub post_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// Auth DTOs

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Query string of `GET /posts/subject/{subject_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostOrderQuery {
    pub order: Option<String>,
}
