use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use super::{ensure_affected, RepoError, RepoResult};
use crate::auth::password;
use crate::types::{User, DEFAULT_PICTURE};

const USER_COLUMNS: &str = "id, username, email, year, admin, picture, password, created_at, updated_at";

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_all(&self) -> RepoResult<Vec<User>>;
    async fn get_one(&self, id: i64) -> RepoResult<User>;
    async fn get_by_username(&self, username: &str) -> RepoResult<User>;
    async fn get_by_year(&self, year: i32) -> RepoResult<Vec<User>>;
    /// Trims the username, hashes `user.password`, assigns the default picture
    /// when none is set, inserts the row and writes the new id and timestamps
    /// back into `user`.
    async fn create(&self, user: &mut User) -> RepoResult<()>;
    /// Persists email, year and picture only.
    async fn update(&self, id: i64, user: &User) -> RepoResult<()>;
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn get_all(&self) -> RepoResult<Vec<User>> {
        let q = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&q).fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn get_one(&self, id: i64) -> RepoResult<User> {
        let q = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&q).bind(id).fetch_one(&self.pool).await?;
        Ok(user)
    }

    async fn get_by_username(&self, username: &str) -> RepoResult<User> {
        let q = format!("SELECT {} FROM users WHERE username = ?1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&q).bind(username).fetch_one(&self.pool).await?;
        Ok(user)
    }

    async fn get_by_year(&self, year: i32) -> RepoResult<Vec<User>> {
        let q = format!("SELECT {} FROM users WHERE year = ?1 ORDER BY id", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&q).bind(year).fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn create(&self, user: &mut User) -> RepoResult<()> {
        // Login and lookups use the trimmed name
        let trimmed = user.username.trim();
        if trimmed.len() != user.username.len() {
            user.username = trimmed.to_string();
        }
        if user.picture.trim().is_empty() {
            user.picture = DEFAULT_PICTURE.to_string();
        }

        user.password_hash = password::hash(&user.password).map_err(|e| RepoError::Hash(e.to_string()))?;
        user.password.clear();

        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO users (username, password, email, year, admin, picture, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(user.year)
        .bind(user.admin)
        .bind(&user.picture)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        user.id = result.last_insert_rowid();
        user.created_at = Some(now);
        user.updated_at = Some(now);
        Ok(())
    }

    async fn update(&self, id: i64, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r#"UPDATE users SET email = ?1, year = ?2, picture = ?3, updated_at = ?4
               WHERE id = ?5"#,
        )
        .bind(&user.email)
        .bind(user.year)
        .bind(&user.picture)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        ensure_affected(result)
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1").bind(id).execute(&self.pool).await?;
        ensure_affected(result)
    }
}
