use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use super::{ensure_affected, RepoResult};
use crate::types::Post;

const POST_COLUMNS: &str = "id, title, category, body, user_id, subject_id, created_at, updated_at";

/// Sort order for posts listed under a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrder {
    Created,
    #[default]
    Updated,
}

impl PostOrder {
    /// `"created"` selects creation order; anything else falls back to update order.
    pub fn from_flag(flag: &str) -> Self {
        if flag == "created" {
            PostOrder::Created
        } else {
            PostOrder::Updated
        }
    }

    fn column(self) -> &'static str {
        match self {
            PostOrder::Created => "created_at",
            PostOrder::Updated => "updated_at",
        }
    }
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn get_all(&self) -> RepoResult<Vec<Post>>;
    async fn get_one(&self, id: i64) -> RepoResult<Post>;
    async fn get_by_subject(&self, subject_id: i64, order: PostOrder) -> RepoResult<Vec<Post>>;
    async fn get_by_user(&self, user_id: i64) -> RepoResult<Vec<Post>>;
    /// Category is matched with `LIKE` as given; no wildcards are added.
    async fn get_by_category(&self, subject_id: i64, category: &str) -> RepoResult<Vec<Post>>;
    /// Title prefix search within a subject.
    async fn get_by_title(&self, subject_id: i64, title: &str) -> RepoResult<Vec<Post>>;
    async fn create(&self, post: &mut Post) -> RepoResult<()>;
    /// Persists title, category and body, and bumps `updated_at`.
    async fn update(&self, id: i64, post: &Post) -> RepoResult<()>;
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

#[derive(Clone)]
pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn get_all(&self) -> RepoResult<Vec<Post>> {
        let q = format!("SELECT {} FROM posts ORDER BY id", POST_COLUMNS);
        let posts = sqlx::query_as::<_, Post>(&q).fetch_all(&self.pool).await?;
        Ok(posts)
    }

    async fn get_one(&self, id: i64) -> RepoResult<Post> {
        let q = format!("SELECT {} FROM posts WHERE id = ?1", POST_COLUMNS);
        let post = sqlx::query_as::<_, Post>(&q).bind(id).fetch_one(&self.pool).await?;
        Ok(post)
    }

    async fn get_by_subject(&self, subject_id: i64, order: PostOrder) -> RepoResult<Vec<Post>> {
        // Column name comes from a closed enum, never from the request
        let q = format!(
            "SELECT {} FROM posts WHERE subject_id = ?1 ORDER BY {}, id",
            POST_COLUMNS,
            order.column()
        );
        let posts = sqlx::query_as::<_, Post>(&q).bind(subject_id).fetch_all(&self.pool).await?;
        Ok(posts)
    }

    async fn get_by_user(&self, user_id: i64) -> RepoResult<Vec<Post>> {
        let q = format!("SELECT {} FROM posts WHERE user_id = ?1 ORDER BY id", POST_COLUMNS);
        let posts = sqlx::query_as::<_, Post>(&q).bind(user_id).fetch_all(&self.pool).await?;
        Ok(posts)
    }

    async fn get_by_category(&self, subject_id: i64, category: &str) -> RepoResult<Vec<Post>> {
        let q = format!(
            "SELECT {} FROM posts WHERE subject_id = ?1 AND category LIKE ?2 ORDER BY id",
            POST_COLUMNS
        );
        let posts =
            sqlx::query_as::<_, Post>(&q).bind(subject_id).bind(category).fetch_all(&self.pool).await?;
        Ok(posts)
    }

    async fn get_by_title(&self, subject_id: i64, title: &str) -> RepoResult<Vec<Post>> {
        let q = format!(
            "SELECT {} FROM posts WHERE subject_id = ?1 AND title LIKE ?2 ORDER BY id",
            POST_COLUMNS
        );
        let pattern = format!("{}%", title);
        let posts =
            sqlx::query_as::<_, Post>(&q).bind(subject_id).bind(pattern).fetch_all(&self.pool).await?;
        Ok(posts)
    }

    async fn create(&self, post: &mut Post) -> RepoResult<()> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO posts (user_id, subject_id, title, category, body, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"#,
        )
        .bind(post.user_id)
        .bind(post.subject_id)
        .bind(&post.title)
        .bind(&post.category)
        .bind(&post.body)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        post.id = result.last_insert_rowid();
        post.created_at = Some(now);
        post.updated_at = Some(now);
        Ok(())
    }

    async fn update(&self, id: i64, post: &Post) -> RepoResult<()> {
        let result = sqlx::query(
            r#"UPDATE posts SET title = ?1, category = ?2, body = ?3, updated_at = ?4
               WHERE id = ?5"#,
        )
        .bind(&post.title)
        .bind(&post.category)
        .bind(&post.body)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        ensure_affected(result)
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?1").bind(id).execute(&self.pool).await?;
        ensure_affected(result)
    }
}
