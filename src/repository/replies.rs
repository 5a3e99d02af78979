use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use super::{ensure_affected, RepoResult};
use crate::types::Reply;

const REPLY_COLUMNS: &str = "id, body, user_id, post_id, created_at, updated_at";

#[async_trait]
pub trait ReplyRepository: Send + Sync {
    async fn get_all(&self) -> RepoResult<Vec<Reply>>;
    async fn get_one(&self, id: i64) -> RepoResult<Reply>;
    async fn get_by_user(&self, user_id: i64) -> RepoResult<Vec<Reply>>;
    /// Replies of a post, oldest first.
    async fn get_by_post(&self, post_id: i64) -> RepoResult<Vec<Reply>>;
    async fn create(&self, reply: &mut Reply) -> RepoResult<()>;
    async fn update(&self, id: i64, reply: &Reply) -> RepoResult<()>;
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

#[derive(Clone)]
pub struct SqliteReplyRepository {
    pool: SqlitePool,
}

impl SqliteReplyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReplyRepository for SqliteReplyRepository {
    async fn get_all(&self) -> RepoResult<Vec<Reply>> {
        let q = format!("SELECT {} FROM replies ORDER BY id", REPLY_COLUMNS);
        let replies = sqlx::query_as::<_, Reply>(&q).fetch_all(&self.pool).await?;
        Ok(replies)
    }

    async fn get_one(&self, id: i64) -> RepoResult<Reply> {
        let q = format!("SELECT {} FROM replies WHERE id = ?1", REPLY_COLUMNS);
        let reply = sqlx::query_as::<_, Reply>(&q).bind(id).fetch_one(&self.pool).await?;
        Ok(reply)
    }

    async fn get_by_user(&self, user_id: i64) -> RepoResult<Vec<Reply>> {
        let q = format!("SELECT {} FROM replies WHERE user_id = ?1 ORDER BY id", REPLY_COLUMNS);
        let replies = sqlx::query_as::<_, Reply>(&q).bind(user_id).fetch_all(&self.pool).await?;
        Ok(replies)
    }

    async fn get_by_post(&self, post_id: i64) -> RepoResult<Vec<Reply>> {
        let q = format!("SELECT {} FROM replies WHERE post_id = ?1 ORDER BY created_at, id", REPLY_COLUMNS);
        let replies = sqlx::query_as::<_, Reply>(&q).bind(post_id).fetch_all(&self.pool).await?;
        Ok(replies)
    }

    async fn create(&self, reply: &mut Reply) -> RepoResult<()> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO replies (user_id, post_id, body, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
        )
        .bind(reply.user_id)
        .bind(reply.post_id)
        .bind(&reply.body)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        reply.id = result.last_insert_rowid();
        reply.created_at = Some(now);
        reply.updated_at = Some(now);
        Ok(())
    }

    async fn update(&self, id: i64, reply: &Reply) -> RepoResult<()> {
        let result = sqlx::query("UPDATE replies SET body = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(&reply.body)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_affected(result)
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM replies WHERE id = ?1").bind(id).execute(&self.pool).await?;
        ensure_affected(result)
    }
}
