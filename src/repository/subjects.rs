use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{ensure_affected, RepoResult};
use crate::types::Subject;

#[async_trait]
pub trait SubjectRepository: Send + Sync {
    async fn get_all(&self) -> RepoResult<Vec<Subject>>;
    async fn get_one(&self, id: i64) -> RepoResult<Subject>;
    async fn get_by_year(&self, year: i32) -> RepoResult<Vec<Subject>>;
    async fn create(&self, subject: &mut Subject) -> RepoResult<()>;
    async fn update(&self, id: i64, subject: &Subject) -> RepoResult<()>;
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

#[derive(Clone)]
pub struct SqliteSubjectRepository {
    pool: SqlitePool,
}

impl SqliteSubjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubjectRepository for SqliteSubjectRepository {
    async fn get_all(&self) -> RepoResult<Vec<Subject>> {
        let subjects = sqlx::query_as::<_, Subject>("SELECT id, name, year FROM subjects ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(subjects)
    }

    async fn get_one(&self, id: i64) -> RepoResult<Subject> {
        let subject = sqlx::query_as::<_, Subject>("SELECT id, name, year FROM subjects WHERE id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(subject)
    }

    async fn get_by_year(&self, year: i32) -> RepoResult<Vec<Subject>> {
        let subjects =
            sqlx::query_as::<_, Subject>("SELECT id, name, year FROM subjects WHERE year = ?1 ORDER BY id")
                .bind(year)
                .fetch_all(&self.pool)
                .await?;
        Ok(subjects)
    }

    async fn create(&self, subject: &mut Subject) -> RepoResult<()> {
        let result = sqlx::query("INSERT INTO subjects (name, year) VALUES (?1, ?2)")
            .bind(&subject.name)
            .bind(subject.year)
            .execute(&self.pool)
            .await?;
        subject.id = result.last_insert_rowid();
        Ok(())
    }

    async fn update(&self, id: i64, subject: &Subject) -> RepoResult<()> {
        let result = sqlx::query("UPDATE subjects SET name = ?1, year = ?2 WHERE id = ?3")
            .bind(&subject.name)
            .bind(subject.year)
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_affected(result)
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = ?1").bind(id).execute(&self.pool).await?;
        ensure_affected(result)
    }
}
