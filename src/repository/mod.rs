//! Persistence layer.
//!
//! Each entity has a capability trait (`UserRepository`, `SubjectRepository`,
//! `PostRepository`, `ReplyRepository`) and a SQLite implementation holding a
//! clone of the shared pool. Routers only see the trait objects, so tests can
//! swap in in-memory fakes.

pub mod posts;
pub mod replies;
pub mod subjects;
pub mod users;

pub use posts::{PostOrder, PostRepository, SqlitePostRepository};
pub use replies::{ReplyRepository, SqliteReplyRepository};
pub use subjects::{SqliteSubjectRepository, SubjectRepository};
pub use users::{SqliteUserRepository, UserRepository};

use sqlx::sqlite::SqliteQueryResult;

/// Errors surfaced by repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// A lookup, update or delete matched no row.
    #[error("record not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(sqlx::Error),
    #[error("password hashing failed: {0}")]
    Hash(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound,
            other => RepoError::Database(other),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Treats a write that touched no rows as a missing record.
pub(crate) fn ensure_affected(result: SqliteQueryResult) -> RepoResult<()> {
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound);
    }
    Ok(())
}
