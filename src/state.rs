use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::{AppConfig, AuthConfig};
use crate::repository::{
    PostRepository, ReplyRepository, SqlitePostRepository, SqliteReplyRepository, SqliteSubjectRepository,
    SqliteUserRepository, SubjectRepository, UserRepository,
};

/// The shared application state.
///
/// Holds one repository per entity behind its trait, plus the configuration.
/// Cloning is cheap; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub subjects: Arc<dyn SubjectRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub replies: Arc<dyn ReplyRepository>,
}

impl AppState {
    /// Builds the state with SQLite repositories sharing `pool`.
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            users: Arc::new(SqliteUserRepository::new(pool.clone())),
            subjects: Arc::new(SqliteSubjectRepository::new(pool.clone())),
            posts: Arc::new(SqlitePostRepository::new(pool.clone())),
            replies: Arc::new(SqliteReplyRepository::new(pool)),
        }
    }

    pub fn auth_config(&self) -> Arc<AuthConfig> {
        Arc::new(self.config.auth.clone())
    }
}
