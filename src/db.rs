use std::time::Duration;

use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqlitePool, SqlitePoolOptions},
    Sqlite,
};
use tracing::info;

use crate::config::DatabaseConfig;

/// Opens the shared connection pool, creating the database file if needed.
///
/// Every pooled connection enables foreign keys, so parent/child integrity
/// between users, subjects, posts and replies is enforced by SQLite itself.
/// `LIKE` is switched to case-sensitive matching on each connection too.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    if !Sqlite::database_exists(&cfg.url).await.unwrap_or(false) {
        info!("Creating SQLite database at {}", cfg.url);
        Sqlite::create_database(&cfg.url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                sqlx::query("PRAGMA foreign_keys=ON;").execute(&mut *conn).await?;
                // Category and title searches compare case-sensitively
                sqlx::query("PRAGMA case_sensitive_like=ON;").execute(&mut *conn).await?;
                if let Err(e) = sqlx::query("PRAGMA busy_timeout=10000;").execute(&mut *conn).await {
                    tracing::warn!("Failed to set busy_timeout: {}", e);
                }
                Ok(())
            })
        })
        .connect(&cfg.url)
        .await?;

    Ok(pool)
}

pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        tracing::warn!("Failed to set synchronous mode: {}", e);
    }

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL,
            year INTEGER NOT NULL DEFAULT 0,
            admin INTEGER NOT NULL DEFAULT 0,
            picture TEXT NOT NULL DEFAULT '',
            password TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS subjects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            year INTEGER NOT NULL DEFAULT 0
        )"#,
    )
    .execute(pool)
    .await?;

    // No cascades: removing a parent with children fails at the store
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT '',
            body TEXT NOT NULL DEFAULT '',
            user_id INTEGER NOT NULL,
            subject_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY(user_id) REFERENCES users(id),
            FOREIGN KEY(subject_id) REFERENCES subjects(id)
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS replies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            body TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            post_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY(user_id) REFERENCES users(id),
            FOREIGN KEY(post_id) REFERENCES posts(id)
        )"#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        ("idx_users_year", "CREATE INDEX IF NOT EXISTS idx_users_year ON users(year)"),
        ("idx_subjects_year", "CREATE INDEX IF NOT EXISTS idx_subjects_year ON subjects(year)"),
        ("idx_posts_subject", "CREATE INDEX IF NOT EXISTS idx_posts_subject ON posts(subject_id, created_at)"),
        ("idx_posts_user", "CREATE INDEX IF NOT EXISTS idx_posts_user ON posts(user_id)"),
        ("idx_replies_post", "CREATE INDEX IF NOT EXISTS idx_replies_post ON replies(post_id, created_at)"),
        ("idx_replies_user", "CREATE INDEX IF NOT EXISTS idx_replies_user ON replies(user_id)"),
    ];

    for (name, query) in indexes {
        if let Err(e) = sqlx::query(query).execute(pool).await {
            match &e {
                sqlx::Error::Database(db_err) => {
                    let msg = db_err.message().to_lowercase();
                    if msg.contains("already exists") || msg.contains("duplicate") {
                        tracing::debug!("Index {} already exists, skipping", name);
                    } else {
                        tracing::warn!("Failed to create index {}: {}", name, e);
                    }
                }
                _ => {
                    tracing::warn!("Failed to create index {}: {}", name, e);
                }
            }
        }
    }

    Ok(())
}
