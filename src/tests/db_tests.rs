#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::db;
    use crate::tests::support::{count_rows, seed_subject, seed_user, setup_test_db};

    #[tokio::test]
    async fn test_init_db_creates_tables() {
        let test_db = setup_test_db().await;

        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
                .fetch_all(&test_db.pool)
                .await
                .unwrap();
        assert_eq!(tables, vec!["posts", "replies", "subjects", "users"]);

        let indexes: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='index' AND name LIKE 'idx_%'")
                .fetch_all(&test_db.pool)
                .await
                .unwrap();
        assert_eq!(indexes.len(), 6);
    }

    #[tokio::test]
    async fn test_init_db_is_idempotent() {
        let test_db = setup_test_db().await;
        seed_subject(&test_db.pool, "Kept", 1).await;

        db::init_db(&test_db.pool).await.unwrap();
        assert_eq!(count_rows(&test_db.pool, "subjects").await, 1);
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let test_db = setup_test_db().await;
        let now = Utc::now();

        let fk: i64 = sqlx::query_scalar("PRAGMA foreign_keys").fetch_one(&test_db.pool).await.unwrap();
        assert_eq!(fk, 1);

        let orphan = sqlx::query(
            "INSERT INTO replies (body, user_id, post_id, created_at, updated_at) VALUES ('x', 1, 1, ?1, ?2)",
        )
        .bind(now)
        .bind(now)
        .execute(&test_db.pool)
        .await;
        assert!(orphan.is_err());

        let user_id = seed_user(&test_db.pool, "owner").await;
        let subject_id = seed_subject(&test_db.pool, "Owned", 1).await;
        sqlx::query(
            r#"INSERT INTO posts (title, category, body, user_id, subject_id, created_at, updated_at)
               VALUES ('t', 'c', 'b', ?1, ?2, ?3, ?4)"#,
        )
        .bind(user_id)
        .bind(subject_id)
        .bind(now)
        .bind(now)
        .execute(&test_db.pool)
        .await
        .unwrap();

        // A subject with posts cannot be removed
        let result = sqlx::query("DELETE FROM subjects WHERE id = ?1").bind(subject_id).execute(&test_db.pool).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_username_unique() {
        let test_db = setup_test_db().await;
        seed_user(&test_db.pool, "solo").await;

        let now = Utc::now();
        let dup = sqlx::query(
            r#"INSERT INTO users (username, email, password, created_at, updated_at)
               VALUES ('solo', 'x@example.com', 'h', ?1, ?2)"#,
        )
        .bind(now)
        .bind(now)
        .execute(&test_db.pool)
        .await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn test_connect_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.db");
        let cfg = crate::config::DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            max_connections: 1,
            acquire_timeout_secs: 5,
        };

        let pool = db::connect(&cfg).await.unwrap();
        assert!(path.exists());
        pool.close().await;
    }
}
