use anyhow::Result;
use sqlx::MySqlPool;

use crate::auth::password::hash_password;
use crate::model::role::Role;

pub async fn init_db(database_url: &str) -> MySqlPool {
    MySqlPool::connect(database_url)
        .await
        .expect("Failed to connect to database")
}

/// Idempotent schema bootstrap, runs on every start.
pub async fn run_migrations(pool: &MySqlPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
            full_name VARCHAR(100) NOT NULL,
            email VARCHAR(100) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            role TINYINT UNSIGNED NOT NULL,
            reset_token VARCHAR(64) NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
            user_id BIGINT UNSIGNED NOT NULL,
            date DATE NOT NULL,
            check_in DATETIME NOT NULL,
            status VARCHAR(20) NOT NULL,
            CONSTRAINT fk_attendance_user FOREIGN KEY (user_id) REFERENCES users (id),
            CONSTRAINT uq_attendance_user_date UNIQUE (user_id, date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// First-boot convenience: make sure one admin account exists.
pub async fn ensure_default_admin(pool: &MySqlPool, email: &str, password: &str) -> Result<()> {
    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = ?")
        .bind(Role::Admin.id())
        .fetch_one(pool)
        .await?;

    if admins > 0 {
        return Ok(());
    }

    let hashed = hash_password(password);

    sqlx::query(
        r#"INSERT INTO users (full_name, email, password_hash, role) VALUES (?, ?, ?, ?)"#,
    )
    .bind("System Admin")
    .bind(email)
    .bind(&hashed)
    .bind(Role::Admin.id())
    .execute(pool)
    .await?;

    tracing::info!(email, "Default admin created");
    Ok(())
}
