use sqlx::FromRow;

use crate::db::DbPool;
use crate::errors::AppError;

/// Internal user struct for authentication — includes the password hash,
/// so it is never serialized into a response.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub created_at: String,
    pub updated_at: String,
}

pub async fn find_by_username(pool: &DbPool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password, created_at, updated_at \
         FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Create a user with a pre-hashed password, returning its id.
pub async fn create(pool: &DbPool, username: &str, password_hash: &str) -> Result<i64, AppError> {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO users (username, password) VALUES (?, ?) RETURNING id",
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}
