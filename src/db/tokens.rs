//! Session token database operations

use chrono::{Duration, SecondsFormat, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::{SessionToken, User};

use super::UserRow;

/// Insert a fresh token for a user and return it
pub async fn create_token(pool: &SqlitePool, user_id: i64) -> Result<SessionToken, sqlx::Error> {
    let token = Uuid::new_v4();

    sqlx::query("INSERT INTO tokens (token, user_id, created_at) VALUES (?, ?, ?)")
        .bind(token.to_string())
        .bind(user_id)
        .bind(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(pool)
        .await?;

    Ok(SessionToken { token })
}

/// Resolve a token string to its user, rejecting tokens older than the TTL.
/// RFC 3339 timestamps compare correctly as strings.
pub async fn get_token_user(
    pool: &SqlitePool,
    token: &str,
    ttl_secs: i64,
) -> Result<Option<User>, sqlx::Error> {
    let cutoff = (Utc::now() - Duration::seconds(ttl_secs)).to_rfc3339_opts(SecondsFormat::Micros, true);

    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT u.* FROM users u
        JOIN tokens t ON t.user_id = u.id
        WHERE t.token = ? AND t.created_at >= ?
        "#,
    )
    .bind(token)
    .bind(cutoff)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.to_user()))
}

/// Drop tokens past their TTL
pub async fn purge_expired_tokens(pool: &SqlitePool, ttl_secs: i64) -> Result<u64, sqlx::Error> {
    let cutoff = (Utc::now() - Duration::seconds(ttl_secs)).to_rfc3339_opts(SecondsFormat::Micros, true);

    let result = sqlx::query("DELETE FROM tokens WHERE created_at < ?")
        .bind(cutoff)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
