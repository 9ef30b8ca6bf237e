//! Opaque bearer token storage
//!
//! One token per user, reused across logins — repeated authentication with
//! the same credentials returns the same token until it is invalidated.

use shared::util::now_millis;
use sqlx::PgPool;

use super::users::UserRow;
use crate::util::generate_token;

/// Get the user's token, creating one on first authentication.
///
/// Two concurrent first logins can both attempt the insert; the UNIQUE
/// constraint on user_id makes one a no-op and the re-select converges
/// both on the surviving row.
pub async fn get_or_create(pool: &PgPool, user_id: i64) -> Result<String, sqlx::Error> {
    if let Some((token,)) =
        sqlx::query_as::<_, (String,)>("SELECT token FROM auth_tokens WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?
    {
        return Ok(token);
    }

    let token = generate_token();
    sqlx::query(
        "INSERT INTO auth_tokens (token, user_id, created_at)
         VALUES ($1, $2, $3)
         ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(&token)
    .bind(user_id)
    .bind(now_millis())
    .execute(pool)
    .await?;

    let (token,) =
        sqlx::query_as::<_, (String,)>("SELECT token FROM auth_tokens WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
    Ok(token)
}

/// Resolve a bearer token to its owning user
pub async fn find_user(pool: &PgPool, token: &str) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT u.*
         FROM users u
         JOIN auth_tokens t ON t.user_id = u.id
         WHERE t.token = $1",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

/// Invalidate the user's token; the next authentication issues a new one
#[allow(dead_code)]
pub async fn revoke(pool: &PgPool, user_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
