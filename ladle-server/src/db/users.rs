//! User database operations

use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub hashed_password: String,
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: i64,
}

pub async fn create(
    pool: &PgPool,
    email: &str,
    hashed_password: &str,
    name: &str,
    now: i64,
) -> Result<UserRow, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO users (email, hashed_password, name, created_at)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(email)
    .bind(hashed_password)
    .bind(name)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Lookup by normalized email (exact match; the caller normalizes)
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Update profile fields; only name and password are writable this way
pub async fn update_profile(
    pool: &PgPool,
    user_id: i64,
    name: Option<&str>,
    hashed_password: Option<&str>,
) -> Result<UserRow, sqlx::Error> {
    sqlx::query_as(
        "UPDATE users
         SET name = COALESCE($1, name),
             hashed_password = COALESCE($2, hashed_password)
         WHERE id = $3
         RETURNING *",
    )
    .bind(name)
    .bind(hashed_password)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Delete a user and everything they own in one transaction.
///
/// The cascade is explicit rather than left to FK defaults: association
/// rows, recipes, catalog rows and tokens go before the user row. Returns
/// the image references of deleted recipes so the caller can clean up
/// stored files after commit.
pub async fn delete(pool: &PgPool, user_id: i64) -> Result<Vec<String>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let images: Vec<(String,)> = sqlx::query_as(
        "SELECT image FROM recipes WHERE user_id = $1 AND image IS NOT NULL",
    )
    .bind(user_id)
    .fetch_all(&mut *tx)
    .await?;

    sqlx::query(
        "DELETE FROM recipe_tags
         WHERE recipe_id IN (SELECT id FROM recipes WHERE user_id = $1)",
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    sqlx::query(
        "DELETE FROM recipe_ingredients
         WHERE recipe_id IN (SELECT id FROM recipes WHERE user_id = $1)",
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    sqlx::query("DELETE FROM recipes WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM tags WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM ingredients WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(images.into_iter().map(|(p,)| p).collect())
}
