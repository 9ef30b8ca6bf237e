//! Tag database operations
//!
//! All queries are owner-scoped: an id that exists but belongs to another
//! user behaves exactly like a missing id.

use shared::models::Tag;
use sqlx::PgPool;

/// List the user's tags, name descending
pub async fn list(pool: &PgPool, user_id: i64) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, name FROM tags WHERE user_id = $1 ORDER BY name DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn create(pool: &PgPool, user_id: i64, name: &str) -> Result<Tag, sqlx::Error> {
    sqlx::query_as("INSERT INTO tags (user_id, name) VALUES ($1, $2) RETURNING id, name")
        .bind(user_id)
        .bind(name)
        .fetch_one(pool)
        .await
}

/// Rename a tag; None when the id is absent or owned by someone else
pub async fn update(
    pool: &PgPool,
    user_id: i64,
    tag_id: i64,
    name: &str,
) -> Result<Option<Tag>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE tags SET name = $1 WHERE id = $2 AND user_id = $3 RETURNING id, name",
    )
    .bind(name)
    .bind(tag_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Delete a tag and its recipe associations; false when not owned
pub async fn delete(pool: &PgPool, user_id: i64, tag_id: i64) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "DELETE FROM recipe_tags
         WHERE tag_id = $1
           AND tag_id IN (SELECT id FROM tags WHERE user_id = $2)",
    )
    .bind(tag_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    let rows = sqlx::query("DELETE FROM tags WHERE id = $1 AND user_id = $2")
        .bind(tag_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}
