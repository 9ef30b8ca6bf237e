//! Ingredient database operations
//!
//! Structurally identical to the tag catalog; both are owner-scoped name
//! sets reusable across recipes.

use shared::models::Ingredient;
use sqlx::PgPool;

/// List the user's ingredients, name descending
pub async fn list(pool: &PgPool, user_id: i64) -> Result<Vec<Ingredient>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, name FROM ingredients WHERE user_id = $1 ORDER BY name DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn create(pool: &PgPool, user_id: i64, name: &str) -> Result<Ingredient, sqlx::Error> {
    sqlx::query_as("INSERT INTO ingredients (user_id, name) VALUES ($1, $2) RETURNING id, name")
        .bind(user_id)
        .bind(name)
        .fetch_one(pool)
        .await
}

/// Rename an ingredient; None when the id is absent or owned by someone else
pub async fn update(
    pool: &PgPool,
    user_id: i64,
    ingredient_id: i64,
    name: &str,
) -> Result<Option<Ingredient>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE ingredients SET name = $1 WHERE id = $2 AND user_id = $3 RETURNING id, name",
    )
    .bind(name)
    .bind(ingredient_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Delete an ingredient and its recipe associations; false when not owned
pub async fn delete(
    pool: &PgPool,
    user_id: i64,
    ingredient_id: i64,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "DELETE FROM recipe_ingredients
         WHERE ingredient_id = $1
           AND ingredient_id IN (SELECT id FROM ingredients WHERE user_id = $2)",
    )
    .bind(ingredient_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;
    let rows = sqlx::query("DELETE FROM ingredients WHERE id = $1 AND user_id = $2")
        .bind(ingredient_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}
