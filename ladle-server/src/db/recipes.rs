//! Recipe database operations
//!
//! Recipe writes and their nested tag/ingredient resolution share one
//! transaction: either the scalar fields and the full resolved
//! association set commit together, or nothing does.

use rust_decimal::Decimal;
use shared::models::{Ingredient, NameRef, RecipeCreate, RecipeDetail, RecipePatch, RecipeReplace, RecipeSummary, Tag};
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;

/// Recipe list filters; empty vecs mean "no filter on that dimension".
///
/// Match semantics are ALL: a recipe qualifies only if it carries every
/// requested tag id and every requested ingredient id.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub tags: Vec<i64>,
    pub ingredients: Vec<i64>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct RecipeRow {
    id: i64,
    title: String,
    description: Option<String>,
    time_minutes: i32,
    price: Decimal,
    link: Option<String>,
    image: Option<String>,
}

// ── Reads ──

/// List the user's recipes as summaries, newest id first
pub async fn list(
    pool: &PgPool,
    user_id: i64,
    filter: &RecipeFilter,
) -> Result<Vec<RecipeSummary>, sqlx::Error> {
    let rows: Vec<RecipeRow> = sqlx::query_as(
        r#"
        SELECT id, title, description, time_minutes, price, link, image
        FROM recipes r
        WHERE r.user_id = $1
          AND (cardinality($2::bigint[]) = 0 OR (
              SELECT COUNT(DISTINCT rt.tag_id) FROM recipe_tags rt
              WHERE rt.recipe_id = r.id AND rt.tag_id = ANY($2)
          ) = cardinality($2::bigint[]))
          AND (cardinality($3::bigint[]) = 0 OR (
              SELECT COUNT(DISTINCT ri.ingredient_id) FROM recipe_ingredients ri
              WHERE ri.recipe_id = r.id AND ri.ingredient_id = ANY($3)
          ) = cardinality($3::bigint[]))
        ORDER BY r.id DESC
        "#,
    )
    .bind(user_id)
    .bind(&filter.tags)
    .bind(&filter.ingredients)
    .fetch_all(pool)
    .await?;

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut tags = load_tags(pool, &ids).await?;
    let mut ingredients = load_ingredients(pool, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|r| RecipeSummary {
            tags: tags.remove(&r.id).unwrap_or_default(),
            ingredients: ingredients.remove(&r.id).unwrap_or_default(),
            id: r.id,
            title: r.title,
            time_minutes: r.time_minutes,
            price: r.price,
            link: r.link,
            image: r.image,
        })
        .collect())
}

/// Full recipe by id; None when absent or owned by someone else
pub async fn find_detail(
    pool: &PgPool,
    user_id: i64,
    recipe_id: i64,
) -> Result<Option<RecipeDetail>, sqlx::Error> {
    let row: Option<RecipeRow> = sqlx::query_as(
        "SELECT id, title, description, time_minutes, price, link, image
         FROM recipes WHERE id = $1 AND user_id = $2",
    )
    .bind(recipe_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let Some(r) = row else {
        return Ok(None);
    };

    let ids = [r.id];
    let mut tags = load_tags(pool, &ids).await?;
    let mut ingredients = load_ingredients(pool, &ids).await?;

    Ok(Some(RecipeDetail {
        tags: tags.remove(&r.id).unwrap_or_default(),
        ingredients: ingredients.remove(&r.id).unwrap_or_default(),
        id: r.id,
        title: r.title,
        description: r.description,
        time_minutes: r.time_minutes,
        price: r.price,
        link: r.link,
        image: r.image,
    }))
}

async fn load_tags(
    pool: &PgPool,
    recipe_ids: &[i64],
) -> Result<HashMap<i64, Vec<Tag>>, sqlx::Error> {
    let rows: Vec<(i64, i64, String)> = sqlx::query_as(
        "SELECT rt.recipe_id, t.id, t.name
         FROM recipe_tags rt
         JOIN tags t ON t.id = rt.tag_id
         WHERE rt.recipe_id = ANY($1)
         ORDER BY t.id",
    )
    .bind(recipe_ids)
    .fetch_all(pool)
    .await?;

    let mut map: HashMap<i64, Vec<Tag>> = HashMap::new();
    for (recipe_id, id, name) in rows {
        map.entry(recipe_id).or_default().push(Tag { id, name });
    }
    Ok(map)
}

async fn load_ingredients(
    pool: &PgPool,
    recipe_ids: &[i64],
) -> Result<HashMap<i64, Vec<Ingredient>>, sqlx::Error> {
    let rows: Vec<(i64, i64, String)> = sqlx::query_as(
        "SELECT ri.recipe_id, i.id, i.name
         FROM recipe_ingredients ri
         JOIN ingredients i ON i.id = ri.ingredient_id
         WHERE ri.recipe_id = ANY($1)
         ORDER BY i.id",
    )
    .bind(recipe_ids)
    .fetch_all(pool)
    .await?;

    let mut map: HashMap<i64, Vec<Ingredient>> = HashMap::new();
    for (recipe_id, id, name) in rows {
        map.entry(recipe_id)
            .or_default()
            .push(Ingredient { id, name });
    }
    Ok(map)
}

// ── Writes ──

/// Create a recipe with its nested tag/ingredient names resolved through
/// the reconciler; returns the new id
pub async fn create(
    pool: &PgPool,
    user_id: i64,
    data: &RecipeCreate,
) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (recipe_id,): (i64,) = sqlx::query_as(
        "INSERT INTO recipes (user_id, title, description, time_minutes, price, link)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(user_id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.time_minutes)
    .bind(data.price)
    .bind(&data.link)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(refs) = &data.tags {
        reconcile_tags(&mut tx, user_id, recipe_id, refs).await?;
    }
    if let Some(refs) = &data.ingredients {
        reconcile_ingredients(&mut tx, user_id, recipe_id, refs).await?;
    }

    tx.commit().await?;
    Ok(recipe_id)
}

/// Full update: all scalars overwritten (omitted optionals become NULL);
/// nested collections replaced only when the key was present.
/// None when the recipe is absent or owned by someone else.
pub async fn replace(
    pool: &PgPool,
    user_id: i64,
    recipe_id: i64,
    data: &RecipeReplace,
) -> Result<Option<()>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let updated: Option<(i64,)> = sqlx::query_as(
        "UPDATE recipes
         SET title = $1, description = $2, time_minutes = $3, price = $4, link = $5
         WHERE id = $6 AND user_id = $7
         RETURNING id",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.time_minutes)
    .bind(data.price)
    .bind(&data.link)
    .bind(recipe_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    if updated.is_none() {
        return Ok(None);
    }

    if let Some(refs) = &data.tags {
        reconcile_tags(&mut tx, user_id, recipe_id, refs).await?;
    }
    if let Some(refs) = &data.ingredients {
        reconcile_ingredients(&mut tx, user_id, recipe_id, refs).await?;
    }

    tx.commit().await?;
    Ok(Some(()))
}

/// Partial update: only provided fields are touched. A present-but-empty
/// tag/ingredient list clears that association set.
pub async fn patch(
    pool: &PgPool,
    user_id: i64,
    recipe_id: i64,
    data: &RecipePatch,
) -> Result<Option<()>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let updated: Option<(i64,)> = sqlx::query_as(
        "UPDATE recipes
         SET title = COALESCE($1, title),
             description = COALESCE($2, description),
             time_minutes = COALESCE($3, time_minutes),
             price = COALESCE($4, price),
             link = COALESCE($5, link)
         WHERE id = $6 AND user_id = $7
         RETURNING id",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.time_minutes)
    .bind(data.price)
    .bind(&data.link)
    .bind(recipe_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    if updated.is_none() {
        return Ok(None);
    }

    if let Some(refs) = &data.tags {
        reconcile_tags(&mut tx, user_id, recipe_id, refs).await?;
    }
    if let Some(refs) = &data.ingredients {
        reconcile_ingredients(&mut tx, user_id, recipe_id, refs).await?;
    }

    tx.commit().await?;
    Ok(Some(()))
}

/// Delete a recipe; association rows go via FK cascade. Returns the stored
/// image reference (for file cleanup) wrapped in Some when a row was
/// deleted, None when not owned.
pub async fn delete(
    pool: &PgPool,
    user_id: i64,
    recipe_id: i64,
) -> Result<Option<Option<String>>, sqlx::Error> {
    let row: Option<(Option<String>,)> = sqlx::query_as(
        "DELETE FROM recipes WHERE id = $1 AND user_id = $2 RETURNING image",
    )
    .bind(recipe_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(image,)| image))
}

/// Point the recipe at a newly stored image file. Returns the previous
/// reference so the caller can remove the stale file after the update.
pub async fn set_image(
    pool: &PgPool,
    user_id: i64,
    recipe_id: i64,
    rel_path: &str,
) -> Result<Option<Option<String>>, sqlx::Error> {
    let row: Option<(Option<String>,)> = sqlx::query_as(
        "UPDATE recipes r SET image = $3
         FROM (SELECT id, image FROM recipes WHERE id = $1 AND user_id = $2 FOR UPDATE) old
         WHERE r.id = old.id
         RETURNING old.image",
    )
    .bind(recipe_id)
    .bind(user_id)
    .bind(rel_path)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(image,)| image))
}

/// Owner-scoped existence check, used before accepting an image upload
pub async fn exists(pool: &PgPool, user_id: i64, recipe_id: i64) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(recipe_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.is_some())
}

// ── Nested-resource reconciliation ──

/// Collapse inline name refs to unique names, first occurrence wins
fn dedup_names(refs: &[NameRef]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    refs.iter()
        .map(|r| r.name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Resolve inline tag names to per-user rows (exact-match find, lowest id
/// wins, else create) and replace the recipe's tag set with the result.
/// An empty list clears all tag associations.
async fn reconcile_tags(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    recipe_id: i64,
    refs: &[NameRef],
) -> Result<(), sqlx::Error> {
    let mut resolved: Vec<i64> = Vec::with_capacity(refs.len());
    for name in dedup_names(refs) {
        let existing: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM tags WHERE user_id = $1 AND name = $2 ORDER BY id LIMIT 1",
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;

        let id = match existing {
            Some((id,)) => id,
            None => {
                let (id,): (i64,) = sqlx::query_as(
                    "INSERT INTO tags (user_id, name) VALUES ($1, $2) RETURNING id",
                )
                .bind(user_id)
                .bind(name)
                .fetch_one(&mut **tx)
                .await?;
                id
            }
        };
        resolved.push(id);
    }

    // Full replacement, not additive merge
    sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
        .bind(recipe_id)
        .execute(&mut **tx)
        .await?;

    if !resolved.is_empty() {
        let recipe_ids: Vec<i64> = resolved.iter().map(|_| recipe_id).collect();
        sqlx::query(
            "INSERT INTO recipe_tags (recipe_id, tag_id)
             SELECT * FROM UNNEST($1::bigint[], $2::bigint[])
             ON CONFLICT DO NOTHING",
        )
        .bind(&recipe_ids)
        .bind(&resolved)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Same algorithm as [`reconcile_tags`], against the ingredient catalog
async fn reconcile_ingredients(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    recipe_id: i64,
    refs: &[NameRef],
) -> Result<(), sqlx::Error> {
    let mut resolved: Vec<i64> = Vec::with_capacity(refs.len());
    for name in dedup_names(refs) {
        let existing: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM ingredients WHERE user_id = $1 AND name = $2 ORDER BY id LIMIT 1",
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;

        let id = match existing {
            Some((id,)) => id,
            None => {
                let (id,): (i64,) = sqlx::query_as(
                    "INSERT INTO ingredients (user_id, name) VALUES ($1, $2) RETURNING id",
                )
                .bind(user_id)
                .bind(name)
                .fetch_one(&mut **tx)
                .await?;
                id
            }
        };
        resolved.push(id);
    }

    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
        .bind(recipe_id)
        .execute(&mut **tx)
        .await?;

    if !resolved.is_empty() {
        let recipe_ids: Vec<i64> = resolved.iter().map(|_| recipe_id).collect();
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id)
             SELECT * FROM UNNEST($1::bigint[], $2::bigint[])
             ON CONFLICT DO NOTHING",
        )
        .bind(&recipe_ids)
        .bind(&resolved)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(names: &[&str]) -> Vec<NameRef> {
        names
            .iter()
            .map(|n| NameRef {
                name: n.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_dedup_names_preserves_order() {
        let input = refs(&["Japanese", "Asian", "Japanese", "Quick"]);
        assert_eq!(dedup_names(&input), vec!["Japanese", "Asian", "Quick"]);
    }

    #[test]
    fn test_dedup_names_is_case_sensitive() {
        let input = refs(&["Vegan", "vegan"]);
        assert_eq!(dedup_names(&input), vec!["Vegan", "vegan"]);
    }

    #[test]
    fn test_dedup_names_empty() {
        assert!(dedup_names(&[]).is_empty());
    }
}
