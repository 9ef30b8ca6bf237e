//! Recipe endpoints: CRUD, list filters and image upload

use axum::{
    Extension, Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    NameRef, RecipeCreate, RecipeDetail, RecipePatch, RecipeReplace, RecipeSummary,
};

use super::tag::validate_name;
use crate::auth::AuthUser;
use crate::db::{self, recipes::RecipeFilter};
use crate::error::{ServiceError, ServiceResult};
use crate::media::MediaStore;
use crate::state::AppState;

/// Query string for the recipe list; ids are comma-separated
#[derive(Debug, Deserialize)]
pub struct RecipeListQuery {
    tags: Option<String>,
    ingredients: Option<String>,
}

/// GET /api/recipe/recipes
pub async fn list_recipes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<RecipeListQuery>,
) -> ServiceResult<Json<Vec<RecipeSummary>>> {
    let filter = RecipeFilter {
        tags: parse_id_list(query.tags.as_deref())?,
        ingredients: parse_id_list(query.ingredients.as_deref())?,
    };

    let mut recipes = db::recipes::list(&state.pool, auth.user_id, &filter).await?;
    for recipe in &mut recipes {
        recipe.image = recipe.image.take().map(|p| MediaStore::url_for(&p));
    }
    Ok(Json(recipes))
}

/// POST /api/recipe/recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(mut payload): Json<RecipeCreate>,
) -> ServiceResult<(StatusCode, Json<RecipeDetail>)> {
    validate_title(&payload.title)?;
    validate_time(payload.time_minutes)?;
    payload.price = normalize_price(payload.price)?;
    validate_name_refs(payload.tags.as_deref_mut())?;
    validate_name_refs(payload.ingredients.as_deref_mut())?;

    let recipe_id = db::recipes::create(&state.pool, auth.user_id, &payload).await?;
    let detail = fetch_detail(&state, auth.user_id, recipe_id).await?;

    tracing::info!(user_id = auth.user_id, recipe_id, "Recipe created");
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/recipe/recipes/{id}
pub async fn get_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(recipe_id): Path<i64>,
) -> ServiceResult<Json<RecipeDetail>> {
    let detail = fetch_detail(&state, auth.user_id, recipe_id).await?;
    Ok(Json(detail))
}

/// PUT /api/recipe/recipes/{id}
pub async fn replace_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(recipe_id): Path<i64>,
    Json(mut payload): Json<RecipeReplace>,
) -> ServiceResult<Json<RecipeDetail>> {
    validate_title(&payload.title)?;
    validate_time(payload.time_minutes)?;
    payload.price = normalize_price(payload.price)?;
    validate_name_refs(payload.tags.as_deref_mut())?;
    validate_name_refs(payload.ingredients.as_deref_mut())?;

    db::recipes::replace(&state.pool, auth.user_id, recipe_id, &payload)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RecipeNotFound))?;

    let detail = fetch_detail(&state, auth.user_id, recipe_id).await?;
    Ok(Json(detail))
}

/// PATCH /api/recipe/recipes/{id}
pub async fn patch_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(recipe_id): Path<i64>,
    Json(mut payload): Json<RecipePatch>,
) -> ServiceResult<Json<RecipeDetail>> {
    if let Some(title) = &payload.title {
        validate_title(title)?;
    }
    if let Some(time_minutes) = payload.time_minutes {
        validate_time(time_minutes)?;
    }
    if let Some(price) = payload.price {
        payload.price = Some(normalize_price(price)?);
    }
    validate_name_refs(payload.tags.as_deref_mut())?;
    validate_name_refs(payload.ingredients.as_deref_mut())?;

    db::recipes::patch(&state.pool, auth.user_id, recipe_id, &payload)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RecipeNotFound))?;

    let detail = fetch_detail(&state, auth.user_id, recipe_id).await?;
    Ok(Json(detail))
}

/// DELETE /api/recipe/recipes/{id}
pub async fn delete_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(recipe_id): Path<i64>,
) -> ServiceResult<StatusCode> {
    let image = db::recipes::delete(&state.pool, auth.user_id, recipe_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RecipeNotFound))?;

    // File cleanup happens after the row is gone; a leak here is harmless
    if let Some(rel_path) = image {
        state.media.remove(&rel_path);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/recipe/recipes/{id}/upload-image
///
/// Expects a multipart `image` field. The file is validated and written
/// before the row is touched, so a failed write never leaves the recipe
/// pointing at a missing file.
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(recipe_id): Path<i64>,
    mut multipart: Multipart,
) -> ServiceResult<Json<RecipeDetail>> {
    if !db::recipes::exists(&state.pool, auth.user_id, recipe_id).await? {
        return Err(AppError::new(ErrorCode::RecipeNotFound).into());
    }

    let mut data: Option<Vec<u8>> = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ServiceError::App(AppError::with_message(
            ErrorCode::InvalidRequest,
            format!("Malformed multipart body: {e}"),
        ))
    })? {
        if field.name() == Some("image") {
            let bytes = field.bytes().await.map_err(|e| {
                ServiceError::App(AppError::with_message(
                    ErrorCode::InvalidRequest,
                    format!("Failed to read upload: {e}"),
                ))
            })?;
            data = Some(bytes.to_vec());
            break;
        }
    }

    let data = data.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;
    let rel_path = state.media.save_recipe_image(&data)?;

    match db::recipes::set_image(&state.pool, auth.user_id, recipe_id, &rel_path).await {
        Ok(Some(old_image)) => {
            if let Some(old) = old_image
                && old != rel_path
            {
                state.media.remove(&old);
            }
        }
        Ok(None) => {
            // Recipe vanished between the existence check and the update
            state.media.remove(&rel_path);
            return Err(AppError::new(ErrorCode::RecipeNotFound).into());
        }
        Err(e) => {
            state.media.remove(&rel_path);
            return Err(e.into());
        }
    }

    tracing::info!(user_id = auth.user_id, recipe_id, "Recipe image updated");
    let detail = fetch_detail(&state, auth.user_id, recipe_id).await?;
    Ok(Json(detail))
}

async fn fetch_detail(
    state: &AppState,
    user_id: i64,
    recipe_id: i64,
) -> Result<RecipeDetail, ServiceError> {
    let mut detail = db::recipes::find_detail(&state.pool, user_id, recipe_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RecipeNotFound))?;
    detail.image = detail.image.take().map(|p| MediaStore::url_for(&p));
    Ok(detail)
}

/// Nested catalog names get the same validation as direct catalog
/// writes: trimmed, and blank names rejected before anything is stored
fn validate_name_refs(refs: Option<&mut [NameRef]>) -> Result<(), ServiceError> {
    for name_ref in refs.unwrap_or_default() {
        let trimmed = validate_name(&name_ref.name)?.to_string();
        name_ref.name = trimmed;
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), ServiceError> {
    if title.trim().is_empty() {
        return Err(AppError::field_validation("title", "Title must not be empty").into());
    }
    Ok(())
}

fn validate_time(time_minutes: i32) -> Result<(), ServiceError> {
    if time_minutes < 0 {
        return Err(AppError::new(ErrorCode::RecipeInvalidTime).into());
    }
    Ok(())
}

/// Prices are non-negative with at most two fraction digits, stored at
/// scale 2 so `5.5` and `5.50` are the same value on the wire
fn normalize_price(price: Decimal) -> Result<Decimal, ServiceError> {
    if price.is_sign_negative() || price.scale() > 2 {
        return Err(AppError::new(ErrorCode::RecipeInvalidPrice).into());
    }
    let mut price = price;
    price.rescale(2);
    Ok(price)
}

/// Parse a comma-separated id list from the query string. Repeated ids
/// collapse to one occurrence; the filter compares against the count of
/// distinct ids, so duplicates must not inflate the expected cardinality.
fn parse_id_list(raw: Option<&str>) -> Result<Vec<i64>, ServiceError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    let mut ids = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for s in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let id: i64 = s.parse().map_err(|_| {
            AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid id in filter: {s}"))
        })?;
        if seen.insert(id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_id_list_absent() {
        assert!(parse_id_list(None).unwrap().is_empty());
    }

    #[test]
    fn test_parse_id_list_values() {
        assert_eq!(parse_id_list(Some("1,2,3")).unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_id_list(Some(" 4 , 5 ")).unwrap(), vec![4, 5]);
        assert_eq!(parse_id_list(Some("7")).unwrap(), vec![7]);
    }

    #[test]
    fn test_parse_id_list_skips_empty_segments() {
        assert_eq!(parse_id_list(Some("1,,2,")).unwrap(), vec![1, 2]);
        assert!(parse_id_list(Some("")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_id_list_rejects_garbage() {
        assert!(parse_id_list(Some("1,abc")).is_err());
        assert!(parse_id_list(Some("1.5")).is_err());
    }

    #[test]
    fn test_parse_id_list_collapses_duplicates() {
        // Repeated ids must not inflate the expected distinct-match count
        assert_eq!(parse_id_list(Some("1,1")).unwrap(), vec![1]);
        assert_eq!(parse_id_list(Some("2,1,2,3,1")).unwrap(), vec![2, 1, 3]);
    }

    #[test]
    fn test_nested_names_are_trimmed() {
        let mut refs = vec![NameRef {
            name: "  Vegan ".to_string(),
        }];
        validate_name_refs(Some(&mut refs)).unwrap();
        assert_eq!(refs[0].name, "Vegan");
    }

    #[test]
    fn test_nested_blank_names_rejected() {
        let mut blank = vec![NameRef {
            name: "  ".to_string(),
        }];
        assert!(validate_name_refs(Some(&mut blank)).is_err());

        let mut mixed = vec![
            NameRef {
                name: "Dessert".to_string(),
            },
            NameRef {
                name: String::new(),
            },
        ];
        assert!(validate_name_refs(Some(&mut mixed)).is_err());

        assert!(validate_name_refs(None).is_ok());
    }

    #[test]
    fn test_normalize_price() {
        let normalized = normalize_price(dec("5.5")).unwrap();
        assert_eq!(normalized, dec("5.50"));
        assert_eq!(normalized.scale(), 2);
        assert_eq!(normalize_price(dec("0")).unwrap(), dec("0.00"));
        assert!(normalize_price(dec("-1.00")).is_err());
        assert!(normalize_price(dec("2.555")).is_err());
    }

    #[test]
    fn test_validate_time_rejects_negative() {
        assert!(validate_time(0).is_ok());
        assert!(validate_time(-1).is_err());
    }

    #[test]
    fn test_validate_title_rejects_blank() {
        assert!(validate_title("Thai curry").is_ok());
        assert!(validate_title("  ").is_err());
    }
}
