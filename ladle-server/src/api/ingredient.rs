//! Ingredient catalog endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::{AppError, ErrorCode};
use shared::models::{Ingredient, IngredientUpdate};

use super::tag::validate_name;
use crate::auth::AuthUser;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

/// GET /api/recipe/ingredients
pub async fn list_ingredients(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ServiceResult<Json<Vec<Ingredient>>> {
    let ingredients = db::ingredients::list(&state.pool, auth.user_id).await?;
    Ok(Json(ingredients))
}

/// POST /api/recipe/ingredients
pub async fn create_ingredient(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<IngredientUpdate>,
) -> ServiceResult<(StatusCode, Json<Ingredient>)> {
    let name = validate_name(&payload.name)?;
    let ingredient = db::ingredients::create(&state.pool, auth.user_id, name).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// PUT/PATCH /api/recipe/ingredients/{id}
pub async fn update_ingredient(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(ingredient_id): Path<i64>,
    Json(payload): Json<IngredientUpdate>,
) -> ServiceResult<Json<Ingredient>> {
    let name = validate_name(&payload.name)?;
    let ingredient = db::ingredients::update(&state.pool, auth.user_id, ingredient_id, name)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::IngredientNotFound))?;
    Ok(Json(ingredient))
}

/// DELETE /api/recipe/ingredients/{id}
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(ingredient_id): Path<i64>,
) -> ServiceResult<StatusCode> {
    if !db::ingredients::delete(&state.pool, auth.user_id, ingredient_id).await? {
        return Err(AppError::new(ErrorCode::IngredientNotFound).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
