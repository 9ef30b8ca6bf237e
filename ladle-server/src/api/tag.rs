//! Tag catalog endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::{AppError, ErrorCode};
use shared::models::{Tag, TagUpdate};

use crate::auth::AuthUser;
use crate::db;
use crate::error::{ServiceError, ServiceResult};
use crate::state::AppState;

/// GET /api/recipe/tags
pub async fn list_tags(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ServiceResult<Json<Vec<Tag>>> {
    let tags = db::tags::list(&state.pool, auth.user_id).await?;
    Ok(Json(tags))
}

/// POST /api/recipe/tags
pub async fn create_tag(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<TagUpdate>,
) -> ServiceResult<(StatusCode, Json<Tag>)> {
    let name = validate_name(&payload.name)?;
    let tag = db::tags::create(&state.pool, auth.user_id, name).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// PUT/PATCH /api/recipe/tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(tag_id): Path<i64>,
    Json(payload): Json<TagUpdate>,
) -> ServiceResult<Json<Tag>> {
    let name = validate_name(&payload.name)?;
    let tag = db::tags::update(&state.pool, auth.user_id, tag_id, name)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TagNotFound))?;
    Ok(Json(tag))
}

/// DELETE /api/recipe/tags/{id}
pub async fn delete_tag(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(tag_id): Path<i64>,
) -> ServiceResult<StatusCode> {
    if !db::tags::delete(&state.pool, auth.user_id, tag_id).await? {
        return Err(AppError::new(ErrorCode::TagNotFound).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Catalog names must be non-empty after trimming
pub(super) fn validate_name(name: &str) -> Result<&str, ServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::field_validation("name", "Name must not be empty").into());
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("  Vegan ").unwrap(), "Vegan");
    }

    #[test]
    fn test_validate_name_rejects_blank() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }
}
