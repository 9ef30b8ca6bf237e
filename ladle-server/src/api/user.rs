//! User registration, token issuance and profile management

use axum::{Extension, Json, extract::State, http::StatusCode};
use shared::error::{AppError, ErrorCode};
use shared::models::{TokenRequest, TokenResponse, UserCreate, UserProfile, UserPublic, UserUpdate};

use super::ApiResult;
use crate::auth::AuthUser;
use crate::state::AppState;
use crate::{db, util};

/// POST /api/user/create
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<UserCreate>,
) -> Result<(StatusCode, Json<UserPublic>), AppError> {
    let email = util::normalize_email(&payload.email);
    if !util::validate_email(&email) {
        return Err(AppError::new(ErrorCode::EmailInvalid));
    }
    if payload.password.len() < util::MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }

    if db::users::find_by_email(&state.pool, &email)
        .await
        .map_err(db_error)?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::EmailTaken));
    }

    let hashed = util::hash_password(&payload.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let user = db::users::create(
        &state.pool,
        &email,
        &hashed,
        &payload.name,
        shared::util::now_millis(),
    )
    .await
    .map_err(|e| {
        // Registration races on the same email land here via the unique index
        if is_unique_violation(&e) {
            AppError::new(ErrorCode::EmailTaken)
        } else {
            db_error(e)
        }
    })?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(UserPublic {
            id: user.id,
            email: user.email,
            name: user.name,
        }),
    ))
}

/// POST /api/user/token
///
/// Issues the caller's bearer token. The same credentials always yield the
/// same token until it is revoked; bad credentials are a 400, not a 401,
/// because no token was presented.
pub async fn create_token(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> ApiResult<TokenResponse> {
    let email = util::normalize_email(&payload.email);
    let user = db::users::find_by_email(&state.pool, &email)
        .await
        .map_err(db_error)?
        .ok_or_else(AppError::invalid_credentials)?;

    if !util::verify_password(&payload.password, &user.hashed_password) || !user.is_active {
        return Err(AppError::invalid_credentials());
    }

    let token = db::tokens::get_or_create(&state.pool, user.id)
        .await
        .map_err(db_error)?;

    Ok(Json(TokenResponse { token }))
}

/// GET /api/user/me
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<UserProfile> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    Ok(Json(UserProfile {
        name: user.name,
        email: user.email,
    }))
}

/// PATCH /api/user/me
pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UserUpdate>,
) -> ApiResult<UserProfile> {
    let hashed = match &payload.password {
        Some(password) => {
            if password.len() < util::MIN_PASSWORD_LEN {
                return Err(AppError::new(ErrorCode::PasswordTooShort));
            }
            Some(util::hash_password(password).map_err(|e| {
                tracing::error!("Password hashing failed: {e}");
                AppError::new(ErrorCode::InternalError)
            })?)
        }
        None => None,
    };

    let user = db::users::update_profile(
        &state.pool,
        auth.user_id,
        payload.name.as_deref(),
        hashed.as_deref(),
    )
    .await
    .map_err(db_error)?;

    Ok(Json(UserProfile {
        name: user.name,
        email: user.email,
    }))
}

/// DELETE /api/user/me
///
/// Removes the account and everything it owns in one transaction, then
/// cleans up stored image files once the rows are gone.
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<StatusCode, AppError> {
    let images = db::users::delete(&state.pool, auth.user_id)
        .await
        .map_err(db_error)?;

    for rel_path in &images {
        state.media.remove(rel_path);
    }

    tracing::info!(user_id = auth.user_id, "User account deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn db_error(e: sqlx::Error) -> AppError {
    tracing::error!("Database error: {e}");
    AppError::new(ErrorCode::DatabaseError)
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
