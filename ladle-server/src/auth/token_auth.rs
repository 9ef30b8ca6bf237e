//! Opaque bearer-token authentication for the API
//!
//! Tokens are random 32-byte hex strings stored in `auth_tokens`, bound
//! 1:1 to a user. The middleware resolves the token to its owner on every
//! request; there is no expiry beyond explicit invalidation.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};

use crate::db;
use crate::state::AppState;

/// Authenticated user identity attached to the request extensions
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
}

/// Middleware that resolves the bearer token from the Authorization header
pub async fn token_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let user = db::tokens::find_user(&state.pool, token)
        .await
        .map_err(|e| {
            tracing::error!("Token lookup error: {e}");
            AppError::new(ErrorCode::InternalError).into_response()
        })?
        .ok_or_else(|| AppError::new(ErrorCode::TokenInvalid).into_response())?;

    if !user.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled).into_response());
    }

    let identity = AuthUser {
        user_id: user.id,
        email: user.email,
    };

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
