//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    ///
    /// Note: `InvalidCredentials` maps to 400, not 401 — the token
    /// endpoint treats a bad email/password pair as a validation failure
    /// of the request body. 401 is reserved for missing/invalid tokens on
    /// authenticated endpoints.
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::UserNotFound
            | Self::RecipeNotFound
            | Self::TagNotFound
            | Self::IngredientNotFound => StatusCode::NOT_FOUND,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenInvalid | Self::AccountDisabled => {
                StatusCode::UNAUTHORIZED
            }

            // 400 Bad Request
            Self::ValidationFailed
            | Self::AlreadyExists
            | Self::InvalidRequest
            | Self::InvalidFormat
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::InvalidCredentials
            | Self::EmailInvalid
            | Self::EmailTaken
            | Self::PasswordTooShort
            | Self::RecipeInvalidPrice
            | Self::RecipeInvalidTime
            | Self::FileTooLarge
            | Self::InvalidImageFile
            | Self::NoFileProvided
            | Self::EmptyFile => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            Self::Unknown
            | Self::ImageProcessingFailed
            | Self::FileStorageFailed
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_statuses() {
        assert_eq!(
            ErrorCode::RecipeNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ErrorCode::TagNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::IngredientNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_auth_statuses() {
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::TokenInvalid.http_status(),
            StatusCode::UNAUTHORIZED
        );
        // Bad credentials on the token endpoint are a 400, not 401
        assert_eq!(
            ErrorCode::InvalidCredentials.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_validation_statuses() {
        assert_eq!(
            ErrorCode::EmailInvalid.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::EmailTaken.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::PasswordTooShort.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidImageFile.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_system_statuses() {
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
