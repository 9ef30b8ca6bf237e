//! Unified error codes for the ladle recipe service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: User account errors
//! - 3xxx: Recipe errors (35xx: image upload)
//! - 4xxx: Catalog (tag/ingredient) errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token is invalid
    TokenInvalid = 1003,
    /// Account is disabled
    AccountDisabled = 1004,

    // ==================== 2xxx: User ====================
    /// Email address is malformed
    EmailInvalid = 2001,
    /// Email address is already registered
    EmailTaken = 2002,
    /// Password too short
    PasswordTooShort = 2003,
    /// User not found
    UserNotFound = 2004,

    // ==================== 3xxx: Recipe ====================
    /// Recipe not found
    RecipeNotFound = 3001,
    /// Recipe has invalid price
    RecipeInvalidPrice = 3002,
    /// Recipe has invalid preparation time
    RecipeInvalidTime = 3003,

    // ==================== 35xx: Image Upload ====================
    /// File too large
    FileTooLarge = 3501,
    /// Invalid/corrupted image file
    InvalidImageFile = 3502,
    /// No file provided in request
    NoFileProvided = 3503,
    /// Empty file provided
    EmptyFile = 3504,
    /// Image processing failed
    ImageProcessingFailed = 3505,
    /// File storage failed
    FileStorageFailed = 3506,

    // ==================== 4xxx: Catalog ====================
    /// Tag not found
    TagNotFound = 4001,
    /// Ingredient not found
    IngredientNotFound = 4002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication credentials were not provided",
            ErrorCode::InvalidCredentials => "Unable to authenticate with provided credentials",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",

            // User
            ErrorCode::EmailInvalid => "Enter a valid email address",
            ErrorCode::EmailTaken => "A user with this email already exists",
            ErrorCode::PasswordTooShort => "Password must be at least 5 characters",
            ErrorCode::UserNotFound => "User not found",

            // Recipe
            ErrorCode::RecipeNotFound => "Recipe not found",
            ErrorCode::RecipeInvalidPrice => "Price must be non-negative with at most 2 decimals",
            ErrorCode::RecipeInvalidTime => "Preparation time must be a non-negative integer",

            // Image Upload
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::ImageProcessingFailed => "Image processing failed",
            ErrorCode::FileStorageFailed => "File storage failed",

            // Catalog
            ErrorCode::TagNotFound => "Tag not found",
            ErrorCode::IngredientNotFound => "Ingredient not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenInvalid),
            1004 => Ok(ErrorCode::AccountDisabled),

            // User
            2001 => Ok(ErrorCode::EmailInvalid),
            2002 => Ok(ErrorCode::EmailTaken),
            2003 => Ok(ErrorCode::PasswordTooShort),
            2004 => Ok(ErrorCode::UserNotFound),

            // Recipe
            3001 => Ok(ErrorCode::RecipeNotFound),
            3002 => Ok(ErrorCode::RecipeInvalidPrice),
            3003 => Ok(ErrorCode::RecipeInvalidTime),

            // Image Upload
            3501 => Ok(ErrorCode::FileTooLarge),
            3502 => Ok(ErrorCode::InvalidImageFile),
            3503 => Ok(ErrorCode::NoFileProvided),
            3504 => Ok(ErrorCode::EmptyFile),
            3505 => Ok(ErrorCode::ImageProcessingFailed),
            3506 => Ok(ErrorCode::FileStorageFailed),

            // Catalog
            4001 => Ok(ErrorCode::TagNotFound),
            4002 => Ok(ErrorCode::IngredientNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::EmailTaken.code(), 2002);
        assert_eq!(ErrorCode::RecipeNotFound.code(), 3001);
        assert_eq!(ErrorCode::TagNotFound.code(), 4001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_error_code_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidCredentials,
            ErrorCode::PasswordTooShort,
            ErrorCode::InvalidImageFile,
            ErrorCode::IngredientNotFound,
            ErrorCode::DatabaseError,
        ];
        for code in codes {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value), Ok(code));
        }
    }

    #[test]
    fn test_invalid_error_code() {
        assert_eq!(ErrorCode::try_from(65535), Err(InvalidErrorCode(65535)));
        assert_eq!(ErrorCode::try_from(7777), Err(InvalidErrorCode(7777)));
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
    }

    #[test]
    fn test_serde_as_u16() {
        let json = serde_json::to_string(&ErrorCode::EmailTaken).unwrap();
        assert_eq!(json, "2002");
        let back: ErrorCode = serde_json::from_str("2002").unwrap();
        assert_eq!(back, ErrorCode::EmailTaken);
    }
}
