//! User Model

use serde::{Deserialize, Serialize};

/// Public user representation returned on registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// Profile shape returned by the `me` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

/// Registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

/// Profile update payload; only name and password are writable
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Credentials exchanged for an auth token
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
