//! Authentication middleware

pub mod token_auth;

pub use token_auth::{AuthUser, token_auth_middleware};
