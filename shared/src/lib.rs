//! Shared types for the ladle recipe service
//!
//! Wire DTOs, the unified error stack and small utilities used by the
//! server crate and any future client crates.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
