//! Tag Model

use serde::{Deserialize, Serialize};

/// Tag entity — a per-user label reusable across recipes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Create/update tag payload (PUT and PATCH share the shape)
#[derive(Debug, Clone, Deserialize)]
pub struct TagUpdate {
    pub name: String,
}
