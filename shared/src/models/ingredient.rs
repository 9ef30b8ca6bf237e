//! Ingredient Model

use serde::{Deserialize, Serialize};

/// Ingredient entity — same shape and ownership policy as [`crate::models::Tag`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
}

/// Create/update ingredient payload
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientUpdate {
    pub name: String,
}
