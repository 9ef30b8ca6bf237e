//! Wire DTOs for the recipe API

pub mod ingredient;
pub mod recipe;
pub mod tag;
pub mod user;

pub use ingredient::{Ingredient, IngredientUpdate};
pub use recipe::{NameRef, RecipeCreate, RecipeDetail, RecipePatch, RecipeReplace, RecipeSummary};
pub use tag::{Tag, TagUpdate};
pub use user::{TokenRequest, TokenResponse, UserCreate, UserProfile, UserPublic, UserUpdate};
