//! Recipe Model
//!
//! Two response shapes are deliberate: the list summary hides
//! `description`, the detail includes it. Nested tag/ingredient lists on
//! write payloads carry names only; the server resolves them to per-user
//! catalog rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Ingredient, Tag};

/// Inline reference to a catalog record by name, as it appears in
/// recipe write payloads: `{"name": "Asian"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRef {
    pub name: String,
}

/// Recipe summary — list responses (no description)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

/// Full recipe — detail responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

/// Create payload. `tags`/`ingredients` are inline name lists resolved
/// server-side; an absent key is equivalent to an empty list on create.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeCreate {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<NameRef>>,
    pub ingredients: Option<Vec<NameRef>>,
}

/// Full-update (PUT) payload: scalar fields are required, omitted
/// optional scalars reset to null. Nested collections keep partial
/// semantics — an absent key means "do not touch".
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeReplace {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<NameRef>>,
    pub ingredients: Option<Vec<NameRef>>,
}

/// Partial-update (PATCH) payload: only provided fields are touched.
/// `tags: []` clears all tag associations; same for ingredients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<NameRef>>,
    pub ingredients: Option<Vec<NameRef>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_absent_tags_key_is_none() {
        let patch: RecipePatch = serde_json::from_str(r#"{"title": "New title"}"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some("New title"));
        assert!(patch.tags.is_none());
        assert!(patch.ingredients.is_none());
    }

    #[test]
    fn test_patch_empty_tags_key_is_some_empty() {
        let patch: RecipePatch = serde_json::from_str(r#"{"tags": []}"#).unwrap();
        assert_eq!(patch.tags, Some(vec![]));
    }

    #[test]
    fn test_create_nested_names() {
        let create: RecipeCreate = serde_json::from_str(
            r#"{
                "title": "Chicken Katsu",
                "time_minutes": 10,
                "price": "7.10",
                "tags": [{"name": "Japanese"}, {"name": "Asian"}]
            }"#,
        )
        .unwrap();
        let tags = create.tags.unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "Japanese");
        assert_eq!(tags[1].name, "Asian");
        assert!(create.ingredients.is_none());
    }

    #[test]
    fn test_price_preserves_two_decimals() {
        let create: RecipeCreate = serde_json::from_str(
            r#"{"title": "T", "time_minutes": 5, "price": "5.50"}"#,
        )
        .unwrap();
        assert_eq!(create.price.to_string(), "5.50");

        let detail = RecipeDetail {
            id: 1,
            title: "T".into(),
            description: None,
            time_minutes: 5,
            price: create.price,
            link: None,
            image: None,
            tags: vec![],
            ingredients: vec![],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["price"], "5.50");
    }

    #[test]
    fn test_summary_has_no_description_field() {
        let summary = RecipeSummary {
            id: 1,
            title: "T".into(),
            time_minutes: 5,
            price: Decimal::new(525, 2),
            link: None,
            image: None,
            tags: vec![],
            ingredients: vec![],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["price"], "5.25");
    }
}
