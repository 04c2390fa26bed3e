use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A cookbook entry. Apart from `id`, the store treats every field as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Recipe {
    /// Builds a recipe with a freshly generated id. Any `id` already present
    /// in `details` is discarded.
    pub fn with_new_id(mut details: Map<String, Value>) -> Self {
        details.remove("id");
        Self {
            id: Uuid::new_v4().to_string(),
            details,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.details
            .get("recipeName")
            .or_else(|| self.details.get("name"))
            .and_then(Value::as_str)
    }
}

/// Recipe shape requested from the generation API.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub recipe_name: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub calorie_count: Option<f64>,
    #[serde(default)]
    pub time_to_cook: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PairingsResponse {
    pub pairings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SwapsResponse {
    pub swaps: Vec<String>,
}
