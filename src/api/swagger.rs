use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe Service API",
        version = "0.1.0",
        description = "Personal cookbook, pantry and meal-plan backend.\n\n**User identification:** user-scoped endpoints read the caller's id from the `X-User-ID` header; unknown ids are provisioned with a default profile on first access.\n\n**Features:**\n- Cookbook, pantry, meal planner and preferences per user\n- Gemini recipe generation, modification, pairings and swaps\n- Google Custom Search for recipes and images"
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // User data
        crate::api::user::get_user_profile,
        crate::api::user::update_preferences,
        crate::api::cookbook::add_recipe,
        crate::api::cookbook::delete_recipe,
        crate::api::pantry::update_pantry,
        crate::api::planner::update_planner,

        // AI
        crate::api::ai::generate_recipe,
        crate::api::ai::modify_recipe,
        crate::api::ai::get_pairings,
        crate::api::ai::get_swaps,

        // Search
        crate::api::search::get_image,
        crate::api::search::search_recipes,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::health::DataFileStatus,
            crate::api::pantry::PantryUpdateRequest,
            crate::api::ai::GenerateRecipeRequest,
            crate::api::ai::ModifyRecipeRequest,
            crate::api::ai::SwapsRequest,
            crate::api::search::SearchQueryRequest,
            crate::api::search::ImageResponse,
            crate::services::gemini_service::Ingredients,
            crate::models::GeneratedRecipe,
            crate::models::PairingsResponse,
            crate::models::SwapsResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service status."),
        (name = "User", description = "Caller's profile and preferences."),
        (name = "Cookbook", description = "Saved recipes."),
        (name = "Pantry", description = "Ingredients on hand."),
        (name = "Planner", description = "Weekly meal plan."),
        (name = "AI", description = "Gemini-backed recipe generation and enrichment."),
        (name = "Search", description = "Google Custom Search for recipes and images."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in ["/health", "/api/user", "/api/cookbook/{recipe_id}", "/api/generate", "/api/search"] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {}", expected);
        }
    }
}
