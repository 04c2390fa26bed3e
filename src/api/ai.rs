use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::Value;

use crate::models::{GeneratedRecipe, PairingsResponse, SwapsResponse};
use crate::services::gemini_service::{self, Ingredients};
use crate::utils::GoogleApiConfig;

use super::error_response;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct GenerateRecipeRequest {
    pub ingredients: Ingredients,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ModifyRecipeRequest {
    #[schema(value_type = Object)]
    pub recipe: Value,
    pub mod_type: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SwapsRequest {
    #[schema(value_type = Object)]
    pub recipe: Value,
    pub ingredient: String,
}

/// POST /api/generate - New recipe from ingredients
#[utoipa::path(
    post,
    path = "/api/generate",
    tag = "AI",
    request_body = GenerateRecipeRequest,
    responses(
        (status = 200, description = "Generated recipe", body = GeneratedRecipe),
        (status = 503, description = "Gemini API key not configured"),
        (status = 500, description = "Failed to generate recipe from AI")
    )
)]
pub async fn generate_recipe(
    config: web::Data<GoogleApiConfig>,
    body: web::Json<GenerateRecipeRequest>,
) -> HttpResponse {
    log::info!("🤖 POST /api/generate - ingredients: {}", body.ingredients.joined());

    match gemini_service::generate_recipe(&config, &body.ingredients, body.cuisine.as_deref(), body.diet.as_deref()).await {
        Ok(recipe) => HttpResponse::Ok().json(recipe),
        Err(e) => {
            log::error!("❌ Failed to generate recipe: {}", e);
            error_response(&e)
        }
    }
}

/// POST /api/modify - Rework a recipe (e.g. "vegan", "low-carb")
#[utoipa::path(
    post,
    path = "/api/modify",
    tag = "AI",
    request_body = ModifyRecipeRequest,
    responses(
        (status = 200, description = "Modified recipe, same structure as the input"),
        (status = 500, description = "Failed to modify recipe with AI")
    )
)]
pub async fn modify_recipe(
    config: web::Data<GoogleApiConfig>,
    body: web::Json<ModifyRecipeRequest>,
) -> HttpResponse {
    log::info!("🤖 POST /api/modify - {}", body.mod_type);

    match gemini_service::modify_recipe(&config, &body.recipe, &body.mod_type).await {
        Ok(recipe) => HttpResponse::Ok().json(recipe),
        Err(e) => {
            log::error!("❌ Failed to modify recipe: {}", e);
            error_response(&e)
        }
    }
}

/// POST /api/pairings - Beverage pairings for a recipe
#[utoipa::path(
    post,
    path = "/api/pairings",
    tag = "AI",
    request_body(content = Object, description = "Recipe with a 'recipeName'"),
    responses(
        (status = 200, description = "Suggested pairings", body = PairingsResponse),
        (status = 400, description = "Recipe has no name"),
        (status = 500, description = "Failed to get pairings from AI")
    )
)]
pub async fn get_pairings(config: web::Data<GoogleApiConfig>, body: web::Json<Value>) -> HttpResponse {
    log::info!("🍷 POST /api/pairings");

    match gemini_service::get_pairings(&config, &body).await {
        Ok(pairings) => HttpResponse::Ok().json(pairings),
        Err(e) => {
            log::error!("❌ Failed to get pairings: {}", e);
            error_response(&e)
        }
    }
}

/// POST /api/swaps - Substitutes for one ingredient of a recipe
#[utoipa::path(
    post,
    path = "/api/swaps",
    tag = "AI",
    request_body = SwapsRequest,
    responses(
        (status = 200, description = "Suggested swaps", body = SwapsResponse),
        (status = 400, description = "Recipe has no name or ingredient is empty"),
        (status = 500, description = "Failed to get ingredient swaps from AI")
    )
)]
pub async fn get_swaps(config: web::Data<GoogleApiConfig>, body: web::Json<SwapsRequest>) -> HttpResponse {
    log::info!("🔄 POST /api/swaps - {}", body.ingredient);

    match gemini_service::get_ingredient_swaps(&config, &body.recipe, &body.ingredient).await {
        Ok(swaps) => HttpResponse::Ok().json(swaps),
        Err(e) => {
            log::error!("❌ Failed to get swaps: {}", e);
            error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::configure;
    use crate::utils::GoogleApiConfig;
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_generate_without_key_is_unavailable() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(GoogleApiConfig::default()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(json!({"ingredients": ["eggs", "leeks"], "cuisine": "French"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_swaps_need_recipe_name() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(GoogleApiConfig::default()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/swaps")
            .set_json(json!({"recipe": {"name": "Risotto"}, "ingredient": "butter"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
