use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::services::custom_search_service;
use crate::utils::GoogleApiConfig;

use super::error_response;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SearchQueryRequest {
    pub query: Option<String>,
}

impl SearchQueryRequest {
    fn query(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub image_url: String,
}

fn missing_query() -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": "Missing 'query'"
    }))
}

/// POST /api/image - Picture for a recipe name (placeholder when none)
#[utoipa::path(
    post,
    path = "/api/image",
    tag = "Search",
    request_body = SearchQueryRequest,
    responses(
        (status = 200, description = "Image URL, or a placeholder URL", body = ImageResponse),
        (status = 400, description = "Missing query")
    )
)]
pub async fn get_image(
    config: web::Data<GoogleApiConfig>,
    body: web::Json<SearchQueryRequest>,
) -> HttpResponse {
    let Some(query) = body.query() else {
        return missing_query();
    };
    log::info!("🖼️  POST /api/image - {}", query);

    let image_url = custom_search_service::get_recipe_image_url(&config, query).await;
    HttpResponse::Ok().json(ImageResponse { image_url })
}

/// POST /api/search - Web search for recipes
#[utoipa::path(
    post,
    path = "/api/search",
    tag = "Search",
    request_body = SearchQueryRequest,
    responses(
        (status = 200, description = "Search result items as returned by the search API"),
        (status = 400, description = "Missing query"),
        (status = 503, description = "Search API key not configured"),
        (status = 500, description = "Search API error")
    )
)]
pub async fn search_recipes(
    config: web::Data<GoogleApiConfig>,
    body: web::Json<SearchQueryRequest>,
) -> HttpResponse {
    let Some(query) = body.query() else {
        return missing_query();
    };
    log::info!("🔍 POST /api/search - {}", query);

    match custom_search_service::search_web_for_recipes(&config, query).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => {
            log::error!("❌ Recipe search failed: {}", e);
            error_response(&e)
        }
    }
}
