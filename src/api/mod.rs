pub mod health;
pub mod user;
pub mod cookbook;
pub mod pantry;
pub mod planner;
pub mod ai;
pub mod search;
pub mod swagger;

use actix_web::{error::InternalError, web, HttpResponse};

use crate::middleware::UserContext;
use crate::utils::AppError;

/// Registers every route. Shared by `main` and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        // Health check
        .route("/health", web::get().to(health::health_check))
        // User-scoped data (requires X-User-ID)
        .service(
            web::scope("/api/user")
                .wrap(UserContext)
                .route("", web::get().to(user::get_user_profile)),
        )
        .service(
            web::scope("/api/preferences")
                .wrap(UserContext)
                .route("", web::post().to(user::update_preferences)),
        )
        .service(
            web::scope("/api/cookbook")
                .wrap(UserContext)
                .route("", web::post().to(cookbook::add_recipe))
                .route("/{recipe_id}", web::delete().to(cookbook::delete_recipe)),
        )
        .service(
            web::scope("/api/pantry")
                .wrap(UserContext)
                .route("", web::post().to(pantry::update_pantry)),
        )
        .service(
            web::scope("/api/planner")
                .wrap(UserContext)
                .route("", web::post().to(planner::update_planner)),
        )
        // Gemini
        .route("/api/generate", web::post().to(ai::generate_recipe))
        .route("/api/modify", web::post().to(ai::modify_recipe))
        .route("/api/pairings", web::post().to(ai::get_pairings))
        .route("/api/swaps", web::post().to(ai::get_swaps))
        // Custom Search
        .route("/api/image", web::post().to(search::get_image))
        .route("/api/search", web::post().to(search::search_recipes));
}

/// Malformed JSON bodies get the same error shape as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid data format: {}", err);
        let response = HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": message
        }));
        InternalError::from_response(err, response).into()
    })
}

pub(crate) fn error_response(error: &AppError) -> HttpResponse {
    HttpResponse::build(error.status_code()).json(serde_json::json!({
        "success": false,
        "error": error.to_string()
    }))
}

pub(crate) fn success_message(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": message
    }))
}
