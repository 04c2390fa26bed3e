use actix_web::{web, HttpResponse};

use crate::database::SharedStore;
use crate::middleware::CurrentUser;
use crate::models::Preferences;
use crate::services::user_data_service;

use super::{error_response, success_message};

/// GET /api/user - Full record (cookbook, pantry, meal plan, preferences)
#[utoipa::path(
    get,
    path = "/api/user",
    tag = "User",
    params(("X-User-ID" = String, Header, description = "Caller's user identifier")),
    responses(
        (status = 200, description = "The caller's record, provisioned with defaults on first access"),
        (status = 400, description = "Missing X-User-ID header"),
        (status = 500, description = "User data could not be read")
    )
)]
pub async fn get_user_profile(user: web::ReqData<CurrentUser>) -> HttpResponse {
    log::info!("👤 GET /api/user - {}", user.user_id);
    HttpResponse::Ok().json(&user.record)
}

/// POST /api/preferences - Shallow merge into the stored preferences
#[utoipa::path(
    post,
    path = "/api/preferences",
    tag = "User",
    params(("X-User-ID" = String, Header, description = "Caller's user identifier")),
    request_body(content = Object, description = "Preference keys to add or overwrite"),
    responses(
        (status = 200, description = "Preferences updated"),
        (status = 500, description = "Failed to update preferences")
    )
)]
pub async fn update_preferences(
    user: web::ReqData<CurrentUser>,
    store: SharedStore,
    body: web::Json<Preferences>,
) -> HttpResponse {
    log::info!("🎨 POST /api/preferences - {} ({} keys)", user.user_id, body.len());

    match user_data_service::merge_preferences(store.get_ref(), &user.user_id, body.into_inner()) {
        Ok(()) => success_message("Preferences updated."),
        Err(e) => {
            log::error!("❌ Failed to update preferences for {}: {}", user.user_id, e);
            error_response(&e)
        }
    }
}
