use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::database::SharedStore;
use crate::middleware::CurrentUser;
use crate::services::user_data_service;

use super::{error_response, success_message};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PantryUpdateRequest {
    pub pantry: Option<Vec<String>>,
}

/// POST /api/pantry - Replace the pantry list
#[utoipa::path(
    post,
    path = "/api/pantry",
    tag = "Pantry",
    params(("X-User-ID" = String, Header, description = "Caller's user identifier")),
    request_body = PantryUpdateRequest,
    responses(
        (status = 200, description = "Pantry updated"),
        (status = 400, description = "Body has no 'pantry' list"),
        (status = 500, description = "Failed to update pantry")
    )
)]
pub async fn update_pantry(
    user: web::ReqData<CurrentUser>,
    store: SharedStore,
    body: web::Json<PantryUpdateRequest>,
) -> HttpResponse {
    let items = match body.into_inner().pantry {
        Some(items) => items,
        None => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": "Invalid data format"
            }))
        }
    };

    log::info!("🧂 POST /api/pantry - {} ({} items)", user.user_id, items.len());

    match user_data_service::set_pantry(store.get_ref(), &user.user_id, items) {
        Ok(()) => success_message("Pantry updated."),
        Err(e) => {
            log::error!("❌ Failed to update pantry for {}: {}", user.user_id, e);
            error_response(&e)
        }
    }
}
