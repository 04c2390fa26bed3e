use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::database::SharedStore;
use crate::middleware::CurrentUser;
use crate::services::user_data_service;
use crate::utils::AppError;

use super::{error_response, success_message};

/// POST /api/cookbook - Store a recipe; the response carries its new id
#[utoipa::path(
    post,
    path = "/api/cookbook",
    tag = "Cookbook",
    params(("X-User-ID" = String, Header, description = "Caller's user identifier")),
    request_body(content = Object, description = "Recipe fields, stored as given"),
    responses(
        (status = 201, description = "Recipe saved, returned with its generated id"),
        (status = 500, description = "Failed to save recipe")
    )
)]
pub async fn add_recipe(
    user: web::ReqData<CurrentUser>,
    store: SharedStore,
    body: web::Json<Map<String, Value>>,
) -> HttpResponse {
    log::info!("📖 POST /api/cookbook - {}", user.user_id);

    match user_data_service::add_recipe(store.get_ref(), &user.user_id, body.into_inner()) {
        Ok(recipe) => {
            log::info!(
                "✅ Recipe '{}' ({}) saved for {}",
                recipe.name().unwrap_or("untitled"),
                recipe.id,
                user.user_id
            );
            HttpResponse::Created().json(recipe)
        }
        Err(e) => {
            log::error!("❌ Failed to save recipe for {}: {}", user.user_id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": "Failed to save recipe"
            }))
        }
    }
}

/// DELETE /api/cookbook/{recipe_id}
#[utoipa::path(
    delete,
    path = "/api/cookbook/{recipe_id}",
    tag = "Cookbook",
    params(
        ("X-User-ID" = String, Header, description = "Caller's user identifier"),
        ("recipe_id" = String, Path, description = "Id returned when the recipe was saved")
    ),
    responses(
        (status = 200, description = "Recipe deleted"),
        (status = 404, description = "Recipe not found"),
        (status = 500, description = "Failed to delete recipe")
    )
)]
pub async fn delete_recipe(
    user: web::ReqData<CurrentUser>,
    store: SharedStore,
    path: web::Path<String>,
) -> HttpResponse {
    let recipe_id = path.into_inner();
    log::info!("🗑️  DELETE /api/cookbook/{} - {}", recipe_id, user.user_id);

    match user_data_service::remove_recipe(store.get_ref(), &user.user_id, &recipe_id) {
        Ok(()) => success_message("Recipe deleted."),
        Err(e @ AppError::NotFound(_)) => {
            log::warn!("⚠️  {}", e);
            HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": "Recipe not found"
            }))
        }
        Err(e) => {
            log::error!("❌ Failed to delete recipe {}: {}", recipe_id, e);
            error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::configure;
    use crate::database::{JsonFileStore, UserStore};
    use crate::middleware::USER_ID_HEADER;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_add_and_delete_recipe() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("app_data.json"));
        let app = test::init_service(
            App::new()
                .app_data(store.clone().into_shared())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/cookbook")
            .insert_header((USER_ID_HEADER, "u1"))
            .set_json(json!({"name": "Soup", "id": "client-chosen"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let saved: Value = test::read_body_json(resp).await;
        let id = saved["id"].as_str().unwrap().to_string();
        assert_ne!(id, "client-chosen");
        assert_eq!(saved["name"], "Soup");
        assert_eq!(store.load().unwrap()["u1"].cookbook.len(), 1);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/cookbook/{}", id))
            .insert_header((USER_ID_HEADER, "u1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(store.load().unwrap()["u1"].cookbook.is_empty());

        // second delete finds nothing
        let req = test::TestRequest::delete()
            .uri(&format!("/api/cookbook/{}", id))
            .insert_header((USER_ID_HEADER, "u1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_cookbook_requires_user_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("app_data.json"));
        let app = test::init_service(App::new().app_data(store.clone().into_shared()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/cookbook")
            .set_json(json!({"name": "Soup"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(store.load().unwrap().is_empty());
    }
}
