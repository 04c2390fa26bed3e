use actix_web::{web, HttpResponse};

use crate::database::SharedStore;
use crate::middleware::CurrentUser;
use crate::models::MealPlan;
use crate::services::user_data_service;

use super::{error_response, success_message};

/// POST /api/planner - Replace the weekly meal plan as sent
#[utoipa::path(
    post,
    path = "/api/planner",
    tag = "Planner",
    params(("X-User-ID" = String, Header, description = "Caller's user identifier")),
    request_body(content = Object, description = "Weekday -> {breakfast, lunch, dinner} -> recipe or null"),
    responses(
        (status = 200, description = "Meal plan updated"),
        (status = 500, description = "Failed to update meal plan")
    )
)]
pub async fn update_planner(
    user: web::ReqData<CurrentUser>,
    store: SharedStore,
    body: web::Json<MealPlan>,
) -> HttpResponse {
    log::info!("📅 POST /api/planner - {}", user.user_id);

    match user_data_service::set_meal_plan(store.get_ref(), &user.user_id, body.into_inner()) {
        Ok(()) => success_message("Meal plan updated."),
        Err(e) => {
            log::error!("❌ Failed to update meal plan for {}: {}", user.user_id, e);
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
    use serde_json::json;

    #[actix_web::test]
    async fn test_meal_plan_is_stored_as_sent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("app_data.json"));
        let app = test::init_service(App::new().app_data(store.clone().into_shared()).configure(configure)).await;

        let plan = json!({"Monday": {"breakfast": null, "lunch": {"id": "r1", "name": "Salad"}, "dinner": null}});
        let req = test::TestRequest::post()
            .uri("/api/planner")
            .insert_header((USER_ID_HEADER, "u1"))
            .set_json(&plan)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let stored = serde_json::to_value(&store.load().unwrap()["u1"].meal_plan).unwrap();
        assert_eq!(stored, plan);
    }
}
