use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::database::{SharedStore, UserStore};
use crate::models::UserRecord;

pub const USER_ID_HEADER: &str = "X-User-ID";

const STORE_FAILURE: &str = "A critical server error occurred while accessing user data.";

/// The acting user, resolved (or provisioned) before the handler runs.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
    pub record: UserRecord,
}

/// Reads `X-User-ID`, resolves the record through the store and hands it to
/// the wrapped handlers as `web::ReqData<CurrentUser>`.
pub struct UserContext;

impl<S, B> Transform<S, ServiceRequest> for UserContext
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = UserContextMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(UserContextMiddleware { service }))
    }
}

pub struct UserContextMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for UserContextMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let user_id = match extract_user_id(&req) {
            Some(user_id) => user_id,
            None => {
                log::warn!("⚠️  {} {} without {} header", req.method(), req.path(), USER_ID_HEADER);
                return reject(req, StatusCode::BAD_REQUEST, "User ID is missing from request headers");
            }
        };

        let resolved = req
            .app_data::<SharedStore>()
            .map(|store| store.get_or_create(&user_id));

        match resolved {
            Some(Ok(record)) => {
                req.extensions_mut().insert(CurrentUser { user_id, record });
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Some(Err(e)) => {
                log::error!("❌ Could not resolve user '{}': {}", user_id, e);
                reject(req, StatusCode::INTERNAL_SERVER_ERROR, STORE_FAILURE)
            }
            None => {
                log::error!("❌ User store is not registered as app data");
                reject(req, StatusCode::INTERNAL_SERVER_ERROR, STORE_FAILURE)
            }
        }
    }
}

fn extract_user_id(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Short-circuits with a JSON error body; the wrapped handler never runs.
fn reject<B: 'static>(
    req: ServiceRequest,
    status: StatusCode,
    message: &'static str,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
    let response = HttpResponse::build(status).json(serde_json::json!({
        "success": false,
        "error": message
    }));
    let res = req.into_response(response).map_into_right_body();
    Box::pin(async move { Ok(res) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::JsonFileStore;
    use actix_web::{test, web, App, HttpResponse};
    use std::fs;

    async fn echo_user(user: web::ReqData<CurrentUser>) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({
            "user_id": user.user_id,
            "pantry": user.record.pantry
        }))
    }

    #[actix_web::test]
    async fn test_missing_header_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("app_data.json"));
        let app = test::init_service(
            App::new()
                .app_data(store.into_shared())
                .service(web::resource("/me").wrap(UserContext).route(web::get().to(echo_user))),
        )
        .await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "User ID is missing from request headers");
    }

    #[actix_web::test]
    async fn test_new_user_is_provisioned() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("app_data.json"));
        let app = test::init_service(
            App::new()
                .app_data(store.clone().into_shared())
                .service(web::resource("/me").wrap(UserContext).route(web::get().to(echo_user))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((USER_ID_HEADER, "u1"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["user_id"], "u1");
        assert_eq!(body["pantry"][0], "Salt");

        assert!(store.load().unwrap().contains_key("u1"));
    }

    #[actix_web::test]
    async fn test_corrupt_store_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_data.json");
        fs::write(&path, "{ oops").unwrap();
        let store = JsonFileStore::new(&path);
        let app = test::init_service(
            App::new()
                .app_data(store.into_shared())
                .service(web::resource("/me").wrap(UserContext).route(web::get().to(echo_user))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((USER_ID_HEADER, "u1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ oops");
    }
}
