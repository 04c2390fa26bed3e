mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::database::{JsonFileStore, UserStore};
use crate::utils::{GoogleApiConfig, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server = ServerConfig::from_env();
    let google = GoogleApiConfig::from_env();

    log::info!("🚀 Starting Recipe Service...");
    if google.gemini_key().is_none() {
        log::warn!("⚠️  GEMINI_API_KEY not set - AI endpoints will answer 503");
    }
    if google.google_key().is_none() {
        log::warn!("⚠️  GOOGLE_API_KEY not set - search returns 503, images return placeholders");
    }

    // Create the data file up front so a bad path shows up at boot
    let store = JsonFileStore::new(server.data_file.clone());
    log::info!("💾 Data file: {}", store.path().display());
    match store.load() {
        Ok(users) => log::info!("✅ User data ready ({} users)", users.len()),
        Err(e) => log::error!("❌ User data not usable yet: {}", e),
    }

    let store_data = store.into_shared();
    let google_data = web::Data::new(google);
    let allowed_origins = server.allowed_origins.clone();

    log::info!("🌐 Server starting on {}:{}", server.host, server.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", server.host, server.port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = if allowed_origins.is_empty() {
            Cors::permissive()
        } else {
            allowed_origins
                .iter()
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec![
                    actix_web::http::header::CONTENT_TYPE,
                    actix_web::http::header::ACCEPT,
                    actix_web::http::header::HeaderName::from_static("x-user-id"),
                ])
                .max_age(3600)
        };

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .app_data(google_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind(format!("{}:{}", server.host, server.port))?
    .run()
    .await
}
