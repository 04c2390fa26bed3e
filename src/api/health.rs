use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::database::SharedStore;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// `healthy` when the data file loads, `degraded` otherwise
    pub status: String,
    pub service: String,
    pub version: String,
    pub data_file: DataFileStatus,
    pub timestamp: i64,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct DataFileStatus {
    pub readable: bool,
    pub users: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health - Liveness plus a read of the user data file
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Data file readable", body = HealthResponse),
        (status = 503, description = "Data file missing, unreadable or corrupt", body = HealthResponse)
    )
)]
pub async fn health_check(store: SharedStore) -> HttpResponse {
    let data_file = match store.load() {
        Ok(users) => DataFileStatus { readable: true, users: users.len(), error: None },
        Err(e) => {
            log::warn!("⚠️  Health check: {}", e);
            DataFileStatus { readable: false, users: 0, error: Some(e.to_string()) }
        }
    };

    let (mut response, status) = if data_file.readable {
        (HttpResponse::Ok(), "healthy")
    } else {
        (HttpResponse::ServiceUnavailable(), "degraded")
    };

    response.json(HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data_file,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
