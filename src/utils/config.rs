use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "app_data.json";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Server settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: String,
    pub data_file: PathBuf,
    /// Empty means any origin is accepted (development setup).
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| split_list(&raw))
            .unwrap_or_default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "5000".to_string()),
            data_file: env::var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE)),
            allowed_origins,
        }
    }
}

/// Credentials for the Gemini and Google Custom Search APIs.
#[derive(Debug, Clone, Default)]
pub struct GoogleApiConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub google_api_key: Option<String>,
    pub search_engine_id_web: Option<String>,
    pub search_engine_id_image: Option<String>,
}

impl GoogleApiConfig {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            google_api_key: env::var("GOOGLE_API_KEY").ok(),
            search_engine_id_web: env::var("CUSTOM_SEARCH_ENGINE_ID_WEB").ok(),
            search_engine_id_image: env::var("CUSTOM_SEARCH_ENGINE_ID_IMAGE").ok(),
        }
    }

    pub fn gemini_key(&self) -> Option<&str> {
        usable_key(self.gemini_api_key.as_deref())
    }

    pub fn google_key(&self) -> Option<&str> {
        usable_key(self.google_api_key.as_deref())
    }
}

/// Blank keys and `PASTE_YOUR_KEY_HERE` style placeholders count as missing.
fn usable_key(key: Option<&str>) -> Option<&str> {
    key.map(str::trim)
        .filter(|k| !k.is_empty() && !k.contains("PASTE"))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
