use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::utils::{AppError, GoogleApiConfig};

const CUSTOM_SEARCH_API: &str = "https://www.googleapis.com/customsearch/v1";
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
const WEB_RESULTS: &str = "5";

pub const IMAGE_KEY_MISSING: &str = "https://placehold.co/600x400/a78bfa/ffffff?text=API+Key+Missing";
pub const IMAGE_NOT_FOUND: &str = "https://placehold.co/600x400/707070/ffffff?text=Image+Not+Found";
pub const IMAGE_ERROR: &str = "https://placehold.co/600x400/ef4444/ffffff?text=Image+Error";

#[derive(Debug, Deserialize)]
pub struct CustomSearchResponse {
    #[serde(default)]
    pub items: Vec<Value>,
}

async fn custom_search(params: &[(&str, &str)]) -> Result<CustomSearchResponse, AppError> {
    let client = reqwest::Client::new();
    let response = client
        .get(CUSTOM_SEARCH_API)
        .query(params)
        .header("Accept", "application/json")
        .timeout(SEARCH_TIMEOUT)
        .send()
        .await
        .map_err(|e| AppError::ExternalApi(format!("Failed to call Custom Search: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::ExternalApi(format!("Custom Search API error: {}", response.status())));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::ExternalApi(format!("Failed to parse Custom Search response: {}", e)))
}

/// Top web results for `query`, as returned by the search API.
pub async fn search_web_for_recipes(config: &GoogleApiConfig, query: &str) -> Result<Vec<Value>, AppError> {
    let api_key = config
        .google_key()
        .ok_or_else(|| AppError::MissingApiKey("GOOGLE_API_KEY is not configured".to_string()))?;
    let engine_id = config
        .search_engine_id_web
        .as_deref()
        .ok_or_else(|| AppError::MissingApiKey("CUSTOM_SEARCH_ENGINE_ID_WEB is not configured".to_string()))?;

    log::info!("🔍 Searching the web for recipes: {}", query);

    let results = custom_search(&[
        ("key", api_key),
        ("cx", engine_id),
        ("q", query),
        ("num", WEB_RESULTS),
    ])
    .await?;

    log::info!("✅ Found {} results for '{}'", results.items.len(), query);
    Ok(results.items)
}

/// Always yields a URL: the first image hit, or a placeholder describing
/// what went wrong.
pub async fn get_recipe_image_url(config: &GoogleApiConfig, query: &str) -> String {
    let (api_key, engine_id) = match (config.google_key(), config.search_engine_id_image.as_deref()) {
        (Some(key), Some(cx)) => (key, cx),
        _ => {
            log::error!("❌ Google API key or image search engine id is missing");
            return IMAGE_KEY_MISSING.to_string();
        }
    };

    log::info!("🖼️  Searching image for: {}", query);

    let params = [
        ("key", api_key),
        ("cx", engine_id),
        ("q", query),
        ("searchType", "image"),
        ("num", "1"),
    ];

    match custom_search(&params).await {
        Ok(results) => first_link(&results.items).unwrap_or_else(|| IMAGE_NOT_FOUND.to_string()),
        Err(e) => {
            log::error!("❌ Image search failed: {}", e);
            IMAGE_ERROR.to_string()
        }
    }
}

pub fn first_link(items: &[Value]) -> Option<String> {
    items
        .first()
        .and_then(|item| item.get("link"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_link() {
        let items = vec![json!({"link": "https://img.example/a.jpg"}), json!({"link": "b"})];
        assert_eq!(first_link(&items).as_deref(), Some("https://img.example/a.jpg"));
        assert_eq!(first_link(&[]), None);
        assert_eq!(first_link(&[json!({"title": "no link"})]), None);
    }

    #[test]
    fn test_missing_items_is_empty() {
        let response: CustomSearchResponse = serde_json::from_value(json!({"kind": "customsearch#search"})).unwrap();
        assert!(response.items.is_empty());
    }

    #[tokio::test]
    async fn test_image_without_key_returns_placeholder() {
        let config = GoogleApiConfig::default();
        assert_eq!(get_recipe_image_url(&config, "lasagna").await, IMAGE_KEY_MISSING);
    }

    #[tokio::test]
    async fn test_search_without_key_fails() {
        let config = GoogleApiConfig {
            google_api_key: Some("PASTE_KEY_HERE".to_string()),
            search_engine_id_web: Some("cx".to_string()),
            ..Default::default()
        };
        let result = search_web_for_recipes(&config, "lasagna").await;
        assert!(matches!(result, Err(AppError::MissingApiKey(_))));
    }
}
