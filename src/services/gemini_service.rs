use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::models::{GeneratedRecipe, PairingsResponse, SwapsResponse};
use crate::utils::{AppError, GoogleApiConfig};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_TIMEOUT: Duration = Duration::from_secs(60);

const RECIPE_JSON_INSTRUCTIONS: &str = " Respond with ONLY a single, clean JSON object. \
Do not use markdown like ```json. The JSON object must have these keys: \
'recipeName' (string), 'description' (string), 'ingredients' (array of strings), \
'instructions' (array of strings), 'calorieCount' (number), and 'timeToCook' (string).";

// ==================== WIRE MODELS ====================

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    pub content: GeminiContent,
}

impl GeminiRequest {
    pub fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: Some(prompt) }],
            }],
        }
    }
}

/// Ingredients arrive either as free text or as a list from the UI.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum Ingredients {
    Text(String),
    List(Vec<String>),
}

impl Ingredients {
    pub fn joined(&self) -> String {
        match self {
            Ingredients::Text(text) => text.trim().to_string(),
            Ingredients::List(items) => items.join(", "),
        }
    }
}

// ==================== PROMPTS ====================

pub fn build_generate_prompt(ingredients: &str, cuisine: Option<&str>, diet: Option<&str>) -> String {
    let mut prompt = format!("Generate a recipe based on these details. Ingredients: {}.", ingredients);

    if let Some(cuisine) = cuisine.map(str::trim).filter(|c| !c.is_empty() && *c != "Any") {
        prompt.push_str(&format!(" Cuisine: {}.", cuisine));
    }
    if let Some(diet) = diet.map(str::trim).filter(|d| !d.is_empty() && *d != "None") {
        prompt.push_str(&format!(" Dietary requirement: {}.", diet));
    }

    prompt.push_str(RECIPE_JSON_INSTRUCTIONS);
    prompt
}

pub fn build_modify_prompt(recipe: &Value, mod_type: &str) -> String {
    format!(
        "Modify the following recipe to be {}: {}. Respond with ONLY a single, clean JSON object \
         with the same structure as the original recipe.",
        mod_type, recipe
    )
}

pub fn build_pairings_prompt(recipe_name: &str) -> String {
    format!(
        "Generate beverage pairings for the following recipe: {}. Respond with ONLY a single, \
         clean JSON object with one key: 'pairings' (an array of strings).",
        recipe_name
    )
}

pub fn build_swaps_prompt(recipe_name: &str, ingredient: &str) -> String {
    format!(
        "For the recipe '{}', what are some good swaps for the ingredient '{}'? Respond with \
         ONLY a single, clean JSON object with one key: 'swaps' (an array of strings).",
        recipe_name, ingredient
    )
}

/// `recipeName` of a recipe object sent by the client.
pub fn recipe_name(recipe: &Value) -> Result<&str, AppError> {
    recipe
        .get("recipeName")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::InvalidRequest("recipe is missing 'recipeName'".to_string()))
}

// ==================== RESPONSE PARSING ====================

/// Removes markdown code fences the model sometimes wraps JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

pub fn extract_reply_text(response: GeminiResponse) -> Result<String, AppError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| AppError::ExternalApi("Gemini response has no candidate text".to_string()))
}

pub fn parse_reply<T: DeserializeOwned>(text: &str) -> Result<T, AppError> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(&cleaned).map_err(|e| {
        log::error!("❌ Could not parse JSON from Gemini: {} --> {}", e, cleaned);
        AppError::ExternalApi(format!("Could not parse Gemini reply: {}", e))
    })
}

// ==================== API CALLS ====================

async fn ask_gemini<T: DeserializeOwned>(config: &GoogleApiConfig, prompt: String) -> Result<T, AppError> {
    let api_key = config
        .gemini_key()
        .ok_or_else(|| AppError::MissingApiKey("GEMINI_API_KEY is not configured".to_string()))?;

    let url = format!("{}/models/{}:generateContent", GEMINI_API_BASE, config.gemini_model);

    log::info!("🤖 Sending prompt to Gemini ({}): {}", config.gemini_model, prompt);

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .query(&[("key", api_key)])
        .json(&GeminiRequest::from_prompt(prompt))
        .timeout(GEMINI_TIMEOUT)
        .send()
        .await
        .map_err(|e| AppError::ExternalApi(format!("Failed to call Gemini: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::ExternalApi(format!("Gemini API error: {}", response.status())));
    }

    let body: GeminiResponse = response
        .json()
        .await
        .map_err(|e| AppError::ExternalApi(format!("Failed to read Gemini response: {}", e)))?;

    let text = extract_reply_text(body)?;
    log::debug!("Gemini reply: {}", text);
    parse_reply(&text)
}

pub async fn generate_recipe(
    config: &GoogleApiConfig,
    ingredients: &Ingredients,
    cuisine: Option<&str>,
    diet: Option<&str>,
) -> Result<GeneratedRecipe, AppError> {
    let ingredients = ingredients.joined();
    if ingredients.is_empty() {
        return Err(AppError::InvalidRequest("ingredients must not be empty".to_string()));
    }

    let recipe: GeneratedRecipe = ask_gemini(config, build_generate_prompt(&ingredients, cuisine, diet)).await?;
    log::info!("✅ Recipe generated: {}", recipe.recipe_name);
    Ok(recipe)
}

pub async fn modify_recipe(config: &GoogleApiConfig, recipe: &Value, mod_type: &str) -> Result<Value, AppError> {
    if !recipe.is_object() {
        return Err(AppError::InvalidRequest("recipe must be a JSON object".to_string()));
    }
    if mod_type.trim().is_empty() {
        return Err(AppError::InvalidRequest("mod_type must not be empty".to_string()));
    }

    let modified: Value = ask_gemini(config, build_modify_prompt(recipe, mod_type)).await?;
    if !modified.is_object() {
        return Err(AppError::ExternalApi("Gemini did not return a recipe object".to_string()));
    }
    Ok(modified)
}

pub async fn get_pairings(config: &GoogleApiConfig, recipe: &Value) -> Result<PairingsResponse, AppError> {
    let name = recipe_name(recipe)?;
    ask_gemini(config, build_pairings_prompt(name)).await
}

pub async fn get_ingredient_swaps(
    config: &GoogleApiConfig,
    recipe: &Value,
    ingredient: &str,
) -> Result<SwapsResponse, AppError> {
    let name = recipe_name(recipe)?;
    if ingredient.trim().is_empty() {
        return Err(AppError::InvalidRequest("ingredient must not be empty".to_string()));
    }
    ask_gemini(config, build_swaps_prompt(name, ingredient)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_prompt_skips_defaults() {
        let prompt = build_generate_prompt("eggs, spinach", Some("Any"), Some("None"));
        assert!(prompt.starts_with("Generate a recipe based on these details. Ingredients: eggs, spinach."));
        assert!(!prompt.contains("Cuisine:"));
        assert!(!prompt.contains("Dietary requirement:"));
        assert!(prompt.contains("'recipeName' (string)"));
    }

    #[test]
    fn test_generate_prompt_includes_filters() {
        let prompt = build_generate_prompt("tofu", Some("Thai"), Some("Vegan"));
        assert!(prompt.contains(" Cuisine: Thai."));
        assert!(prompt.contains(" Dietary requirement: Vegan."));
    }

    #[test]
    fn test_ingredients_accept_text_or_list() {
        let list: Ingredients = serde_json::from_value(json!(["rice", "beans"])).unwrap();
        assert_eq!(list.joined(), "rice, beans");

        let text: Ingredients = serde_json::from_value(json!(" rice and beans ")).unwrap();
        assert_eq!(text.joined(), "rice and beans");
    }

    #[test]
    fn test_strip_code_fences() {
        let text = "```json\n{\"pairings\": [\"Riesling\"]}\n```";
        assert_eq!(strip_code_fences(text), "{\"pairings\": [\"Riesling\"]}");
    }

    #[test]
    fn test_extract_and_parse_reply() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"text": "```json\n{\"swaps\": [\"shallot\", \"leek\"]}\n```"}]}
            }]
        }))
        .unwrap();

        let text = extract_reply_text(response).unwrap();
        let swaps: SwapsResponse = parse_reply(&text).unwrap();
        assert_eq!(swaps.swaps, vec!["shallot", "leek"]);
    }

    #[test]
    fn test_empty_candidates_is_an_error() {
        let response: GeminiResponse = serde_json::from_value(json!({"candidates": []})).unwrap();
        assert!(matches!(extract_reply_text(response), Err(AppError::ExternalApi(_))));
    }

    #[test]
    fn test_reply_with_wrong_shape_is_rejected() {
        let result: Result<PairingsResponse, _> = parse_reply("{\"drinks\": []}");
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GeminiRequest::from_prompt("hi".to_string())).unwrap();
        assert_eq!(body, json!({"contents": [{"parts": [{"text": "hi"}]}]}));
    }

    #[test]
    fn test_recipe_name_required() {
        assert_eq!(recipe_name(&json!({"recipeName": "Ramen"})).unwrap(), "Ramen");
        assert!(matches!(recipe_name(&json!({"name": "Ramen"})), Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let config = GoogleApiConfig::default();
        let ingredients = Ingredients::Text("eggs".to_string());
        let result = generate_recipe(&config, &ingredients, None, None).await;
        assert!(matches!(result, Err(AppError::MissingApiKey(_))));

        let result = get_pairings(&config, &json!({"recipeName": "Ramen"})).await;
        assert!(matches!(result, Err(AppError::MissingApiKey(_))));
    }
}
