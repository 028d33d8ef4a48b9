//! # Gemini content provider
//!
//! Talks to Google's Generative Language REST API (`generateContent`):
//! - the text model writes a batch of recipes as schema-constrained JSON
//! - the image model photographs a dish given its title
//!
//! The API key is sent in the `x-goog-api-key` header so it never ends up in
//! a logged URL.

use async_trait::async_trait;
use recipe_model::RawRecipe;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, info, instrument, warn};

use crate::ContentProvider;
use crate::config::ChefConfig;
use crate::error::{ChefClientError, Result};
use crate::image::GeneratedImage;

/// Persona given to the text model
const SYSTEM_INSTRUCTION: &str = "Eres un chef experto en dieta mediterránea. \
Tu objetivo es generar recetas auténticas, saludables y deliciosas en español. \
Debes devolver siempre los datos en un formato JSON estricto según el esquema proporcionado.";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// `generateContent` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    fn system_text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

/// One part of a content block: text or inline binary data
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

/// `generateContent` response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Shape of the JSON text the recipe model is told to produce
#[derive(Debug, Deserialize)]
struct RecipeEnvelope {
    #[serde(default)]
    recipes: Vec<RawRecipe>,
}

impl GenerateResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter())
            .into_iter()
            .flatten()
    }
}

// ============================================================================
// Prompts
// ============================================================================

/// User prompt asking for a full menu
fn recipe_prompt(per_course: u32) -> String {
    format!(
        "Genera una lista de {} recetas de dieta mediterránea: {} primeros platos, \
         {} segundos platos y {} postres.",
        per_course * 3,
        per_course,
        per_course,
        per_course
    )
}

/// Prompt for a food photograph of `title`
fn image_prompt(title: &str) -> String {
    format!(
        "Una fotografía profesional de alta resolución, estilo fotografía de comida, de: {}. \
         Iluminación natural, dieta mediterránea, emplatado elegante.",
        title
    )
}

/// Response schema: `{ recipes: [ {id, title, category, summary,
/// fullDescription, ingredients[], steps[]} ] }`
fn recipe_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recipes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "title": { "type": "STRING" },
                        "category": {
                            "type": "STRING",
                            "enum": ["primero", "segundo", "postre"]
                        },
                        "summary": { "type": "STRING" },
                        "fullDescription": { "type": "STRING" },
                        "ingredients": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "steps": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": [
                        "id", "title", "category", "summary",
                        "fullDescription", "ingredients", "steps"
                    ]
                }
            }
        }
    })
}

// ============================================================================
// Response parsing
// ============================================================================

/// Pull the recipe batch out of a text-model response.
///
/// The first text part must be the JSON envelope; a missing `recipes` key is
/// an empty batch, anything unparseable is an error.
fn parse_recipes(response: &GenerateResponse) -> Result<Vec<RawRecipe>> {
    let text = response
        .parts()
        .find_map(|p| p.text.as_deref())
        .ok_or(ChefClientError::EmptyResponse)?;

    let envelope: RecipeEnvelope = serde_json::from_str(text.trim())?;
    Ok(envelope.recipes)
}

/// Pull the first inline image out of an image-model response.
fn parse_image(response: &GenerateResponse) -> Result<GeneratedImage> {
    let inline = response
        .parts()
        .find_map(|p| p.inline_data.as_ref())
        .ok_or(ChefClientError::NoImage)?;

    GeneratedImage::from_base64(inline.mime_type.as_deref(), &inline.data)
}

// ============================================================================
// Client
// ============================================================================

/// Content provider backed by the Gemini API.
pub struct GeminiChef {
    client: Client,
    config: ChefConfig,
}

impl GeminiChef {
    /// Create a client with the given settings.
    ///
    /// # Errors
    ///
    /// Returns `Http` if the underlying HTTP client cannot be built.
    pub fn new(config: ChefConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        info!(
            "Gemini chef ready (recipes: {}, images: {})",
            config.recipe_model, config.image_model
        );
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ChefConfig {
        &self.config
    }

    /// Ask the text model for a fresh menu.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses, and responses that do not
    /// match the recipe schema.
    #[instrument(skip(self), fields(model = %self.config.recipe_model))]
    pub async fn request_recipes(&self) -> Result<Vec<RawRecipe>> {
        let request = GenerateRequest {
            contents: vec![Content::user_text(recipe_prompt(
                self.config.recipes_per_course,
            ))],
            system_instruction: Some(Content::system_text(SYSTEM_INSTRUCTION)),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: recipe_schema(),
            }),
        };

        let response = self.generate(&self.config.recipe_model, &request).await?;
        let recipes = parse_recipes(&response)?;
        debug!("Gemini returned {} recipes", recipes.len());
        Ok(recipes)
    }

    /// Ask the image model for a photograph of `title`.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses, and responses without
    /// decodable inline image data.
    #[instrument(skip(self), fields(model = %self.config.image_model))]
    pub async fn request_image(&self, title: &str) -> Result<GeneratedImage> {
        let request = GenerateRequest {
            contents: vec![Content::user_text(image_prompt(title))],
            system_instruction: None,
            generation_config: None,
        };

        let response = self.generate(&self.config.image_model, &request).await?;
        let image = parse_image(&response)?;
        debug!("Gemini returned a {} image ({} bytes)", image.mime_type, image.bytes.len());
        Ok(image)
    }

    /// POST a `generateContent` request and decode the body.
    async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<GenerateResponse> {
        let response = self
            .client
            .post(self.config.endpoint(model))
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(map_api_error(status.as_u16(), &body));
        }

        let decoded: GenerateResponse = serde_json::from_str(&body)?;
        if let Some(api_error) = decoded.error {
            return Err(ChefClientError::Api {
                status: status.as_u16(),
                message: api_error.message,
            });
        }
        if let Some(reason) = decoded.candidates.first().and_then(|c| c.finish_reason.as_deref()) {
            debug!(finish_reason = reason, "Gemini candidate finished");
        }
        Ok(decoded)
    }
}

/// Turn an error status into `Api`, preferring the provider's own message.
fn map_api_error(status: u16, body: &str) -> ChefClientError {
    let message = serde_json::from_str::<GenerateResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .map_or_else(|| body.to_string(), |e| e.message);
    ChefClientError::Api { status, message }
}

#[async_trait]
impl ContentProvider for GeminiChef {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_recipes(&self) -> Vec<RawRecipe> {
        match self.request_recipes().await {
            Ok(recipes) => recipes,
            Err(e) => {
                warn!("Recipe generation failed, returning no recipes: {}", e);
                Vec::new()
            }
        }
    }

    async fn generate_image(&self, title: &str) -> Option<GeneratedImage> {
        match self.request_image(title).await {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("Image generation for '{}' failed: {}", title, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_model::Category;

    fn response(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateRequest {
            contents: vec![Content::user_text(recipe_prompt(5))],
            system_instruction: Some(Content::system_text(SYSTEM_INSTRUCTION)),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: recipe_schema(),
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert!(value["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("dieta mediterránea"));
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            value["generationConfig"]["responseSchema"]["properties"]["recipes"]["items"]
                ["properties"]["category"]["enum"],
            json!(["primero", "segundo", "postre"])
        );
    }

    #[test]
    fn test_recipe_prompt_counts() {
        let prompt = recipe_prompt(5);
        assert!(prompt.contains("15 recetas"));
        assert!(prompt.contains("5 postres"));
    }

    #[test]
    fn test_image_prompt_mentions_title() {
        assert!(image_prompt("Paella valenciana").contains("de: Paella valenciana."));
    }

    #[test]
    fn test_parse_recipes() {
        let inner = r#"{"recipes":[{"id":"1","title":"Gazpacho","category":"primero","summary":"Sopa fría","fullDescription":"Sopa fría de tomate","ingredients":["Tomate"],"steps":["Triturar"]}]}"#;
        let body = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": inner }] },
                "finishReason": "STOP"
            }]
        })
        .to_string();

        let recipes = parse_recipes(&response(&body)).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].category, Category::Primero);
        assert_eq!(recipes[0].ingredients, vec!["Tomate".to_string()]);
    }

    #[test]
    fn test_parse_recipes_mixed_case_category() {
        let inner = json!({
            "recipes": [
                {
                    "id": "1", "title": "Hummus", "category": "primero",
                    "summary": "", "fullDescription": "", "ingredients": [], "steps": []
                },
                {
                    "id": "2", "title": "Tarta de Santiago", "category": "Postre",
                    "summary": "", "fullDescription": "", "ingredients": [], "steps": []
                }
            ]
        })
        .to_string();
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": inner }] } }]
        })
        .to_string();

        let recipes = parse_recipes(&response(&body)).unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[1].category, Category::Postre);
    }

    #[test]
    fn test_parse_recipes_without_key_is_empty() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "{}" }] } }]
        })
        .to_string();
        assert!(parse_recipes(&response(&body)).unwrap().is_empty());
    }

    #[test]
    fn test_parse_recipes_malformed_text() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "Lo siento, no puedo" }] } }]
        })
        .to_string();
        assert!(matches!(
            parse_recipes(&response(&body)),
            Err(ChefClientError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_recipes_schema_violation() {
        let inner = r#"{"recipes":[{"id":"1","title":"x","category":"entrante"}]}"#;
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": inner }] } }]
        })
        .to_string();
        assert!(parse_recipes(&response(&body)).is_err());
    }

    #[test]
    fn test_parse_recipes_no_candidates() {
        assert!(matches!(
            parse_recipes(&response("{}")),
            Err(ChefClientError::EmptyResponse)
        ));
    }

    #[test]
    fn test_parse_image_skips_text_parts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "Aquí tienes tu foto" },
                    { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
                ] }
            }]
        })
        .to_string();

        let image = parse_image(&response(&body)).unwrap();
        assert_eq!(image.bytes, b"hello");
        assert_eq!(image.to_data_uri(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_parse_image_missing() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "sin imagen" }] } }]
        })
        .to_string();
        assert!(matches!(parse_image(&response(&body)), Err(ChefClientError::NoImage)));
    }

    #[test]
    fn test_map_api_error_prefers_provider_message() {
        let err = map_api_error(403, r#"{"error":{"message":"API key not valid"}}"#);
        assert!(matches!(
            err,
            ChefClientError::Api { status: 403, ref message } if message == "API key not valid"
        ));

        let err = map_api_error(502, "Bad Gateway");
        assert!(matches!(
            err,
            ChefClientError::Api { status: 502, ref message } if message == "Bad Gateway"
        ));
    }

    #[tokio::test]
    async fn test_unreachable_provider_normalizes_to_empty() {
        // Nothing listens on port 9 locally; the request fails fast
        let config = ChefConfig::new("test-key")
            .with_base_url("http://127.0.0.1:9/v1beta")
            .with_timeout(std::time::Duration::from_secs(2));
        let chef = GeminiChef::new(config).unwrap();

        assert!(chef.generate_recipes().await.is_empty());
        assert!(chef.generate_image("Paella").await.is_none());
    }
}
