//! Connection settings for the Gemini content provider.
//!
//! Configuration is environment-first: `ChefConfig::from_env()` reads the API
//! key (required) and an optional base URL override; everything else has a
//! default that the CLI can override with flags.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::{ChefClientError, Result};

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the API base URL
pub const GEMINI_BASE_URL_ENV: &str = "GEMINI_BASE_URL";

/// Base URL for the Gemini API
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Text model used to write recipes
pub const DEFAULT_RECIPE_MODEL: &str = "gemini-2.5-flash";

/// Image model used to photograph a dish
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Generation can take a while; give up after two minutes
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Recipes requested per course (primero, segundo, postre)
pub const DEFAULT_RECIPES_PER_COURSE: u32 = 5;

/// Settings for `GeminiChef`.
#[derive(Clone)]
pub struct ChefConfig {
    pub api_key: String,
    pub base_url: String,
    pub recipe_model: String,
    pub image_model: String,
    pub timeout: Duration,
    pub recipes_per_course: u32,
}

impl ChefConfig {
    /// Defaults for everything except the API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            recipe_model: DEFAULT_RECIPE_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            recipes_per_course: DEFAULT_RECIPES_PER_COURSE,
        }
    }

    /// Read `GEMINI_API_KEY` (required) and `GEMINI_BASE_URL` (optional).
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` if the key variable is unset or blank.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(GEMINI_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ChefClientError::MissingApiKey {
                var: GEMINI_API_KEY_ENV,
            })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = env::var(GEMINI_BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_recipe_model(mut self, model: impl Into<String>) -> Self {
        self.recipe_model = model.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_recipes_per_course(mut self, count: u32) -> Self {
        self.recipes_per_course = count.max(1);
        self
    }

    /// `generateContent` endpoint for a model
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

// The key never appears in logs
impl fmt::Debug for ChefConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChefConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("recipe_model", &self.recipe_model)
            .field("image_model", &self.image_model)
            .field("timeout", &self.timeout)
            .field("recipes_per_course", &self.recipes_per_course)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChefConfig::new("secret");
        assert_eq!(config.recipe_model, "gemini-2.5-flash");
        assert_eq!(config.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.recipes_per_course, 5);
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = ChefConfig::new("secret").with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(
            config.endpoint("gemini-2.5-flash"),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", ChefConfig::new("super-secret-key"));
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn test_recipes_per_course_at_least_one() {
        assert_eq!(ChefConfig::new("k").with_recipes_per_course(0).recipes_per_course, 1);
    }
}
