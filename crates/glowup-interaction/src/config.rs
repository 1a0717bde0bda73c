//! Gemini service configuration.
//!
//! The single configurable credential is the API key, taken from the
//! environment. Model ids default to the production pair and can be
//! overridden for testing against other tiers.

use glowup_core::error::{GlowupError, Result};

/// Reasoning-capable model used for the style/health analysis.
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-3-pro-preview";

/// Image-generation model used for try-on transformations.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Connection settings shared by both Gemini clients.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: String,
    base_url: String,
    analysis_model: String,
    image_model: String,
}

impl GeminiConfig {
    /// Creates a config with the provided API key and default models.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    /// Loads the API key from `GEMINI_API_KEY`.
    pub fn try_from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| GlowupError::config(format!("{API_KEY_ENV} is not set")))?;
        if api_key.trim().is_empty() {
            return Err(GlowupError::config(format!("{API_KEY_ENV} is empty")));
        }
        Ok(Self::new(api_key))
    }

    /// Overrides the analysis model after construction.
    pub fn with_analysis_model(mut self, model: impl Into<String>) -> Self {
        self.analysis_model = model.into();
        self
    }

    /// Overrides the image model after construction.
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Overrides the base URL (used by tests against local fixtures).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn analysis_model(&self) -> &str {
        &self.analysis_model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    /// The `generateContent` endpoint for a model, key included.
    pub(crate) fn generate_url(&self, model: &str) -> String {
        format!(
            "{base}/{model}:generateContent?key={key}",
            base = self.base_url,
            key = self.api_key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeminiConfig::new("k");
        assert_eq!(config.analysis_model(), DEFAULT_ANALYSIS_MODEL);
        assert_eq!(config.image_model(), DEFAULT_IMAGE_MODEL);
        assert!(
            config
                .generate_url("gemini-2.5-flash-image")
                .ends_with("/gemini-2.5-flash-image:generateContent?key=k")
        );
    }

    #[test]
    fn test_overrides() {
        let config = GeminiConfig::new("k")
            .with_analysis_model("gemini-2.5-flash")
            .with_base_url("http://localhost:9999/models");
        assert_eq!(config.analysis_model(), "gemini-2.5-flash");
        assert!(config.generate_url("m").starts_with("http://localhost:9999/models/m"));
    }
}
