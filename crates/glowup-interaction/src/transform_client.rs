//! GeminiTransformClient - try-on image synthesis over the Gemini REST API.

use async_trait::async_trait;
use reqwest::Client;

use glowup_core::client::TransformationClient;
use glowup_core::error::{GlowupError, Result};
use glowup_core::image::EncodedImage;

use crate::config::GeminiConfig;
use crate::wire::{Content, GenerateContentRequest, Part, extract_image, send_request};

/// Client for the remote style transformation, backed by an image-capable
/// Gemini model.
#[derive(Clone)]
pub struct GeminiTransformClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiTransformClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Builds a client with the API key loaded from the environment.
    pub fn try_from_env() -> Result<Self> {
        Ok(Self::new(GeminiConfig::try_from_env()?))
    }
}

fn transform_prompt(style_title: &str, category_label: &str) -> String {
    format!(
        "Apply the \"{style_title}\" look to this person in the \"{category_label}\" area.
Maintain their facial structure, identity, and skin tone.
Change only the elements related to the recommendation.
Output a single transformed image part."
    )
}

#[async_trait]
impl TransformationClient for GeminiTransformClient {
    async fn transform(
        &self,
        image: &EncodedImage,
        style_title: &str,
        category_label: &str,
    ) -> Result<EncodedImage> {
        if style_title.trim().is_empty() {
            return Err(GlowupError::transformation("Style title must not be empty"));
        }
        if category_label.trim().is_empty() {
            return Err(GlowupError::transformation(
                "Category label must not be empty",
            ));
        }

        tracing::debug!(
            target: "gemini",
            model = self.config.image_model(),
            style = style_title,
            category = category_label,
            "issuing transformation request"
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::image(image),
                    Part::Text {
                        text: transform_prompt(style_title, category_label),
                    },
                ],
            }],
            generation_config: None,
        };

        let url = self.config.generate_url(self.config.image_model());
        let response = send_request(&self.client, url, &request)
            .await
            .map_err(GlowupError::transformation)?;

        // The image part is not assumed to be first; a response without one
        // is a failure, never a silent success.
        extract_image(response).ok_or(GlowupError::MissingImage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_style_and_region() {
        let prompt = transform_prompt("Buzz Cut", "beard");
        assert!(prompt.contains("\"Buzz Cut\" look"));
        assert!(prompt.contains("\"beard\" area"));
        assert!(prompt.contains("identity"));
    }

    #[tokio::test]
    async fn test_empty_inputs_rejected_before_any_call() {
        let client = GeminiTransformClient::new(GeminiConfig::new("k"));
        let image = EncodedImage::from_bytes("image/jpeg", b"x").unwrap();
        assert!(client.transform(&image, "", "hair").await.is_err());
        assert!(client.transform(&image, "Buzz Cut", " ").await.is_err());
    }
}
