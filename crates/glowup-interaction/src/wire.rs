//! Gemini `generateContent` wire types and transport helpers.
//!
//! Shared by the analysis and transformation clients. Errors are reported
//! back as displayable message strings; each client wraps them in its own
//! typed failure.

use glowup_core::image::EncodedImage;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

#[derive(Serialize)]
pub(crate) struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub(crate) enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

impl Part {
    /// An inline-data part carrying the encoded image.
    pub fn image(image: &EncodedImage) -> Self {
        Self::InlineData {
            inline_data: InlineDataPayload {
                mime_type: image.mime_type().to_string(),
                data: image.data().to_string(),
            },
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineDataPayload {
    pub mime_type: String,
    pub data: String,
}

#[derive(Deserialize)]
pub(crate) struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<ContentResponse>,
}

#[derive(Deserialize)]
pub(crate) struct ContentResponse {
    pub parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
pub(crate) struct PartResponse {
    pub text: Option<String>,
    #[serde(rename = "inlineData")]
    pub inline_data: Option<InlineDataPayload>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Posts a `generateContent` request and parses the response envelope.
///
/// Failures come back as a displayable message string.
pub(crate) async fn send_request(
    client: &Client,
    url: String,
    body: &GenerateContentRequest,
) -> Result<GenerateContentResponse, String> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|err| format!("Gemini API request failed: {err}"))?;

    if !response.status().is_success() {
        let status = response.status();
        let body_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
        return Err(map_http_error(status, body_text));
    }

    response
        .json()
        .await
        .map_err(|err| format!("Failed to parse Gemini response: {err}"))
}

/// The first text part of the first candidate, if any.
pub(crate) fn extract_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
}

/// The first inline-image part across the first candidate's parts.
///
/// The image is not assumed to be the first part; text parts may precede it.
pub(crate) fn extract_image(response: GenerateContentResponse) -> Option<EncodedImage> {
    response
        .candidates
        .into_iter()
        .flatten()
        .next()
        .and_then(|candidate| candidate.content)
        .into_iter()
        .flat_map(|content| content.parts)
        .find_map(|part| part.inline_data)
        .and_then(|inline| {
            let mime = if inline.mime_type.is_empty() {
                "image/png".to_string()
            } else {
                inline.mime_type
            };
            EncodedImage::from_base64(mime, inline.data).ok()
        })
}

fn map_http_error(status: StatusCode, body: String) -> String {
    match serde_json::from_str::<ErrorWrapper>(&body) {
        Ok(wrapper) => {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        }
        Err(_) => format!("Gemini API returned {status}: {body}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extract_text_from_candidate() {
        let parsed = response(json!({
            "candidates": [{"content": {"parts": [{"text": "{\"vibe\":\"x\"}"}]}}]
        }));
        assert_eq!(extract_text(parsed).as_deref(), Some("{\"vibe\":\"x\"}"));
    }

    #[test]
    fn test_extract_image_skips_leading_text_part() {
        let parsed = response(json!({
            "candidates": [{"content": {"parts": [
                {"text": "Here is your look"},
                {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}}
            ]}}]
        }));
        let image = extract_image(parsed).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.data(), "aGVsbG8=");
    }

    #[test]
    fn test_extract_image_none_when_absent() {
        let parsed = response(json!({
            "candidates": [{"content": {"parts": [{"text": "no image today"}]}}]
        }));
        assert!(extract_image(parsed).is_none());

        let parsed = response(json!({"candidates": []}));
        assert!(extract_image(parsed).is_none());
    }

    #[test]
    fn test_map_http_error_prefers_service_body() {
        let body = json!({"error": {"message": "quota exceeded", "status": "RESOURCE_EXHAUSTED"}});
        let message = map_http_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        assert_eq!(message, "RESOURCE_EXHAUSTED: quota exceeded");
    }

    #[test]
    fn test_map_http_error_falls_back_to_raw_body() {
        let message = map_http_error(StatusCode::BAD_GATEWAY, "<html>".to_string());
        assert!(message.contains("502"));
        assert!(message.contains("<html>"));
    }

    #[test]
    fn test_image_part_serializes_as_inline_data() {
        let image = EncodedImage::from_base64("image/jpeg", "aGVsbG8=").unwrap();
        let value = serde_json::to_value(Part::image(&image)).unwrap();
        assert_eq!(
            value,
            json!({"inlineData": {"mimeType": "image/jpeg", "data": "aGVsbG8="}})
        );
    }
}
