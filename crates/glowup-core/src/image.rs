//! Encoded still images.
//!
//! Camera snapshots and gallery file selections both converge on
//! [`EncodedImage`], so everything downstream of capture is agnostic to
//! where the pixels came from.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{GlowupError, Result};

/// A still image as a mime type plus base64-encoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    mime_type: String,
    data: String,
}

impl EncodedImage {
    /// Creates an image from an already base64-encoded payload.
    ///
    /// # Errors
    ///
    /// Returns a capture error if the payload is empty.
    pub fn from_base64(mime_type: impl Into<String>, data: impl Into<String>) -> Result<Self> {
        let data = data.into();
        if data.trim().is_empty() {
            return Err(GlowupError::capture("Image payload is empty"));
        }
        Ok(Self {
            mime_type: mime_type.into(),
            data,
        })
    }

    /// Creates an image from raw bytes, encoding them as base64.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(GlowupError::capture("Image payload is empty"));
        }
        Ok(Self {
            mime_type: mime_type.into(),
            data: BASE64_STANDARD.encode(bytes),
        })
    }

    /// Parses a `data:<mime>;base64,<payload>` URL.
    ///
    /// A bare base64 string (no data-URL header) is accepted and assumed to
    /// be JPEG, matching what capture surfaces hand over.
    pub fn from_data_url(url: &str) -> Result<Self> {
        match url.split_once(',') {
            Some((header, payload)) => {
                let mime_type = header
                    .strip_prefix("data:")
                    .and_then(|rest| rest.split(';').next())
                    .filter(|mime| !mime.is_empty())
                    .unwrap_or("image/jpeg");
                Self::from_base64(mime_type, payload)
            }
            None => Self::from_base64("image/jpeg", url),
        }
    }

    /// The mime type, e.g. `image/jpeg`.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64-encoded payload without any data-URL header.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Renders the image as a data URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_round_trips_through_data_url() {
        let image = EncodedImage::from_bytes("image/png", b"pixels").unwrap();
        let url = image.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(EncodedImage::from_data_url(&url).unwrap(), image);
    }

    #[test]
    fn test_from_data_url_strips_header() {
        let image = EncodedImage::from_data_url("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assert_eq!(image.mime_type(), "image/jpeg");
        assert_eq!(image.data(), "aGVsbG8=");
    }

    #[test]
    fn test_bare_base64_assumed_jpeg() {
        let image = EncodedImage::from_data_url("aGVsbG8=").unwrap();
        assert_eq!(image.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_empty_payload_rejected() {
        assert!(EncodedImage::from_base64("image/jpeg", "").is_err());
        assert!(EncodedImage::from_bytes("image/jpeg", &[]).is_err());
    }
}
