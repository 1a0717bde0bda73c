//! Error types for the GlowUp application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire GlowUp application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum GlowupError {
    /// Capture failure (camera permission/device error, unreadable file)
    #[error("Capture error: {0}")]
    Capture(String),

    /// Analysis call failure (transport or service-side)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Response failed schema validation
    #[error("Schema error: {0}")]
    Schema(String),

    /// Transformation call failure (transport or service-side)
    #[error("Transformation error: {0}")]
    Transformation(String),

    /// The transformation response contained no image part.
    ///
    /// Distinct from [`GlowupError::Transformation`]: the call itself
    /// succeeded but the service returned nothing usable.
    #[error("Transformation returned no image")]
    MissingImage,

    /// Share surface failure
    #[error("Share error: {0}")]
    Share(String),

    /// Configuration error (missing or malformed service credential)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A transition was requested that the current state does not permit
    #[error("Invalid transition: {action} is not allowed from {state}")]
    InvalidTransition { state: String, action: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GlowupError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Capture error
    pub fn capture(message: impl Into<String>) -> Self {
        Self::Capture(message.into())
    }

    /// Creates an Analysis error
    pub fn analysis(message: impl Into<String>) -> Self {
        Self::Analysis(message.into())
    }

    /// Creates a Schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        Self::Transformation(message.into())
    }

    /// Creates a Share error
    pub fn share(message: impl Into<String>) -> Self {
        Self::Share(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an InvalidTransition error
    pub fn invalid_transition(state: &'static str, action: &'static str) -> Self {
        Self::InvalidTransition {
            state: state.to_string(),
            action: action.to_string(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an InvalidTransition error
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// Check if this is a Schema error
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }

    /// Check if this is the no-image transformation failure
    pub fn is_missing_image(&self) -> bool {
        matches!(self, Self::MissingImage)
    }

    /// A message suitable for direct display to the user.
    ///
    /// Analysis and transformation failures already carry user-displayable
    /// text; the remaining variants fall back to their `Display` output.
    pub fn user_message(&self) -> String {
        match self {
            Self::Analysis(message) | Self::Transformation(message) => message.clone(),
            Self::MissingImage => "No image was found in the transformation response.".to_string(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for GlowupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Schema(err.to_string())
    }
}

/// Conversion from anyhow::Error (transitional, should be removed eventually)
impl From<anyhow::Error> for GlowupError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, GlowupError>`.
pub type Result<T> = std::result::Result<T, GlowupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_display() {
        let err = GlowupError::invalid_transition("Completed", "start_analysis");
        assert_eq!(
            err.to_string(),
            "Invalid transition: start_analysis is not allowed from Completed"
        );
        assert!(err.is_invalid_transition());
    }

    #[test]
    fn test_user_message_passes_service_text_through() {
        let err = GlowupError::analysis("Failed to analyze image. Please try again.");
        assert_eq!(err.user_message(), "Failed to analyze image. Please try again.");
    }

    #[test]
    fn test_missing_image_is_distinct_from_transformation() {
        assert!(GlowupError::MissingImage.is_missing_image());
        assert!(!GlowupError::transformation("boom").is_missing_image());
    }

    #[test]
    fn test_from_serde_json_is_schema() {
        let err: GlowupError =
            serde_json::from_str::<serde_json::Value>("{not json").unwrap_err().into();
        assert!(err.is_schema());
    }
}
