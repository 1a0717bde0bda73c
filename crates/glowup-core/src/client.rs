//! Remote-service client traits.
//!
//! The application layer depends on these seams so the state machine can be
//! driven by mocks in tests and by the Gemini implementations in production.

use async_trait::async_trait;

use crate::analysis::StyleAnalysis;
use crate::error::Result;
use crate::image::EncodedImage;

/// Client for the remote style/health/attribute analysis.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Analyzes a non-empty encoded still image.
    ///
    /// # Errors
    ///
    /// Any transport, service-side, or schema-validation problem surfaces as
    /// a single typed failure with a user-displayable message. Partial
    /// results are never returned.
    async fn analyze(&self, image: &EncodedImage) -> Result<StyleAnalysis>;
}

/// Client for the remote style-transformation ("try-on") call.
#[async_trait]
pub trait TransformationClient: Send + Sync {
    /// Applies the named style to the image, preserving subject identity.
    ///
    /// # Errors
    ///
    /// A response with no image part is [`crate::GlowupError::MissingImage`],
    /// distinct from transport failures.
    async fn transform(
        &self,
        image: &EncodedImage,
        style_title: &str,
        category_label: &str,
    ) -> Result<EncodedImage>;
}
