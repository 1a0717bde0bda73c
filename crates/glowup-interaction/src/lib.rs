//! Gemini REST clients for GlowUp.
//!
//! Implements the [`glowup_core::client`] traits against the
//! `generateContent` API: style/health analysis on a reasoning model and
//! try-on image synthesis on an image-capable model.

pub mod analysis_client;
pub mod config;
pub mod transform_client;
mod wire;

pub use analysis_client::GeminiAnalysisClient;
pub use config::{DEFAULT_ANALYSIS_MODEL, DEFAULT_IMAGE_MODEL, GeminiConfig};
pub use transform_client::GeminiTransformClient;
