//! Domain core for GlowUp: the interaction state machine, the closed
//! recommendation taxonomy, and the contracts of the remote AI clients.
//!
//! This crate performs no I/O. Transitions on [`session::Session`] return
//! [`session::Effect`]s; the application layer carries them out.

pub mod analysis;
pub mod catalog;
pub mod client;
pub mod error;
pub mod image;
pub mod session;

// Re-export common error type
pub use error::{GlowupError, Result};

pub use analysis::{
    ColorPalette, PhysicalAttributes, Recommendation, RecommendationSet, SkinHealth, StyleAnalysis,
};
pub use catalog::{Category, Gender, SubCategory};
pub use client::{AnalysisClient, TransformationClient};
pub use image::EncodedImage;
