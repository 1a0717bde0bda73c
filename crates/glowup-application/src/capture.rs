//! Capture boundary.
//!
//! The camera stream is an exclusively-held external resource. The manager
//! guarantees `stop_stream` on every exit from capture mode — success,
//! cancel, or failure.

use async_trait::async_trait;

use glowup_core::error::Result;
use glowup_core::image::EncodedImage;

/// Supplies still images from a live camera stream.
///
/// File selection does not go through this trait: a picked file is read
/// into an [`EncodedImage`] and handed to the manager directly, so both
/// paths converge on the same representation downstream.
#[async_trait]
pub trait CaptureProvider: Send + Sync {
    /// Acquires the camera stream.
    ///
    /// # Errors
    ///
    /// Permission denial and device failures are capture errors; the
    /// caller exits capture mode without further state change.
    async fn start_stream(&self) -> Result<()>;

    /// Takes a snapshot from the running stream as an encoded image.
    async fn snapshot(&self) -> Result<EncodedImage>;

    /// Releases the stream. Must be safe to call when no stream is held.
    async fn stop_stream(&self);
}
