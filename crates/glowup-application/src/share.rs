//! Share boundary and the in-app share-sheet destinations.

use async_trait::async_trait;
use reqwest::Url;

use glowup_core::error::Result;
use glowup_core::session::SharePayload;

/// Outcome of presenting the platform's native share surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The user shared the look.
    Completed,
    /// The user dismissed the dialog. Not an error; no fallback is shown.
    Cancelled,
    /// The platform has no native share surface.
    Unavailable,
}

/// The platform's native share surface.
#[async_trait]
pub trait NativeShare: Send + Sync {
    /// Presents the share dialog for the payload.
    ///
    /// # Errors
    ///
    /// A genuine surface failure (not a user cancellation); the manager
    /// falls back to the in-app share sheet.
    async fn share(&self, payload: &SharePayload) -> Result<ShareOutcome>;
}

/// A destination offered by the in-app share sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareDestination {
    WhatsApp,
    Facebook,
    /// Save the displayed image locally.
    Download,
    /// Copy the share link to the clipboard.
    CopyLink,
}

impl ShareDestination {
    /// All destinations in display order.
    pub const ALL: [ShareDestination; 4] = [
        Self::WhatsApp,
        Self::Facebook,
        Self::Download,
        Self::CopyLink,
    ];

    /// The deep link opened for this destination, parameterized by the
    /// share payload. Local actions (download, copy) have none.
    pub fn deep_link(&self, payload: &SharePayload) -> Option<Url> {
        match self {
            Self::WhatsApp => Url::parse_with_params(
                "https://wa.me/",
                &[("text", format!("{} {}", payload.text, payload.link))],
            )
            .ok(),
            Self::Facebook => Url::parse_with_params(
                "https://www.facebook.com/sharer/sharer.php",
                &[("u", payload.link.clone())],
            )
            .ok(),
            Self::Download | Self::CopyLink => None,
        }
    }
}
