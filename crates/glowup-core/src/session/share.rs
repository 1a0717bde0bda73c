//! Share payload handed to the platform share surface.

use serde::{Deserialize, Serialize};

/// Title, descriptive text, and a shareable reference for the current look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub link: String,
}
