//! Screen navigation types.

use serde::{Deserialize, Serialize};

/// The active screen, reachable only once authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Home,
    Analysis,
    StyleDetail,
    Profile,
}
