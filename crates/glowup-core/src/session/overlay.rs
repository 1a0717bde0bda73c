//! Overlay (modal) state.
//!
//! Exactly one overlay can be active at a time; opening one replaces any
//! other. The booking form therefore replaces the nearby list it was opened
//! from, and dismissing the confirmation returns straight to the detail
//! screen.

use serde::{Deserialize, Serialize};

use crate::analysis::Recommendation;
use crate::session::commerce::NearbyService;
use crate::session::share::SharePayload;

/// The active overlay, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Overlay {
    /// Retailer destinations for a recommendation.
    Shop { style: Recommendation },
    /// Nearby salons / beauty parlors for the detected gender.
    Nearby,
    /// Appointment form for a selected nearby service.
    BookingForm { service: NearbyService },
    /// Confirmation after a (simulated) booking submission.
    BookingConfirmed { service: NearbyService },
    /// In-app share sheet, the fallback when the native surface is
    /// unavailable or errored.
    ShareSheet { payload: SharePayload },
}

impl Overlay {
    /// Short name for transition-error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Shop { .. } => "Shop",
            Self::Nearby => "Nearby",
            Self::BookingForm { .. } => "BookingForm",
            Self::BookingConfirmed { .. } => "BookingConfirmed",
            Self::ShareSheet { .. } => "ShareSheet",
        }
    }
}
