//! Simulated backends.
//!
//! Authentication and booking are unconditional-success stubs by design:
//! there is no identity service and no booking service behind them. They
//! are kept as named collaborators so a real backend has one obvious seam
//! to replace.

use glowup_core::error::Result;
use glowup_core::session::{BookingRequest, NearbyService, SocialProvider};

/// Authentication stub. Every path succeeds without verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedAuthenticator;

impl SimulatedAuthenticator {
    pub async fn sign_in(&self, email: &str, _password: &str) -> Result<()> {
        tracing::info!(target: "auth", email, "simulated sign-in");
        Ok(())
    }

    pub async fn sign_up(&self, _full_name: &str, email: &str, _password: &str) -> Result<()> {
        tracing::info!(target: "auth", email, "simulated sign-up");
        Ok(())
    }

    pub async fn social_sign_in(&self, provider: SocialProvider) -> Result<()> {
        tracing::info!(target: "auth", ?provider, "simulated social sign-in");
        Ok(())
    }

    /// "Sends" password-reset instructions.
    pub async fn request_password_reset(&self, email: &str) -> Result<()> {
        tracing::info!(target: "auth", email, "simulated password reset");
        Ok(())
    }
}

/// Confirmation returned by the booking stub.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    pub service: NearbyService,
    pub request: BookingRequest,
}

/// Booking stub: no network call is made, submission always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedBookingGateway;

impl SimulatedBookingGateway {
    pub async fn submit(
        &self,
        service: &NearbyService,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation> {
        tracing::info!(
            target: "booking",
            service = %service.name,
            at = %request.requested_at,
            "simulated booking submission"
        );
        Ok(BookingConfirmation {
            service: service.clone(),
            request: request.clone(),
        })
    }
}
