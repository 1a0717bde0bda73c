//! The interaction manager: composition root of a GlowUp session.
//!
//! Owns the state container behind an async lock, interprets the effects
//! transitions return, and funnels every timer expiry and remote resolution
//! back through the state machine. Spawned work holds only a weak handle to
//! the manager, so in-flight calls and timers never keep a torn-down
//! session alive; the timer registry cancels everything on drop.

use std::sync::{Arc, Mutex};

use tokio::sync::RwLock;

use glowup_core::analysis::Recommendation;
use glowup_core::catalog::{Category, SubCategory};
use glowup_core::client::{AnalysisClient, TransformationClient};
use glowup_core::error::{GlowupError, Result};
use glowup_core::image::EncodedImage;
use glowup_core::session::{
    BookingRequest, Effect, JobId, NearbyService, Notice, Overlay, ROTATION_PERIOD, SPLASH_DELAY,
    ScanStage, Screen, Session, SharePayload, SocialProvider,
};

use crate::capture::CaptureProvider;
use crate::share::{NativeShare, ShareOutcome};
use crate::simulated::{SimulatedAuthenticator, SimulatedBookingGateway};
use crate::timer::{TimerKind, TimerRegistry};

const DEFAULT_SHARE_LINK: &str = "https://glowup.app/look";

/// Composition root for one running session.
///
/// Construct with [`InteractionManager::new`], wrap in an `Arc`, and call
/// [`InteractionManager::start`] once; every other method is a user action.
pub struct InteractionManager {
    session: Arc<RwLock<Session>>,
    timers: TimerRegistry,
    analysis_client: Arc<dyn AnalysisClient>,
    transformation_client: Arc<dyn TransformationClient>,
    capture_provider: Arc<dyn CaptureProvider>,
    native_share: Arc<dyn NativeShare>,
    authenticator: SimulatedAuthenticator,
    booking: SimulatedBookingGateway,
    notices: Mutex<Vec<Notice>>,
    share_link: String,
}

impl InteractionManager {
    pub fn new(
        analysis_client: Arc<dyn AnalysisClient>,
        transformation_client: Arc<dyn TransformationClient>,
        capture_provider: Arc<dyn CaptureProvider>,
        native_share: Arc<dyn NativeShare>,
    ) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::new())),
            timers: TimerRegistry::new(),
            analysis_client,
            transformation_client,
            capture_provider,
            native_share,
            authenticator: SimulatedAuthenticator,
            booking: SimulatedBookingGateway,
            notices: Mutex::new(Vec::new()),
            share_link: DEFAULT_SHARE_LINK.to_string(),
        }
    }

    /// Builds a manager wired to the Gemini clients, with the API key
    /// loaded from the environment.
    pub fn with_gemini_from_env(
        capture_provider: Arc<dyn CaptureProvider>,
        native_share: Arc<dyn NativeShare>,
    ) -> Result<Self> {
        let config = glowup_interaction::GeminiConfig::try_from_env()?;
        Ok(Self::new(
            Arc::new(glowup_interaction::GeminiAnalysisClient::new(config.clone())),
            Arc::new(glowup_interaction::GeminiTransformClient::new(config)),
            capture_provider,
            native_share,
        ))
    }

    /// Overrides the page reference used in share payloads.
    pub fn with_share_link(mut self, link: impl Into<String>) -> Self {
        self.share_link = link.into();
        self
    }

    /// A copy of the current session state.
    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Takes the queued user-visible notices.
    pub fn drain_notices(&self) -> Vec<Notice> {
        let mut notices = self.notices.lock().expect("notice queue poisoned");
        std::mem::take(&mut *notices)
    }

    // ========================================================================
    // Transition plumbing
    // ========================================================================

    /// Runs one transition under the write lock, then carries out the
    /// effects it returned.
    async fn apply<F>(self: &Arc<Self>, transition: F) -> Result<()>
    where
        F: FnOnce(&mut Session) -> Result<Vec<Effect>>,
    {
        let effects = {
            let mut session = self.session.write().await;
            transition(&mut session)?
        };
        self.run_effects(effects).await;
        Ok(())
    }

    async fn run_effects(self: &Arc<Self>, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartSplashTimer => self.spawn_splash(),
                Effect::StartRotation => self.spawn_rotation(),
                Effect::StopRotation => self.timers.cancel(TimerKind::Rotation),
                Effect::StopCaptureStream => self.capture_provider.stop_stream().await,
                Effect::ScheduleScanStage { job, stage } => self.spawn_scan_dwell(job, stage),
                Effect::RequestAnalysis { job, image } => self.spawn_analysis(job, image),
                Effect::RequestTransformation {
                    job,
                    image,
                    style_title,
                    category_label,
                } => self.spawn_transformation(job, image, style_title, category_label),
                Effect::PresentShare { payload } => self.present_share(payload).await,
                Effect::Notify { notice } => self
                    .notices
                    .lock()
                    .expect("notice queue poisoned")
                    .push(notice),
            }
        }
    }

    fn spawn_splash(self: &Arc<Self>) {
        let token = self.timers.arm(TimerKind::Splash);
        let manager = Arc::downgrade(self);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(SPLASH_DELAY) => {
                    let Some(manager) = manager.upgrade() else { return };
                    if let Err(err) = manager.apply(|session| session.splash_elapsed()).await {
                        tracing::warn!(target: "session", "splash transition rejected: {err}");
                    }
                }
            }
        });
    }

    fn spawn_rotation(self: &Arc<Self>) {
        let token = self.timers.arm(TimerKind::Rotation);
        let manager = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(ROTATION_PERIOD);
            // The first interval tick completes immediately.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let Some(manager) = manager.upgrade() else { break };
                        let mut session = manager.session.write().await;
                        if !session.advance_rotation() {
                            // Raced a screen change; the cancel is on its way.
                            break;
                        }
                    }
                }
            }
        });
    }

    fn spawn_scan_dwell(self: &Arc<Self>, job: JobId, stage: ScanStage) {
        let Some(dwell) = stage.dwell() else {
            tracing::warn!(target: "session", ?stage, "stage without dwell scheduled");
            return;
        };
        // Each dwell is armed only after the previous transition ran, so
        // the stage sequence is strictly sequential.
        let token = self.timers.arm(TimerKind::ScanStage);
        let manager = Arc::downgrade(self);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(dwell) => {
                    let Some(manager) = manager.upgrade() else { return };
                    if let Err(err) = manager.apply(|session| session.scan_stage_elapsed(job)).await {
                        tracing::warn!(target: "session", "scan stage transition rejected: {err}");
                    }
                }
            }
        });
    }

    fn spawn_analysis(self: &Arc<Self>, job: JobId, image: EncodedImage) {
        let client = Arc::clone(&self.analysis_client);
        let manager = Arc::downgrade(self);
        tokio::spawn(async move {
            let outcome = client.analyze(&image).await;
            let Some(manager) = manager.upgrade() else { return };
            let merged = match outcome {
                Ok(result) => {
                    manager
                        .apply(move |session| session.analysis_completed(job, result))
                        .await
                }
                Err(err) => {
                    tracing::warn!(target: "gemini", "analysis failed: {err}");
                    manager
                        .apply(move |session| session.analysis_failed(job, err.user_message()))
                        .await
                }
            };
            if let Err(err) = merged {
                tracing::warn!(target: "session", "analysis resolution rejected: {err}");
            }
        });
    }

    fn spawn_transformation(
        self: &Arc<Self>,
        job: JobId,
        image: EncodedImage,
        style_title: String,
        category_label: String,
    ) {
        let client = Arc::clone(&self.transformation_client);
        let manager = Arc::downgrade(self);
        tokio::spawn(async move {
            let outcome = client
                .transform(&image, &style_title, &category_label)
                .await;
            let Some(manager) = manager.upgrade() else { return };
            let merged = match outcome {
                Ok(result) => {
                    manager
                        .apply(move |session| session.try_on_completed(job, result))
                        .await
                }
                Err(err) => {
                    tracing::warn!(target: "gemini", "transformation failed: {err}");
                    manager
                        .apply(move |session| session.try_on_failed(job, err.user_message()))
                        .await
                }
            };
            if let Err(err) = merged {
                tracing::warn!(target: "session", "try-on resolution rejected: {err}");
            }
        });
    }

    /// Presents the native share surface; unavailability or a genuine
    /// failure opens the in-app share sheet. Cancellation does neither.
    async fn present_share(self: &Arc<Self>, payload: SharePayload) {
        let fallback = match self.native_share.share(&payload).await {
            Ok(ShareOutcome::Completed) | Ok(ShareOutcome::Cancelled) => false,
            Ok(ShareOutcome::Unavailable) => true,
            Err(err) => {
                tracing::warn!(target: "share", "native share failed: {err}");
                true
            }
        };
        if fallback {
            // The fallback transition emits no further effects.
            let mut session = self.session.write().await;
            if let Err(err) = session.share_fell_back(payload) {
                tracing::warn!(target: "session", "share fallback rejected: {err}");
            }
        }
    }

    // ========================================================================
    // Startup and authentication
    // ========================================================================

    /// Boots the session: shows the splash screen and arms its timer.
    pub async fn start(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.boot()).await
    }

    pub async fn show_signup(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.show_signup()).await
    }

    pub async fn show_login(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.show_login()).await
    }

    pub async fn sign_in(self: &Arc<Self>, email: &str, password: &str) -> Result<()> {
        self.authenticator.sign_in(email, password).await?;
        self.apply(|session| session.authenticated()).await
    }

    pub async fn sign_up(
        self: &Arc<Self>,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<()> {
        self.authenticator.sign_up(full_name, email, password).await?;
        self.apply(|session| session.authenticated()).await
    }

    pub async fn social_sign_in(self: &Arc<Self>, provider: SocialProvider) -> Result<()> {
        self.authenticator.social_sign_in(provider).await?;
        self.apply(|session| session.authenticated()).await
    }

    pub async fn forgot_password(self: &Arc<Self>, email: &str) -> Result<()> {
        self.authenticator.request_password_reset(email).await?;
        self.apply(|session| session.password_reset_requested()).await
    }

    pub async fn sign_out(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.sign_out()).await
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub async fn select_screen(self: &Arc<Self>, screen: Screen) -> Result<()> {
        self.apply(move |session| session.select_screen(screen)).await
    }

    /// The nav-bar Analysis entry: resets a completed job for a fresh scan.
    pub async fn reopen_analysis(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.reopen_analysis()).await
    }

    // ========================================================================
    // Capture
    // ========================================================================

    /// Enters capture mode and acquires the camera.
    ///
    /// Permission denial or a device error exits capture mode again with no
    /// other state change; the caller sees `Ok`.
    pub async fn begin_capture(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.begin_capture()).await?;
        if let Err(err) = self.capture_provider.start_stream().await {
            tracing::warn!(target: "capture", "camera unavailable: {err}");
            self.apply(|session| session.cancel_capture()).await?;
        }
        Ok(())
    }

    /// Snapshots the stream and hands the image to the state machine.
    /// The stream is released on success and on failure alike.
    pub async fn take_snapshot(self: &Arc<Self>) -> Result<()> {
        match self.capture_provider.snapshot().await {
            Ok(image) => self.apply(move |session| session.media_selected(image)).await,
            Err(err) => {
                tracing::warn!(target: "capture", "snapshot failed: {err}");
                self.apply(|session| session.cancel_capture()).await
            }
        }
    }

    /// Leaves capture mode without taking a photo.
    pub async fn cancel_capture(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.cancel_capture()).await
    }

    /// The gallery path: a picked file already read into the shared
    /// encoded-image representation.
    pub async fn import_photo(self: &Arc<Self>, image: EncodedImage) -> Result<()> {
        self.apply(move |session| session.media_selected(image)).await
    }

    // ========================================================================
    // Analysis
    // ========================================================================

    pub async fn retake(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.retake()).await
    }

    /// Confirms the preview (or retries after an error) and starts the
    /// scan-stage sequence.
    pub async fn start_analysis(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.start_analysis()).await
    }

    // ========================================================================
    // Category selection
    // ========================================================================

    pub async fn select_category(self: &Arc<Self>, category: Category) -> Result<()> {
        self.apply(move |session| session.select_category(category)).await
    }

    pub async fn select_sub_category(self: &Arc<Self>, sub: SubCategory) -> Result<()> {
        self.apply(move |session| session.select_sub_category(sub)).await
    }

    // ========================================================================
    // Try-on
    // ========================================================================

    pub async fn start_try_on(self: &Arc<Self>, style: Recommendation) -> Result<()> {
        self.apply(move |session| session.start_try_on(style)).await
    }

    pub async fn back_to_selection(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.back_to_selection()).await
    }

    pub async fn reset_try_on(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.reset_try_on()).await
    }

    pub async fn enter_full_view(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.enter_full_view()).await
    }

    pub async fn exit_full_view(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.exit_full_view()).await
    }

    // ========================================================================
    // Sharing and overlays
    // ========================================================================

    /// Shares the current look via the native surface, falling back to the
    /// in-app share sheet.
    pub async fn share_current_look(self: &Arc<Self>) -> Result<()> {
        let link = self.share_link.clone();
        self.apply(move |session| session.request_share(link)).await
    }

    pub async fn open_shop(self: &Arc<Self>, style: Recommendation) -> Result<()> {
        self.apply(move |session| session.open_shop(style)).await
    }

    pub async fn open_nearby(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.open_nearby()).await
    }

    pub async fn open_booking_form(self: &Arc<Self>, service: NearbyService) -> Result<()> {
        self.apply(move |session| session.open_booking_form(service)).await
    }

    /// Submits the booking form through the simulated gateway and shows
    /// the confirmation.
    pub async fn submit_booking(self: &Arc<Self>, request: BookingRequest) -> Result<()> {
        let service = {
            let session = self.session.read().await;
            match session.overlay() {
                Some(Overlay::BookingForm { service }) => service.clone(),
                _ => {
                    return Err(GlowupError::invalid_transition(
                        "no_booking_form",
                        "submit_booking",
                    ));
                }
            }
        };
        self.booking.submit(&service, &request).await?;
        self.apply(|session| session.booking_confirmed()).await
    }

    pub async fn dismiss_booking_confirmation(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.dismiss_booking_confirmation()).await
    }

    pub async fn close_overlay(self: &Arc<Self>) -> Result<()> {
        self.apply(|session| session.close_overlay()).await
    }
}
