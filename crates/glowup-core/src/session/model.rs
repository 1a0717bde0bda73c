//! The session root model and its transitions.
//!
//! `Session` is the single owner of all mutable state: authentication
//! stage, active screen, capture, analysis job, category selection, try-on,
//! and overlay. Every user action and every asynchronous completion is a
//! transition method; transitions check the current state, mutate, and
//! return the [`Effect`]s the application layer must carry out.
//!
//! Timer-driven and remote completions (`advance_rotation`,
//! `scan_stage_elapsed`, `analysis_completed`, `analysis_failed`,
//! `try_on_completed`, `try_on_failed`) silently ignore events that target
//! a superseded job or a state that moved on; user-initiated transitions
//! that the current state forbids are typed errors instead.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::{Recommendation, StyleAnalysis};
use crate::catalog::{Category, Gender, SubCategory};
use crate::error::{GlowupError, Result};
use crate::image::EncodedImage;
use crate::session::auth::AuthStage;
use crate::session::background::HOME_BACKGROUNDS;
use crate::session::effect::{Effect, Notice};
use crate::session::job::{AnalysisJob, AnalysisStatus, JobId};
use crate::session::overlay::Overlay;
use crate::session::screen::Screen;
use crate::session::share::SharePayload;
use crate::session::try_on::{TryOn, TryOnState};

/// How long the splash screen is shown before the login screen.
pub const SPLASH_DELAY: Duration = Duration::from_millis(2500);

/// Share-sheet title for the current look.
const SHARE_TITLE: &str = "My GlowUp Look";

/// The root of all mutable session state. Torn down with the process;
/// nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    auth_stage: AuthStage,
    active_screen: Screen,
    capturing: bool,
    full_view: bool,
    rotation_index: usize,
    capture: Option<EncodedImage>,
    displayed_image: Option<EncodedImage>,
    active_category: Category,
    active_sub_category: SubCategory,
    overlay: Option<Overlay>,
    analysis: AnalysisJob,
    try_on: TryOn,
}

impl Session {
    /// A fresh session at the splash stage.
    pub fn new() -> Self {
        Self {
            auth_stage: AuthStage::Splash,
            active_screen: Screen::Home,
            capturing: false,
            full_view: false,
            rotation_index: 0,
            capture: None,
            displayed_image: None,
            active_category: Category::Hair,
            active_sub_category: Category::Hair.default_sub(None),
            overlay: None,
            analysis: AnalysisJob::new(),
            try_on: TryOn::new(),
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn auth_stage(&self) -> AuthStage {
        self.auth_stage
    }

    pub fn active_screen(&self) -> Screen {
        self.active_screen
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn full_view(&self) -> bool {
        self.full_view
    }

    pub fn rotation_index(&self) -> usize {
        self.rotation_index
    }

    /// The user-supplied photo; cleared on retake.
    pub fn capture(&self) -> Option<&EncodedImage> {
        self.capture.as_ref()
    }

    /// The image currently shown: the capture, or the most recent
    /// successful transformation result.
    pub fn displayed_image(&self) -> Option<&EncodedImage> {
        self.displayed_image.as_ref()
    }

    pub fn active_category(&self) -> Category {
        self.active_category
    }

    pub fn active_sub_category(&self) -> SubCategory {
        self.active_sub_category
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn analysis(&self) -> &AnalysisJob {
        &self.analysis
    }

    pub fn try_on(&self) -> &TryOn {
        &self.try_on
    }

    /// The gender classification of the current analysis result, if any.
    pub fn detected_gender(&self) -> Option<Gender> {
        self.analysis.result().map(StyleAnalysis::gender)
    }

    /// Navigation categories for the detected gender.
    pub fn visible_categories(&self) -> Vec<Category> {
        Category::visible_categories(self.detected_gender())
    }

    /// Sub-category options of the active category for the detected gender.
    pub fn sub_options(&self) -> Vec<SubCategory> {
        self.active_category.sub_options(self.detected_gender())
    }

    /// Recommendations for the active category/sub-category slot.
    pub fn active_recommendations(&self) -> &[Recommendation] {
        self.analysis
            .result()
            .map(|result| result.recommendations.for_slot(self.active_sub_category))
            .unwrap_or_default()
    }

    // ========================================================================
    // Startup and authentication
    // ========================================================================

    /// Arms the splash timer. Called once at startup.
    pub fn boot(&mut self) -> Result<Vec<Effect>> {
        if self.auth_stage != AuthStage::Splash {
            return Err(self.invalid("boot"));
        }
        Ok(vec![Effect::StartSplashTimer])
    }

    /// The splash delay elapsed; move on to the login screen.
    pub fn splash_elapsed(&mut self) -> Result<Vec<Effect>> {
        if self.auth_stage != AuthStage::Splash {
            return Err(self.invalid("splash_elapsed"));
        }
        self.auth_stage = AuthStage::Login;
        Ok(vec![])
    }

    /// Switch the auth screen to sign-up.
    pub fn show_signup(&mut self) -> Result<Vec<Effect>> {
        if self.auth_stage != AuthStage::Login {
            return Err(self.invalid("show_signup"));
        }
        self.auth_stage = AuthStage::Signup;
        Ok(vec![])
    }

    /// Switch the auth screen back to login.
    pub fn show_login(&mut self) -> Result<Vec<Effect>> {
        if self.auth_stage != AuthStage::Signup {
            return Err(self.invalid("show_login"));
        }
        self.auth_stage = AuthStage::Login;
        Ok(vec![])
    }

    /// Authentication succeeded (all auth paths are success stubs).
    pub fn authenticated(&mut self) -> Result<Vec<Effect>> {
        match self.auth_stage {
            AuthStage::Login | AuthStage::Signup => {}
            _ => return Err(self.invalid("authenticated")),
        }
        let was_rotating = self.rotation_active();
        self.auth_stage = AuthStage::Authenticated;
        Ok(self.rotation_effects(was_rotating))
    }

    /// Password-reset instructions were "sent" (simulated, login screen
    /// only). A terminal-success stub like the other auth paths: the user
    /// is granted access immediately, no verification happens.
    pub fn password_reset_requested(&mut self) -> Result<Vec<Effect>> {
        if self.auth_stage != AuthStage::Login {
            return Err(self.invalid("password_reset_requested"));
        }
        let was_rotating = self.rotation_active();
        self.auth_stage = AuthStage::Authenticated;
        let mut effects = vec![Effect::Notify {
            notice: Notice::PasswordResetSent,
        }];
        effects.extend(self.rotation_effects(was_rotating));
        Ok(effects)
    }

    /// Sign out, returning to the login screen.
    ///
    /// Session contents (analysis, images) are kept; the product restores
    /// the previous view after re-authentication.
    pub fn sign_out(&mut self) -> Result<Vec<Effect>> {
        self.require_authenticated("sign_out")?;
        let was_rotating = self.rotation_active();
        self.auth_stage = AuthStage::Login;
        self.overlay = None;
        Ok(self.rotation_effects(was_rotating))
    }

    // ========================================================================
    // Navigation and Home rotation
    // ========================================================================

    /// Navigate to a screen.
    pub fn select_screen(&mut self, screen: Screen) -> Result<Vec<Effect>> {
        self.require_authenticated("select_screen")?;
        if self.capturing {
            return Err(self.invalid("select_screen"));
        }
        let was_rotating = self.rotation_active();
        self.active_screen = screen;
        Ok(self.rotation_effects(was_rotating))
    }

    /// The nav-bar Analysis button: navigates to the analysis screen and,
    /// when a completed result is showing, resets the job so the user gets
    /// a fresh scan entry point.
    pub fn reopen_analysis(&mut self) -> Result<Vec<Effect>> {
        self.require_authenticated("reopen_analysis")?;
        if self.capturing {
            return Err(self.invalid("reopen_analysis"));
        }
        if self.analysis.status() == AnalysisStatus::Completed {
            self.analysis.reset();
            self.capture = None;
        }
        self.select_screen(Screen::Analysis)
    }

    /// A rotation interval tick. Returns whether it was applied; ticks that
    /// race a screen change are ignored.
    pub fn advance_rotation(&mut self) -> bool {
        if !self.rotation_active() {
            return false;
        }
        self.rotation_index = (self.rotation_index + 1) % HOME_BACKGROUNDS.len();
        true
    }

    fn rotation_active(&self) -> bool {
        self.auth_stage == AuthStage::Authenticated
            && self.active_screen == Screen::Home
            && !self.capturing
    }

    /// Emits Start/StopRotation exactly when the desired timer state changed.
    fn rotation_effects(&self, was_rotating: bool) -> Vec<Effect> {
        let rotating = self.rotation_active();
        if rotating == was_rotating {
            vec![]
        } else if rotating {
            vec![Effect::StartRotation]
        } else {
            vec![Effect::StopRotation]
        }
    }

    // ========================================================================
    // Capture
    // ========================================================================

    /// Enter capture mode, suspending navigation and the Home rotation.
    pub fn begin_capture(&mut self) -> Result<Vec<Effect>> {
        self.require_authenticated("begin_capture")?;
        if self.capturing {
            return Err(self.invalid("begin_capture"));
        }
        let was_rotating = self.rotation_active();
        self.capturing = true;
        Ok(self.rotation_effects(was_rotating))
    }

    /// Leave capture mode with no state change (denied permission, device
    /// error, or user cancel).
    pub fn cancel_capture(&mut self) -> Result<Vec<Effect>> {
        if !self.capturing {
            return Err(self.invalid("cancel_capture"));
        }
        let was_rotating = self.rotation_active();
        self.capturing = false;
        let mut effects = vec![Effect::StopCaptureStream];
        effects.extend(self.rotation_effects(was_rotating));
        Ok(effects)
    }

    /// A photo arrived — from the camera or from file selection; both paths
    /// hand over the same [`EncodedImage`] representation.
    ///
    /// Enters Previewing on the analysis screen. Any previous try-on is
    /// discarded with its selection.
    pub fn media_selected(&mut self, image: EncodedImage) -> Result<Vec<Effect>> {
        self.require_authenticated("media_selected")?;
        self.analysis.begin_preview(image.clone())?;
        let was_rotating = self.rotation_active();
        let was_capturing = self.capturing;
        self.capture = Some(image.clone());
        self.displayed_image = Some(image);
        self.try_on.reset();
        self.full_view = false;
        self.capturing = false;
        self.active_screen = Screen::Analysis;
        let mut effects = Vec::new();
        if was_capturing {
            effects.push(Effect::StopCaptureStream);
        }
        effects.extend(self.rotation_effects(was_rotating));
        Ok(effects)
    }

    /// Retake: back to Idle, clearing the captured and displayed images.
    pub fn retake(&mut self) -> Result<Vec<Effect>> {
        match self.analysis.status() {
            AnalysisStatus::Idle | AnalysisStatus::Previewing | AnalysisStatus::Error => {}
            _ => return Err(self.invalid("retake")),
        }
        self.analysis.reset();
        self.capture = None;
        self.displayed_image = None;
        self.try_on.reset();
        self.full_view = false;
        Ok(vec![])
    }

    // ========================================================================
    // Analysis lifecycle
    // ========================================================================

    /// The user confirmed the preview (or retries after an error): start
    /// the scan sequence at its first stage.
    pub fn start_analysis(&mut self) -> Result<Vec<Effect>> {
        self.require_authenticated("start_analysis")?;
        let stage = self.analysis.begin_scan()?;
        Ok(vec![Effect::ScheduleScanStage {
            job: self.analysis.id(),
            stage,
        }])
    }

    /// A scan-stage dwell timer expired.
    ///
    /// Advances to the next stage; entering the final stage issues the
    /// remote analysis call. Stale expirations are ignored.
    pub fn scan_stage_elapsed(&mut self, job: JobId) -> Result<Vec<Effect>> {
        let Some(stage) = self.analysis.advance_scan_stage(job) else {
            return Ok(vec![]);
        };
        if stage.dwell().is_some() {
            return Ok(vec![Effect::ScheduleScanStage { job, stage }]);
        }
        // Final stage: the remote call resolves it. The source image is
        // guaranteed present while scanning.
        let image = self
            .analysis
            .source_image()
            .cloned()
            .ok_or_else(|| GlowupError::internal("Scanning job has no source image"))?;
        Ok(vec![Effect::RequestAnalysis { job, image }])
    }

    /// The remote analysis resolved successfully.
    ///
    /// Ignored when it targets a superseded job. On merge, the category and
    /// sub-category selections are re-validated against the detected gender.
    pub fn analysis_completed(&mut self, job: JobId, result: StyleAnalysis) -> Result<Vec<Effect>> {
        if !self.analysis.complete(job, result) {
            return Ok(vec![]);
        }
        self.refresh_category_selection();
        Ok(vec![])
    }

    /// The remote analysis failed.
    pub fn analysis_failed(&mut self, job: JobId, message: impl Into<String>) -> Result<Vec<Effect>> {
        self.analysis.fail(job, message);
        Ok(vec![])
    }

    // ========================================================================
    // Category selection
    // ========================================================================

    /// Change the active category; the sub-category resets to the first
    /// valid, gender-filtered option. Hidden categories are rejected.
    pub fn select_category(&mut self, category: Category) -> Result<Vec<Effect>> {
        self.require_authenticated("select_category")?;
        if self.try_on.state() == TryOnState::Scanning {
            return Err(self.invalid("select_category"));
        }
        let gender = self.detected_gender();
        if !category.visible_for(gender) {
            return Err(GlowupError::invalid_transition(
                "hidden_category",
                "select_category",
            ));
        }
        self.active_category = category;
        self.active_sub_category = category.default_sub(gender);
        self.try_on.back_to_selection()?;
        Ok(vec![])
    }

    /// Change the active sub-category within the active category.
    pub fn select_sub_category(&mut self, sub: SubCategory) -> Result<Vec<Effect>> {
        self.require_authenticated("select_sub_category")?;
        if !self.sub_options().contains(&sub) {
            return Err(GlowupError::invalid_transition(
                "hidden_sub_category",
                "select_sub_category",
            ));
        }
        self.active_sub_category = sub;
        Ok(vec![])
    }

    /// Re-validates the active selections after the analysis result (and
    /// with it the detected gender) changed.
    fn refresh_category_selection(&mut self) {
        let gender = self.detected_gender();
        if !self.active_category.visible_for(gender) {
            self.active_category = Category::Hair;
        }
        let options = self.active_category.sub_options(gender);
        if !options.contains(&self.active_sub_category) {
            self.active_sub_category = self.active_category.default_sub(gender);
        }
    }

    // ========================================================================
    // Try-on lifecycle
    // ========================================================================

    /// The user selected a recommendation to try on.
    ///
    /// Requires a completed analysis; single-outstanding is enforced. The
    /// transformation is keyed by the original capture (not the displayed
    /// image), the style title, and the category label.
    pub fn start_try_on(&mut self, style: Recommendation) -> Result<Vec<Effect>> {
        self.require_authenticated("start_try_on")?;
        if self.analysis.status() != AnalysisStatus::Completed {
            return Err(GlowupError::invalid_transition(
                self.analysis.status().name(),
                "start_try_on",
            ));
        }
        let image = self
            .capture
            .clone()
            .ok_or_else(|| GlowupError::invalid_transition("no_capture", "start_try_on"))?;
        let style_title = style.title.clone();
        let job = self.try_on.begin(style)?;
        let category_label = self
            .active_category
            .transformation_label(self.active_sub_category);
        Ok(vec![Effect::RequestTransformation {
            job,
            image,
            style_title,
            category_label,
        }])
    }

    /// The remote transformation resolved with an image: show it.
    pub fn try_on_completed(&mut self, job: JobId, image: EncodedImage) -> Result<Vec<Effect>> {
        if self.try_on.complete(job) {
            self.displayed_image = Some(image);
        }
        Ok(vec![])
    }

    /// The remote transformation failed: revert to Idle, clear the
    /// selection, and queue a user-visible notice. The displayed image is
    /// untouched.
    pub fn try_on_failed(&mut self, job: JobId, message: impl Into<String>) -> Result<Vec<Effect>> {
        if !self.try_on.fail(job) {
            return Ok(vec![]);
        }
        Ok(vec![Effect::Notify {
            notice: Notice::TryOnFailed {
                message: message.into(),
            },
        }])
    }

    /// Back from the applied view to the recommendation rail, keeping the
    /// transformed image on display.
    pub fn back_to_selection(&mut self) -> Result<Vec<Effect>> {
        self.try_on.back_to_selection()?;
        self.full_view = false;
        Ok(vec![])
    }

    /// Full try-on reset: selection cleared and the displayed image
    /// restored to the original capture.
    pub fn reset_try_on(&mut self) -> Result<Vec<Effect>> {
        self.require_authenticated("reset_try_on")?;
        self.try_on.reset();
        self.displayed_image = self.capture.clone();
        self.full_view = false;
        Ok(vec![])
    }

    /// Enter the distraction-free full view of the displayed image.
    pub fn enter_full_view(&mut self) -> Result<Vec<Effect>> {
        self.require_authenticated("enter_full_view")?;
        self.full_view = true;
        Ok(vec![])
    }

    pub fn exit_full_view(&mut self) -> Result<Vec<Effect>> {
        self.full_view = false;
        Ok(vec![])
    }

    // ========================================================================
    // Sharing
    // ========================================================================

    /// Request the platform's native share surface for the current look.
    pub fn request_share(&mut self, link: impl Into<String>) -> Result<Vec<Effect>> {
        self.require_authenticated("request_share")?;
        if self.displayed_image.is_none() {
            return Err(GlowupError::invalid_transition("no_image", "request_share"));
        }
        let style = self
            .try_on
            .target()
            .map(|t| t.title.clone())
            .unwrap_or_else(|| "style".to_string());
        Ok(vec![Effect::PresentShare {
            payload: SharePayload {
                title: SHARE_TITLE.to_string(),
                text: format!("Check out my new {style} look on GlowUp!"),
                link: link.into(),
            },
        }])
    }

    /// The native surface was unavailable or errored (user cancellation is
    /// not an error and does not land here): open the in-app share sheet.
    pub fn share_fell_back(&mut self, payload: SharePayload) -> Result<Vec<Effect>> {
        self.require_authenticated("share_fell_back")?;
        self.overlay = Some(Overlay::ShareSheet { payload });
        Ok(vec![])
    }

    // ========================================================================
    // Overlays: shop, nearby, booking
    // ========================================================================

    /// Open the shop overlay for a recommendation.
    pub fn open_shop(&mut self, style: Recommendation) -> Result<Vec<Effect>> {
        self.require_authenticated("open_shop")?;
        self.overlay = Some(Overlay::Shop { style });
        Ok(vec![])
    }

    /// Open the nearby-services overlay.
    pub fn open_nearby(&mut self) -> Result<Vec<Effect>> {
        self.require_authenticated("open_nearby")?;
        self.overlay = Some(Overlay::Nearby);
        Ok(vec![])
    }

    /// Open the booking form for a service picked from the nearby list.
    /// Replaces the nearby overlay (one overlay at a time).
    pub fn open_booking_form(&mut self, service: crate::session::commerce::NearbyService) -> Result<Vec<Effect>> {
        match self.overlay {
            Some(Overlay::Nearby) => {}
            _ => return Err(self.invalid("open_booking_form")),
        }
        self.overlay = Some(Overlay::BookingForm { service });
        Ok(vec![])
    }

    /// The (simulated) booking submission succeeded.
    pub fn booking_confirmed(&mut self) -> Result<Vec<Effect>> {
        let service = match self.overlay.take() {
            Some(Overlay::BookingForm { service }) => service,
            other => {
                self.overlay = other;
                return Err(self.invalid("booking_confirmed"));
            }
        };
        self.overlay = Some(Overlay::BookingConfirmed { service });
        Ok(vec![])
    }

    /// Dismiss the booking confirmation, returning to the detail screen.
    pub fn dismiss_booking_confirmation(&mut self) -> Result<Vec<Effect>> {
        match self.overlay {
            Some(Overlay::BookingConfirmed { .. }) => {
                self.overlay = None;
                Ok(vec![])
            }
            _ => Err(self.invalid("dismiss_booking_confirmation")),
        }
    }

    /// Close whatever overlay is open.
    pub fn close_overlay(&mut self) -> Result<Vec<Effect>> {
        self.overlay = None;
        Ok(vec![])
    }

    // ========================================================================
    // Guards
    // ========================================================================

    fn require_authenticated(&self, action: &'static str) -> Result<()> {
        if self.auth_stage != AuthStage::Authenticated {
            return Err(GlowupError::invalid_transition(
                self.auth_stage_name(),
                action,
            ));
        }
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> GlowupError {
        GlowupError::invalid_transition(self.auth_stage_name(), action)
    }

    fn auth_stage_name(&self) -> &'static str {
        match self.auth_stage {
            AuthStage::Splash => "Splash",
            AuthStage::Login => "Login",
            AuthStage::Signup => "Signup",
            AuthStage::Authenticated => "Authenticated",
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
