//! The try-on lifecycle.

use serde::{Deserialize, Serialize};

use crate::analysis::Recommendation;
use crate::error::{GlowupError, Result};
use crate::session::job::JobId;

/// State of the try-on feature. One active instance at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TryOnState {
    Idle,
    Scanning,
    Applied,
}

impl TryOnState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Scanning => "Scanning",
            Self::Applied => "Applied",
        }
    }
}

/// The remote image-transformation feature applying a recommendation's
/// style to the capture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TryOn {
    state: TryOnState,
    job: Option<JobId>,
    target: Option<Recommendation>,
}

impl Default for TryOnState {
    fn default() -> Self {
        Self::Idle
    }
}

impl TryOn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TryOnState {
        self.state
    }

    /// The recommendation being (or last) tried on.
    pub fn target(&self) -> Option<&Recommendation> {
        self.target.as_ref()
    }

    /// Starts a try-on for the selected recommendation.
    ///
    /// Single-outstanding: rejected while a transformation is in flight.
    pub fn begin(&mut self, target: Recommendation) -> Result<JobId> {
        if self.state == TryOnState::Scanning {
            return Err(GlowupError::invalid_transition(
                self.state.name(),
                "begin_try_on",
            ));
        }
        let job = JobId::new();
        self.state = TryOnState::Scanning;
        self.job = Some(job);
        self.target = Some(target);
        Ok(job)
    }

    /// Merges a successful transformation resolution.
    ///
    /// Returns `false` when the resolution targets a superseded attempt.
    /// The caller replaces the displayed image on `true`.
    pub fn complete(&mut self, job: JobId) -> bool {
        if self.job != Some(job) || self.state != TryOnState::Scanning {
            return false;
        }
        self.state = TryOnState::Applied;
        self.job = None;
        true
    }

    /// Merges a failed transformation resolution: back to Idle with the
    /// target selection cleared.
    ///
    /// Returns `false` when the resolution targets a superseded attempt.
    pub fn fail(&mut self, job: JobId) -> bool {
        if self.job != Some(job) || self.state != TryOnState::Scanning {
            return false;
        }
        self.state = TryOnState::Idle;
        self.job = None;
        self.target = None;
        true
    }

    /// Returns to the recommendation rail, keeping the target selection.
    ///
    /// The displayed image is owned by the session and deliberately left
    /// alone, so the user keeps viewing the transformed look.
    pub fn back_to_selection(&mut self) -> Result<()> {
        if self.state == TryOnState::Scanning {
            return Err(GlowupError::invalid_transition(
                self.state.name(),
                "back_to_selection",
            ));
        }
        self.state = TryOnState::Idle;
        Ok(())
    }

    /// Full reset: Idle, no target, no pending job.
    ///
    /// Dropping the job id implicitly cancels an in-flight transformation;
    /// its eventual resolution will be ignored.
    pub fn reset(&mut self) {
        self.state = TryOnState::Idle;
        self.job = None;
        self.target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(title: &str) -> Recommendation {
        Recommendation {
            title: title.to_string(),
            description: String::new(),
            tags: vec![],
            badge: None,
        }
    }

    #[test]
    fn test_success_path() {
        let mut try_on = TryOn::new();
        let job = try_on.begin(style("Buzz Cut")).unwrap();
        assert_eq!(try_on.state(), TryOnState::Scanning);

        assert!(try_on.complete(job));
        assert_eq!(try_on.state(), TryOnState::Applied);
        assert_eq!(try_on.target().unwrap().title, "Buzz Cut");
    }

    #[test]
    fn test_failure_clears_target() {
        let mut try_on = TryOn::new();
        let job = try_on.begin(style("Buzz Cut")).unwrap();
        assert!(try_on.fail(job));
        assert_eq!(try_on.state(), TryOnState::Idle);
        assert!(try_on.target().is_none());
    }

    #[test]
    fn test_single_outstanding() {
        let mut try_on = TryOn::new();
        try_on.begin(style("Buzz Cut")).unwrap();
        assert!(try_on.begin(style("Pompadour")).unwrap_err().is_invalid_transition());
    }

    #[test]
    fn test_stale_resolution_ignored_after_reset() {
        let mut try_on = TryOn::new();
        let job = try_on.begin(style("Buzz Cut")).unwrap();
        try_on.reset();
        assert!(!try_on.complete(job));
        assert!(!try_on.fail(job));
        assert_eq!(try_on.state(), TryOnState::Idle);
    }

    #[test]
    fn test_back_to_selection_keeps_target() {
        let mut try_on = TryOn::new();
        let job = try_on.begin(style("Buzz Cut")).unwrap();
        try_on.complete(job);
        try_on.back_to_selection().unwrap();
        assert_eq!(try_on.state(), TryOnState::Idle);
        assert!(try_on.target().is_some());
    }

    #[test]
    fn test_retry_after_applied_is_allowed() {
        let mut try_on = TryOn::new();
        let job = try_on.begin(style("Buzz Cut")).unwrap();
        try_on.complete(job);
        let second = try_on.begin(style("Pompadour")).unwrap();
        assert!(try_on.complete(second));
        assert_eq!(try_on.target().unwrap().title, "Pompadour");
    }
}
