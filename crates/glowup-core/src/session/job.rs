//! The analysis job lifecycle.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::StyleAnalysis;
use crate::error::{GlowupError, Result};
use crate::image::EncodedImage;
use crate::session::scan::ScanStage;

/// Identity of one in-flight remote request.
///
/// A fresh id is issued every time a job (re)starts, so a resolution that
/// arrives after the job was superseded can be recognized and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle status of an [`AnalysisJob`].
///
/// Progression is linear: Idle → Previewing → Scanning → {Completed, Error}.
/// Completed and Error both permit return to Idle only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Idle,
    Previewing,
    Scanning,
    Completed,
    Error,
}

impl AnalysisStatus {
    /// Short name for transition-error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Previewing => "Previewing",
            Self::Scanning => "Scanning",
            Self::Completed => "Completed",
            Self::Error => "Error",
        }
    }
}

/// One run of the remote analysis, owned by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisJob {
    id: JobId,
    status: AnalysisStatus,
    source_image: Option<EncodedImage>,
    scan_stage: Option<ScanStage>,
    result: Option<StyleAnalysis>,
    error: Option<String>,
}

impl AnalysisJob {
    pub fn new() -> Self {
        Self {
            id: JobId::new(),
            status: AnalysisStatus::Idle,
            source_image: None,
            scan_stage: None,
            result: None,
            error: None,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    /// The image submitted for analysis; immutable once scanning begins.
    pub fn source_image(&self) -> Option<&EncodedImage> {
        self.source_image.as_ref()
    }

    /// The scanning stage, present iff status is Scanning.
    pub fn scan_stage(&self) -> Option<ScanStage> {
        self.scan_stage
    }

    /// The analysis result, present iff status is Completed.
    pub fn result(&self) -> Option<&StyleAnalysis> {
        self.result.as_ref()
    }

    /// The failure message, present iff status is Error.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Accepts a freshly captured image and enters Previewing.
    ///
    /// Legal from every status except Scanning; any previous result or
    /// error is discarded and a fresh job id is issued.
    pub fn begin_preview(&mut self, image: EncodedImage) -> Result<()> {
        if self.status == AnalysisStatus::Scanning {
            return Err(GlowupError::invalid_transition(
                self.status.name(),
                "begin_preview",
            ));
        }
        self.id = JobId::new();
        self.status = AnalysisStatus::Previewing;
        self.source_image = Some(image);
        self.scan_stage = None;
        self.result = None;
        self.error = None;
        Ok(())
    }

    /// Starts the scan sequence from Previewing, or retries from Error.
    ///
    /// A fresh job id is issued so a late resolution of an earlier attempt
    /// cannot be merged into this one.
    ///
    /// # Errors
    ///
    /// Invalid from Idle, Scanning and Completed, or when no image is held.
    pub fn begin_scan(&mut self) -> Result<ScanStage> {
        match self.status {
            AnalysisStatus::Previewing | AnalysisStatus::Error => {}
            _ => {
                return Err(GlowupError::invalid_transition(
                    self.status.name(),
                    "begin_scan",
                ));
            }
        }
        if self.source_image.is_none() {
            return Err(GlowupError::invalid_transition("Previewing", "begin_scan"));
        }
        self.id = JobId::new();
        self.status = AnalysisStatus::Scanning;
        self.scan_stage = Some(ScanStage::first());
        self.error = None;
        Ok(ScanStage::first())
    }

    /// Advances to the next scan stage after a dwell timer expires.
    ///
    /// Returns the new stage, or `None` when the event is stale (job
    /// superseded or no longer scanning) and was ignored.
    pub fn advance_scan_stage(&mut self, job: JobId) -> Option<ScanStage> {
        if job != self.id || self.status != AnalysisStatus::Scanning {
            return None;
        }
        let next = self.scan_stage.and_then(ScanStage::next)?;
        self.scan_stage = Some(next);
        Some(next)
    }

    /// Merges a successful analysis resolution.
    ///
    /// The result is attached atomically. Returns `false` when the
    /// resolution targets a superseded job and was ignored.
    pub fn complete(&mut self, job: JobId, result: StyleAnalysis) -> bool {
        if job != self.id || self.status != AnalysisStatus::Scanning {
            return false;
        }
        self.status = AnalysisStatus::Completed;
        self.scan_stage = None;
        self.result = Some(result);
        self.error = None;
        true
    }

    /// Merges a failed analysis resolution.
    ///
    /// Returns `false` when the resolution targets a superseded job.
    pub fn fail(&mut self, job: JobId, message: impl Into<String>) -> bool {
        if job != self.id || self.status != AnalysisStatus::Scanning {
            return false;
        }
        self.status = AnalysisStatus::Error;
        self.scan_stage = None;
        self.result = None;
        self.error = Some(message.into());
        true
    }

    /// Returns to Idle, clearing the image and any result or error.
    ///
    /// Also issues a fresh id, orphaning any resolution still in flight.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for AnalysisJob {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> EncodedImage {
        EncodedImage::from_bytes("image/jpeg", b"selfie").unwrap()
    }

    fn analysis_fixture() -> StyleAnalysis {
        use crate::analysis::*;
        use crate::catalog::{Category, Gender};
        let mut recommendations = RecommendationSet::new();
        for category in Category::visible_categories(Some(Gender::Male)) {
            for sub in category.sub_options(Some(Gender::Male)) {
                recommendations.insert(
                    sub,
                    vec![Recommendation {
                        title: "Fade".to_string(),
                        description: "Clean".to_string(),
                        tags: vec![],
                        badge: None,
                    }],
                );
            }
        }
        StyleAnalysis {
            vibe: "Sharp".to_string(),
            face_shape: "Oval".to_string(),
            body_type: "Mesomorph".to_string(),
            color_palette: ColorPalette {
                primary: "Navy".to_string(),
                secondary: "Grey".to_string(),
                accent: "Teal".to_string(),
                shades: vec![],
            },
            skin_health: SkinHealth {
                overall_health: "Good".to_string(),
                oiliness: "20".to_string(),
                spots: "10".to_string(),
                wrinkles: "5".to_string(),
                dark_circles: "15".to_string(),
                health_score: 85,
            },
            physical_attributes: PhysicalAttributes {
                estimated_age: "28".to_string(),
                skin_color: "Tan".to_string(),
                eye_color: "Brown".to_string(),
                hair_color: "Black".to_string(),
                gender: Gender::Male,
                height: "5'10''".to_string(),
                weight: "160 lbs".to_string(),
            },
            recommendations,
            occasion_tips: vec![],
        }
    }

    #[test]
    fn test_linear_progression() {
        let mut job = AnalysisJob::new();
        assert_eq!(job.status(), AnalysisStatus::Idle);

        job.begin_preview(image()).unwrap();
        assert_eq!(job.status(), AnalysisStatus::Previewing);

        let stage = job.begin_scan().unwrap();
        assert_eq!(stage, ScanStage::Mapping);
        assert_eq!(job.status(), AnalysisStatus::Scanning);

        let id = job.id();
        assert_eq!(job.advance_scan_stage(id), Some(ScanStage::Face));
        assert_eq!(job.advance_scan_stage(id), Some(ScanStage::Pigmentation));
        assert_eq!(job.advance_scan_stage(id), Some(ScanStage::Analyzing));
        assert_eq!(job.advance_scan_stage(id), None);

        assert!(job.complete(id, analysis_fixture()));
        assert_eq!(job.status(), AnalysisStatus::Completed);
        assert!(job.result().is_some());
        assert!(job.error().is_none());
    }

    #[test]
    fn test_no_direct_rescan_from_completed() {
        let mut job = AnalysisJob::new();
        job.begin_preview(image()).unwrap();
        let id = {
            job.begin_scan().unwrap();
            job.id()
        };
        assert!(job.complete(id, analysis_fixture()));

        let err = job.begin_scan().unwrap_err();
        assert!(err.is_invalid_transition());

        // Only Idle is reachable next.
        job.reset();
        assert_eq!(job.status(), AnalysisStatus::Idle);
        assert!(job.source_image().is_none());
    }

    #[test]
    fn test_scan_requires_preview() {
        let mut job = AnalysisJob::new();
        assert!(job.begin_scan().unwrap_err().is_invalid_transition());
    }

    #[test]
    fn test_retry_from_error_issues_new_id() {
        let mut job = AnalysisJob::new();
        job.begin_preview(image()).unwrap();
        job.begin_scan().unwrap();
        let first = job.id();
        assert!(job.fail(first, "service unavailable"));
        assert_eq!(job.status(), AnalysisStatus::Error);
        assert_eq!(job.error(), Some("service unavailable"));

        job.begin_scan().unwrap();
        assert_ne!(job.id(), first);

        // The first attempt's late resolution is now ignored.
        assert!(!job.complete(first, analysis_fixture()));
        assert_eq!(job.status(), AnalysisStatus::Scanning);
    }

    #[test]
    fn test_stale_resolution_ignored_after_reset() {
        let mut job = AnalysisJob::new();
        job.begin_preview(image()).unwrap();
        job.begin_scan().unwrap();
        let id = job.id();

        job.reset();
        assert!(!job.complete(id, analysis_fixture()));
        assert!(!job.fail(id, "late"));
        assert_eq!(job.status(), AnalysisStatus::Idle);
    }

    #[test]
    fn test_preview_rejected_while_scanning() {
        let mut job = AnalysisJob::new();
        job.begin_preview(image()).unwrap();
        job.begin_scan().unwrap();
        assert!(job.begin_preview(image()).unwrap_err().is_invalid_transition());
    }
}
