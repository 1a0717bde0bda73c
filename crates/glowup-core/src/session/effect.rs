//! Effects: the command vocabulary emitted by session transitions.
//!
//! The state machine never performs I/O itself. Every transition returns
//! the effects the application layer must carry out — timers to start or
//! cancel, remote calls to issue, surfaces to present.

use serde::{Deserialize, Serialize};

use crate::image::EncodedImage;
use crate::session::job::JobId;
use crate::session::scan::ScanStage;
use crate::session::share::SharePayload;

/// A side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Effect {
    /// Arm the one-shot splash timer.
    StartSplashTimer,
    /// Start the Home background rotation interval.
    StartRotation,
    /// Cancel the Home background rotation interval.
    StopRotation,
    /// Release the camera stream.
    StopCaptureStream,
    /// Arm the dwell timer for the given scan stage.
    ScheduleScanStage { job: JobId, stage: ScanStage },
    /// Issue the remote analysis call.
    RequestAnalysis { job: JobId, image: EncodedImage },
    /// Issue the remote transformation call.
    RequestTransformation {
        job: JobId,
        image: EncodedImage,
        style_title: String,
        category_label: String,
    },
    /// Present the platform's native share surface.
    PresentShare { payload: SharePayload },
    /// Queue a user-visible notice.
    Notify { notice: Notice },
}

/// A transient user-visible notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Notice {
    /// A try-on attempt failed; the selection was cleared.
    TryOnFailed { message: String },
    /// Password-reset instructions were "sent" (simulated).
    PasswordResetSent,
}
