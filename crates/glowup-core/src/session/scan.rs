//! The simulated biometric-scanning stage sequence.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One phase of the scanning animation shown while an analysis runs.
///
/// Stages are strictly ordered. Each of the first three advances on a fixed
/// dwell timer; `Analyzing` has no dwell — it resolves only when the remote
/// analysis call does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStage {
    Mapping,
    Face,
    Pigmentation,
    Analyzing,
}

impl ScanStage {
    /// The stage every scan starts at.
    pub const fn first() -> Self {
        Self::Mapping
    }

    /// How long this stage is displayed before advancing.
    ///
    /// `None` for [`ScanStage::Analyzing`]: the remote call decides.
    pub fn dwell(self) -> Option<Duration> {
        match self {
            Self::Mapping => Some(Duration::from_millis(1500)),
            Self::Face => Some(Duration::from_millis(2000)),
            Self::Pigmentation => Some(Duration::from_millis(2000)),
            Self::Analyzing => None,
        }
    }

    /// The stage that follows this one, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Mapping => Some(Self::Face),
            Self::Face => Some(Self::Pigmentation),
            Self::Pigmentation => Some(Self::Analyzing),
            Self::Analyzing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_has_no_skips_or_repeats() {
        let mut seen = vec![ScanStage::first()];
        while let Some(next) = seen.last().unwrap().next() {
            seen.push(next);
        }
        assert_eq!(
            seen,
            vec![
                ScanStage::Mapping,
                ScanStage::Face,
                ScanStage::Pigmentation,
                ScanStage::Analyzing
            ]
        );
    }

    #[test]
    fn test_only_analyzing_has_no_dwell() {
        assert_eq!(ScanStage::Mapping.dwell(), Some(Duration::from_millis(1500)));
        assert_eq!(ScanStage::Face.dwell(), Some(Duration::from_millis(2000)));
        assert_eq!(ScanStage::Pigmentation.dwell(), Some(Duration::from_millis(2000)));
        assert_eq!(ScanStage::Analyzing.dwell(), None);
    }
}
