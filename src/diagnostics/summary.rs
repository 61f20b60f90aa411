use super::timing::TimingBreakdown;
use crate::image::MaskedImageF32;
use crate::stereo::MatchStats;
use nalgebra::Matrix4;
use serde::Serialize;

/// Coverage of one camera's absolute phase map.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseStageSummary {
    pub width: usize,
    pub height: usize,
    pub valid_pixels: usize,
    pub phase_range: Option<(f32, f32)>,
}

impl PhaseStageSummary {
    pub fn from_map(map: &MaskedImageF32) -> Self {
        let (width, height) = map.dims();
        Self {
            width,
            height,
            valid_pixels: map.valid_count(),
            phase_range: map.valid_range(),
        }
    }
}

/// JSON-friendly digest of a stereo run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub width: usize,
    pub height: usize,
    pub left_phase: PhaseStageSummary,
    pub right_phase: PhaseStageSummary,
    pub stats: MatchStats,
    pub disparity_range: Option<(f32, f32)>,
    /// Disparity-to-depth matrix passed through from calibration.
    pub disparity_to_depth: Matrix4<f64>,
    pub timing: TimingBreakdown,
}
