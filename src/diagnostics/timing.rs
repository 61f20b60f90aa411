use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Elapsed milliseconds since `start`.
#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Stages of one [`PhaseStereo::process`](crate::pipeline::PhaseStereo::process) run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Decode and unwrap of the left camera's three frame sets.
    PhaseLeft,
    /// Decode and unwrap of the right camera's three frame sets.
    PhaseRight,
    Rectify,
    /// Correspondence search over the rectified phase maps.
    Disparity,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub stage: Stage,
    pub elapsed_ms: f64,
}

/// Per-stage wall time of a stereo run.
///
/// The two phase stages run concurrently, so `total_ms` can be smaller than
/// the sum of the stages.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn record(&mut self, stage: Stage, elapsed_ms: f64) {
        self.stages.push(StageTiming { stage, elapsed_ms });
    }

    pub fn stage_ms(&self, stage: Stage) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.elapsed_ms)
    }

    /// Slower of the two concurrent per-camera phase stages.
    pub fn phase_ms(&self) -> f64 {
        [Stage::PhaseLeft, Stage::PhaseRight]
            .into_iter()
            .filter_map(|s| self.stage_ms(s))
            .fold(0.0, f64::max)
    }
}
