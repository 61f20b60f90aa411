//! Parameter set of the phase stereo pipeline.
//!
//! Groups the phase recovery options and the correspondence options into the
//! single configuration surface a caller loads from JSON or builds in code.
use crate::phase::PhaseConfig;
use crate::stereo::MatchConfig;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StereoParams {
    pub phase: PhaseConfig,
    pub matching: MatchConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::{HeterodyneMode, ShiftSteps};
    use crate::stereo::SearchStrategy;

    #[test]
    fn parses_full_option_set() {
        let json = r#"{
            "phase": {
                "shift_steps": "three",
                "heterodyne_mode": "two_step",
                "freq1": 64.0, "freq2": 56.0, "freq3": 7.0,
                "modulation_threshold": 3.0,
                "median_filter": true
            },
            "matching": {
                "match_threshold": 0.3,
                "disparity_threshold": 1.0,
                "window_size": 12,
                "strategy": "bucketed_binary"
            }
        }"#;
        let params: StereoParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.phase.shift_steps, ShiftSteps::Three);
        assert_eq!(params.phase.heterodyne_mode, HeterodyneMode::TwoStep);
        assert_eq!(params.phase.median_window, 3);
        assert_eq!(params.matching.strategy, SearchStrategy::BucketedBinary);
        assert_eq!(params.matching.window_size, 12);
    }
}
