use super::params::StereoParams;
use super::rectify::Rectifier;
use crate::diagnostics::{elapsed_ms, PhaseStageSummary, ReportSummary, Stage, TimingBreakdown};
use crate::error::StereoError;
use crate::image::{AbsolutePhaseMap, DisparityMap, ImageU8, RelativePhaseMap};
use crate::parallel::join;
use crate::phase::{decode_relative_phase, unwrap_phase, PhaseSettings, FREQUENCY_COUNT};
use crate::stereo::{compute_disparity, MatchConfig, MatchStats};
use log::{debug, warn};
use nalgebra::Matrix4;
use std::time::Instant;

/// Everything produced by one [`PhaseStereo::process`] call.
#[derive(Clone, Debug)]
pub struct StereoReport {
    pub disparity: DisparityMap,
    /// Rectified left absolute phase.
    pub left_phase: AbsolutePhaseMap,
    /// Rectified right absolute phase.
    pub right_phase: AbsolutePhaseMap,
    pub disparity_to_depth: Matrix4<f64>,
    pub stats: MatchStats,
    pub timing: TimingBreakdown,
}

impl StereoReport {
    pub fn summary(&self) -> ReportSummary {
        let (width, height) = self.disparity.dims();
        ReportSummary {
            width,
            height,
            left_phase: PhaseStageSummary::from_map(&self.left_phase),
            right_phase: PhaseStageSummary::from_map(&self.right_phase),
            stats: self.stats,
            disparity_range: self.disparity.valid_range(),
            disparity_to_depth: self.disparity_to_depth,
            timing: self.timing.clone(),
        }
    }
}

/// Phase-based stereo reconstruction front end.
///
/// Holds a validated settings snapshot; [`reconfigure`](Self::reconfigure)
/// replaces it only when the new parameters pass validation, so a failed
/// update leaves the previous configuration in force.
#[derive(Clone, Debug)]
pub struct PhaseStereo {
    settings: PhaseSettings,
    matching: MatchConfig,
}

impl PhaseStereo {
    pub fn new(params: StereoParams) -> Result<Self, StereoError> {
        let settings = PhaseSettings::new(params.phase)?;
        params.matching.validate()?;
        Ok(Self {
            settings,
            matching: params.matching,
        })
    }

    pub fn reconfigure(&mut self, params: StereoParams) -> Result<(), StereoError> {
        *self = Self::new(params)?;
        debug!(
            "PhaseStereo::reconfigure steps={:?} mode={:?} strategy={:?}",
            self.settings.config().shift_steps,
            self.settings.config().heterodyne_mode,
            self.matching.strategy
        );
        Ok(())
    }

    #[inline]
    pub fn settings(&self) -> &PhaseSettings {
        &self.settings
    }

    #[inline]
    pub fn matching(&self) -> &MatchConfig {
        &self.matching
    }

    /// Decode and unwrap one camera's three frame sets (finest frequency
    /// first) into its absolute phase map.
    pub fn absolute_phase(&self, sets: &[Vec<ImageU8<'_>>]) -> Result<AbsolutePhaseMap, StereoError> {
        if sets.len() != FREQUENCY_COUNT {
            return Err(StereoError::InvalidInputCount {
                expected: FREQUENCY_COUNT,
                found: sets.len(),
            });
        }
        let relative = sets
            .iter()
            .map(|frames| decode_relative_phase(frames, &self.settings))
            .collect::<Result<Vec<RelativePhaseMap>, _>>()?;
        unwrap_phase(&relative, &self.settings)
    }

    /// Run the full pipeline: both cameras' phase recovery, rectification and
    /// correspondence search.
    pub fn process<R: Rectifier>(
        &self,
        left_sets: &[Vec<ImageU8<'_>>],
        right_sets: &[Vec<ImageU8<'_>>],
        rectifier: &R,
    ) -> Result<StereoReport, StereoError> {
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();

        let (left, right) = join(
            || {
                let start = Instant::now();
                self.absolute_phase(left_sets).map(|map| (map, elapsed_ms(start)))
            },
            || {
                let start = Instant::now();
                self.absolute_phase(right_sets).map(|map| (map, elapsed_ms(start)))
            },
        );
        let (left, left_ms) = left?;
        let (right, right_ms) = right?;
        timing.record(Stage::PhaseLeft, left_ms);
        timing.record(Stage::PhaseRight, right_ms);

        let rect_start = Instant::now();
        let (left_phase, right_phase) = rectifier.rectify(left, right);
        let (left_region, right_region) = rectifier.regions();
        timing.record(Stage::Rectify, elapsed_ms(rect_start));

        let match_start = Instant::now();
        let disparity = compute_disparity(
            &left_phase,
            &right_phase,
            left_region,
            right_region,
            &self.matching,
        )?;
        timing.record(Stage::Disparity, elapsed_ms(match_start));

        let stats = MatchStats::from_disparity(&disparity);
        timing.total_ms = elapsed_ms(total_start);
        debug!(
            "PhaseStereo::process w={} h={} left_valid={} right_valid={} matched={} total_ms={:.3}",
            disparity.width(),
            disparity.height(),
            left_phase.valid_count(),
            right_phase.valid_count(),
            stats.matched,
            timing.total_ms
        );
        if left_phase.valid_count() == 0 || right_phase.valid_count() == 0 {
            warn!("PhaseStereo::process: a camera produced no valid absolute phase");
        }

        Ok(StereoReport {
            disparity,
            left_phase,
            right_phase,
            disparity_to_depth: rectifier.disparity_to_depth(),
            stats,
            timing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::PhaseConfig;
    use crate::pipeline::PreRectified;
    use crate::stereo::SearchStrategy;

    fn flat_sets(data: &[u8], w: usize, h: usize, frames: usize, sets: usize) -> Vec<Vec<ImageU8<'_>>> {
        (0..sets)
            .map(|_| (0..frames).map(|_| ImageU8::packed(w, h, data)).collect())
            .collect()
    }

    #[test]
    fn rejects_invalid_params_at_construction() {
        let mut params = StereoParams::default();
        params.phase.modulation_threshold = -1.0;
        assert!(matches!(
            PhaseStereo::new(params),
            Err(StereoError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn failed_reconfigure_keeps_previous_settings() {
        let mut stereo = PhaseStereo::new(StereoParams::default()).unwrap();
        let mut params = StereoParams::default();
        params.matching.strategy = SearchStrategy::BucketedBinary;
        params.matching.window_size = 0;
        assert!(stereo.reconfigure(params).is_err());
        assert_eq!(stereo.matching().strategy, SearchStrategy::LinearScan);

        let params = StereoParams {
            phase: PhaseConfig {
                modulation_threshold: 9.0,
                ..Default::default()
            },
            ..Default::default()
        };
        stereo.reconfigure(params).unwrap();
        assert_eq!(stereo.settings().config().modulation_threshold, 9.0);
    }

    #[test]
    fn absolute_phase_requires_three_sets() {
        let stereo = PhaseStereo::new(StereoParams::default()).unwrap();
        let data = vec![128u8; 16];
        let sets = flat_sets(&data, 4, 4, 4, 2);
        assert_eq!(
            stereo.absolute_phase(&sets).unwrap_err(),
            StereoError::InvalidInputCount {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn flat_frames_yield_empty_disparity() {
        let stereo = PhaseStereo::new(StereoParams::default()).unwrap();
        let data = vec![128u8; 32];
        let sets = flat_sets(&data, 8, 4, 4, 3);
        let report = stereo
            .process(&sets, &sets, &PreRectified::full_frame(8, 4))
            .unwrap();
        assert_eq!(report.stats.invalid, 32);
        assert_eq!(report.disparity.valid_count(), 0);
        assert!(report.timing.stage_ms(Stage::Disparity).is_some());
        assert!(report.timing.phase_ms() >= 0.0);
        let summary = report.summary();
        assert_eq!(summary.left_phase.valid_pixels, 0);
        assert!(summary.disparity_range.is_none());
    }

    #[test]
    fn wrong_frame_count_in_right_camera_fails() {
        let stereo = PhaseStereo::new(StereoParams::default()).unwrap();
        let data = vec![0u8; 16];
        let left = flat_sets(&data, 4, 4, 4, 3);
        let right = flat_sets(&data, 4, 4, 3, 3);
        let err = stereo
            .process(&left, &right, &PreRectified::full_frame(4, 4))
            .unwrap_err();
        assert_eq!(
            err,
            StereoError::InvalidInputCount {
                expected: 4,
                found: 3
            }
        );
    }
}
