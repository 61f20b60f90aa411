//! Phase-shifting and heterodyne configuration.
//!
//! A [`PhaseConfig`] is the user-facing option set. It is turned into an
//! immutable [`PhaseSettings`] snapshot, which validates the frequencies and
//! derives the wavelength ratios used by the unwrapper. Reconfiguring means
//! building a new snapshot; a snapshot never changes after construction.
//!
//! Frequencies count fringe periods across the field of view. Heterodyning
//! two carriers `fa > fb` yields a beat of frequency `fa − fb`:
//!
//! | mode         | mid composite | coarse composite |
//! |--------------|---------------|------------------|
//! | `two_step`   | `f1 − f2`     | `f1 − f2 − f3`   |
//! | `three_step` | `f1 − f3`     | `f1 − f2`        |
//!
//! Unwrapping is unambiguous as long as the coarse composite completes at
//! most one period over the measured field (typically a coarse frequency of 1).
use crate::error::{check_threshold, StereoError};
use serde::{Deserialize, Serialize};

/// Number of phase-shifted frames captured per fringe frequency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftSteps {
    /// Shifts of −2π/3, 0, +2π/3.
    Three,
    /// Shifts of 0, π/2, π, 3π/2.
    Four,
}

impl ShiftSteps {
    pub fn frame_count(self) -> usize {
        match self {
            ShiftSteps::Three => 3,
            ShiftSteps::Four => 4,
        }
    }
}

/// How the three wrapped phases are composed into the coarse beat phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeterodyneMode {
    /// `p12 = h(φ1, φ2)`, `p123 = h(p12, φ3)`; single rounding step.
    TwoStep,
    /// `p13 = h(φ1, φ3)`, `p23 = h(φ2, φ3)`, `p123 = h(p13, p23)`; two rounding steps.
    ThreeStep,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    pub shift_steps: ShiftSteps,
    pub heterodyne_mode: HeterodyneMode,
    /// Finest fringe frequency (periods across the field).
    pub freq1: f32,
    pub freq2: f32,
    pub freq3: f32,
    /// Minimum modulation amplitude (gray levels) for a pixel to be kept.
    pub modulation_threshold: f32,
    /// Median-filter the absolute phase after unwrapping.
    pub median_filter: bool,
    /// Odd window size (≥ 3) of the median filter.
    pub median_window: usize,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            shift_steps: ShiftSteps::Four,
            heterodyne_mode: HeterodyneMode::ThreeStep,
            freq1: 64.0,
            freq2: 63.0,
            freq3: 56.0,
            modulation_threshold: 5.0,
            median_filter: false,
            median_window: 3,
        }
    }
}

/// Wavelength ratios derived from the three carrier frequencies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PhaseRatios {
    /// Frequency of the coarse composite `p123`.
    pub coarse_frequency: f32,
    /// Frequency of the intermediate composite (`p12` or `p13`).
    pub mid_frequency: f32,
    pub coarse_to_mid: f32,
    pub mid_to_fine: f32,
    pub fine_to_coarse: f32,
}

impl PhaseRatios {
    pub fn from_config(cfg: &PhaseConfig) -> Result<Self, StereoError> {
        let (f1, f2, f3) = (cfg.freq1, cfg.freq2, cfg.freq3);
        let invalid = StereoError::InvalidFrequencies {
            freq1: f1,
            freq2: f2,
            freq3: f3,
        };
        if ![f1, f2, f3].iter().all(|f| f.is_finite() && *f > 0.0) {
            return Err(invalid);
        }
        let (mid, coarse) = match cfg.heterodyne_mode {
            HeterodyneMode::TwoStep => {
                let mid = f1 - f2;
                (mid, mid - f3)
            }
            HeterodyneMode::ThreeStep => {
                if f2 <= f3 {
                    return Err(invalid);
                }
                (f1 - f3, f1 - f2)
            }
        };
        if mid <= 0.0 || coarse <= 0.0 {
            return Err(invalid);
        }
        Ok(Self {
            coarse_frequency: coarse,
            mid_frequency: mid,
            coarse_to_mid: mid / coarse,
            mid_to_fine: f1 / mid,
            fine_to_coarse: f1 / coarse,
        })
    }
}

/// Validated, immutable snapshot of a [`PhaseConfig`] and its ratios.
#[derive(Clone, Debug)]
pub struct PhaseSettings {
    config: PhaseConfig,
    ratios: PhaseRatios,
}

impl PhaseSettings {
    pub fn new(config: PhaseConfig) -> Result<Self, StereoError> {
        check_threshold("modulation threshold", config.modulation_threshold)?;
        if config.median_filter {
            super::filter::check_median_window(config.median_window)?;
        }
        let ratios = PhaseRatios::from_config(&config)?;
        Ok(Self { config, ratios })
    }

    #[inline]
    pub fn config(&self) -> &PhaseConfig {
        &self.config
    }

    #[inline]
    pub fn ratios(&self) -> &PhaseRatios {
        &self.ratios
    }
}

impl TryFrom<PhaseConfig> for PhaseSettings {
    type Error = StereoError;

    fn try_from(config: PhaseConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}
