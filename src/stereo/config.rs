use crate::error::{check_threshold, StereoError};
use serde::{Deserialize, Serialize};

/// Strategy used to locate the query phase along a rectified row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Examine every column of the row.
    LinearScan,
    /// Binary search over fixed-size buckets, then scan the bracketing bucket.
    /// Assumes phase increases with column index along the row.
    BucketedBinary,
}

/// Options of the phase correspondence search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Largest accepted |left phase − right phase| (radians).
    pub match_threshold: f32,
    /// Disparities at or below this value are reported as 0.
    pub disparity_threshold: f32,
    /// Bucket width in columns for [`SearchStrategy::BucketedBinary`].
    pub window_size: usize,
    pub strategy: SearchStrategy,
    /// Refine matches to sub-pixel precision by linear interpolation.
    pub interpolation: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.5,
            disparity_threshold: 0.0,
            window_size: 16,
            strategy: SearchStrategy::LinearScan,
            interpolation: true,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), StereoError> {
        check_threshold("match threshold", self.match_threshold)?;
        if !self.disparity_threshold.is_finite() {
            return Err(StereoError::InvalidThreshold {
                name: "disparity threshold",
                value: self.disparity_threshold,
            });
        }
        if self.strategy == SearchStrategy::BucketedBinary && self.window_size == 0 {
            return Err(StereoError::InvalidWindowSize {
                size: 0,
                minimum: 1,
            });
        }
        Ok(())
    }
}
