//! Windowed Hamming-distance block matching on binarized speckle images.
use super::bitmap::{binarize, BitMap};
use crate::error::{check_dims, StereoError};
use crate::image::{DisparityMap, ImageU8, ImageView, MaskedImageF32};
use crate::parallel::{join, map_rows};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Smallest accepted matching window.
pub const MIN_SPECKLE_WINDOW: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeckleConfig {
    /// Odd window size used for both binarization and matching.
    pub win_size: usize,
    /// Candidate disparities are `0..max_disparity`.
    pub max_disparity: usize,
}

impl Default for SpeckleConfig {
    fn default() -> Self {
        Self {
            win_size: 5,
            max_disparity: 64,
        }
    }
}

/// Block matcher for speckle-pattern stereo pairs.
///
/// A validated, immutable configuration; build a new matcher to change it.
#[derive(Clone, Debug)]
pub struct SpeckleMatcher {
    config: SpeckleConfig,
}

impl SpeckleMatcher {
    pub fn new(config: SpeckleConfig) -> Result<Self, StereoError> {
        if config.win_size < MIN_SPECKLE_WINDOW {
            return Err(StereoError::InvalidWindowSize {
                size: config.win_size,
                minimum: MIN_SPECKLE_WINDOW,
            });
        }
        if config.win_size % 2 == 0 {
            return Err(StereoError::EvenWindowSize {
                size: config.win_size,
            });
        }
        if config.max_disparity == 0 {
            return Err(StereoError::InvalidDisparityRange {
                max_disparity: config.max_disparity,
            });
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &SpeckleConfig {
        &self.config
    }

    /// Local-contrast descriptor of `src`.
    pub fn binarize(&self, src: &ImageU8<'_>) -> BitMap {
        binarize(src, self.config.win_size)
    }

    /// Disparity `k ∈ [0, max_disparity)` minimising the window Hamming
    /// distance between `left(x, y)` and `right(x + k, y)`.
    ///
    /// Every output pixel is valid. Ties go to the smallest `k`.
    pub fn match_bitmaps(&self, left: &BitMap, right: &BitMap) -> Result<DisparityMap, StereoError> {
        check_dims(left.dims(), right.dims())?;
        let (w, h) = left.dims();
        let start = Instant::now();
        let rows = map_rows(h, |y| {
            (0..w)
                .map(|x| Some(self.best_disparity(left, right, x, y) as f32))
                .collect()
        });
        let disparity = MaskedImageF32::from_rows(w, h, rows);
        debug!(
            "speckle match w={} h={} win={} max_disparity={} elapsed_ms={:.3}",
            w,
            h,
            self.config.win_size,
            self.config.max_disparity,
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(disparity)
    }

    /// Binarize a rectified pair, both images concurrently.
    pub fn binarize_pair(
        &self,
        left: &ImageU8<'_>,
        right: &ImageU8<'_>,
    ) -> Result<(BitMap, BitMap), StereoError> {
        check_dims(left.dims(), right.dims())?;
        Ok(join(|| self.binarize(left), || self.binarize(right)))
    }

    /// Binarize both images and match them.
    pub fn compute(&self, left: &ImageU8<'_>, right: &ImageU8<'_>) -> Result<DisparityMap, StereoError> {
        let (left_bits, right_bits) = self.binarize_pair(left, right)?;
        self.match_bitmaps(&left_bits, &right_bits)
    }

    fn best_disparity(&self, left: &BitMap, right: &BitMap, x: usize, y: usize) -> usize {
        let mut best = 0;
        let mut best_cost = u32::MAX;
        for k in 0..self.config.max_disparity {
            let cost = window_hamming(left, right, x, y, k, self.config.win_size / 2);
            if cost < best_cost {
                best_cost = cost;
                best = k;
            }
        }
        best
    }
}

/// Hamming distance between the window around `left(x, y)` and the window
/// around `right(x + k, y)`.
///
/// A sample outside the image reads as 0: when exactly one side is out of
/// bounds the pair mismatches only if the in-bounds bit is 1, and pairs with
/// both sides out of bounds do not count.
pub fn window_hamming(left: &BitMap, right: &BitMap, x: usize, y: usize, k: usize, r: usize) -> u32 {
    let r = r as isize;
    let (x, y, k) = (x as isize, y as isize, k as isize);
    let mut cost = 0u32;
    for v in (y - r)..=(y + r) {
        for u in (x - r)..=(x + r) {
            cost += match (left.sample(u, v), right.sample(u + k, v)) {
                (Some(a), Some(b)) => (a != b) as u32,
                (Some(bit), None) | (None, Some(bit)) => (bit != 0) as u32,
                (None, None) => 0,
            };
        }
    }
    cost
}
