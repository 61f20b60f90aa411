//! Float grid with an explicit per-pixel validity channel.
//!
//! Phase and disparity maps keep their value in an [`ImageF32`] and their
//! validity in a parallel `Vec<bool>`. An invalid pixel stores `0.0` in the
//! value channel; readers go through [`MaskedImageF32::get`], which consults
//! the mask, so no NaN ever travels through the arithmetic.
use super::traits::ImageView;
use super::ImageF32;

#[derive(Clone, Debug)]
pub struct MaskedImageF32 {
    pub values: ImageF32,
    pub valid: Vec<bool>,
}

/// Wrapped phase in (−π, π], one per pixel, produced by the decoder.
pub type RelativePhaseMap = MaskedImageF32;
/// Unwrapped phase of the finest fringe frequency.
pub type AbsolutePhaseMap = MaskedImageF32;
/// Horizontal shift `left column − matched right column`.
pub type DisparityMap = MaskedImageF32;

impl MaskedImageF32 {
    /// All-invalid grid of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            values: ImageF32::new(w, h),
            valid: vec![false; w * h],
        }
    }

    /// Assemble a grid from per-row pixel vectors (each of length `w`).
    pub fn from_rows(w: usize, h: usize, rows: Vec<Vec<Option<f32>>>) -> Self {
        debug_assert_eq!(rows.len(), h);
        let mut data = Vec::with_capacity(w * h);
        let mut valid = Vec::with_capacity(w * h);
        for px in rows.into_iter().flatten() {
            data.push(px.unwrap_or(0.0));
            valid.push(px.is_some());
        }
        debug_assert_eq!(data.len(), w * h);
        Self {
            values: ImageF32 { w, h, data },
            valid,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.values.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.values.h
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.values.w, self.values.h)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        let i = self.values.idx(x, y);
        self.valid[i].then(|| self.values.data[i])
    }

    #[inline]
    pub fn is_valid(&self, x: usize, y: usize) -> bool {
        self.valid[self.values.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.values.idx(x, y);
        self.values.data[i] = v;
        self.valid[i] = true;
    }

    #[inline]
    pub fn invalidate(&mut self, x: usize, y: usize) {
        let i = self.values.idx(x, y);
        self.values.data[i] = 0.0;
        self.valid[i] = false;
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, px: Option<f32>) {
        match px {
            Some(v) => self.set(x, y, v),
            None => self.invalidate(x, y),
        }
    }

    /// Value and validity slices for row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> (&[f32], &[bool]) {
        let start = self.values.idx(0, y);
        let end = start + self.values.w;
        (self.values.row(y), &self.valid[start..end])
    }

    /// Number of valid pixels.
    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|&&v| v).count()
    }

    /// Min/max over valid pixels, `None` when nothing is valid.
    pub fn valid_range(&self) -> Option<(f32, f32)> {
        self.values
            .data
            .iter()
            .zip(&self.valid)
            .filter(|(_, &ok)| ok)
            .fold(None, |acc, (&v, _)| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
