//! Dense f32 grid in row-major order.
//!
//! Value channel of phase and disparity maps (validity lives next to it in
//! [`MaskedImageF32`](super::MaskedImageF32)) and the output of
//! [`modulation_map`](crate::phase::modulation_map).
use super::traits::ImageView;

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    pub w: usize,
    pub h: usize,
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Zero-filled `w × h` grid.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Stack rows of length `w` into one grid.
    pub fn from_rows(w: usize, rows: Vec<Vec<f32>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == w));
        Self {
            w,
            h: rows.len(),
            data: rows.concat(),
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}
