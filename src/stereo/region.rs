//! Valid-region rectangles supplied by the rectification stage.
use crate::error::StereoError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Axis-aligned pixel rectangle `[x, x + width) × [y, y + height)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidRegion {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl ValidRegion {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering a whole `w × h` image.
    pub fn full(w: usize, h: usize) -> Self {
        Self::new(0, 0, w, h)
    }

    #[inline]
    pub fn columns(&self) -> Range<usize> {
        self.x..self.x + self.width
    }

    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.y..self.y + self.height
    }

    #[inline]
    pub fn contains_row(&self, y: usize) -> bool {
        self.rows().contains(&y)
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.columns().contains(&x) && self.contains_row(y)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Fail unless the region lies inside an image of `dims = (w, h)`.
    pub fn check_fits(&self, dims: (usize, usize)) -> Result<(), StereoError> {
        if self.x + self.width <= dims.0 && self.y + self.height <= dims.1 {
            Ok(())
        } else {
            Err(StereoError::RegionOutOfBounds {
                region: (self.x, self.y, self.width, self.height),
                image: dims,
            })
        }
    }

    /// Restrict two per-camera rectangles to their common row span.
    ///
    /// Columns are kept per camera; both results share `y` and `height`, which
    /// is what row-aligned matching needs. Disjoint row spans give empty
    /// regions.
    pub fn align_rows(left: ValidRegion, right: ValidRegion) -> (ValidRegion, ValidRegion) {
        let top = left.y.max(right.y);
        let bottom = (left.y + left.height).min(right.y + right.height);
        let height = bottom.saturating_sub(top);
        (
            ValidRegion::new(left.x, top, left.width, height),
            ValidRegion::new(right.x, top, right.width, height),
        )
    }
}
