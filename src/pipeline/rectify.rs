//! Seam to the external rectification collaborator.
//!
//! Calibration and remapping live outside this crate. The pipeline only needs
//! row-aligned absolute phase maps, the two valid regions, and the
//! disparity-to-depth matrix, which it forwards untouched.
use crate::image::AbsolutePhaseMap;
use crate::stereo::ValidRegion;
use nalgebra::Matrix4;

pub trait Rectifier {
    /// Map both absolute phase maps into the rectified geometry.
    fn rectify(
        &self,
        left: AbsolutePhaseMap,
        right: AbsolutePhaseMap,
    ) -> (AbsolutePhaseMap, AbsolutePhaseMap);

    /// Valid regions of the rectified left and right images.
    fn regions(&self) -> (ValidRegion, ValidRegion);

    /// Disparity-to-depth matrix produced by calibration.
    fn disparity_to_depth(&self) -> Matrix4<f64>;
}

/// Identity rectifier for frames that were rectified before decoding.
#[derive(Clone, Debug)]
pub struct PreRectified {
    pub left_region: ValidRegion,
    pub right_region: ValidRegion,
    pub q: Matrix4<f64>,
}

impl PreRectified {
    pub fn new(left_region: ValidRegion, right_region: ValidRegion, q: Matrix4<f64>) -> Self {
        Self {
            left_region,
            right_region,
            q,
        }
    }

    /// Whole-frame regions on a `w × h` pair and an identity `Q`.
    pub fn full_frame(w: usize, h: usize) -> Self {
        let region = ValidRegion::full(w, h);
        Self::new(region, region, Matrix4::identity())
    }
}

impl Rectifier for PreRectified {
    fn rectify(
        &self,
        left: AbsolutePhaseMap,
        right: AbsolutePhaseMap,
    ) -> (AbsolutePhaseMap, AbsolutePhaseMap) {
        (left, right)
    }

    fn regions(&self) -> (ValidRegion, ValidRegion) {
        (self.left_region, self.right_region)
    }

    fn disparity_to_depth(&self) -> Matrix4<f64> {
        self.q
    }
}
