//! Structural errors raised at call entry.
//!
//! Per-pixel quality failures (low modulation, no correspondence) are not
//! errors: they are recorded in the validity mask of the output grid.

/// Reasons a decode, unwrap or matching call is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StereoError {
    /// Frame set or phase-map set has the wrong number of members.
    InvalidInputCount { expected: usize, found: usize },
    /// Matching or filter window is zero or below the smallest accepted size.
    InvalidWindowSize { size: usize, minimum: usize },
    /// Window needs a centre pixel but has an even size.
    EvenWindowSize { size: usize },
    /// Two interpolation samples share the same phase value.
    DegenerateInterpolation { abscissa: f32 },
    /// Inputs that must share a shape do not.
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A valid-region rectangle reaches outside its image.
    RegionOutOfBounds {
        region: (usize, usize, usize, usize),
        image: (usize, usize),
    },
    /// Left and right valid regions cover a different number of rows.
    RegionMismatch { left_height: usize, right_height: usize },
    /// Fringe frequencies cannot form a positive heterodyne chain.
    InvalidFrequencies { freq1: f32, freq2: f32, freq3: f32 },
    /// A threshold is negative or not finite.
    InvalidThreshold { name: &'static str, value: f32 },
    /// The speckle disparity search range is empty.
    InvalidDisparityRange { max_disparity: usize },
}

impl std::fmt::Display for StereoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StereoError::InvalidInputCount { expected, found } => {
                write!(f, "invalid input count (expected {expected}, found {found})")
            }
            StereoError::InvalidWindowSize { size, minimum } => {
                write!(f, "invalid window size {size} (minimum {minimum})")
            }
            StereoError::EvenWindowSize { size } => {
                write!(f, "invalid window size {size} (must be odd)")
            }
            StereoError::DegenerateInterpolation { abscissa } => write!(
                f,
                "degenerate interpolation: both samples at phase {:.6}",
                abscissa
            ),
            StereoError::DimensionMismatch { expected, found } => write!(
                f,
                "dimension mismatch (expected {}x{}, found {}x{})",
                expected.0, expected.1, found.0, found.1
            ),
            StereoError::RegionOutOfBounds { region, image } => write!(
                f,
                "region x={} y={} w={} h={} exceeds image {}x{}",
                region.0, region.1, region.2, region.3, image.0, image.1
            ),
            StereoError::RegionMismatch {
                left_height,
                right_height,
            } => write!(
                f,
                "valid regions differ in height (left={left_height}, right={right_height})"
            ),
            StereoError::InvalidFrequencies {
                freq1,
                freq2,
                freq3,
            } => write!(
                f,
                "fringe frequencies {freq1}/{freq2}/{freq3} do not form a positive heterodyne chain"
            ),
            StereoError::InvalidThreshold { name, value } => {
                write!(f, "invalid {name}: {value}")
            }
            StereoError::InvalidDisparityRange { max_disparity } => {
                write!(f, "invalid disparity range [0, {max_disparity})")
            }
        }
    }
}

impl std::error::Error for StereoError {}

/// Reject `value` unless it is finite and non-negative.
pub(crate) fn check_threshold(name: &'static str, value: f32) -> Result<f32, StereoError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(StereoError::InvalidThreshold { name, value })
    }
}

/// Reject grids whose shape differs from `expected`.
pub(crate) fn check_dims(
    expected: (usize, usize),
    found: (usize, usize),
) -> Result<(), StereoError> {
    if expected == found {
        Ok(())
    } else {
        Err(StereoError::DimensionMismatch { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_errors_name_the_violated_rule() {
        let small = StereoError::InvalidWindowSize { size: 1, minimum: 3 }.to_string();
        assert_eq!(small, "invalid window size 1 (minimum 3)");
        let even = StereoError::EvenWindowSize { size: 4 }.to_string();
        assert_eq!(even, "invalid window size 4 (must be odd)");
    }
}
