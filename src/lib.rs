#![doc = include_str!("../README.md")]

// Public modules
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod phase;
pub mod pipeline;
pub mod speckle;
pub mod stereo;

// Tool configurations used by the demo binaries.
pub mod config;

pub(crate) mod parallel;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::StereoError;
pub use crate::pipeline::{PhaseStereo, PreRectified, Rectifier, StereoParams, StereoReport};
pub use crate::speckle::{SpeckleConfig, SpeckleMatcher};

pub use crate::diagnostics::{ReportSummary, TimingBreakdown};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use fringe_stereo::prelude::*;
///
/// # fn main() -> Result<(), StereoError> {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let frame = ImageU8 { w, h, stride: w, data: &gray };
/// let set = vec![frame; 4];
/// let camera = vec![set.clone(), set.clone(), set];
///
/// let stereo = PhaseStereo::new(StereoParams::default())?;
/// let report = stereo.process(&camera, &camera, &PreRectified::full_frame(w, h))?;
/// println!("matched={} total_ms={:.3}", report.stats.matched, report.timing.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{DisparityMap, ImageU8, MaskedImageF32};
    pub use crate::{PhaseStereo, PreRectified, StereoError, StereoParams, StereoReport};
}
