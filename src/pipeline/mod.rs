//! End-to-end phase stereo pipeline.
//!
//! [`PhaseStereo`] decodes and unwraps each camera's fringe frames, hands the
//! absolute phase maps to a [`Rectifier`], and searches correspondences along
//! the rectified rows.
//!
//! Typical usage:
//! ```no_run
//! use fringe_stereo::image::ImageU8;
//! use fringe_stereo::pipeline::{PhaseStereo, PreRectified, StereoParams};
//!
//! # fn example(left: Vec<Vec<ImageU8>>, right: Vec<Vec<ImageU8>>) -> Result<(), fringe_stereo::StereoError> {
//! let stereo = PhaseStereo::new(StereoParams::default())?;
//! let report = stereo.process(&left, &right, &PreRectified::full_frame(640, 480))?;
//! println!("matched pixels: {}", report.stats.matched);
//! # Ok(())
//! # }
//! ```

pub mod params;
pub mod rectify;
pub mod stereo;

pub use params::StereoParams;
pub use rectify::{PreRectified, Rectifier};
pub use stereo::{PhaseStereo, StereoReport};
