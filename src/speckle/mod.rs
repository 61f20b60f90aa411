//! Speckle-pattern stereo: local-contrast binarization followed by windowed
//! Hamming-distance block matching over a bounded disparity range.
//!
//! Independent of the phase path; it consumes rectified grayscale pairs.

mod bitmap;
pub mod matcher;

pub use bitmap::BitMap;
pub use matcher::{window_hamming, SpeckleConfig, SpeckleMatcher, MIN_SPECKLE_WINDOW};
