//! Epipolar phase correspondence on rectified absolute phase maps.
//!
//! Modules
//! - [`config`] – tolerances and the search strategy.
//! - [`region`] – valid-region rectangles from the rectification stage.
//! - [`search`] – per-row linear and bucketed binary searches with sub-pixel
//!   interpolation.
//! - [`matcher`] – the dense, row-parallel disparity computation.

pub mod config;
pub mod matcher;
pub mod region;
pub mod search;

pub use config::{MatchConfig, SearchStrategy};
pub use matcher::{compute_disparity, MatchStats};
pub use region::ValidRegion;
pub use search::{interpolate, search_bucketed, search_linear, search_row, PhaseRow};
