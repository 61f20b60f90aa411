//! Phase recovery: wrapped-phase decoding and heterodyne unwrapping.
//!
//! - [`decode`] turns one frequency's phase-shifted frames into a relative
//!   phase map gated by modulation amplitude.
//! - [`unwrap`] combines the three relative maps of a camera into the
//!   absolute phase of the finest frequency.
//! - [`filter`] optionally median-smooths the absolute map.
//! - [`config`] holds the option set and the validated settings snapshot.

pub mod config;
pub mod decode;
pub mod filter;
pub mod unwrap;

pub use config::{HeterodyneMode, PhaseConfig, PhaseRatios, PhaseSettings, ShiftSteps};
pub use decode::{decode_relative_phase, modulation_map, quadrature};
pub use filter::median_filter_phase;
pub use unwrap::{heterodyne, unwrap_phase, unwrap_with_reference, FREQUENCY_COUNT};
