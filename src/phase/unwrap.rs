//! Multi-frequency heterodyne phase unwrapping.
//!
//! Three wrapped phase maps measured at different fringe frequencies are
//! combined pairwise into beat phases. The difference of two wrapped phases,
//! wrapped into [0, 2π), is itself the wrapped phase of a carrier whose
//! frequency is the difference of the two. The coarsest beat completes at most
//! one period over the field, so it is absolute; it is then used to pick the
//! 2π multiple of progressively finer phases by rounding to the nearest cycle.
use super::config::{HeterodyneMode, PhaseRatios, PhaseSettings};
use super::filter::median_filter_phase;
use crate::error::{check_dims, StereoError};
use crate::image::{AbsolutePhaseMap, MaskedImageF32, RelativePhaseMap};
use crate::parallel::map_rows;
use log::{debug, warn};
use std::f32::consts::TAU;
use std::time::Instant;

/// Number of relative phase maps (one per fringe frequency) the unwrapper needs.
pub const FREQUENCY_COUNT: usize = 3;

/// Wrapped difference `a − b` mapped into [0, 2π).
#[inline]
pub fn heterodyne(a: f32, b: f32) -> f32 {
    let z = a - b;
    if z < 0.0 {
        // z + 2π can round up to 2π itself when z is a tiny negative.
        (z + TAU).min(f32::from_bits(TAU.to_bits() - 1))
    } else {
        z
    }
}

/// Absolute value of `fine` consistent with the coarser absolute phase
/// `coarse`, where `ratio` is the coarse wavelength over the fine wavelength.
#[inline]
pub fn unwrap_with_reference(coarse: f32, fine: f32, ratio: f32) -> f32 {
    fine + TAU * ((coarse * ratio - fine) / TAU + 0.5).floor()
}

/// Coarse beat phase `p123` for one pixel.
#[inline]
pub fn coarse_phase(mode: HeterodyneMode, p1: f32, p2: f32, p3: f32) -> f32 {
    match mode {
        HeterodyneMode::TwoStep => heterodyne(heterodyne(p1, p2), p3),
        HeterodyneMode::ThreeStep => heterodyne(heterodyne(p1, p3), heterodyne(p2, p3)),
    }
}

/// Absolute phase of the finest carrier for one pixel.
#[inline]
pub fn unwrap_pixel(mode: HeterodyneMode, ratios: &PhaseRatios, p1: f32, p2: f32, p3: f32) -> f32 {
    match mode {
        HeterodyneMode::TwoStep => {
            let p123 = coarse_phase(mode, p1, p2, p3);
            unwrap_with_reference(p123, p1, ratios.fine_to_coarse)
        }
        HeterodyneMode::ThreeStep => {
            let p13 = heterodyne(p1, p3);
            let p23 = heterodyne(p2, p3);
            let p123 = heterodyne(p13, p23);
            let mid = unwrap_with_reference(p123, p13, ratios.coarse_to_mid);
            unwrap_with_reference(mid, p1, ratios.mid_to_fine)
        }
    }
}

/// Unwrap three relative phase maps (finest frequency first) into the
/// absolute phase of the finest carrier.
///
/// A pixel invalid in any input is invalid in the output. When the settings
/// enable it, the result is median-filtered before being returned.
pub fn unwrap_phase(
    maps: &[RelativePhaseMap],
    settings: &PhaseSettings,
) -> Result<AbsolutePhaseMap, StereoError> {
    if maps.len() != FREQUENCY_COUNT {
        return Err(StereoError::InvalidInputCount {
            expected: FREQUENCY_COUNT,
            found: maps.len(),
        });
    }
    let dims = maps[0].dims();
    for map in &maps[1..] {
        check_dims(dims, map.dims())?;
    }
    let (w, h) = dims;
    let mode = settings.config().heterodyne_mode;
    let ratios = *settings.ratios();
    let start = Instant::now();

    let rows = map_rows(h, |y| {
        let (v1, m1) = maps[0].row(y);
        let (v2, m2) = maps[1].row(y);
        let (v3, m3) = maps[2].row(y);
        (0..w)
            .map(|x| {
                (m1[x] && m2[x] && m3[x]).then(|| unwrap_pixel(mode, &ratios, v1[x], v2[x], v3[x]))
            })
            .collect()
    });
    let mut absolute = MaskedImageF32::from_rows(w, h, rows);

    if settings.config().median_filter {
        absolute = median_filter_phase(&absolute, settings.config().median_window)?;
    }

    let valid = absolute.valid_count();
    debug!(
        "unwrap_phase mode={:?} w={} h={} valid={} ratio={:.3} filtered={} elapsed_ms={:.3}",
        mode,
        w,
        h,
        valid,
        ratios.fine_to_coarse,
        settings.config().median_filter,
        start.elapsed().as_secs_f64() * 1000.0
    );
    if valid == 0 && w * h > 0 {
        warn!("unwrap_phase: no pixel is valid in all three relative phase maps");
    }
    Ok(absolute)
}
