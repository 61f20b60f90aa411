//! Dense correspondence between two rectified absolute phase maps.
//!
//! For every valid left pixel inside the left region, the matching right
//! column is searched on the corresponding rectified row, restricted to the
//! right region's columns. The disparity is `x − (match + right_region.x)`;
//! shifts at or below the disparity threshold are reported as `0.0`.
//! Pixels outside the left region, with invalid left phase, or without a
//! match within tolerance are invalid. Rows are matched independently.
use super::config::MatchConfig;
use super::region::ValidRegion;
use super::search::{search_row, PhaseRow};
use crate::error::{check_dims, StereoError};
use crate::image::{AbsolutePhaseMap, DisparityMap, MaskedImageF32};
use crate::parallel::try_map_rows;
use log::{debug, warn};
use serde::Serialize;
use std::time::Instant;

/// Pixel counts of a disparity map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    /// Valid pixels with a disparity above the threshold.
    pub matched: usize,
    /// Valid pixels whose disparity was clamped to zero.
    pub zeroed: usize,
    /// Invalid pixels (outside the region, bad phase, or no match).
    pub invalid: usize,
}

impl MatchStats {
    pub fn from_disparity(map: &DisparityMap) -> Self {
        let mut stats = MatchStats::default();
        for (v, &ok) in map.values.data.iter().zip(&map.valid) {
            match (ok, *v == 0.0) {
                (false, _) => stats.invalid += 1,
                (true, true) => stats.zeroed += 1,
                (true, false) => stats.matched += 1,
            }
        }
        stats
    }
}

/// Compute the disparity map of `left` against `right`.
pub fn compute_disparity(
    left: &AbsolutePhaseMap,
    right: &AbsolutePhaseMap,
    left_region: ValidRegion,
    right_region: ValidRegion,
    cfg: &MatchConfig,
) -> Result<DisparityMap, StereoError> {
    cfg.validate()?;
    check_dims(left.dims(), right.dims())?;
    left_region.check_fits(left.dims())?;
    right_region.check_fits(right.dims())?;
    if left_region.height != right_region.height {
        return Err(StereoError::RegionMismatch {
            left_height: left_region.height,
            right_height: right_region.height,
        });
    }

    let (w, h) = left.dims();
    let start = Instant::now();
    let rows = try_map_rows(h, |y| match_row(left, right, left_region, right_region, cfg, y))?;
    let disparity = MaskedImageF32::from_rows(w, h, rows);

    let stats = MatchStats::from_disparity(&disparity);
    debug!(
        "compute_disparity strategy={:?} w={} h={} matched={} zeroed={} invalid={} elapsed_ms={:.3}",
        cfg.strategy,
        w,
        h,
        stats.matched,
        stats.zeroed,
        stats.invalid,
        start.elapsed().as_secs_f64() * 1000.0
    );
    if stats.matched + stats.zeroed == 0 && !left_region.is_empty() {
        warn!("compute_disparity: no correspondence found inside the valid region");
    }
    Ok(disparity)
}

fn match_row(
    left: &AbsolutePhaseMap,
    right: &AbsolutePhaseMap,
    left_region: ValidRegion,
    right_region: ValidRegion,
    cfg: &MatchConfig,
    y: usize,
) -> Result<Vec<Option<f32>>, StereoError> {
    let mut out = vec![None; left.width()];
    if !left_region.contains_row(y) || right_region.width == 0 {
        return Ok(out);
    }
    let ry = y - left_region.y + right_region.y;
    let (right_values, right_valid) = right.row(ry);
    let span = right_region.columns();
    let row = PhaseRow::new(&right_values[span.clone()], &right_valid[span]);
    let offset = right_region.x as f32;

    let (left_values, left_valid) = left.row(y);
    for x in left_region.columns() {
        if !left_valid[x] {
            continue;
        }
        if let Some(column) = search_row(&row, left_values[x], cfg)? {
            let d = x as f32 - (column + offset);
            out[x] = Some(if d > cfg.disparity_threshold { d } else { 0.0 });
        }
    }
    Ok(out)
}
