//! Per-row phase search with sub-pixel refinement.
//!
//! Both strategies look for the column whose phase is closest to the query and
//! strictly within the tolerance; a candidate only replaces the current best
//! when it is strictly closer, so ties resolve to the leftmost column. The
//! match is then refined by interpolating with the neighbour on the side of
//! the query (`j + 1` when the query is above `row[j]`, `j − 1` otherwise).
//! Boundary columns and invalid neighbours keep the integer column.
use super::config::{MatchConfig, SearchStrategy};
use crate::error::StereoError;
use std::ops::RangeInclusive;

/// One row of an absolute phase map, restricted to the search span.
#[derive(Clone, Copy, Debug)]
pub struct PhaseRow<'a> {
    values: &'a [f32],
    valid: &'a [bool],
}

impl<'a> PhaseRow<'a> {
    pub fn new(values: &'a [f32], valid: &'a [bool]) -> Self {
        debug_assert_eq!(values.len(), valid.len());
        Self { values, valid }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<f32> {
        self.valid[i].then(|| self.values[i])
    }
}

/// Linear interpolation through `(x0, y0)` and `(x1, y1)` evaluated at `x`.
///
/// Abscissas are phases and ordinates are columns.
pub fn interpolate(x0: f32, x1: f32, y0: f32, y1: f32, x: f32) -> Result<f32, StereoError> {
    if x0 == x1 {
        return Err(StereoError::DegenerateInterpolation { abscissa: x0 });
    }
    Ok((x - x1) * y0 / (x0 - x1) + (x - x0) * y1 / (x1 - x0))
}

/// Search the whole row for the closest phase.
pub fn search_linear(
    row: &PhaseRow<'_>,
    query: f32,
    tolerance: f32,
    interpolation: bool,
) -> Result<Option<f32>, StereoError> {
    if row.is_empty() {
        return Ok(None);
    }
    match closest_in(row, 0..=row.len() - 1, query, tolerance) {
        Some(j) => refine(row, j, query, interpolation).map(Some),
        None => Ok(None),
    }
}

/// Binary search over buckets of `window` columns, then scan the bracketing
/// bucket.
///
/// Buckets share their boundary column (`[k·w, (k+1)·w]`) so every query
/// inside the row's phase span is bracketed by some bucket. A bucket's bounds
/// are its first and last valid samples. The search gives up, returning no
/// match, when the path leaves the row or meets a bucket without valid
/// samples.
pub fn search_bucketed(
    row: &PhaseRow<'_>,
    query: f32,
    tolerance: f32,
    window: usize,
    interpolation: bool,
) -> Result<Option<f32>, StereoError> {
    if window == 0 {
        return Err(StereoError::InvalidWindowSize {
            size: 0,
            minimum: 1,
        });
    }
    if row.is_empty() {
        return Ok(None);
    }
    let last = row.len() - 1;
    let buckets = last.div_ceil(window).max(1);

    let (mut lo, mut hi) = (0usize, buckets);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let start = mid * window;
        let end = (start + window).min(last);
        let Some(first) = (start..=end).find_map(|i| row.get(i)) else {
            return Ok(None);
        };
        let Some(final_value) = (start..=end).rev().find_map(|i| row.get(i)) else {
            return Ok(None);
        };
        if query < first {
            hi = mid;
        } else if query > final_value {
            lo = mid + 1;
        } else {
            return match closest_in(row, start..=end, query, tolerance) {
                Some(j) => refine(row, j, query, interpolation).map(Some),
                None => Ok(None),
            };
        }
    }
    Ok(None)
}

/// Dispatch on the configured strategy.
pub fn search_row(
    row: &PhaseRow<'_>,
    query: f32,
    cfg: &MatchConfig,
) -> Result<Option<f32>, StereoError> {
    match cfg.strategy {
        SearchStrategy::LinearScan => {
            search_linear(row, query, cfg.match_threshold, cfg.interpolation)
        }
        SearchStrategy::BucketedBinary => search_bucketed(
            row,
            query,
            cfg.match_threshold,
            cfg.window_size,
            cfg.interpolation,
        ),
    }
}

fn closest_in(
    row: &PhaseRow<'_>,
    span: RangeInclusive<usize>,
    query: f32,
    tolerance: f32,
) -> Option<usize> {
    let mut delta = tolerance;
    let mut best = None;
    for i in span {
        if let Some(v) = row.get(i) {
            let d = (query - v).abs();
            if d < delta {
                delta = d;
                best = Some(i);
            }
        }
    }
    best
}

fn refine(row: &PhaseRow<'_>, j: usize, query: f32, interpolation: bool) -> Result<f32, StereoError> {
    let v = row.values[j];
    let diff = query - v;
    if !interpolation || diff == 0.0 {
        return Ok(j as f32);
    }
    if diff > 0.0 {
        match (j + 1 < row.len()).then(|| row.get(j + 1)).flatten() {
            Some(next) => interpolate(v, next, j as f32, (j + 1) as f32, query),
            None => Ok(j as f32),
        }
    } else {
        match (j > 0).then(|| row.get(j - 1)).flatten() {
            Some(prev) => interpolate(prev, v, (j - 1) as f32, j as f32, query),
            None => Ok(j as f32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize, slope: f32, offset: f32) -> (Vec<f32>, Vec<bool>) {
        let values = (0..n).map(|i| slope * i as f32 + offset).collect();
        (values, vec![true; n])
    }

    #[test]
    fn interpolation_formula() {
        assert_eq!(interpolate(1.0, 2.0, 10.0, 11.0, 1.5).unwrap(), 10.5);
        assert_eq!(interpolate(1.0, 3.0, 4.0, 8.0, 2.0).unwrap(), 6.0);
        assert_eq!(
            interpolate(2.0, 2.0, 0.0, 1.0, 2.0),
            Err(StereoError::DegenerateInterpolation { abscissa: 2.0 })
        );
    }

    #[test]
    fn linear_ramp_root_is_exact() {
        let (values, valid) = ramp(40, 0.25, -3.0);
        let row = PhaseRow::new(&values, &valid);
        for &root in &[0.0f32, 3.3, 17.75, 38.9, 39.0] {
            let query = 0.25 * root - 3.0;
            let found = search_linear(&row, query, 0.2, true).unwrap().unwrap();
            assert!((found - root).abs() < 1e-3, "root {root} found {found}");
        }
    }

    #[test]
    fn outside_tolerance_is_no_match() {
        let (values, valid) = ramp(10, 1.0, 0.0);
        let row = PhaseRow::new(&values, &valid);
        assert_eq!(search_linear(&row, 20.0, 0.5, true).unwrap(), None);
        assert_eq!(search_linear(&row, 4.5, 0.5, true).unwrap(), None);
        assert!(search_linear(&row, 4.4, 0.5, true).unwrap().is_some());
    }

    #[test]
    fn invalid_samples_are_skipped() {
        let (values, mut valid) = ramp(10, 1.0, 0.0);
        valid[4] = false;
        let row = PhaseRow::new(&values, &valid);
        assert_eq!(search_linear(&row, 4.0, 0.5, true).unwrap(), None);
        // Nearest is 5, neighbour 4 is invalid so the integer column is kept.
        assert_eq!(search_linear(&row, 4.8, 0.5, true).unwrap(), Some(5.0));
    }

    #[test]
    fn boundary_columns_keep_integer_index() {
        let (values, valid) = ramp(5, 1.0, 0.0);
        let row = PhaseRow::new(&values, &valid);
        assert_eq!(search_linear(&row, -0.2, 0.5, true).unwrap(), Some(0.0));
        assert_eq!(search_linear(&row, 4.3, 0.5, true).unwrap(), Some(4.0));
    }

    #[test]
    fn interpolation_can_be_disabled() {
        let (values, valid) = ramp(10, 1.0, 0.0);
        let row = PhaseRow::new(&values, &valid);
        assert_eq!(search_linear(&row, 6.3, 0.5, false).unwrap(), Some(6.0));
    }

    #[test]
    fn flat_neighbour_is_degenerate() {
        let values = vec![0.0, 1.0, 1.0, 2.0];
        let valid = vec![true; 4];
        let row = PhaseRow::new(&values, &valid);
        assert!(matches!(
            search_linear(&row, 1.2, 0.5, true),
            Err(StereoError::DegenerateInterpolation { .. })
        ));
    }

    #[test]
    fn bucketed_agrees_with_linear_on_monotonic_row() {
        let values: Vec<f32> = (0..97).map(|i| 0.3 * i as f32 + 0.01 * (i % 7) as f32).collect();
        let valid = vec![true; values.len()];
        let row = PhaseRow::new(&values, &valid);
        for window in [1usize, 4, 7, 16, 96, 200] {
            let mut q = values[0];
            while q <= values[values.len() - 1] {
                let a = search_linear(&row, q, 0.25, true).unwrap();
                let b = search_bucketed(&row, q, 0.25, window, true).unwrap();
                match (a, b) {
                    (Some(a), Some(b)) => assert!((a - b).abs() < 1e-4, "q={q} w={window}"),
                    (None, None) => {}
                    other => panic!("q={q} window={window}: {other:?}"),
                }
                q += 0.137;
            }
        }
    }

    #[test]
    fn bucketed_non_bracketing_path_is_no_match() {
        let (values, valid) = ramp(20, 1.0, 0.0);
        let row = PhaseRow::new(&values, &valid);
        // Within tolerance of column 0 but below the row span.
        assert_eq!(search_bucketed(&row, -0.1, 0.5, 4, true).unwrap(), None);
        assert_eq!(search_bucketed(&row, 25.0, 0.5, 4, true).unwrap(), None);
    }

    #[test]
    fn bucketed_stops_at_empty_bucket() {
        let (values, mut valid) = ramp(20, 1.0, 0.0);
        for v in valid.iter_mut().take(13).skip(8) {
            *v = false;
        }
        let row = PhaseRow::new(&values, &valid);
        // Middle bucket [8, 12] is fully invalid.
        assert_eq!(search_bucketed(&row, 2.0, 0.5, 4, true).unwrap(), None);
        assert!(search_linear(&row, 2.0, 0.5, true).unwrap().is_some());
    }

    #[test]
    fn zero_window_is_rejected() {
        let (values, valid) = ramp(4, 1.0, 0.0);
        let row = PhaseRow::new(&values, &valid);
        assert!(matches!(
            search_bucketed(&row, 1.0, 0.5, 0, true),
            Err(StereoError::InvalidWindowSize { .. })
        ));
    }
}
