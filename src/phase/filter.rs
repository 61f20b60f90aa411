//! Median smoothing of an absolute phase map.
//!
//! Isolated unwrap failures show up as single pixels that are off by a whole
//! number of periods. A small median window removes them while keeping the
//! phase ramp intact. Only valid pixels take part: invalid centres stay
//! invalid and invalid neighbours are skipped. The window is clipped at the
//! image border.
use crate::error::StereoError;
use crate::image::MaskedImageF32;
use crate::parallel::map_rows;

/// Smallest accepted median window.
pub const MIN_MEDIAN_WINDOW: usize = 3;

pub(crate) fn check_median_window(window: usize) -> Result<usize, StereoError> {
    if window < MIN_MEDIAN_WINDOW {
        Err(StereoError::InvalidWindowSize {
            size: window,
            minimum: MIN_MEDIAN_WINDOW,
        })
    } else if window % 2 == 0 {
        Err(StereoError::EvenWindowSize { size: window })
    } else {
        Ok(window)
    }
}

/// Median-filter `map` with an odd `window × window` neighbourhood.
pub fn median_filter_phase(
    map: &MaskedImageF32,
    window: usize,
) -> Result<MaskedImageF32, StereoError> {
    let window = check_median_window(window)?;
    let (w, h) = map.dims();
    let r = window / 2;

    let rows = map_rows(h, |y| {
        let y0 = y.saturating_sub(r);
        let y1 = (y + r).min(h - 1);
        let mut scratch = Vec::with_capacity(window * window);
        (0..w)
            .map(|x| {
                if !map.is_valid(x, y) {
                    return None;
                }
                let x0 = x.saturating_sub(r);
                let x1 = (x + r).min(w - 1);
                scratch.clear();
                for yy in y0..=y1 {
                    let (vals, valid) = map.row(yy);
                    scratch.extend(
                        (x0..=x1)
                            .filter(|&xx| valid[xx])
                            .map(|xx| vals[xx]),
                    );
                }
                let mid = scratch.len() / 2;
                let (_, median, _) = scratch.select_nth_unstable_by(mid, f32::total_cmp);
                Some(*median)
            })
            .collect()
    });
    Ok(MaskedImageF32::from_rows(w, h, rows))
}
