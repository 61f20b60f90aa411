//! Closed-form wrapped-phase decoding from N phase-shifted frames.
//!
//! Frames follow `I_k = A + B·cos(φ + δ_k)`:
//! - three-step: `δ = (−2π/3, 0, +2π/3)`, `y = √3·(I1 − I3)`,
//!   `x = 2·I2 − I1 − I3`, modulation `b = (2/3)·√(x² + y²)`;
//! - four-step: `δ = (0, π/2, π, 3π/2)`, `y = I4 − I2`, `x = I1 − I3`,
//!   modulation `b = ½·√(x² + y²)`.
//!
//! The phase is `atan2(y, x)` in (−π, π]. Pixels whose modulation falls below
//! the configured threshold (shadows, dark surfaces, saturation) are marked
//! invalid. Every output pixel depends only on the same pixel of the inputs,
//! so rows are decoded independently.
use super::config::{PhaseSettings, ShiftSteps};
use crate::error::{check_dims, StereoError};
use crate::image::{ImageF32, ImageU8, ImageView, MaskedImageF32, RelativePhaseMap};
use crate::parallel::map_rows;
use log::{debug, warn};
use std::f32::consts::PI;
use std::time::Instant;

const ROOT_THREE: f32 = 1.732_050_8;
const TWO_THIRDS: f32 = 2.0 / 3.0;

/// Quadrature pair and modulation `(y, x, b)` for one pixel's samples.
///
/// `samples` must hold exactly `steps.frame_count()` intensities.
#[inline]
pub fn quadrature(steps: ShiftSteps, samples: &[f32]) -> (f32, f32, f32) {
    match steps {
        ShiftSteps::Three => {
            let y = ROOT_THREE * (samples[0] - samples[2]);
            let x = 2.0 * samples[1] - samples[0] - samples[2];
            (y, x, TWO_THIRDS * x.hypot(y))
        }
        ShiftSteps::Four => {
            let y = samples[3] - samples[1];
            let x = samples[0] - samples[2];
            (y, x, 0.5 * x.hypot(y))
        }
    }
}

/// `atan2(y, x)` folded into (−π, π]; a signed-zero `y` never yields −π.
#[inline]
pub fn principal_phase(y: f32, x: f32) -> f32 {
    let phase = y.atan2(x);
    if phase <= -PI {
        PI
    } else {
        phase
    }
}

/// Decode a relative (wrapped) phase map from one frequency's frame set.
pub fn decode_relative_phase(
    frames: &[ImageU8<'_>],
    settings: &PhaseSettings,
) -> Result<RelativePhaseMap, StereoError> {
    let steps = settings.config().shift_steps;
    let threshold = settings.config().modulation_threshold;
    let (w, h) = check_frame_set(frames, steps)?;
    let start = Instant::now();

    let rows = map_rows(h, |y| {
        let lines: Vec<&[u8]> = frames.iter().map(|f| f.row(y)).collect();
        let mut samples = [0.0f32; 4];
        (0..w)
            .map(|x| {
                for (s, line) in samples.iter_mut().zip(&lines) {
                    *s = line[x] as f32;
                }
                let (qy, qx, b) = quadrature(steps, &samples[..lines.len()]);
                (b >= threshold).then(|| principal_phase(qy, qx))
            })
            .collect()
    });
    let map = MaskedImageF32::from_rows(w, h, rows);

    let valid = map.valid_count();
    debug!(
        "decode_relative_phase steps={:?} w={} h={} valid={} threshold={:.2} elapsed_ms={:.3}",
        steps,
        w,
        h,
        valid,
        threshold,
        start.elapsed().as_secs_f64() * 1000.0
    );
    if valid == 0 && w * h > 0 {
        warn!("decode_relative_phase: every pixel fell below the modulation threshold");
    }
    Ok(map)
}

/// Per-pixel modulation amplitude, useful for picking a threshold.
pub fn modulation_map(frames: &[ImageU8<'_>], steps: ShiftSteps) -> Result<ImageF32, StereoError> {
    let (w, h) = check_frame_set(frames, steps)?;
    let rows = map_rows(h, |y| {
        let lines: Vec<&[u8]> = frames.iter().map(|f| f.row(y)).collect();
        let mut samples = [0.0f32; 4];
        (0..w)
            .map(|x| {
                for (s, line) in samples.iter_mut().zip(&lines) {
                    *s = line[x] as f32;
                }
                quadrature(steps, &samples[..lines.len()]).2
            })
            .collect::<Vec<f32>>()
    });
    Ok(ImageF32::from_rows(w, rows))
}

fn check_frame_set(frames: &[ImageU8<'_>], steps: ShiftSteps) -> Result<(usize, usize), StereoError> {
    let expected = steps.frame_count();
    if frames.len() != expected {
        return Err(StereoError::InvalidInputCount {
            expected,
            found: frames.len(),
        });
    }
    let dims = frames[0].dims();
    for frame in &frames[1..] {
        check_dims(dims, frame.dims())?;
    }
    Ok(dims)
}
