use fringe_stereo::image::{ImageU8, MaskedImageF32};
use fringe_stereo::speckle::BitMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{PI, TAU};

/// Mean intensity of the synthetic fringes.
pub const FRINGE_OFFSET: f64 = 128.0;
/// Modulation amplitude of the synthetic fringes.
pub const FRINGE_AMPLITUDE: f64 = 100.0;

/// Phase shifts of an `n`-step sequence (3 or 4 frames).
pub fn phase_shifts(steps: usize) -> Vec<f64> {
    match steps {
        3 => vec![-TAU / 3.0, 0.0, TAU / 3.0],
        4 => vec![0.0, PI / 2.0, PI, 1.5 * PI],
        _ => panic!("unsupported step count {steps}"),
    }
}

/// Wrap into (−π, π].
pub fn wrap(phase: f64) -> f64 {
    let w = phase - TAU * (phase / TAU).round();
    if w <= -PI {
        w + TAU
    } else {
        w
    }
}

/// Phase-shifted vertical fringes `A + B·cos(φ(x) + δₙ)`, one buffer per step.
pub fn fringe_frames<F>(width: usize, height: usize, steps: usize, phase: F) -> Vec<Vec<u8>>
where
    F: Fn(usize) -> f64,
{
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    phase_shifts(steps)
        .into_iter()
        .map(|shift| {
            let line: Vec<u8> = (0..width)
                .map(|x| {
                    let v = FRINGE_OFFSET + FRINGE_AMPLITUDE * (phase(x) + shift).cos();
                    v.round().clamp(0.0, 255.0) as u8
                })
                .collect();
            line.repeat(height)
        })
        .collect()
}

/// Fringe frame sets of one camera for three frequencies (finest first).
/// `position(x)` is the normalised projector coordinate seen at column `x`.
pub fn camera_frames<F>(
    width: usize,
    height: usize,
    steps: usize,
    freqs: [f64; 3],
    position: F,
) -> Vec<Vec<Vec<u8>>>
where
    F: Fn(usize) -> f64 + Copy,
{
    freqs
        .iter()
        .map(|&f| fringe_frames(width, height, steps, move |x| TAU * f * position(x)))
        .collect()
}

/// Borrow nested frame buffers as `ImageU8` views.
pub fn views(sets: &[Vec<Vec<u8>>], width: usize, height: usize) -> Vec<Vec<ImageU8<'_>>> {
    sets.iter()
        .map(|set| {
            set.iter()
                .map(|buf| ImageU8::packed(width, height, buf))
                .collect()
        })
        .collect()
}

/// Exact wrapped phase map of `2π·freq·position(x)`.
pub fn wrapped_phase_map<F>(width: usize, height: usize, freq: f64, position: F) -> MaskedImageF32
where
    F: Fn(usize) -> f64,
{
    let line: Vec<Option<f32>> = (0..width)
        .map(|x| Some(wrap(TAU * freq * position(x)) as f32))
        .collect();
    MaskedImageF32::from_rows(width, height, vec![line; height])
}

/// Random 0/1 bitmap, reproducible from `seed`.
pub fn random_bitmap(width: usize, height: usize, seed: u64) -> BitMap {
    let mut rng = StdRng::seed_from_u64(seed);
    let bits = (0..width * height)
        .map(|_| rng.random::<bool>() as u8)
        .collect();
    BitMap::from_bits(width, height, bits)
}

/// Columns `[x0, x0 + width)` of `src`.
pub fn crop_columns(src: &BitMap, x0: usize, width: usize) -> BitMap {
    let mut out = BitMap::new(width, src.h);
    for y in 0..src.h {
        for x in 0..width {
            out.set(x, y, src.get(x0 + x, y) != 0);
        }
    }
    out
}

/// Random speckle intensities, reproducible from `seed`.
pub fn speckle_u8(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height).map(|_| rng.random::<u8>()).collect()
}
