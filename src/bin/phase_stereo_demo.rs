use fringe_stereo::config::phase_demo::{self, CameraFrames};
use fringe_stereo::image::io::{load_frame_set, save_masked_f32, write_json_file, GrayImageU8};
use fringe_stereo::image::ImageU8;
use fringe_stereo::pipeline::{PhaseStereo, PreRectified};
use fringe_stereo::stereo::ValidRegion;
use nalgebra::Matrix4;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = phase_demo::load_config(Path::new(&config_path))?;

    let left = load_camera(&config.left)?;
    let right = load_camera(&config.right)?;
    let (width, height) = left
        .first()
        .and_then(|set| set.first())
        .map(|img| (img.width(), img.height()))
        .ok_or("Left camera has no frames")?;

    let stereo = PhaseStereo::new(config.params.clone()).map_err(|e| e.to_string())?;
    let rectifier = match config.regions {
        Some(pair) => {
            let (left_region, right_region) = ValidRegion::align_rows(pair.left, pair.right);
            PreRectified::new(left_region, right_region, Matrix4::identity())
        }
        None => PreRectified::full_frame(width, height),
    };
    let report = stereo
        .process(&views(&left), &views(&right), &rectifier)
        .map_err(|e| e.to_string())?;

    save_masked_f32(&report.left_phase, &config.output.left_phase_image)?;
    save_masked_f32(&report.right_phase, &config.output.right_phase_image)?;
    save_masked_f32(&report.disparity, &config.output.disparity_image)?;
    write_json_file(&config.output.result_json, &report.summary())?;

    println!(
        "Matched {} pixels ({} zeroed, {} invalid) in {:.2} ms",
        report.stats.matched, report.stats.zeroed, report.stats.invalid, report.timing.total_ms
    );
    println!(
        "Saved disparity to {}",
        config.output.disparity_image.display()
    );
    Ok(())
}

fn load_camera(frames: &CameraFrames) -> Result<Vec<Vec<GrayImageU8>>, String> {
    frames
        .sets
        .iter()
        .map(|set| load_frame_set(set.as_slice()))
        .collect()
}

fn views(sets: &[Vec<GrayImageU8>]) -> Vec<Vec<ImageU8<'_>>> {
    sets.iter()
        .map(|set| set.iter().map(GrayImageU8::as_view).collect())
        .collect()
}

fn usage() -> String {
    "Usage: phase_stereo_demo <config.json>".to_string()
}
