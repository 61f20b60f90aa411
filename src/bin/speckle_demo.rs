use fringe_stereo::config::speckle_demo;
use fringe_stereo::image::io::{
    load_grayscale_image, save_grayscale_u8, save_masked_f32, write_json_file, GrayImageU8,
};
use fringe_stereo::speckle::{BitMap, SpeckleMatcher};
use fringe_stereo::stereo::MatchStats;
use serde::Serialize;
use std::env;
use std::path::Path;
use std::time::Instant;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeckleSummary {
    width: usize,
    height: usize,
    win_size: usize,
    max_disparity: usize,
    left_ones: usize,
    right_ones: usize,
    stats: MatchStats,
    disparity_range: Option<(f32, f32)>,
    elapsed_ms: f64,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = speckle_demo::load_config(Path::new(&config_path))?;

    let left = load_grayscale_image(&config.left)?;
    let right = load_grayscale_image(&config.right)?;
    let matcher = SpeckleMatcher::new(config.matcher.clone()).map_err(|e| e.to_string())?;

    let start = Instant::now();
    let (left_bits, right_bits) = matcher
        .binarize_pair(&left.as_view(), &right.as_view())
        .map_err(|e| e.to_string())?;
    let disparity = matcher
        .match_bitmaps(&left_bits, &right_bits)
        .map_err(|e| e.to_string())?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    if let Some(path) = &config.output.left_bitmap {
        save_grayscale_u8(&bitmap_image(&left_bits), path)?;
    }
    if let Some(path) = &config.output.right_bitmap {
        save_grayscale_u8(&bitmap_image(&right_bits), path)?;
    }
    save_masked_f32(&disparity, &config.output.disparity_image)?;

    let summary = SpeckleSummary {
        width: left.width(),
        height: left.height(),
        win_size: config.matcher.win_size,
        max_disparity: config.matcher.max_disparity,
        left_ones: left_bits.ones(),
        right_ones: right_bits.ones(),
        stats: MatchStats::from_disparity(&disparity),
        disparity_range: disparity.valid_range(),
        elapsed_ms,
    };
    write_json_file(&config.output.result_json, &summary)?;

    println!(
        "Speckle disparity {}x{} in {:.2} ms, saved to {}",
        summary.width,
        summary.height,
        elapsed_ms,
        config.output.disparity_image.display()
    );
    Ok(())
}

fn bitmap_image(bits: &BitMap) -> GrayImageU8 {
    let data = bits.data.iter().map(|&b| b * 255).collect();
    GrayImageU8::new(bits.w, bits.h, data)
}

fn usage() -> String {
    "Usage: speckle_demo <config.json>".to_string()
}
