use crate::pipeline::StereoParams;
use crate::stereo::ValidRegion;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct PhaseDemoConfig {
    pub left: CameraFrames,
    pub right: CameraFrames,
    #[serde(default)]
    pub params: StereoParams,
    /// Valid regions of the pre-rectified frames; whole frame when omitted.
    #[serde(default)]
    pub regions: Option<RegionPair>,
    pub output: PhaseDemoOutputConfig,
}

/// Frame paths of one camera, one set per fringe frequency, finest first.
#[derive(Debug, Deserialize)]
pub struct CameraFrames {
    pub sets: Vec<Vec<PathBuf>>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct RegionPair {
    pub left: ValidRegion,
    pub right: ValidRegion,
}

#[derive(Debug, Deserialize)]
pub struct PhaseDemoOutputConfig {
    pub left_phase_image: PathBuf,
    pub right_phase_image: PathBuf,
    pub disparity_image: PathBuf,
    pub result_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<PhaseDemoConfig, String> {
    super::read_json(path)
}
