use crate::speckle::SpeckleConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct SpeckleDemoConfig {
    pub left: PathBuf,
    pub right: PathBuf,
    #[serde(default)]
    pub matcher: SpeckleConfig,
    pub output: SpeckleDemoOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct SpeckleDemoOutputConfig {
    pub disparity_image: PathBuf,
    /// Optional dumps of the binarized left and right descriptors.
    #[serde(default)]
    pub left_bitmap: Option<PathBuf>,
    #[serde(default)]
    pub right_bitmap: Option<PathBuf>,
    pub result_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<SpeckleDemoConfig, String> {
    super::read_json(path)
}
