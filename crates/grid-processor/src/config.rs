//! Configuration for grid store access.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::downsample::DownsampleMethod;

/// Default location of the Zarr store.
pub const DEFAULT_STORE_PATH: &str = "./data/nex-gddp-cmip6.zarr";

/// Configuration for the Zarr grid source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSourceConfig {
    /// Root directory of the Zarr store.
    pub store_path: PathBuf,

    /// Method used to build a missing quality level from level 0.
    pub fallback_downsample: DownsampleMethod,
}

impl Default for GridSourceConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            fallback_downsample: DownsampleMethod::Mean,
        }
    }
}

impl GridSourceConfig {
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GRID_STORE_PATH") {
            config.store_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("GRID_FALLBACK_DOWNSAMPLE") {
            config.fallback_downsample = DownsampleMethod::from_str(&val);
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.store_path.as_os_str().is_empty() {
            return Err("store_path must not be empty".to_string());
        }

        if !self.store_path.is_dir() {
            return Err(format!(
                "store_path {} is not a directory",
                self.store_path.display()
            ));
        }

        Ok(())
    }
}
