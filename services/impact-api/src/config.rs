//! Service configuration: command line, environment and the catalog file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use boundaries::{BoundarySource, LoaderConfig, DEFAULT_BOUNDARIES_URL};
use clap::Parser;
use climate_common::{ClimateError, ClimateResult, WET_BULB};
use grid_processor::config::DEFAULT_STORE_PATH;
use grid_processor::GridSourceConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Climate impact API server
#[derive(Parser, Debug, Clone)]
#[command(name = "impact-api")]
#[command(about = "Ranks countries by the change of a climate metric over a date range")]
pub struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:5000", env = "IMPACT_LISTEN_ADDR")]
    pub listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Number of tokio worker threads
    #[arg(long, env = "IMPACT_WORKER_THREADS")]
    pub worker_threads: Option<usize>,

    /// Threads in the per-country reduction pool (default: available parallelism)
    #[arg(long, env = "IMPACT_REDUCER_THREADS")]
    pub reducer_threads: Option<usize>,

    /// Root of the Zarr grid store
    #[arg(long, default_value = DEFAULT_STORE_PATH, env = "GRID_STORE_PATH")]
    pub grid_store: PathBuf,

    /// URL of the country boundary GeoJSON
    #[arg(long, default_value = DEFAULT_BOUNDARIES_URL, env = "BOUNDARIES_URL")]
    pub boundaries_url: String,

    /// Local boundary GeoJSON, used instead of the URL when set
    #[arg(long, env = "BOUNDARIES_PATH")]
    pub boundaries_path: Option<PathBuf>,

    /// Boundary fetch retries after the first attempt
    #[arg(long, default_value_t = 3, env = "BOUNDARY_RETRIES")]
    pub boundary_retries: u32,

    /// Catalog of servable variables, models and scenarios
    #[arg(long, default_value = "config/catalog.yaml", env = "CATALOG_PATH")]
    pub catalog: PathBuf,
}

impl Args {
    pub fn grid_source_config(&self) -> GridSourceConfig {
        GridSourceConfig {
            store_path: self.grid_store.clone(),
            ..GridSourceConfig::from_env()
        }
    }

    pub fn loader_config(&self) -> LoaderConfig {
        let source = match &self.boundaries_path {
            Some(path) => BoundarySource::File(path.clone()),
            None => BoundarySource::Url(self.boundaries_url.clone()),
        };
        LoaderConfig {
            source,
            max_retries: self.boundary_retries,
            ..LoaderConfig::default()
        }
    }
}

/// Defaults applied to absent query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDefaults {
    pub metric: String,
    pub model: String,
    pub scenario: String,
    pub start_date: String,
    pub end_date: String,
    pub quality: u32,
    pub top_n: usize,
    pub heatmap_date: String,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            metric: WET_BULB.to_string(),
            model: "ACCESS-CM2".to_string(),
            scenario: "historical".to_string(),
            start_date: "1950-01-01".to_string(),
            end_date: "1951-01-01".to_string(),
            quality: 0,
            top_n: 5,
            heatmap_date: "1950-01-01".to_string(),
        }
    }
}

/// Servable variables, models and scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub variables: Vec<String>,
    pub models: Vec<String>,
    pub scenarios: Vec<String>,
    #[serde(default)]
    pub defaults: RequestDefaults,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            variables: strings(&[
                "hurs", "huss", "pr", "rlds", "rsds", "sfcWind", "tas", "tasmax", "tasmin",
            ]),
            models: strings(&[
                "CESM2",
                "ACCESS-CM2",
                "CMCC-CM2-SR5",
                "INM-CM5-0",
                "CanESM5",
                "MRI-ESM2-0",
                "MPI-ESM1-2-HR",
                "MIROC6",
                "IPSL-CM6A-LR",
                "GFDL-ESM4",
            ]),
            scenarios: strings(&["historical", "ssp585", "ssp370", "ssp245"]),
            defaults: RequestDefaults::default(),
        }
    }
}

impl CatalogConfig {
    /// Load the catalog from a YAML file, falling back to built-in defaults
    /// when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                path = %path.display(),
                "Catalog file does not exist, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let catalog: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

        info!(
            variables = catalog.variables.len(),
            models = catalog.models.len(),
            scenarios = catalog.scenarios.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    pub fn check_metric(&self, metric: &str) -> ClimateResult<()> {
        if metric == WET_BULB || self.variables.iter().any(|v| v == metric) {
            Ok(())
        } else {
            Err(unknown("metric", metric))
        }
    }

    pub fn check_model(&self, model: &str) -> ClimateResult<()> {
        if self.models.iter().any(|m| m == model) {
            Ok(())
        } else {
            Err(unknown("model", model))
        }
    }

    pub fn check_scenario(&self, scenario: &str) -> ClimateResult<()> {
        if self.scenarios.iter().any(|s| s == scenario) {
            Ok(())
        } else {
            Err(unknown("scenario", scenario))
        }
    }
}

fn unknown(param: &str, value: &str) -> ClimateError {
    ClimateError::invalid_parameter(param, format!("unknown {} '{}'", param, value))
}
