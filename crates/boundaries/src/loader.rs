//! Background loading of the country boundary set.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::country::CountrySet;
use crate::error::{BoundaryError, Result};
use crate::store::BoundaryStore;

/// Natural Earth 1:110m admin-0 countries.
pub const DEFAULT_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/datasets/geo-boundaries-world-110m/master/countries.geojson";

/// Where the boundary GeoJSON comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundarySource {
    File(PathBuf),
    Url(String),
}

impl std::fmt::Display for BoundarySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "file:{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Configuration for the boundary loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub source: BoundarySource,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Initial retry delay (doubles each retry)
    pub initial_retry_delay: Duration,
    /// Maximum retry delay
    pub max_retry_delay: Duration,
    /// HTTP request timeout
    pub request_timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            source: BoundarySource::Url(DEFAULT_BOUNDARIES_URL.to_string()),
            max_retries: 3,
            initial_retry_delay: Duration::from_secs(2),
            max_retry_delay: Duration::from_secs(60),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Fetches and parses the boundary set with retry.
pub struct BoundaryLoader {
    client: Client,
    config: LoaderConfig,
}

impl BoundaryLoader {
    pub fn new(config: LoaderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Fetch and parse, retrying fetch failures with exponential backoff.
    ///
    /// A document that fetches but does not parse is not retried.
    #[instrument(skip(self), fields(source = %self.config.source))]
    pub async fn load(&self) -> Result<CountrySet> {
        let mut attempt = 0;
        let mut delay = self.config.initial_retry_delay;

        loop {
            attempt += 1;
            match self.fetch().await {
                Ok(raw) => {
                    let set = CountrySet::from_geojson(raw)?;
                    info!(
                        countries = set.len(),
                        attempts = attempt,
                        "Loaded country boundaries"
                    );
                    return Ok(set);
                }
                Err(e) => {
                    if attempt > self.config.max_retries {
                        return Err(BoundaryError::RetriesExhausted {
                            attempts: attempt,
                            last: e.to_string(),
                        });
                    }

                    warn!(
                        error = %e,
                        retry = attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Boundary fetch failed, retrying"
                    );

                    // Wait before retry
                    tokio::time::sleep(delay).await;

                    // Exponential backoff
                    delay = std::cmp::min(delay * 2, self.config.max_retry_delay);
                }
            }
        }
    }

    async fn fetch(&self) -> Result<Bytes> {
        match &self.config.source {
            BoundarySource::File(path) => Ok(Bytes::from(tokio::fs::read(path).await?)),
            BoundarySource::Url(url) => {
                let response = self.client.get(url).send().await?.error_for_status()?;
                Ok(response.bytes().await?)
            }
        }
    }
}

/// Load in the background and publish into `store` once.
///
/// On failure the error is logged and the store stays unready.
pub fn spawn_loader(loader: BoundaryLoader, store: Arc<BoundaryStore>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = match loader.load().await {
            Ok(set) => store.publish(set),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            error!(error = %e, source = %loader.config().source, "Country boundaries unavailable");
        }
    })
}
