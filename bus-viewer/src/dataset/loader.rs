//! Dataset loader with embedded fallback.

use std::fmt;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::{Route, validate_routes};

use super::embedded::embedded_routes;
use super::error::DatasetError;
use super::source::{DatasetDocument, DatasetSource};

/// Default fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the loaded routes came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetOrigin {
    /// Loaded from the configured source.
    Source(String),
    /// The source failed; the embedded routes are in use.
    Embedded,
}

impl DatasetOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DatasetOrigin::Embedded)
    }
}

impl fmt::Display for DatasetOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetOrigin::Source(location) => f.write_str(location),
            DatasetOrigin::Embedded => f.write_str("built-in sample routes"),
        }
    }
}

/// Routes produced by [`DatasetLoader::load`]. Never empty.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub routes: Vec<Route>,
    pub origin: DatasetOrigin,
}

/// Fetches the dataset once at startup.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    http: reqwest::Client,
    source: DatasetSource,
    timeout: Duration,
}

impl DatasetLoader {
    /// Create a loader for `source`. `timeout` bounds the whole fetch,
    /// including reading the body.
    pub fn new(source: DatasetSource, timeout: Duration) -> Result<Self, DatasetError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            source,
            timeout,
        })
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    /// Load the routes, substituting the embedded dataset on any failure.
    ///
    /// The failure is only logged; callers always get a usable dataset.
    pub async fn load(&self) -> LoadedDataset {
        match self.try_load().await {
            Ok(routes) => {
                info!(source = %self.source, routes = routes.len(), "loaded dataset");
                LoadedDataset {
                    routes,
                    origin: DatasetOrigin::Source(self.source.to_string()),
                }
            }
            Err(e) => {
                warn!(
                    source = %self.source,
                    error = %e,
                    "could not load dataset, falling back to embedded routes"
                );
                LoadedDataset {
                    routes: embedded_routes(),
                    origin: DatasetOrigin::Embedded,
                }
            }
        }
    }

    /// Fetch, parse and validate the dataset without falling back.
    pub async fn try_load(&self) -> Result<Vec<Route>, DatasetError> {
        let body = tokio::time::timeout(self.timeout, self.fetch())
            .await
            .map_err(|_| DatasetError::Timeout(self.timeout))??;

        parse_document(&body)
    }

    async fn fetch(&self) -> Result<String, DatasetError> {
        match &self.source {
            DatasetSource::Http { url } => {
                let response = self.http.get(url).send().await?;
                let status = response.status();

                if !status.is_success() {
                    return Err(DatasetError::Status {
                        status: status.as_u16(),
                    });
                }

                Ok(response.text().await?)
            }
            DatasetSource::File { path } => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| DatasetError::Io {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })
            }
        }
    }
}

/// Parse a dataset document and check its invariants.
///
/// Accepts `{"buses": [...]}` or a bare array of routes.
pub fn parse_document(body: &str) -> Result<Vec<Route>, DatasetError> {
    let document: DatasetDocument =
        serde_json::from_str(body).map_err(|e| DatasetError::Json {
            message: e.to_string(),
        })?;

    let routes = document.into_routes();
    validate_routes(&routes)?;

    Ok(routes)
}
