//! Where the dataset document lives.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::Route;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATASET: &str = "buses.json";

/// A dataset location: a URL or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Http { url: String },
    File { path: PathBuf },
}

impl DatasetSource {
    /// Interpret a location string. `http://` and `https://` prefixes
    /// select a URL; anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DatasetSource::Http {
                url: location.to_string(),
            }
        } else {
            DatasetSource::File {
                path: PathBuf::from(location),
            }
        }
    }
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource::File {
            path: PathBuf::from(DEFAULT_DATASET),
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Http { url } => f.write_str(url),
            DatasetSource::File { path } => write!(f, "{}", path.display()),
        }
    }
}

/// Accepted document shapes: `{"buses": [...]}` or a bare route array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DatasetDocument {
    Wrapped { buses: Vec<Route> },
    Bare(Vec<Route>),
}

impl DatasetDocument {
    pub(crate) fn into_routes(self) -> Vec<Route> {
        match self {
            DatasetDocument::Wrapped { buses } => buses,
            DatasetDocument::Bare(routes) => routes,
        }
    }
}
