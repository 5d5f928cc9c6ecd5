//! Application state for the web layer.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::RwLock;

use crate::dataset::{DatasetOrigin, LoadedDataset};
use crate::repository::RouteRepository;
use crate::selection::SelectionTracker;

/// How the current dataset was obtained.
#[derive(Debug, Clone)]
pub struct DatasetInfo {
    pub origin: DatasetOrigin,
    pub loaded_at: DateTime<Local>,
}

/// Shared application state.
///
/// The repository is read-only once the server starts. The selection is the
/// viewer session's single highlighted stop.
#[derive(Clone)]
pub struct AppState {
    /// Loaded routes
    pub routes: Arc<RouteRepository>,

    /// Current stop selection
    pub selection: Arc<RwLock<SelectionTracker>>,

    /// Dataset provenance, shown on the about page
    pub dataset: Arc<DatasetInfo>,
}

impl AppState {
    /// Create a new app state from a loaded dataset.
    pub fn new(dataset: LoadedDataset) -> Self {
        let mut repository = RouteRepository::new();
        repository.set(dataset.routes);

        Self {
            routes: Arc::new(repository),
            selection: Arc::new(RwLock::new(SelectionTracker::new())),
            dataset: Arc::new(DatasetInfo {
                origin: dataset.origin,
                loaded_at: Local::now(),
            }),
        }
    }
}
