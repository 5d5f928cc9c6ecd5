//! In-memory route store.

use crate::domain::{DomainError, Route, RouteId};

/// Holds the loaded routes for the lifetime of the viewer.
///
/// Filled once from the dataset loader and read-only afterwards; the only
/// mutation is a wholesale [`set`](Self::set).
#[derive(Debug, Clone, Default)]
pub struct RouteRepository {
    routes: Vec<Route>,
}

impl RouteRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `routes`.
    pub fn with_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Replace the entire contents.
    pub fn set(&mut self, routes: Vec<Route>) {
        self.routes = routes;
    }

    /// All routes in load order.
    pub fn all(&self) -> &[Route] {
        &self.routes
    }

    /// Look up a route by id.
    pub fn find_by_id(&self, id: RouteId) -> Result<&Route, DomainError> {
        self.routes
            .iter()
            .find(|r| r.id == id)
            .ok_or(DomainError::RouteNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
