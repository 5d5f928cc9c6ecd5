//! Domain error types.
//!
//! These errors cover lookups that miss and datasets that break the
//! route/stop invariants. They are distinct from fetch/IO errors.

use super::ids::{RouteId, StopNo};

/// Domain-level errors for lookups and dataset validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// No route with this id is loaded
    #[error("route {0} not found")]
    RouteNotFound(RouteId),

    /// The route exists but has no stop with this number
    #[error("stop {stop} not found on route {route}")]
    StopNotFound { route: RouteId, stop: StopNo },

    /// Dataset contains no routes
    #[error("dataset contains no routes")]
    EmptyDataset,

    /// Two routes share an id
    #[error("duplicate route id {0}")]
    DuplicateRouteId(RouteId),

    /// A route has an empty stop list
    #[error("route {0} has no stops")]
    RouteWithoutStops(RouteId),

    /// Two stops on one route share a number
    #[error("duplicate stop number {stop} on route {route}")]
    DuplicateStopNo { route: RouteId, stop: StopNo },
}

impl DomainError {
    /// Whether this is a failed lookup rather than a broken dataset.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::RouteNotFound(_) | DomainError::StopNotFound { .. }
        )
    }
}
