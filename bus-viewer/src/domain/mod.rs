//! Domain types for the bus route viewer.
//!
//! Routes and stops as loaded from the dataset, plus the identifiers used
//! to address them. Loaded datasets are checked with [`validate_routes`],
//! so code that receives a repository can rely on its invariants.

mod error;
mod ids;
mod route;

pub use error::DomainError;
pub use ids::{RouteId, StopNo, StopRef};
pub use route::{Route, Stop, validate_routes};

#[cfg(test)]
pub(crate) use route::test_support;
