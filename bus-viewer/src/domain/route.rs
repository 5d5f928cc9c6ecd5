//! Routes and their stops.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::ids::{RouteId, StopNo};

/// One waypoint on a route.
///
/// Times are kept as the display strings found in the dataset; they are
/// never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub no: StopNo,
    pub name: String,
    pub arrival: String,
    pub departure: String,
}

impl Stop {
    pub fn new(
        no: i64,
        name: impl Into<String>,
        arrival: impl Into<String>,
        departure: impl Into<String>,
    ) -> Self {
        Self {
            no: StopNo(no),
            name: name.into(),
            arrival: arrival.into(),
            departure: departure.into(),
        }
    }
}

/// A bus service with an ordered list of stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub from: String,
    pub to: String,
    /// Travel time, e.g. "1 hr 30 min".
    pub time: String,
    pub depart: String,
    pub arrive: String,
    /// Stops in journey order.
    pub stops: Vec<Stop>,
}

impl Route {
    /// Position of the stop with number `no` in journey order.
    pub fn stop_position(&self, no: StopNo) -> Option<usize> {
        self.stops.iter().position(|s| s.no == no)
    }

    /// Look up a stop by number.
    pub fn stop(&self, no: StopNo) -> Result<&Stop, DomainError> {
        self.stops
            .iter()
            .find(|s| s.no == no)
            .ok_or(DomainError::StopNotFound {
                route: self.id,
                stop: no,
            })
    }

    /// The neighbour highlighted alongside a selected stop.
    ///
    /// The previous stop in journey order wins whenever there is one; the
    /// next stop is only used for the first stop. Returns `None` for a
    /// single-stop route.
    pub fn nearest_stop(&self, no: StopNo) -> Result<Option<&Stop>, DomainError> {
        let idx = self.stop_position(no).ok_or(DomainError::StopNotFound {
            route: self.id,
            stop: no,
        })?;

        let previous = idx.checked_sub(1).and_then(|i| self.stops.get(i));
        Ok(previous.or_else(|| self.stops.get(idx + 1)))
    }

    /// Stop names joined in journey order, e.g. "A → B → C".
    pub fn stops_summary(&self) -> String {
        self.stops
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

/// Check the dataset invariants: at least one route, every route has
/// stops, route ids are unique, and stop numbers are unique per route.
pub fn validate_routes(routes: &[Route]) -> Result<(), DomainError> {
    if routes.is_empty() {
        return Err(DomainError::EmptyDataset);
    }

    let mut ids = HashSet::new();
    for route in routes {
        if !ids.insert(route.id) {
            return Err(DomainError::DuplicateRouteId(route.id));
        }
        if route.stops.is_empty() {
            return Err(DomainError::RouteWithoutStops(route.id));
        }

        let mut stop_nos = HashSet::new();
        for stop in &route.stops {
            if !stop_nos.insert(stop.no) {
                return Err(DomainError::DuplicateStopNo {
                    route: route.id,
                    stop: stop.no,
                });
            }
        }
    }

    Ok(())
}
