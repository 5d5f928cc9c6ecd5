//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Route, Stop, StopRef};
use crate::marker::Point;
use crate::selection::{Selection, SelectionOutcome};

/// Free-text route search.
#[derive(Debug, Deserialize)]
pub struct SearchRoutesRequest {
    /// Query text; blank or missing means no filter
    pub q: Option<String>,
}

/// Exact route-name filter.
#[derive(Debug, Deserialize)]
pub struct FilterRoutesRequest {
    /// Route name, matched case-sensitively
    pub name: String,
}

/// Request to select a stop.
#[derive(Debug, Deserialize)]
pub struct SelectStopRequest {
    pub route_id: i64,
    pub stop_no: i64,
}

/// Marker replay request.
#[derive(Debug, Deserialize)]
pub struct MarkerRequest {
    /// Animation frames to replay from a fresh start
    pub frame: Option<u32>,
}

/// A route in API responses.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub id: i64,
    pub name: String,
    pub from: String,
    pub to: String,
    pub time: String,
    pub depart: String,
    pub arrive: String,
    pub stops: Vec<StopResult>,
}

/// A stop in API responses.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub no: i64,
    pub name: String,
    pub arrival: String,
    pub departure: String,
}

/// Response for route search and filter.
#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub routes: Vec<RouteResult>,
}

/// Response for a successful stop selection.
#[derive(Debug, Serialize)]
pub struct SelectStopResponse {
    pub selection: Selection,

    /// Neighbour to highlight alongside the selection
    pub nearest: Option<StopRef>,
}

/// Marker position along a route's schematic.
#[derive(Debug, Serialize)]
pub struct MarkerResponse {
    pub route_id: i64,
    pub frame: u32,
    /// Frames in one out-and-back cycle
    pub period: u32,
    pub position: Point,
    pub path: Vec<Point>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl RouteResult {
    /// Create from a domain Route.
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id.0,
            name: route.name.clone(),
            from: route.from.clone(),
            to: route.to.clone(),
            time: route.time.clone(),
            depart: route.depart.clone(),
            arrive: route.arrive.clone(),
            stops: route.stops.iter().map(StopResult::from_stop).collect(),
        }
    }
}

impl StopResult {
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            no: stop.no.0,
            name: stop.name.clone(),
            arrival: stop.arrival.clone(),
            departure: stop.departure.clone(),
        }
    }
}

impl RouteListResponse {
    pub fn from_routes(routes: &[&Route]) -> Self {
        Self {
            routes: routes.iter().map(|r| RouteResult::from_route(r)).collect(),
        }
    }
}

impl From<SelectionOutcome> for SelectStopResponse {
    fn from(outcome: SelectionOutcome) -> Self {
        Self {
            selection: outcome.selection,
            nearest: outcome.nearest,
        }
    }
}
