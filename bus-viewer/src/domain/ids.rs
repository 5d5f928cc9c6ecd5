//! Route and stop identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a route, unique within a loaded dataset.
///
/// # Examples
///
/// ```
/// use bus_viewer::domain::RouteId;
///
/// let id = RouteId(3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub i64);

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stop number, unique within its route.
///
/// This is the stable selection key for a stop. It is not an index into
/// the route's stop list and need not be contiguous.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopNo(pub i64);

impl fmt::Debug for StopNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopNo({})", self.0)
    }
}

impl fmt::Display for StopNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stop addressed across the whole dataset: (route, stop number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StopRef {
    pub route_id: RouteId,
    pub stop_no: StopNo,
}

impl StopRef {
    pub fn new(route_id: RouteId, stop_no: StopNo) -> Self {
        Self { route_id, stop_no }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(RouteId(12).to_string(), "12");
        assert_eq!(StopNo(4).to_string(), "4");
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", RouteId(1)), "RouteId(1)");
        assert_eq!(format!("{:?}", StopNo(2)), "StopNo(2)");
    }

    #[test]
    fn serde_transparent() {
        let json = serde_json::to_string(&StopRef::new(RouteId(2), StopNo(3))).unwrap();
        assert_eq!(json, r#"{"route_id":2,"stop_no":3}"#);

        let id: RouteId = serde_json::from_str("7").unwrap();
        assert_eq!(id, RouteId(7));
    }
}
