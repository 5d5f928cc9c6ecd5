//! Stop selection and nearest-stop highlighting.

use serde::Serialize;
use tracing::debug;

use crate::domain::{DomainError, Route, RouteId, StopNo, StopRef};
use crate::repository::RouteRepository;

/// The currently selected stop, if any.
///
/// At most one stop is selected across the whole dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub route_id: Option<RouteId>,
    pub stop_no: Option<StopNo>,
}

impl Selection {
    pub fn stop(&self) -> Option<StopRef> {
        Some(StopRef::new(self.route_id?, self.stop_no?))
    }
}

/// Result of a successful [`SelectionTracker::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionOutcome {
    pub selection: Selection,
    /// Neighbour highlighted alongside the selection.
    pub nearest: Option<StopRef>,
}

/// Tracks the viewer's stop selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    current: Selection,
    nearest: Option<StopRef>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `stop_no` on route `route_id`.
    ///
    /// Both must exist in `repository`; otherwise the error is returned and
    /// the previous selection is kept as it was.
    pub fn select(
        &mut self,
        repository: &RouteRepository,
        route_id: RouteId,
        stop_no: StopNo,
    ) -> Result<SelectionOutcome, DomainError> {
        let route = repository.find_by_id(route_id)?;
        self.select_on_route(route, stop_no)
    }

    /// Select `stop_no` on an already resolved `route`.
    ///
    /// An unknown stop is returned as an error and leaves the selection as
    /// it was.
    pub fn select_on_route(
        &mut self,
        route: &Route,
        stop_no: StopNo,
    ) -> Result<SelectionOutcome, DomainError> {
        let route_id = route.id;
        let nearest = route
            .nearest_stop(stop_no)?
            .map(|s| StopRef::new(route_id, s.no));

        self.current = Selection {
            route_id: Some(route_id),
            stop_no: Some(stop_no),
        };
        self.nearest = nearest;

        debug!(route = %route_id, stop = %stop_no, ?nearest, "stop selected");

        Ok(SelectionOutcome {
            selection: self.current,
            nearest,
        })
    }

    pub fn current(&self) -> Selection {
        self.current
    }

    pub fn nearest(&self) -> Option<StopRef> {
        self.nearest
    }

    pub fn is_selected(&self, route_id: RouteId, stop_no: StopNo) -> bool {
        self.current.stop() == Some(StopRef::new(route_id, stop_no))
    }

    pub fn is_nearest(&self, route_id: RouteId, stop_no: StopNo) -> bool {
        self.nearest == Some(StopRef::new(route_id, stop_no))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::embedded_routes;
    use crate::domain::test_support::route;

    fn abc_repo() -> RouteRepository {
        RouteRepository::with_routes(vec![
            route(1, "Bus 1", &[(1, "A"), (2, "B"), (3, "C")]),
            route(2, "Shuttle", &[(7, "Only")]),
        ])
    }

    fn nearest_no(outcome: &SelectionOutcome) -> Option<i64> {
        outcome.nearest.map(|s| s.stop_no.0)
    }

    #[test]
    fn select_on_resolved_route() {
        let repo = abc_repo();
        let mut tracker = SelectionTracker::new();
        let route = repo.find_by_id(RouteId(1)).unwrap();

        let outcome = tracker.select_on_route(route, StopNo(3)).unwrap();
        assert_eq!(nearest_no(&outcome), Some(2));
        assert!(tracker.is_selected(RouteId(1), StopNo(3)));

        let err = tracker.select_on_route(route, StopNo(9)).unwrap_err();
        assert!(err.is_not_found());
        assert!(tracker.is_selected(RouteId(1), StopNo(3)));
        assert!(tracker.is_nearest(RouteId(1), StopNo(2)));
    }

    #[test]
    fn starts_with_nothing_selected() {
        let tracker = SelectionTracker::new();
        assert_eq!(tracker.current(), Selection::default());
        assert!(tracker.nearest().is_none());
    }

    #[test]
    fn middle_stop_prefers_previous() {
        let repo = abc_repo();
        let mut tracker = SelectionTracker::new();

        let outcome = tracker.select(&repo, RouteId(1), StopNo(2)).unwrap();
        assert_eq!(nearest_no(&outcome), Some(1));
        assert_eq!(outcome.selection.stop(), Some(StopRef::new(RouteId(1), StopNo(2))));
    }

    #[test]
    fn first_and_last_stops() {
        let repo = abc_repo();
        let mut tracker = SelectionTracker::new();

        let first = tracker.select(&repo, RouteId(1), StopNo(1)).unwrap();
        assert_eq!(nearest_no(&first), Some(2));

        let last = tracker.select(&repo, RouteId(1), StopNo(3)).unwrap();
        assert_eq!(nearest_no(&last), Some(2));
    }

    #[test]
    fn single_stop_route_has_no_nearest() {
        let repo = abc_repo();
        let mut tracker = SelectionTracker::new();

        let outcome = tracker.select(&repo, RouteId(2), StopNo(7)).unwrap();
        assert!(outcome.nearest.is_none());
        assert!(tracker.nearest().is_none());
    }

    #[test]
    fn unknown_stop_leaves_selection_unchanged() {
        let repo = abc_repo();
        let mut tracker = SelectionTracker::new();
        tracker.select(&repo, RouteId(1), StopNo(2)).unwrap();

        let err = tracker.select(&repo, RouteId(1), StopNo(9999)).unwrap_err();
        assert_eq!(
            err,
            DomainError::StopNotFound {
                route: RouteId(1),
                stop: StopNo(9999)
            }
        );
        assert!(tracker.is_selected(RouteId(1), StopNo(2)));
        assert!(tracker.is_nearest(RouteId(1), StopNo(1)));
    }

    #[test]
    fn unknown_route_leaves_selection_unchanged() {
        let repo = abc_repo();
        let mut tracker = SelectionTracker::new();
        tracker.select(&repo, RouteId(2), StopNo(7)).unwrap();

        let err = tracker.select(&repo, RouteId(99), StopNo(1)).unwrap_err();
        assert_eq!(err, DomainError::RouteNotFound(RouteId(99)));
        assert!(tracker.is_selected(RouteId(2), StopNo(7)));
    }

    #[test]
    fn one_selection_across_routes() {
        let repo = RouteRepository::with_routes(embedded_routes());
        let mut tracker = SelectionTracker::new();

        tracker.select(&repo, RouteId(1), StopNo(2)).unwrap();
        tracker.select(&repo, RouteId(4), StopNo(1)).unwrap();

        assert!(!tracker.is_selected(RouteId(1), StopNo(2)));
        assert!(!tracker.is_nearest(RouteId(1), StopNo(1)));
        assert!(tracker.is_selected(RouteId(4), StopNo(1)));
        assert!(tracker.is_nearest(RouteId(4), StopNo(2)));
    }

    #[test]
    fn same_stop_number_on_other_route_is_not_selected() {
        let repo = RouteRepository::with_routes(embedded_routes());
        let mut tracker = SelectionTracker::new();

        tracker.select(&repo, RouteId(2), StopNo(3)).unwrap();
        assert!(tracker.is_selected(RouteId(2), StopNo(3)));
        assert!(!tracker.is_selected(RouteId(3), StopNo(3)));
    }
}
