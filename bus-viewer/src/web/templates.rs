//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::Route;
use crate::marker::{
    Point, SCHEMATIC_HEIGHT, SCHEMATIC_WIDTH, map_embed_url, sample_point_on_path, schematic_path,
};
use crate::selection::SelectionTracker;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page: route cards, route list and search box.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub routes: Vec<RouteView>,
    /// Distinct route names for the sidebar's "filter by bus" links.
    pub route_names: Vec<String>,
}

/// About page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub dataset_origin: String,
    pub using_fallback: bool,
    pub route_count: usize,
    pub loaded_at: String,
}

/// Full timetable of every route.
#[derive(Template)]
#[template(path = "timetable.html")]
pub struct TimetableTemplate {
    pub rows: Vec<TimetableRowView>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Route cards and route list for a (possibly filtered) set of routes.
#[derive(Template)]
#[template(path = "route_results.html")]
pub struct RouteResultsTemplate {
    pub routes: Vec<RouteView>,
}

/// Route detail shown in the modal.
#[derive(Template)]
#[template(path = "route_detail.html")]
pub struct RouteDetailTemplate {
    pub detail: RouteDetailView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Route view model with selection highlights applied.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub id: i64,
    pub name: String,
    pub from: String,
    pub to: String,
    pub time: String,
    pub depart: String,
    pub arrive: String,
    pub stops: Vec<StopView>,
}

impl RouteView {
    /// Create from a domain Route, marking the selected and nearest stops.
    pub fn from_route(route: &Route, selection: &SelectionTracker) -> Self {
        let stops = route
            .stops
            .iter()
            .map(|s| StopView {
                no: s.no.0,
                name: s.name.clone(),
                arrival: s.arrival.clone(),
                departure: s.departure.clone(),
                is_selected: selection.is_selected(route.id, s.no),
                is_nearest: selection.is_nearest(route.id, s.no),
            })
            .collect();

        Self {
            id: route.id.0,
            name: route.name.clone(),
            from: route.from.clone(),
            to: route.to.clone(),
            time: route.time.clone(),
            depart: route.depart.clone(),
            arrive: route.arrive.clone(),
            stops,
        }
    }

    /// Summary line for the detail view.
    pub fn stats(&self) -> String {
        format!(
            "Total Stops: {} | Duration: {} | First Trip: {}",
            self.stops.len(),
            self.time,
            self.depart
        )
    }
}

/// Stop view model.
#[derive(Debug, Clone)]
pub struct StopView {
    pub no: i64,
    pub name: String,
    pub arrival: String,
    pub departure: String,
    pub is_selected: bool,
    pub is_nearest: bool,
}

impl StopView {
    /// CSS classes for the stop element.
    pub fn css_class(&self) -> &'static str {
        match (self.is_selected, self.is_nearest) {
            (true, _) => "stop selected",
            (false, true) => "stop nearest",
            (false, false) => "stop",
        }
    }
}

/// Stop marker on the schematic drawing.
#[derive(Debug, Clone)]
pub struct SchematicStopView {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub is_selected: bool,
    pub is_nearest: bool,
}

/// Everything the detail modal shows for one route.
#[derive(Debug, Clone)]
pub struct RouteDetailView {
    pub route: RouteView,
    pub map_url: String,
    pub width: f64,
    pub height: f64,
    /// SVG polyline `points` attribute for the schematic.
    pub polyline: String,
    pub schematic: Vec<SchematicStopView>,
    pub marker: Point,
}

impl RouteDetailView {
    pub fn from_route(route: &Route, selection: &SelectionTracker) -> Self {
        let view = RouteView::from_route(route, selection);
        let path = schematic_path(route);
        let marker = sample_point_on_path(&path, 0.0).unwrap_or(Point::new(0.0, 0.0));

        let polyline = path
            .iter()
            .map(|p| format!("{:.1},{:.1}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        let schematic = view
            .stops
            .iter()
            .zip(&path)
            .map(|(stop, p)| SchematicStopView {
                name: stop.name.clone(),
                x: p.x,
                y: p.y,
                is_selected: stop.is_selected,
                is_nearest: stop.is_nearest,
            })
            .collect();

        Self {
            route: view,
            map_url: map_embed_url(route),
            width: SCHEMATIC_WIDTH,
            height: SCHEMATIC_HEIGHT,
            polyline,
            schematic,
            marker,
        }
    }
}

/// One row of the full timetable.
#[derive(Debug, Clone)]
pub struct TimetableRowView {
    pub name: String,
    pub from: String,
    pub to: String,
    pub depart: String,
    pub arrive: String,
    pub time: String,
    pub stops: String,
}

impl TimetableRowView {
    pub fn from_route(route: &Route) -> Self {
        Self {
            name: route.name.clone(),
            from: route.from.clone(),
            to: route.to.clone(),
            depart: route.depart.clone(),
            arrive: route.arrive.clone(),
            time: route.time.clone(),
            stops: route.stops_summary(),
        }
    }
}
