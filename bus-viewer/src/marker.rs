//! Map embed links and the decorative bus marker.
//!
//! The detail view shows an embedded map searched by "origin to
//! destination" and a schematic line of the route's stops with a marker
//! that travels back and forth along it.
//!
//! [`MarkerAnimation`] is the reference for the browser animation: the
//! page takes its path and period from `/routes/{id}/marker` and steps the
//! same ping-pong frames client-side.

use serde::Serialize;

use crate::domain::Route;

/// Base URL of the public maps viewer (no API key needed).
const MAPS_EMBED_BASE: &str = "https://maps.google.com/maps";

/// Frames for one pass from the start of the path to the end.
const FRAMES_PER_PASS: u32 = 500;

/// Marker progress per animation frame.
pub const MARKER_SPEED: f64 = 1.0 / FRAMES_PER_PASS as f64;

/// Frames in a full out-and-back cycle; the animation repeats after this.
pub const MARKER_PERIOD: u32 = 2 * FRAMES_PER_PASS;

/// Size of the schematic drawing.
pub const SCHEMATIC_WIDTH: f64 = 300.0;
pub const SCHEMATIC_HEIGHT: f64 = 100.0;
const SCHEMATIC_MARGIN: f64 = 20.0;

/// Embeddable map URL centred on the route's "from to to" search.
pub fn map_embed_url(route: &Route) -> String {
    let query = format!("{} to {}", route.from, route.to);
    let params = [("q", query.as_str()), ("output", "embed")];
    match reqwest::Url::parse_with_params(MAPS_EMBED_BASE, &params) {
        Ok(url) => url.into(),
        // The base is a constant, valid URL
        Err(_) => MAPS_EMBED_BASE.to_string(),
    }
}

/// A point in schematic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Schematic positions of a route's stops: left to right, alternating
/// slightly above and below the centre line.
pub fn schematic_path(route: &Route) -> Vec<Point> {
    let n = route.stops.len();
    let mid = SCHEMATIC_HEIGHT / 2.0;
    if n <= 1 {
        return vec![Point::new(SCHEMATIC_WIDTH / 2.0, mid)];
    }

    let span = SCHEMATIC_WIDTH - 2.0 * SCHEMATIC_MARGIN;
    (0..n)
        .map(|i| {
            let x = SCHEMATIC_MARGIN + span * i as f64 / (n - 1) as f64;
            let offset = if i % 2 == 0 { -10.0 } else { 10.0 };
            Point::new(x, mid + offset)
        })
        .collect()
}

/// Point at fraction `t` (0..=1) along a polyline, interpolating linearly
/// within the segment `t` falls in. `t` is clamped.
///
/// Returns `None` for an empty path; a single point is returned as is.
pub fn sample_point_on_path(points: &[Point], t: f64) -> Option<Point> {
    match points {
        [] => None,
        [only] => Some(*only),
        _ => {
            let segments = points.len() - 1;
            let seg_f = t.clamp(0.0, 1.0) * segments as f64;
            let seg = (seg_f.floor() as usize).min(segments - 1);
            let local = seg_f - seg as f64;

            let a = points[seg];
            let b = points[seg + 1];
            Some(Point::new(
                a.x + (b.x - a.x) * local,
                a.y + (b.y - a.y) * local,
            ))
        }
    }
}

/// Back-and-forth marker animation along a path.
///
/// Driven one frame at a time by [`step`](Self::step). Starting resets the
/// marker to the beginning; stopping is idempotent and freezes it. Only the
/// frame within the current cycle is kept, so progress never drifts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerAnimation {
    frame: u32,
    running: bool,
}

impl MarkerAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start from the beginning of the path, moving forward.
    pub fn start(&mut self) {
        self.frame = 0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Progress along the path, 0..=1.
    pub fn progress(&self) -> f64 {
        let pass = if self.frame <= FRAMES_PER_PASS {
            self.frame
        } else {
            MARKER_PERIOD - self.frame
        };
        f64::from(pass) / f64::from(FRAMES_PER_PASS)
    }

    /// Whether the marker is heading towards the end of the path.
    pub fn is_forward(&self) -> bool {
        self.frame < FRAMES_PER_PASS
    }

    /// Advance one frame, bouncing at either end. No-op when stopped.
    pub fn step(&mut self) {
        self.advance(1);
    }

    /// Advance `frames` frames at once. No-op when stopped.
    pub fn advance(&mut self, frames: u32) {
        if !self.running {
            return;
        }

        let offset = (u64::from(self.frame) + u64::from(frames)) % u64::from(MARKER_PERIOD);
        self.frame = offset as u32;
    }

    /// Marker position on `points` at the current progress.
    pub fn position(&self, points: &[Point]) -> Option<Point> {
        sample_point_on_path(points, self.progress())
    }
}

/// Marker position `frames` frames after a fresh start.
pub fn marker_after_frames(points: &[Point], frames: u32) -> Option<Point> {
    let mut animation = MarkerAnimation::new();
    animation.start();
    animation.advance(frames);
    animation.position(points)
}
