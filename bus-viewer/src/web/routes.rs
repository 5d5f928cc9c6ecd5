//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::{DomainError, Route, RouteId, StopNo};
use crate::marker::{MARKER_PERIOD, marker_after_frames, schematic_path};
use crate::search::{filter_by_exact_name, filter_by_query};
use crate::selection::SelectionTracker;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/about", get(about_page))
        .route("/timetable", get(timetable_page))
        .route("/routes/search", get(search_routes))
        .route("/routes/filter", get(filter_routes))
        .route("/routes/:id", get(route_detail))
        .route("/routes/:id/marker", get(route_marker))
        .route("/select", post(select_stop))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with every route and the search box.
async fn index_page(State(state): State<AppState>) -> IndexTemplate {
    let selection = state.selection.read().await;
    let all = state.routes.all();

    let mut route_names: Vec<String> = Vec::new();
    for route in all {
        if !route_names.contains(&route.name) {
            route_names.push(route.name.clone());
        }
    }

    IndexTemplate {
        routes: all
            .iter()
            .map(|r| RouteView::from_route(r, &selection))
            .collect(),
        route_names,
    }
}

/// About page.
async fn about_page(State(state): State<AppState>) -> AboutTemplate {
    AboutTemplate {
        dataset_origin: state.dataset.origin.to_string(),
        using_fallback: state.dataset.origin.is_fallback(),
        route_count: state.routes.len(),
        loaded_at: state.dataset.loaded_at.format("%Y-%m-%d %H:%M").to_string(),
    }
}

/// Full timetable for all routes.
async fn timetable_page(State(state): State<AppState>) -> TimetableTemplate {
    TimetableTemplate {
        rows: state
            .routes
            .all()
            .iter()
            .map(TimetableRowView::from_route)
            .collect(),
    }
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn render<T: Template>(template: &T) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

/// Render a filtered route set as HTML or JSON.
async fn route_list_response(
    state: &AppState,
    headers: &HeaderMap,
    routes: &[&Route],
) -> Result<Response, AppError> {
    if accepts_html(headers) {
        let selection = state.selection.read().await;
        let template = RouteResultsTemplate {
            routes: routes
                .iter()
                .map(|r| RouteView::from_route(r, &selection))
                .collect(),
        };
        render(&template)
    } else {
        Ok(Json(RouteListResponse::from_routes(routes)).into_response())
    }
}

/// Free-text search over route and stop names.
async fn search_routes(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<SearchRoutesRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query?;
    let query = req.q.unwrap_or_default();
    let routes = filter_by_query(state.routes.all(), &query);
    debug!(query = %query, matches = routes.len(), "route search");

    route_list_response(&state, &headers, &routes).await
}

/// Routes with exactly the given name.
async fn filter_routes(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<FilterRoutesRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query?;
    let routes = filter_by_exact_name(state.routes.all(), &req.name);
    route_list_response(&state, &headers, &routes).await
}

/// Render a route's detail view with the given selection highlights.
fn detail_response(
    route: &Route,
    selection: &SelectionTracker,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    if accepts_html(headers) {
        render(&RouteDetailTemplate {
            detail: RouteDetailView::from_route(route, selection),
        })
    } else {
        Ok(Json(RouteResult::from_route(route)).into_response())
    }
}

/// Detail view for one route.
async fn route_detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = path?;
    let route = state.routes.find_by_id(RouteId(id))?;
    let selection = state.selection.read().await;
    detail_response(route, &selection, &headers)
}

/// Position of the decorative marker after `frame` animation steps.
async fn route_marker(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<MarkerRequest>, QueryRejection>,
) -> Result<Json<MarkerResponse>, AppError> {
    let Path(id) = path?;
    let Query(req) = query?;
    let route = state.routes.find_by_id(RouteId(id))?;
    let frame = req.frame.unwrap_or(0);
    let path = schematic_path(route);

    let position = marker_after_frames(&path, frame).ok_or_else(|| AppError::Internal {
        message: format!("route {id} has no schematic path"),
    })?;

    Ok(Json(MarkerResponse {
        route_id: id,
        frame,
        period: MARKER_PERIOD,
        position,
        path,
    }))
}

/// Select a stop and highlight its nearest neighbour.
///
/// On an unknown route or stop the previous selection is kept.
async fn select_stop(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: SelectStopRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(body = %String::from_utf8_lossy(&body), "invalid select request: {e}");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let route = state.routes.find_by_id(RouteId(req.route_id))?;
    let mut selection = state.selection.write().await;
    let outcome = selection.select_on_route(route, StopNo(req.stop_no))?;

    if accepts_html(&headers) {
        detail_response(route, &selection, &headers)
    } else {
        Ok(Json(SelectStopResponse::from(outcome)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        if e.is_not_found() {
            AppError::NotFound {
                message: e.to_string(),
            }
        } else {
            AppError::Internal {
                message: e.to_string(),
            }
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => AppError::BadRequest {
                message: e.body_text(),
            },
            other => AppError::Internal {
                message: other.body_text(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        warn!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DatasetOrigin, LoadedDataset, embedded_routes};
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app_state() -> AppState {
        AppState::new(LoadedDataset {
            routes: embedded_routes(),
            origin: DatasetOrigin::Embedded,
        })
    }

    fn app(state: &AppState) -> Router {
        create_router(state.clone(), "static")
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, String) {
        let response = app(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_json(state: &AppState, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        let (status, body) = send(state, request).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    async fn get_html(state: &AppState, uri: &str) -> (StatusCode, String) {
        let request = Request::get(uri)
            .header(header::ACCEPT, "text/html")
            .body(Body::empty())
            .unwrap();
        send(state, request).await
    }

    async fn post_select(state: &AppState, route_id: i64, stop_no: i64) -> (StatusCode, String) {
        let body = format!(r#"{{"route_id": {route_id}, "stop_no": {stop_no}}}"#);
        let request = Request::post("/select")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        send(state, request).await
    }

    fn route_names(json: &serde_json::Value) -> Vec<String> {
        json["routes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn health_check() {
        let state = app_state();
        let (status, body) = send(&state, Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn search_without_query_lists_everything() {
        let state = app_state();
        let (status, json) = get_json(&state, "/routes/search").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(route_names(&json), vec!["Bus 1", "Bus 2", "Bus 3", "Bus 4"]);

        let (_, json) = get_json(&state, "/routes/search?q=%20%20%20").await;
        assert_eq!(route_names(&json).len(), 4);
    }

    #[tokio::test]
    async fn search_matches_stop_and_route_names() {
        let state = app_state();

        let (_, json) = get_json(&state, "/routes/search?q=NITTE").await;
        assert_eq!(route_names(&json).len(), 4);

        let (_, json) = get_json(&state, "/routes/search?q=bus%202").await;
        assert_eq!(route_names(&json), vec!["Bus 2"]);

        let (_, json) = get_json(&state, "/routes/search?q=zzz").await;
        assert!(route_names(&json).is_empty());
    }

    #[tokio::test]
    async fn filter_by_name() {
        let state = app_state();
        let (status, json) = get_json(&state, "/routes/filter?name=Bus%203").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(route_names(&json), vec!["Bus 3"]);
        assert_eq!(json["routes"][0]["from"], "Moodbidri");
    }

    #[tokio::test]
    async fn search_fragment_renders_cards() {
        let state = app_state();
        let (status, html) = get_html(&state, "/routes/search?q=karkala").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Bus 3"));
        assert!(!html.contains("Bus 1"));
    }

    #[tokio::test]
    async fn route_detail_json_and_html() {
        let state = app_state();

        let (status, json) = get_json(&state, "/routes/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["from"], "Udupi");
        assert_eq!(json["stops"].as_array().unwrap().len(), 3);

        let (status, html) = get_html(&state, "/routes/2").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Kundapura"));
        assert!(html.contains("Total Stops: 3"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let state = app_state();
        let (status, json) = get_json(&state, "/routes/42").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "route 42 not found");
    }

    #[tokio::test]
    async fn select_returns_nearest_stop() {
        let state = app_state();
        let (status, body) = post_select(&state, 1, 2).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["selection"]["route_id"], 1);
        assert_eq!(json["selection"]["stop_no"], 2);
        assert_eq!(json["nearest"]["stop_no"], 1);
    }

    #[tokio::test]
    async fn select_unknown_stop_keeps_selection() {
        let state = app_state();
        post_select(&state, 3, 1).await;

        let (status, _) = post_select(&state, 3, 9999).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let selection = state.selection.read().await;
        assert!(selection.is_selected(RouteId(3), StopNo(1)));
        assert!(selection.is_nearest(RouteId(3), StopNo(2)));
    }

    #[tokio::test]
    async fn select_rejects_malformed_body() {
        let state = app_state();
        let request = Request::post("/select")
            .body(Body::from("{\"route_id\": \"one\"}"))
            .unwrap();
        let (status, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn select_html_highlights_timetable_row() {
        let state = app_state();
        let request = Request::post("/select")
            .header(header::ACCEPT, "text/html")
            .body(Body::from(r#"{"route_id": 4, "stop_no": 3}"#))
            .unwrap();
        let (status, html) = send(&state, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("class=\"selected\""));
        assert!(html.contains("class=\"nearest\""));
    }

    #[tokio::test]
    async fn marker_replays_frames() {
        let state = app_state();

        let (status, json) = get_json(&state, "/routes/1/marker").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["frame"], 0);
        assert_eq!(json["position"], json["path"][0]);

        let (_, json) = get_json(&state, "/routes/1/marker?frame=500").await;
        let end = &json["path"][2];
        let x = json["position"]["x"].as_f64().unwrap();
        assert!((x - end["x"].as_f64().unwrap()).abs() < 1.0);
    }

    #[tokio::test]
    async fn filter_without_name_is_json_bad_request() {
        let state = app_state();
        let (status, json) = get_json(&state, "/routes/filter").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("name"));
    }

    #[tokio::test]
    async fn non_numeric_route_id_is_json_bad_request() {
        let state = app_state();

        let (status, json) = get_json(&state, "/routes/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());

        let (status, json) = get_json(&state, "/routes/abc/marker").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn marker_rejects_bad_frame_as_json() {
        let state = app_state();
        let (status, json) = get_json(&state, "/routes/1/marker?frame=-3").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn marker_handles_largest_frame() {
        let state = app_state();

        let (status, json) = get_json(&state, "/routes/1/marker?frame=4294967295").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["period"], 1000);

        let wrapped = u32::MAX % 1000;
        let (_, same) = get_json(&state, &format!("/routes/1/marker?frame={wrapped}")).await;
        assert_eq!(json["position"], same["position"]);
    }

    #[tokio::test]
    async fn select_unknown_route_is_json_not_found() {
        let state = app_state();
        let (status, body) = post_select(&state, 77, 1).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "route 77 not found");
    }

    #[tokio::test]
    async fn pages_render() {
        let state = app_state();

        let (status, html) = get_html(&state, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Belthangadi"));

        let (status, html) = get_html(&state, "/timetable").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Mangalore Bus Stand → Surathkal → Nitte Campus"));

        let (status, html) = get_html(&state, "/about").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("built-in sample routes"));
    }
}
