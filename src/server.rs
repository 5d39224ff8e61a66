use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::data::filter::filter_by_region_type;
use crate::data::model::AccidentTable;

/// Shared application state: the dataset, loaded once, read-only thereafter.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<AccidentTable>,
}

/// Query parameters for the locations endpoint.
#[derive(Debug, Deserialize)]
struct LocationsQuery {
    /// Region-type filter; absent or empty means every location.
    #[serde(rename = "type")]
    region_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET / – the map landing page.
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../static/index.html"))
}

/// GET /api/health – liveness probe.
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/locations?type=<region_type> – records as a JSON array of
/// column-name → value objects, optionally filtered by region type.
async fn locations(
    State(state): State<AppState>,
    Query(query): Query<LocationsQuery>,
) -> impl IntoResponse {
    let matches = filter_by_region_type(&state.table, query.region_type.as_deref());
    Json(matches).into_response()
}

/// GET /api/region-types – distinct region types present in the dataset,
/// sorted; the UI builds its filter buttons from this.
async fn region_types(State(state): State<AppState>) -> impl IntoResponse {
    let types: Vec<&String> = state.table.region_types.iter().collect();
    Json(types).into_response()
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Assemble the full application router.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/locations", get(locations))
        .route("/region-types", get(region_types))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api)
        .nest_service(
            "/static",
            ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
        .layer(CorsLayer::permissive())
}
