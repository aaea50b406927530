//! HTTP Server - Serves view models via REST API
//!
//! Endpoints:
//! - GET /api/config          → Effective config as JSON
//! - GET /api/countries       → Country names for the selector
//! - GET /api/dimensions      → All dimension metadata
//! - GET /api/dimensions/:id  → One dimension (question + coding)
//! - GET /api/view            → View model for ?country=&dimension=

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::classify::Tiering;
use crate::config::ViewConfig;
use crate::dimension::{Dimension, DimensionInfo};
use crate::state::AppState;
use crate::view::ScatterScope;

/// Start the HTTP server
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    tracing::info!("Initializing HTTP server on port {}", port);

    let app = router(state.clone());

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Starting server on http://localhost:{}", port);
    tracing::info!("  API: http://localhost:{}/api/countries", port);
    tracing::info!("  Web: http://localhost:{}/", port);
    tracing::info!("  Records loaded: {}", state.dataset.len());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server bound to {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// API routes plus static files from ./web
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/config", get(get_config))
        .route("/countries", get(list_countries))
        .route("/dimensions", get(list_dimensions))
        .route("/dimensions/:id", get(get_dimension))
        .route("/view", get(get_view))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new("web"))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// GET /api/config - Effective config as JSON
async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    tracing::debug!("GET /api/config");
    Json((*state.config).clone())
}

/// GET /api/countries
async fn list_countries(State(state): State<AppState>) -> impl IntoResponse {
    let countries = state.countries();
    tracing::debug!("GET /api/countries - {} countries", countries.len());
    Json(countries)
}

/// GET /api/dimensions
async fn list_dimensions() -> impl IntoResponse {
    let dimensions: Vec<DimensionInfo> = Dimension::ALL.into_iter().map(DimensionInfo::from).collect();
    Json(dimensions)
}

/// GET /api/dimensions/:id - accepts id, label or slug
async fn get_dimension(Path(id): Path<String>) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::debug!("GET /api/dimensions/{}", id);
    let dimension: Dimension = id
        .parse()
        .map_err(|e: crate::dimension::UnknownDimension| (StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(Json(DimensionInfo::from(dimension)))
}

/// Query params for the view endpoint
#[derive(Deserialize)]
struct ViewQuery {
    country: String,
    dimension: String,
    scope: Option<ScatterScope>,
    tiering: Option<Tiering>,
}

/// GET /api/view - Full view model for one selection
async fn get_view(
    State(state): State<AppState>,
    Query(params): Query<ViewQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!(
        "GET /api/view country={:?} dimension={:?} scope={:?} tiering={:?}",
        params.country, params.dimension, params.scope, params.tiering
    );

    let dimension: Dimension = params.dimension.parse().map_err(|e: crate::dimension::UnknownDimension| {
        tracing::warn!("{}", e);
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let defaults = state.config.view;
    let options = ViewConfig {
        scatter_scope: params.scope.unwrap_or(defaults.scatter_scope),
        tiering: params.tiering.unwrap_or(defaults.tiering),
    };

    match state.view(&params.country, dimension, Some(options)) {
        Ok(view) => {
            if view.is_empty() {
                tracing::info!("No rows for country '{}'", params.country);
            }
            Ok(Json(view))
        }
        Err(e) => {
            tracing::error!("View build failed for {} / {}: {}", params.country, dimension.id(), e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dataset::fixtures::{dataset, row};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn state() -> AppState {
        let data = dataset(&[
            row("Germany", "AfD", 2017, &[(Dimension::AntiElitism, 2.5)], Some(5.1), Some(8.0)),
            row("Germany", "SPD", 2017, &[(Dimension::AntiElitism, 0.3)], Some(2.2), Some(3.1)),
        ]);
        AppState::new(Config::default(), data)
    }

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router(state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    async fn get_text(uri: &str) -> (StatusCode, String) {
        let response = router(state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn test_countries() {
        let (status, json) = get("/api/countries").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!(["Germany"]));
    }

    #[tokio::test]
    async fn test_view_germany_anti_elitism() {
        let (status, json) = get("/api/view?country=Germany&dimension=anti-elitism").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["series"][0]["party"], "AfD");
        assert_eq!(json["series"][0]["points"][0]["label"], "Rhetoric important.");
        assert_eq!(json["year_range"]["min"], 2017);
    }

    #[tokio::test]
    async fn test_view_unknown_country_is_empty() {
        let (status, json) = get("/api/view?country=Narnia&dimension=v2paimmig").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["legend"], serde_json::json!([]));
        assert!(json["year_range"].is_null());
    }

    #[tokio::test]
    async fn test_view_scope_override() {
        let (status, json) = get("/api/view?country=Germany&dimension=v2paanteli&scope=latest-year").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["scatter"]["scope"], "latest-year");
        assert_eq!(json["scatter"]["year"], 2017);
    }

    #[tokio::test]
    async fn test_view_bad_dimension() {
        let (status, _) = get("/api/view?country=Germany&dimension=astrology").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dimension_lookup() {
        let (status, json) = get("/api/dimensions/v2pagender_osp").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["label"], "Gender Equality");
        let (status, _) = get("/api/dimensions/Anti-Elitism").await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = get_text("/api/dimensions/nope").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Unknown dimension 'nope'");
    }
}
