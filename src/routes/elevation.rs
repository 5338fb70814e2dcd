use crate::error::{AppError, Result};
use crate::models::{Coordinates, ElevationProfile, ElevationSample, TravelMode};
use crate::services::maps_url;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ElevationProfileRequest {
    pub path: Vec<Coordinates>,
    /// Defaults to the configured sample count
    #[serde(default)]
    pub samples: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ElevationProfileResponse {
    #[serde(flatten)]
    pub profile: ElevationProfile,
    pub recommendation: String,
    /// Directions link through the requested path
    pub maps_url: String,
}

/// POST /elevation/profile
pub async fn elevation_profile(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ElevationProfileRequest>,
) -> Result<Json<ElevationProfileResponse>> {
    let samples = request
        .samples
        .unwrap_or(state.planner_config.elevation_samples);

    let profile = state
        .elevation_profiler
        .get_elevation_profile(&request.path, samples)
        .await?;

    Ok(Json(ElevationProfileResponse {
        recommendation: profile.recommendation(),
        maps_url: maps_url::coordinates_url(&request.path, TravelMode::Walking)?,
        profile,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ElevationPointParams {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize)]
pub struct ElevationPointResponse {
    #[serde(flatten)]
    pub sample: ElevationSample,
    pub maps_url: String,
}

/// GET /elevation/point?lat=&lng=
pub async fn elevation_point(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ElevationPointParams>,
) -> Result<Json<ElevationPointResponse>> {
    let location = Coordinates::new(params.lat, params.lng).map_err(AppError::InvalidArgument)?;
    let sample = state.elevation_profiler.elevation_at(&location).await?;

    Ok(Json(ElevationPointResponse {
        maps_url: maps_url::place_marker_url(&location, None),
        sample,
    }))
}
