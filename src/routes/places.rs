use crate::error::{AppError, Result};
use crate::models::{AmenityResult, AmenityType, Coordinates, GeocodedLocation, Place, StartPointSuggestion};
use crate::services::maps_url;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    #[serde(flatten)]
    pub location: GeocodedLocation,
    pub maps_url: String,
}

/// GET /places/geocode?address=
pub async fn geocode(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<GeocodeResponse>> {
    let location = state.geo_lookup.geocode(&params.address).await?;
    let maps_url =
        maps_url::place_marker_url(&location.coordinates, location.place_id.as_deref());

    Ok(Json(GeocodeResponse { location, maps_url }))
}

/// Query parameters for nearby search
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub lat: f64,
    pub lng: f64,
    /// Upstream place type, e.g. `park` or `cafe`
    #[serde(rename = "type")]
    pub place_type: String,
    /// Search radius in meters (default: 1000)
    #[serde(default = "default_nearby_radius")]
    pub radius: u32,
}

fn default_nearby_radius() -> u32 {
    1000
}

#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub places: Vec<Place>,
}

/// GET /places/nearby?lat=&lng=&type=&radius=
pub async fn nearby_places(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<NearbyResponse>> {
    let center = Coordinates::new(params.lat, params.lng).map_err(AppError::InvalidArgument)?;
    let places = state
        .geo_lookup
        .nearby_places(&center, params.radius, &params.place_type)
        .await?;

    Ok(Json(NearbyResponse { places }))
}

#[derive(Debug, Deserialize)]
pub struct AmenityParams {
    pub lat: f64,
    pub lng: f64,
    /// Comma-separated amenity types (restroom, water, cafe, park, gym, store)
    pub types: String,
    #[serde(default)]
    pub radius: Option<u32>,
}

impl AmenityParams {
    fn amenity_types(&self) -> Result<Vec<AmenityType>> {
        self.types
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| t.parse::<AmenityType>().map_err(AppError::InvalidArgument))
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct AmenityResponse {
    pub center: Coordinates,
    pub radius_m: u32,
    pub amenities: Vec<AmenityResult>,
}

/// GET /places/amenities?lat=&lng=&types=restroom,water&radius=
pub async fn find_amenities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AmenityParams>,
) -> Result<Json<AmenityResponse>> {
    let center = Coordinates::new(params.lat, params.lng).map_err(AppError::InvalidArgument)?;
    let radius_m = params
        .radius
        .unwrap_or(state.planner_config.amenity_radius_m);
    let types = params.amenity_types()?;

    let amenities = state
        .geo_lookup
        .find_amenities(&center, &types, radius_m)
        .await?;

    Ok(Json(AmenityResponse {
        center,
        radius_m,
        amenities,
    }))
}

#[derive(Debug, Deserialize)]
pub struct StartPointParams {
    pub location: String,
}

/// GET /places/start-points?location=
pub async fn find_start_points(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StartPointParams>,
) -> Result<Json<StartPointSuggestion>> {
    let suggestion = state
        .geo_lookup
        .find_start_points(&params.location, state.planner_config.start_point_radius_m)
        .await?;

    Ok(Json(suggestion))
}
