pub mod debug;
pub mod elevation;
pub mod places;
pub mod plan_route;

use axum::{routing::{get, post}, Router};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/routes/plan", post(plan_route::plan_route))
        .route("/elevation/profile", post(elevation::elevation_profile))
        .route("/elevation/point", get(elevation::elevation_point))
        .route("/places/geocode", get(places::geocode))
        .route("/places/nearby", get(places::nearby_places))
        .route("/places/amenities", get(places::find_amenities))
        .route("/places/start-points", get(places::find_start_points))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
