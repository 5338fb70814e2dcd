// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use config::{GoogleMapsConfig, PlannerConfig};
use services::{
    DirectionsClient, ElevationProfiler, GeoLookup, GoogleElevationClient, GoogleGeocoder,
    GoogleMapsClient, RouteAssembler, RunPlanner,
};
use std::sync::Arc;

// App state for sharing across the application
#[derive(Clone)]
pub struct AppState {
    pub geo_lookup: GeoLookup,
    pub run_planner: RunPlanner,
    pub elevation_profiler: ElevationProfiler,
    pub planner_config: PlannerConfig,
}

impl AppState {
    /// Wire every service onto one shared Google Maps client
    pub fn new(google_maps: &GoogleMapsConfig, planner_config: PlannerConfig) -> Result<Self> {
        planner_config
            .validate()
            .map_err(AppError::InvalidArgument)?;

        let client = GoogleMapsClient::new(google_maps)?;
        let geo_lookup = GeoLookup::new(Arc::new(GoogleGeocoder::new(client.clone())));
        let elevation_profiler =
            ElevationProfiler::new(Arc::new(GoogleElevationClient::new(client.clone())));
        let assembler = RouteAssembler::new(
            geo_lookup.clone(),
            Arc::new(DirectionsClient::new(client)),
            planner_config.clone(),
        );

        Ok(AppState {
            geo_lookup,
            run_planner: RunPlanner::new(assembler, elevation_profiler.clone()),
            elevation_profiler,
            planner_config,
        })
    }
}
