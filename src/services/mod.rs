pub mod directions;
pub mod elevation;
pub mod geo_lookup;
pub mod google_maps;
pub mod maps_url;
pub mod route_assembler;
pub mod run_planner;
pub mod waypoints;

pub use directions::{DirectionsClient, DirectionsProvider, DirectionsRequest};
pub use elevation::{ElevationProfiler, ElevationProvider, GoogleElevationClient};
pub use geo_lookup::{GeoLookup, Geocoder, GoogleGeocoder};
pub use google_maps::{GoogleApi, GoogleMapsClient};
pub use route_assembler::{AssemblyStage, RouteAssembler};
pub use run_planner::RunPlanner;
pub use waypoints::WaypointSynthesizer;
