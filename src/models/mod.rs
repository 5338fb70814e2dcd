pub mod coordinates;
pub mod elevation;
pub mod location;
pub mod place;
pub mod route;

pub use coordinates::Coordinates;
pub use elevation::{DifficultyTier, ElevationProfile, ElevationSample};
pub use location::Location;
pub use place::{AmenityResult, AmenityType, GeocodedLocation, Place, StartPointSuggestion};
pub use route::{
    LegSummary, PaceEstimate, PaceLevel, PlannedRoute, RouteKind, RouteMetrics, RouteRequest,
    RouteSummary, RunPlan, TravelMode,
};
