//! Stable application-wide constants.
//!
//! Values here are geometry coefficients, upstream API limits and default
//! fallbacks for env-var-based configuration. Tuning knobs that callers may
//! override live in [`PlannerConfig`](crate::config::PlannerConfig).

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Upstream API ---

/// Base URL of the Google Maps web services. Overridden by `GOOGLE_MAPS_BASE_URL`.
pub const DEFAULT_GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
/// Per-call timeout for upstream requests. Overridden by `GOOGLE_MAPS_TIMEOUT_MS`.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
/// Status string every upstream endpoint returns on success.
pub const UPSTREAM_OK_STATUS: &str = "OK";
/// Nearby search keeps only the first results.
pub const NEARBY_PLACES_LIMIT: usize = 5;
/// Elevation API accepts at most 512 samples along a path.
pub const MAX_ELEVATION_SAMPLES: usize = 512;
/// A path needs at least two samples to describe a profile.
pub const MIN_ELEVATION_SAMPLES: usize = 2;
/// Directions requests accept at most 23 intermediate waypoints.
pub const MAX_DIRECTIONS_WAYPOINTS: usize = 23;

// --- Flat-Earth geometry ---

/// Kilometres per degree of latitude (and of longitude at the equator).
pub const KM_PER_DEGREE: f64 = 111.0;
/// Metres per degree, used for planar segment lengths along sampled paths.
pub const METERS_PER_DEGREE: f64 = 111_000.0;
/// Streets are not straight lines: a target distance is deflated by this
/// factor before it is turned into a radius or a one-way leg.
pub const DEFAULT_STREET_FACTOR: f64 = 1.3;
/// Bearing of the first loop waypoint, in degrees.
pub const LOOP_START_ANGLE_DEG: f64 = 45.0;
/// Below this `cos(latitude)` the longitude offset blows up (near the poles).
pub const MIN_COS_LATITUDE: f64 = 1e-6;

// --- Planner defaults ---

/// Waypoints placed around a synthesized loop.
pub const DEFAULT_LOOP_WAYPOINTS: usize = 4;
/// Default out-and-back direction (north).
pub const DEFAULT_OUT_AND_BACK_BEARING_DEG: f64 = 0.0;
/// Elevation samples requested along a planned route.
pub const DEFAULT_ELEVATION_SAMPLES: usize = 100;
/// Search radius for runner amenities.
pub const DEFAULT_AMENITY_RADIUS_M: u32 = 2_000;
/// Search radius for parks around a suggested start point.
pub const DEFAULT_START_POINT_RADIUS_M: u32 = 5_000;

// --- Running paces (min/km) ---

pub const EASY_PACE_MIN_PER_KM: f64 = 6.5;
pub const MODERATE_PACE_MIN_PER_KM: f64 = 5.5;
pub const FAST_PACE_MIN_PER_KM: f64 = 4.5;

// --- Shareable links ---

pub const MAPS_DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/";
pub const MAPS_SEARCH_BASE_URL: &str = "https://www.google.com/maps/search/";
