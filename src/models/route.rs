use crate::constants::MAX_DIRECTIONS_WAYPOINTS;
use crate::models::{Coordinates, DifficultyTier, ElevationProfile, Location};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Walking,
    Driving,
    Bicycling,
    Transit,
}

impl TravelMode {
    /// Value of the `mode` / `travelmode` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walk" | "walking" | "run" | "running" => Ok(TravelMode::Walking),
            "drive" | "driving" => Ok(TravelMode::Driving),
            "bike" | "bicycling" | "cycling" => Ok(TravelMode::Bicycling),
            "transit" => Ok(TravelMode::Transit),
            _ => Err(format!("Invalid travel mode: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    Loop,
    OutAndBack,
    PointToPoint,
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteKind::Loop => write!(f, "loop"),
            RouteKind::OutAndBack => write!(f, "out-and-back"),
            RouteKind::PointToPoint => write!(f, "point-to-point"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start_location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_distance_km: Option<f64>,
    #[serde(default)]
    pub is_loop: bool,
    /// Turnaround direction for out-and-back routes (0 = north, clockwise)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_and_back_bearing_deg: Option<f64>,
    /// Waypoints around a loop; planner default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_waypoints: Option<usize>,
    #[serde(default = "default_avoid_highways")]
    pub avoid_highways: bool,
}

fn default_avoid_highways() -> bool {
    true
}

impl RouteRequest {
    pub fn point_to_point(start: impl Into<Location>, end: impl Into<Location>) -> Self {
        RouteRequest {
            start_location: start.into(),
            end_location: Some(end.into()),
            target_distance_km: None,
            is_loop: false,
            out_and_back_bearing_deg: None,
            loop_waypoints: None,
            avoid_highways: true,
        }
    }

    pub fn loop_route(start: impl Into<Location>, target_distance_km: f64) -> Self {
        RouteRequest {
            start_location: start.into(),
            end_location: None,
            target_distance_km: Some(target_distance_km),
            is_loop: true,
            out_and_back_bearing_deg: None,
            loop_waypoints: None,
            avoid_highways: true,
        }
    }

    pub fn out_and_back(start: impl Into<Location>, target_distance_km: f64) -> Self {
        RouteRequest {
            start_location: start.into(),
            end_location: None,
            target_distance_km: Some(target_distance_km),
            is_loop: false,
            out_and_back_bearing_deg: None,
            loop_waypoints: None,
            avoid_highways: true,
        }
    }

    pub fn kind(&self) -> RouteKind {
        if self.is_loop {
            RouteKind::Loop
        } else if self.end_location.is_none() {
            RouteKind::OutAndBack
        } else {
            RouteKind::PointToPoint
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.start_location.validate()?;
        if let Some(ref end) = self.end_location {
            end.validate()?;
        }

        if let Some(distance) = self.target_distance_km {
            if !(distance.is_finite() && distance > 0.0) {
                return Err("target_distance_km must be greater than 0".to_string());
            }
        }

        match self.kind() {
            RouteKind::Loop if self.target_distance_km.is_none() => {
                Err("target_distance_km is required when is_loop=true".to_string())
            }
            RouteKind::OutAndBack if self.target_distance_km.is_none() => Err(
                "target_distance_km is required for out-and-back routes (no end_location)"
                    .to_string(),
            ),
            _ => Ok(()),
        }?;

        if let Some(bearing) = self.out_and_back_bearing_deg {
            if !bearing.is_finite() {
                return Err("out_and_back_bearing_deg must be a finite number".to_string());
            }
        }
        if let Some(count) = self.loop_waypoints {
            if !(1..=MAX_DIRECTIONS_WAYPOINTS).contains(&count) {
                return Err(format!(
                    "loop_waypoints must be between 1 and {}",
                    MAX_DIRECTIONS_WAYPOINTS
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegSummary {
    pub start_address: String,
    pub end_address: String,
    /// Human-readable distance as reported upstream (e.g. "2.4 km")
    pub distance_text: String,
    pub duration_text: String,
}

/// First route returned by the directions service, flattened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSummary {
    pub path: Vec<Coordinates>,
    pub total_distance_m: f64,
    pub total_duration_s: u64,
    pub summary: String,
    pub num_alternatives: usize,
    pub legs: Vec<LegSummary>,
}

impl RouteSummary {
    pub fn distance_km(&self) -> f64 {
        self.total_distance_m / 1000.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaceLevel {
    Easy,
    Moderate,
    Fast,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaceEstimate {
    pub level: PaceLevel,
    pub pace_min_per_km: f64,
    pub estimated_minutes: f64,
}

impl PaceEstimate {
    pub fn new(level: PaceLevel, pace_min_per_km: f64, distance_km: f64) -> Self {
        PaceEstimate {
            level,
            pace_min_per_km,
            estimated_minutes: distance_km * pace_min_per_km,
        }
    }
}

impl fmt::Display for PaceEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} min ({:.1} min/km)",
            self.estimated_minutes, self.pace_min_per_km
        )
    }
}

/// Route geometry and timings, ready for terrain analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedRoute {
    pub id: Uuid,
    pub kind: RouteKind,
    pub origin: String,
    pub destination: String,
    /// Waypoints in traversal order, as sent to the directions service
    pub waypoints: Vec<String>,
    pub distance_km: f64,
    pub duration_s: u64,
    pub pace_estimates: Vec<PaceEstimate>,
    pub maps_url: String,
    pub directions: RouteSummary,
}

impl PlannedRoute {
    pub fn path(&self) -> &[Coordinates] {
        &self.directions.path
    }
}

/// Combined geometry and terrain figures for one route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteMetrics {
    pub distance_km: f64,
    pub duration_s: u64,
    pub elevation_gain_m: f64,
    pub elevation_loss_m: f64,
    pub max_elevation_m: f64,
    pub min_elevation_m: f64,
    pub average_grade_pct: f64,
    pub difficulty_tier: DifficultyTier,
}

impl RouteMetrics {
    pub fn new(route: &PlannedRoute, profile: &ElevationProfile) -> Self {
        RouteMetrics {
            distance_km: route.distance_km,
            duration_s: route.duration_s,
            elevation_gain_m: profile.elevation_gain_m,
            elevation_loss_m: profile.elevation_loss_m,
            max_elevation_m: profile.max_elevation_m,
            min_elevation_m: profile.min_elevation_m,
            average_grade_pct: profile.average_grade_pct,
            difficulty_tier: profile.difficulty_tier,
        }
    }
}

/// A planned route with whatever terrain analysis succeeded
#[derive(Debug, Clone, Serialize)]
pub struct RunPlan {
    pub route: PlannedRoute,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<ElevationProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<RouteMetrics>,
    /// Set when profiling failed; the route itself is still usable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_request_validation() {
        let start = Coordinates::new(53.2745, -9.0494).unwrap();

        assert!(RouteRequest::loop_route(start, 5.0).validate().is_ok());
        assert!(RouteRequest::out_and_back(start, 8.0).validate().is_ok());
        assert!(RouteRequest::point_to_point(start, "Salthill").validate().is_ok());

        let mut missing_loop_distance = RouteRequest::loop_route(start, 5.0);
        missing_loop_distance.target_distance_km = None;
        assert!(missing_loop_distance.validate().is_err());

        let mut missing_out_distance = RouteRequest::out_and_back(start, 5.0);
        missing_out_distance.target_distance_km = None;
        assert!(missing_out_distance.validate().is_err());

        assert!(RouteRequest::loop_route(start, 0.0).validate().is_err());
        assert!(RouteRequest::loop_route(start, -3.0).validate().is_err());
        assert!(RouteRequest::loop_route(start, f64::NAN).validate().is_err());

        let bad_start = Coordinates { lat: 95.0, lng: 0.0 };
        assert!(RouteRequest::loop_route(bad_start, 5.0).validate().is_err());

        let mut no_waypoints = RouteRequest::loop_route(start, 5.0);
        no_waypoints.loop_waypoints = Some(0);
        assert!(no_waypoints.validate().is_err());
    }

    #[test]
    fn test_loop_waypoints_upper_bound() {
        let mut request = RouteRequest::loop_route("Eyre Square", 5.0);

        request.loop_waypoints = Some(23);
        assert!(request.validate().is_ok());

        request.loop_waypoints = Some(24);
        assert_eq!(
            request.validate().unwrap_err(),
            "loop_waypoints must be between 1 and 23"
        );

        request.loop_waypoints = Some(usize::MAX);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_route_kind() {
        assert_eq!(RouteRequest::loop_route("Galway", 5.0).kind(), RouteKind::Loop);
        assert_eq!(
            RouteRequest::out_and_back("Galway", 5.0).kind(),
            RouteKind::OutAndBack
        );
        assert_eq!(
            RouteRequest::point_to_point("Galway", "Salthill").kind(),
            RouteKind::PointToPoint
        );

        // A loop wins over a supplied end location
        let mut request = RouteRequest::loop_route("Galway", 5.0);
        request.end_location = Some(Location::from("Salthill"));
        assert_eq!(request.kind(), RouteKind::Loop);
    }

    #[test]
    fn test_route_request_defaults() {
        let request: RouteRequest =
            serde_json::from_str(r#"{"start_location": "Eyre Square, Galway", "target_distance_km": 5, "is_loop": true}"#)
                .unwrap();
        assert!(request.avoid_highways);
        assert!(request.end_location.is_none());
        assert_eq!(request.kind(), RouteKind::Loop);
    }

    #[test]
    fn test_pace_estimate_display() {
        let estimate = PaceEstimate::new(PaceLevel::Easy, 6.5, 5.2);
        assert!((estimate.estimated_minutes - 33.8).abs() < 1e-9);
        assert_eq!(estimate.to_string(), "34 min (6.5 min/km)");
    }

    #[test]
    fn test_travel_mode() {
        assert_eq!(TravelMode::default(), TravelMode::Walking);
        assert_eq!(TravelMode::Walking.as_str(), "walking");
        assert_eq!("running".parse::<TravelMode>().unwrap(), TravelMode::Walking);
        assert_eq!("BIKE".parse::<TravelMode>().unwrap(), TravelMode::Bicycling);
        assert!("teleport".parse::<TravelMode>().is_err());
    }
}
