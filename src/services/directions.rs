use crate::constants::MAX_DIRECTIONS_WAYPOINTS;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, LegSummary, Location, RouteSummary, TravelMode};
use crate::services::google_maps::{ApiLatLng, GoogleApi, GoogleMapsClient};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct DirectionsRequest {
    pub origin: Location,
    pub destination: Location,
    /// Intermediate stops in traversal order
    pub waypoints: Vec<Location>,
    pub avoid_highways: bool,
    pub mode: TravelMode,
}

impl DirectionsRequest {
    pub fn new(origin: Location, destination: Location) -> Self {
        DirectionsRequest {
            origin,
            destination,
            waypoints: Vec::new(),
            avoid_highways: true,
            mode: TravelMode::Walking,
        }
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Location>) -> Self {
        self.waypoints = waypoints;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.origin.validate().map_err(AppError::InvalidArgument)?;
        self.destination
            .validate()
            .map_err(AppError::InvalidArgument)?;
        for waypoint in &self.waypoints {
            waypoint.validate().map_err(AppError::InvalidArgument)?;
        }
        if self.waypoints.len() > MAX_DIRECTIONS_WAYPOINTS {
            return Err(AppError::InvalidArgument(format!(
                "Maximum {} waypoints allowed",
                MAX_DIRECTIONS_WAYPOINTS
            )));
        }
        Ok(())
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("origin", self.origin.to_string()),
            ("destination", self.destination.to_string()),
            ("mode", self.mode.as_str().to_string()),
        ];

        if !self.waypoints.is_empty() {
            let joined = self
                .waypoints
                .iter()
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
                .join("|");
            params.push(("waypoints", joined));
        }

        if self.avoid_highways {
            params.push(("avoid", "highways".to_string()));
        }

        // Alternatives are requested, but only the first route is used
        params.push(("alternatives", "true".to_string()));
        params
    }
}

#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn get_directions(&self, request: &DirectionsRequest) -> Result<RouteSummary>;
}

#[derive(Clone)]
pub struct DirectionsClient {
    client: GoogleMapsClient,
}

impl DirectionsClient {
    pub fn new(client: GoogleMapsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DirectionsProvider for DirectionsClient {
    async fn get_directions(&self, request: &DirectionsRequest) -> Result<RouteSummary> {
        request.validate()?;

        tracing::info!(
            origin = %request.origin,
            destination = %request.destination,
            waypoint_count = request.waypoints.len(),
            avoid_highways = request.avoid_highways,
            "Getting {} directions: {} -> {} via {} waypoints",
            request.mode, request.origin, request.destination, request.waypoints.len()
        );

        let body: DirectionsBody = self
            .client
            .fetch(GoogleApi::Directions, &request.query_params())
            .await?;

        let summary = body.into_summary()?;

        tracing::info!(
            total_distance_km = %format!("{:.2}", summary.distance_km()),
            num_routes = summary.num_alternatives,
            num_coordinates = summary.path.len(),
            "Directions retrieved: {:.2}km, {} path points",
            summary.distance_km(), summary.path.len()
        );

        Ok(summary)
    }
}

// Upstream response types

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DirectionsBody {
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    #[serde(default)]
    summary: Option<String>,
    legs: Vec<ApiLeg>,
}

#[derive(Debug, Deserialize)]
struct ApiLeg {
    #[serde(default)]
    steps: Vec<ApiStep>,
    distance: ApiTextValue,
    duration: ApiTextValue,
    #[serde(default)]
    start_address: String,
    #[serde(default)]
    end_address: String,
    end_location: ApiLatLng,
}

#[derive(Debug, Deserialize)]
struct ApiStep {
    start_location: ApiLatLng,
}

#[derive(Debug, Deserialize)]
struct ApiTextValue {
    #[serde(default)]
    text: String,
    value: f64,
}

impl DirectionsBody {
    /// Flatten the first route: every step's start, then the final leg's end
    fn into_summary(self) -> Result<RouteSummary> {
        let num_alternatives = self.routes.len();
        let route = self.routes.into_iter().next().ok_or_else(|| {
            AppError::Transport("Directions response contained no routes".to_string())
        })?;

        let last_leg_end = route
            .legs
            .last()
            .map(|leg| leg.end_location)
            .ok_or_else(|| {
                AppError::Transport("Directions route contained no legs".to_string())
            })?;

        let mut path: Vec<Coordinates> = route
            .legs
            .iter()
            .flat_map(|leg| leg.steps.iter())
            .map(|step| step.start_location.into_coordinates())
            .collect::<Result<_>>()?;
        path.push(last_leg_end.into_coordinates()?);

        let total_distance_m: f64 = route.legs.iter().map(|leg| leg.distance.value).sum();
        let total_duration_s: f64 = route.legs.iter().map(|leg| leg.duration.value).sum();

        let legs = route
            .legs
            .into_iter()
            .map(|leg| LegSummary {
                start_address: leg.start_address,
                end_address: leg.end_address,
                distance_text: leg.distance.text,
                duration_text: leg.duration.text,
            })
            .collect();

        Ok(RouteSummary {
            path,
            total_distance_m,
            total_duration_s: total_duration_s.round() as u64,
            summary: route.summary.unwrap_or_else(|| "Route found".to_string()),
            num_alternatives,
            legs,
        })
    }
}
