use crate::config::PlannerConfig;
use crate::error::{AppError, Result};
use crate::models::{
    Coordinates, Location, PaceEstimate, PaceLevel, PlannedRoute, RouteKind, RouteRequest,
    TravelMode,
};
use crate::services::directions::{DirectionsProvider, DirectionsRequest};
use crate::services::geo_lookup::GeoLookup;
use crate::services::maps_url;
use crate::services::waypoints::WaypointSynthesizer;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Progress of a single assembly, reported in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyStage {
    ResolvingWaypoints,
    FetchingDirections,
    ComputingMetrics,
    Done,
    Failed,
}

impl fmt::Display for AssemblyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssemblyStage::ResolvingWaypoints => "resolving_waypoints",
            AssemblyStage::FetchingDirections => "fetching_directions",
            AssemblyStage::ComputingMetrics => "computing_metrics",
            AssemblyStage::Done => "done",
            AssemblyStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Turns a route request into a concrete walking route
#[derive(Clone)]
pub struct RouteAssembler {
    geo_lookup: GeoLookup,
    directions: Arc<dyn DirectionsProvider>,
    synthesizer: WaypointSynthesizer,
    config: PlannerConfig,
}

impl RouteAssembler {
    pub fn new(
        geo_lookup: GeoLookup,
        directions: Arc<dyn DirectionsProvider>,
        config: PlannerConfig,
    ) -> Self {
        RouteAssembler {
            geo_lookup,
            directions,
            synthesizer: WaypointSynthesizer::new(config.street_factor),
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub async fn assemble(&self, request: &RouteRequest) -> Result<PlannedRoute> {
        let started = Instant::now();
        let kind = request.kind();

        match self.run(request, kind).await {
            Ok(route) => {
                tracing::info!(
                    stage = %AssemblyStage::Done,
                    route_id = %route.id,
                    kind = %kind,
                    distance_km = %format!("{:.2}", route.distance_km),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Assembled {} route of {:.2}km in {}ms",
                    kind, route.distance_km, started.elapsed().as_millis()
                );
                Ok(route)
            }
            Err(e) => {
                tracing::warn!(
                    stage = %AssemblyStage::Failed,
                    kind = %kind,
                    error = %e,
                    "Route assembly failed: {}",
                    e
                );
                Err(e)
            }
        }
    }

    async fn run(&self, request: &RouteRequest, kind: RouteKind) -> Result<PlannedRoute> {
        request.validate().map_err(AppError::InvalidArgument)?;

        tracing::debug!(
            stage = %AssemblyStage::ResolvingWaypoints,
            kind = %kind,
            start = %request.start_location,
            "Resolving waypoints for {} route from {}",
            kind, request.start_location
        );

        let origin = request.start_location.clone();
        let (destination, waypoints) = match kind {
            RouteKind::Loop => {
                let distance_km = self.target_distance(request)?;
                let center = self.geo_lookup.resolve(&origin).await?;
                let count = request.loop_waypoints.unwrap_or(self.config.loop_waypoints);
                let waypoints = self.synthesizer.generate_loop(center, distance_km, count)?;
                (origin.clone(), waypoints)
            }
            RouteKind::OutAndBack => {
                let distance_km = self.target_distance(request)?;
                let center = self.geo_lookup.resolve(&origin).await?;
                let bearing = request
                    .out_and_back_bearing_deg
                    .unwrap_or(self.config.out_and_back_bearing_deg);
                let waypoints = self
                    .synthesizer
                    .generate_out_and_back(center, distance_km, bearing)?;
                (origin.clone(), waypoints)
            }
            RouteKind::PointToPoint => {
                let destination = request.end_location.clone().ok_or_else(|| {
                    AppError::InvalidArgument(
                        "end_location is required for point-to-point routes".to_string(),
                    )
                })?;
                (destination, Vec::new())
            }
        };

        tracing::debug!(
            stage = %AssemblyStage::FetchingDirections,
            waypoints = waypoints.len(),
            "Requesting directions via {} waypoints",
            waypoints.len()
        );

        let mut directions_request = DirectionsRequest::new(origin.clone(), destination.clone())
            .with_waypoints(waypoints.iter().copied().map(Location::from).collect());
        directions_request.avoid_highways = request.avoid_highways;

        let directions = self.directions.get_directions(&directions_request).await?;

        tracing::debug!(
            stage = %AssemblyStage::ComputingMetrics,
            path_points = directions.path.len(),
            "Computing route metrics over {} path points",
            directions.path.len()
        );

        let distance_km = directions.distance_km();
        let origin = origin.to_string();
        let destination = destination.to_string();
        let waypoints: Vec<String> = waypoints.iter().map(Coordinates::to_string).collect();
        let maps_url =
            maps_url::directions_url(&origin, &waypoints, &destination, TravelMode::Walking);

        Ok(PlannedRoute {
            id: Uuid::new_v4(),
            kind,
            origin,
            destination,
            waypoints,
            distance_km,
            duration_s: directions.total_duration_s,
            pace_estimates: self.pace_estimates(distance_km),
            maps_url,
            directions,
        })
    }

    fn target_distance(&self, request: &RouteRequest) -> Result<f64> {
        request.target_distance_km.ok_or_else(|| {
            AppError::InvalidArgument(format!(
                "target_distance_km is required for {} routes",
                request.kind()
            ))
        })
    }

    /// Finish-time estimates at the easy, moderate and fast paces
    pub fn pace_estimates(&self, distance_km: f64) -> Vec<PaceEstimate> {
        vec![
            PaceEstimate::new(PaceLevel::Easy, self.config.easy_pace_min_per_km, distance_km),
            PaceEstimate::new(
                PaceLevel::Moderate,
                self.config.moderate_pace_min_per_km,
                distance_km,
            ),
            PaceEstimate::new(PaceLevel::Fast, self.config.fast_pace_min_per_km, distance_km),
        ]
    }
}
