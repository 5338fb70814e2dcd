use crate::error::{AppError, Result};
use crate::models::{RouteRequest, RunPlan};
use crate::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    #[serde(flatten)]
    pub route: RouteRequest,
    /// Sample the route's terrain after assembly (default: true)
    #[serde(default = "default_analyze_elevation")]
    pub analyze_elevation: bool,
}

fn default_analyze_elevation() -> bool {
    true
}

/// POST /routes/plan
/// Assemble a loop, out-and-back or point-to-point route and profile its terrain
pub async fn plan_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanRouteRequest>,
) -> Result<Json<RunPlan>> {
    request.route.validate().map_err(AppError::InvalidArgument)?;

    tracing::info!(
        kind = %request.route.kind(),
        start = %request.route.start_location,
        distance_km = ?request.route.target_distance_km,
        analyze_elevation = request.analyze_elevation,
        "Plan route request: {} from {}",
        request.route.kind(), request.route.start_location
    );

    let plan = state
        .run_planner
        .plan(&request.route, request.analyze_elevation)
        .await?;

    Ok(Json(plan))
}
