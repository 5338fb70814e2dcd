use crate::error::Result;
use crate::models::{RouteMetrics, RouteRequest, RunPlan};
use crate::services::elevation::ElevationProfiler;
use crate::services::route_assembler::RouteAssembler;

/// Route assembly followed by optional terrain analysis.
///
/// A route is returned whenever assembly succeeds: an elevation failure is
/// recorded on the plan instead of failing the whole request.
#[derive(Clone)]
pub struct RunPlanner {
    assembler: RouteAssembler,
    profiler: ElevationProfiler,
}

impl RunPlanner {
    pub fn new(assembler: RouteAssembler, profiler: ElevationProfiler) -> Self {
        Self {
            assembler,
            profiler,
        }
    }

    pub fn assembler(&self) -> &RouteAssembler {
        &self.assembler
    }

    pub async fn plan(&self, request: &RouteRequest, analyze_elevation: bool) -> Result<RunPlan> {
        let route = self.assembler.assemble(request).await?;

        if !analyze_elevation {
            return Ok(RunPlan {
                route,
                elevation: None,
                metrics: None,
                elevation_error: None,
            });
        }

        let samples = self.assembler.config().elevation_samples;
        match self.profiler.get_elevation_profile(route.path(), samples).await {
            Ok(profile) => {
                let metrics = RouteMetrics::new(&route, &profile);
                Ok(RunPlan {
                    route,
                    elevation: Some(profile),
                    metrics: Some(metrics),
                    elevation_error: None,
                })
            }
            Err(e) => {
                tracing::warn!(
                    route_id = %route.id,
                    error = %e,
                    "Elevation analysis failed for route {}: {}",
                    route.id, e
                );
                Ok(RunPlan {
                    route,
                    elevation: None,
                    metrics: None,
                    elevation_error: Some(e.to_string()),
                })
            }
        }
    }
}
