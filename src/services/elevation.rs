use crate::constants::{MAX_ELEVATION_SAMPLES, MIN_ELEVATION_SAMPLES};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, ElevationProfile, ElevationSample};
use crate::services::google_maps::{ApiLatLng, GoogleApi, GoogleMapsClient};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Source of elevation samples
#[async_trait]
pub trait ElevationProvider: Send + Sync {
    /// Elevations at `samples` evenly spaced points along `path`. The points
    /// are chosen upstream and are generally not the path vertices.
    async fn sample_path(
        &self,
        path: &[Coordinates],
        samples: usize,
    ) -> Result<Vec<ElevationSample>>;

    async fn elevation_at(&self, location: &Coordinates) -> Result<ElevationSample>;
}

#[derive(Clone)]
pub struct GoogleElevationClient {
    client: GoogleMapsClient,
}

impl GoogleElevationClient {
    pub fn new(client: GoogleMapsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ElevationProvider for GoogleElevationClient {
    async fn sample_path(
        &self,
        path: &[Coordinates],
        samples: usize,
    ) -> Result<Vec<ElevationSample>> {
        let path_param = path
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("|");

        let body: ElevationBody = self
            .client
            .fetch(
                GoogleApi::Elevation,
                &[("path", path_param), ("samples", samples.to_string())],
            )
            .await?;

        body.into_samples()
    }

    async fn elevation_at(&self, location: &Coordinates) -> Result<ElevationSample> {
        let body: ElevationBody = self
            .client
            .fetch(GoogleApi::Elevation, &[("locations", location.to_string())])
            .await?;

        body.into_samples()?.into_iter().next().ok_or_else(|| {
            AppError::Transport("Elevation response contained no results".to_string())
        })
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ElevationBody {
    results: Vec<ApiElevationResult>,
}

#[derive(Debug, Deserialize)]
struct ApiElevationResult {
    location: ApiLatLng,
    elevation: f64,
}

impl ElevationBody {
    fn into_samples(self) -> Result<Vec<ElevationSample>> {
        self.results
            .into_iter()
            .map(|r| Ok(ElevationSample::new(r.location.into_coordinates()?, r.elevation)))
            .collect()
    }
}

/// Samples a path and derives its terrain statistics
#[derive(Clone)]
pub struct ElevationProfiler {
    provider: Arc<dyn ElevationProvider>,
}

impl ElevationProfiler {
    pub fn new(provider: Arc<dyn ElevationProvider>) -> Self {
        Self { provider }
    }

    pub async fn get_elevation_profile(
        &self,
        path: &[Coordinates],
        samples: usize,
    ) -> Result<ElevationProfile> {
        if path.len() < 2 {
            return Err(AppError::InvalidArgument(
                "Elevation profile needs a path of at least 2 points".to_string(),
            ));
        }
        if !(MIN_ELEVATION_SAMPLES..=MAX_ELEVATION_SAMPLES).contains(&samples) {
            return Err(AppError::InvalidArgument(format!(
                "samples must be between {} and {} (got {})",
                MIN_ELEVATION_SAMPLES, MAX_ELEVATION_SAMPLES, samples
            )));
        }
        for point in path {
            point.validate().map_err(AppError::InvalidArgument)?;
        }

        tracing::info!(
            path_points = path.len(),
            samples = samples,
            "Sampling elevation along {} path points ({} samples)",
            path.len(), samples
        );

        let samples = self.provider.sample_path(path, samples).await?;
        if samples.is_empty() {
            return Err(AppError::Transport(
                "Elevation response contained no samples".to_string(),
            ));
        }

        let profile = ElevationProfile::from_samples(samples)?;

        tracing::info!(
            gain_m = %format!("{:.1}", profile.elevation_gain_m),
            loss_m = %format!("{:.1}", profile.elevation_loss_m),
            grade_pct = %format!("{:.2}", profile.average_grade_pct),
            tier = %profile.difficulty_tier,
            "Elevation profile: +{:.1}m / -{:.1}m, {}",
            profile.elevation_gain_m, profile.elevation_loss_m, profile.difficulty_tier
        );

        Ok(profile)
    }

    pub async fn elevation_at(&self, location: &Coordinates) -> Result<ElevationSample> {
        location.validate().map_err(AppError::InvalidArgument)?;
        self.provider.elevation_at(location).await
    }
}
