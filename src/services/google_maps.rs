use crate::config::GoogleMapsConfig;
use crate::constants::UPSTREAM_OK_STATUS;
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Web-service endpoints used by the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoogleApi {
    Geocoding,
    PlacesNearby,
    Directions,
    Elevation,
}

impl GoogleApi {
    fn path(&self) -> &'static str {
        match self {
            GoogleApi::Geocoding => "geocode/json",
            GoogleApi::PlacesNearby => "place/nearbysearch/json",
            GoogleApi::Directions => "directions/json",
            GoogleApi::Elevation => "elevation/json",
        }
    }

    pub fn service_name(&self) -> &'static str {
        match self {
            GoogleApi::Geocoding => "Geocoding",
            GoogleApi::PlacesNearby => "Places",
            GoogleApi::Directions => "Directions",
            GoogleApi::Elevation => "Elevation",
        }
    }
}

/// Every endpoint wraps its payload with a `status` string
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(flatten)]
    body: T,
}

/// `{lat, lng}` object shared by every upstream endpoint
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct ApiLatLng {
    pub lat: f64,
    pub lng: f64,
}

impl ApiLatLng {
    pub(crate) fn into_coordinates(self) -> Result<Coordinates> {
        Coordinates::new(self.lat, self.lng)
            .map_err(|e| AppError::Transport(format!("Upstream returned {}", e)))
    }
}

/// HTTP plumbing shared by the geocoding, places, directions and elevation clients.
/// One call, one attempt: no retries.
#[derive(Clone)]
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl GoogleMapsClient {
    pub fn new(config: &GoogleMapsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(GoogleMapsClient {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout,
        })
    }

    /// Issue a GET against `api` and return the payload when the status is OK
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        api: GoogleApi,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, api.path());
        let started = Instant::now();

        tracing::debug!(
            service = api.service_name(),
            params = params.len(),
            "{} API request",
            api.service_name()
        );

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", &self.api_key)])
            .send()
            .await
            .map_err(|e| self.transport_error(api, e))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(
                service = api.service_name(),
                status = %status,
                "{} API HTTP error {}",
                api.service_name(), status
            );
            return Err(AppError::UpstreamStatus {
                service: api.service_name(),
                status: format!("HTTP {}", status.as_u16()),
            });
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| self.transport_error(api, e))?;

        let elapsed_ms = started.elapsed().as_millis() as u64;

        if envelope.status != UPSTREAM_OK_STATUS {
            tracing::warn!(
                service = api.service_name(),
                api_status = %envelope.status,
                duration_ms = elapsed_ms,
                detail = envelope.error_message.as_deref().unwrap_or(""),
                "{} API returned status {}",
                api.service_name(), envelope.status
            );
            return Err(AppError::UpstreamStatus {
                service: api.service_name(),
                status: envelope.status,
            });
        }

        tracing::debug!(
            service = api.service_name(),
            duration_ms = elapsed_ms,
            "{} API responded in {}ms",
            api.service_name(), elapsed_ms
        );

        Ok(envelope.body)
    }

    fn transport_error(&self, api: GoogleApi, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            tracing::warn!(
                service = api.service_name(),
                timeout_ms = self.timeout.as_millis() as u64,
                "{} API request timed out",
                api.service_name()
            );
            return AppError::Timeout {
                service: api.service_name(),
                timeout_ms: self.timeout.as_millis() as u64,
            };
        }

        tracing::error!(
            service = api.service_name(),
            error = %err,
            "{} API request failed: {}",
            api.service_name(), err
        );
        let kind = if err.is_decode() {
            "Failed to parse response"
        } else {
            "Request failed"
        };
        AppError::Transport(format!("{} {}: {}", api.service_name(), kind, err))
    }
}
