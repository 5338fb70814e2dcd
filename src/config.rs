use crate::constants::*;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub google_maps: GoogleMapsConfig,
    pub planner: PlannerConfig,
}

/// Connection settings shared by every upstream client
#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    pub api_key: String,
    /// Root of the web-service API; tests point this at a local mock
    pub base_url: String,
    pub request_timeout: Duration,
}

impl GoogleMapsConfig {
    pub fn new(api_key: String) -> Self {
        GoogleMapsConfig {
            api_key,
            base_url: DEFAULT_GOOGLE_MAPS_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Street-following factor used to shrink target distances into
    /// straight-line geometry (1.3 = streets are 30% longer than the crow flies)
    pub street_factor: f64,

    /// Number of waypoints placed around a synthesized loop
    pub loop_waypoints: usize,

    /// Compass bearing (degrees) of the out-and-back turnaround when the
    /// request does not specify one
    pub out_and_back_bearing_deg: f64,

    /// Elevation samples requested along a planned route
    pub elevation_samples: usize,

    /// Radius (m) for runner amenity lookups
    pub amenity_radius_m: u32,

    /// Radius (m) for parks around a suggested start point
    pub start_point_radius_m: u32,

    pub easy_pace_min_per_km: f64,
    pub moderate_pace_min_per_km: f64,
    pub fast_pace_min_per_km: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            street_factor: DEFAULT_STREET_FACTOR,
            loop_waypoints: DEFAULT_LOOP_WAYPOINTS,
            out_and_back_bearing_deg: DEFAULT_OUT_AND_BACK_BEARING_DEG,
            elevation_samples: DEFAULT_ELEVATION_SAMPLES,
            amenity_radius_m: DEFAULT_AMENITY_RADIUS_M,
            start_point_radius_m: DEFAULT_START_POINT_RADIUS_M,
            easy_pace_min_per_km: EASY_PACE_MIN_PER_KM,
            moderate_pace_min_per_km: MODERATE_PACE_MIN_PER_KM,
            fast_pace_min_per_km: FAST_PACE_MIN_PER_KM,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            street_factor: env::var("RUN_STREET_FACTOR")
                .unwrap_or_else(|_| defaults.street_factor.to_string())
                .parse()
                .map_err(|_| "Invalid RUN_STREET_FACTOR")?,

            loop_waypoints: env::var("RUN_LOOP_WAYPOINTS")
                .unwrap_or_else(|_| defaults.loop_waypoints.to_string())
                .parse()
                .map_err(|_| "Invalid RUN_LOOP_WAYPOINTS")?,

            out_and_back_bearing_deg: env::var("RUN_OUT_AND_BACK_BEARING_DEG")
                .unwrap_or_else(|_| defaults.out_and_back_bearing_deg.to_string())
                .parse()
                .map_err(|_| "Invalid RUN_OUT_AND_BACK_BEARING_DEG")?,

            elevation_samples: env::var("RUN_ELEVATION_SAMPLES")
                .unwrap_or_else(|_| defaults.elevation_samples.to_string())
                .parse()
                .map_err(|_| "Invalid RUN_ELEVATION_SAMPLES")?,

            amenity_radius_m: env::var("RUN_AMENITY_RADIUS_M")
                .unwrap_or_else(|_| defaults.amenity_radius_m.to_string())
                .parse()
                .map_err(|_| "Invalid RUN_AMENITY_RADIUS_M")?,

            start_point_radius_m: env::var("RUN_START_POINT_RADIUS_M")
                .unwrap_or_else(|_| defaults.start_point_radius_m.to_string())
                .parse()
                .map_err(|_| "Invalid RUN_START_POINT_RADIUS_M")?,

            easy_pace_min_per_km: env::var("RUN_PACE_EASY")
                .unwrap_or_else(|_| defaults.easy_pace_min_per_km.to_string())
                .parse()
                .map_err(|_| "Invalid RUN_PACE_EASY")?,

            moderate_pace_min_per_km: env::var("RUN_PACE_MODERATE")
                .unwrap_or_else(|_| defaults.moderate_pace_min_per_km.to_string())
                .parse()
                .map_err(|_| "Invalid RUN_PACE_MODERATE")?,

            fast_pace_min_per_km: env::var("RUN_PACE_FAST")
                .unwrap_or_else(|_| defaults.fast_pace_min_per_km.to_string())
                .parse()
                .map_err(|_| "Invalid RUN_PACE_FAST")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.street_factor.is_finite() && self.street_factor >= 1.0) {
            return Err("RUN_STREET_FACTOR must be a finite number >= 1.0".to_string());
        }
        if !(1..=MAX_DIRECTIONS_WAYPOINTS).contains(&self.loop_waypoints) {
            return Err(format!(
                "RUN_LOOP_WAYPOINTS must be between 1 and {}",
                MAX_DIRECTIONS_WAYPOINTS
            ));
        }
        if !(MIN_ELEVATION_SAMPLES..=MAX_ELEVATION_SAMPLES).contains(&self.elevation_samples) {
            return Err(format!(
                "RUN_ELEVATION_SAMPLES must be between {} and {}",
                MIN_ELEVATION_SAMPLES, MAX_ELEVATION_SAMPLES
            ));
        }
        let paces = [
            self.easy_pace_min_per_km,
            self.moderate_pace_min_per_km,
            self.fast_pace_min_per_km,
        ];
        if paces.iter().any(|p| !(p.is_finite() && *p > 0.0)) {
            return Err("Running paces must be positive".to_string());
        }
        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let timeout_ms: u64 = env::var("GOOGLE_MAPS_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_MS.to_string())
            .parse()
            .map_err(|_| "Invalid GOOGLE_MAPS_TIMEOUT_MS")?;

        if timeout_ms == 0 {
            return Err("GOOGLE_MAPS_TIMEOUT_MS must be greater than 0".to_string());
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            google_maps: GoogleMapsConfig {
                api_key: env::var("GOOGLE_MAPS_API_KEY")
                    .map_err(|_| "GOOGLE_MAPS_API_KEY must be set")?,
                base_url: env::var("GOOGLE_MAPS_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_GOOGLE_MAPS_BASE_URL.to_string()),
                request_timeout: Duration::from_millis(timeout_ms),
            },
            planner: PlannerConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
