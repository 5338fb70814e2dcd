use crate::constants::{KM_PER_DEGREE, METERS_PER_DEGREE};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        let coords = Coordinates { lat, lng };
        coords.validate()?;
        Ok(coords)
    }

    /// Range check for values that bypassed `new` (e.g. deserialized input)
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                self.lat
            ));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                self.lng
            ));
        }
        Ok(())
    }

    /// Flat Euclidean distance in degree-space, scaled by 111,000 m/degree.
    /// Longitude is not corrected for latitude, so this overstates east-west
    /// segments away from the equator. Only meaningful for short segments.
    pub fn planar_distance_m(&self, other: &Coordinates) -> f64 {
        let dlat = other.lat - self.lat;
        let dlng = other.lng - self.lng;
        (dlat * dlat + dlng * dlng).sqrt() * METERS_PER_DEGREE
    }

    /// Local tangent-plane distance in km using 111 km/degree with the
    /// longitude scaled by `cos(lat)` of `self`. Inverse of the offsets the
    /// waypoint synthesizer applies.
    pub fn local_distance_km(&self, other: &Coordinates) -> f64 {
        let dy = (other.lat - self.lat) * KM_PER_DEGREE;
        let dx = (other.lng - self.lng) * KM_PER_DEGREE * self.lat.to_radians().cos();
        (dx * dx + dy * dy).sqrt()
    }
}

/// Renders as `lat,lng`, the form every upstream endpoint accepts
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
