//! Waypoint geometry for loop and out-and-back routes.
//!
//! Everything here is a flat-Earth approximation (111 km per degree, with
//! longitude scaled by `cos(latitude)`). It is good for the few kilometres a
//! run covers and degrades near the poles, where the longitude scale
//! collapses; centers that close to a pole are rejected.

use crate::constants::{DEFAULT_STREET_FACTOR, KM_PER_DEGREE, LOOP_START_ANGLE_DEG, MIN_COS_LATITUDE};
use crate::error::{AppError, Result};
use crate::models::Coordinates;

#[derive(Debug, Clone, Copy)]
pub struct WaypointSynthesizer {
    street_factor: f64,
}

impl Default for WaypointSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_STREET_FACTOR)
    }
}

impl WaypointSynthesizer {
    pub fn new(street_factor: f64) -> Self {
        Self { street_factor }
    }

    pub fn street_factor(&self) -> f64 {
        self.street_factor
    }

    /// Radius of the circle whose street-following perimeter matches the target
    pub fn loop_radius_km(&self, target_distance_km: f64) -> f64 {
        target_distance_km / (std::f64::consts::TAU * self.street_factor)
    }

    /// Straight-line distance to the out-and-back turnaround point
    pub fn out_and_back_leg_km(&self, target_distance_km: f64) -> f64 {
        (target_distance_km / 2.0) / self.street_factor
    }

    /// Place `num_points` waypoints evenly on a circle (an ellipse in degrees)
    /// around `center`, starting at 45° and stepping `360 / num_points`.
    /// The returned order is the traversal order.
    pub fn generate_loop(
        &self,
        center: Coordinates,
        target_distance_km: f64,
        num_points: usize,
    ) -> Result<Vec<Coordinates>> {
        validate_distance(target_distance_km)?;
        if num_points == 0 {
            return Err(AppError::InvalidArgument(
                "Loop needs at least one waypoint".to_string(),
            ));
        }
        let (lat_scale, lng_scale) = degree_scales(&center)?;

        let radius_km = self.loop_radius_km(target_distance_km);
        let lat_offset = radius_km * lat_scale;
        let lng_offset = radius_km * lng_scale;
        let angle_step = 360.0 / num_points as f64;

        let waypoints = (0..num_points)
            .map(|i| {
                let angle = (LOOP_START_ANGLE_DEG + i as f64 * angle_step).to_radians();
                offset_point(
                    &center,
                    lat_offset * angle.sin(),
                    lng_offset * angle.cos(),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            waypoints = waypoints.len(),
            radius_km = %format!("{:.3}", radius_km),
            "Generated loop with {} waypoints (radius: {:.3}km)",
            waypoints.len(), radius_km
        );

        Ok(waypoints)
    }

    /// Single turnaround point half the (street-adjusted) distance away along
    /// a compass bearing (0° = north, clockwise).
    pub fn generate_out_and_back(
        &self,
        center: Coordinates,
        target_distance_km: f64,
        bearing_deg: f64,
    ) -> Result<Vec<Coordinates>> {
        validate_distance(target_distance_km)?;
        if !bearing_deg.is_finite() {
            return Err(AppError::InvalidArgument(format!(
                "Invalid bearing: {}",
                bearing_deg
            )));
        }
        let (lat_scale, lng_scale) = degree_scales(&center)?;

        let one_way_km = self.out_and_back_leg_km(target_distance_km);
        let bearing = bearing_deg.to_radians();
        let turnaround = offset_point(
            &center,
            one_way_km * lat_scale * bearing.cos(),
            one_way_km * lng_scale * bearing.sin(),
        )?;

        tracing::debug!(
            one_way_km = %format!("{:.3}", one_way_km),
            bearing_deg = bearing_deg,
            "Generated out-and-back turnaround {:.3}km away at {}°",
            one_way_km, bearing_deg
        );

        Ok(vec![turnaround])
    }
}

fn validate_distance(target_distance_km: f64) -> Result<()> {
    if target_distance_km.is_finite() && target_distance_km > 0.0 {
        Ok(())
    } else {
        Err(AppError::InvalidArgument(format!(
            "Target distance must be greater than 0 km (got {})",
            target_distance_km
        )))
    }
}

/// Degrees per km of latitude and of longitude at `center`
fn degree_scales(center: &Coordinates) -> Result<(f64, f64)> {
    center.validate().map_err(AppError::InvalidArgument)?;
    let cos_lat = center.lat.to_radians().cos();
    if cos_lat.abs() < MIN_COS_LATITUDE {
        return Err(AppError::InvalidArgument(format!(
            "Latitude {} is too close to a pole for waypoint geometry",
            center.lat
        )));
    }
    Ok((1.0 / KM_PER_DEGREE, 1.0 / (KM_PER_DEGREE * cos_lat)))
}

fn offset_point(center: &Coordinates, dlat: f64, dlng: f64) -> Result<Coordinates> {
    Coordinates::new(center.lat + dlat, center.lng + dlng).map_err(|e| {
        AppError::InvalidArgument(format!("Waypoint falls outside valid coordinates: {}", e))
    })
}
