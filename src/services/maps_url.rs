//! Shareable Google Maps links.

use crate::constants::{MAPS_DIRECTIONS_BASE_URL, MAPS_SEARCH_BASE_URL};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, TravelMode};
use urlencoding::encode;

/// `https://www.google.com/maps/dir/<origin>/<waypoints...>/<destination>/@?travelmode=<mode>`
/// with every segment percent-encoded on its own.
pub fn directions_url<S: AsRef<str>>(
    origin: &str,
    waypoints: &[S],
    destination: &str,
    mode: TravelMode,
) -> String {
    let segments: Vec<String> = std::iter::once(origin)
        .chain(waypoints.iter().map(|w| w.as_ref()))
        .chain(std::iter::once(destination))
        .map(|segment| encode(segment).into_owned())
        .collect();

    format!(
        "{}{}/@?travelmode={}",
        MAPS_DIRECTIONS_BASE_URL,
        segments.join("/"),
        mode.as_str()
    )
}

/// Directions link through raw coordinates, written as `lat,lng` segments
pub fn coordinates_url(coordinates: &[Coordinates], mode: TravelMode) -> Result<String> {
    if coordinates.len() < 2 {
        return Err(AppError::InvalidArgument(
            "Need at least 2 coordinates for a route".to_string(),
        ));
    }

    let segments: Vec<String> = coordinates.iter().map(|c| c.to_string()).collect();
    Ok(format!(
        "{}{}/@?travelmode={}",
        MAPS_DIRECTIONS_BASE_URL,
        segments.join("/"),
        mode.as_str()
    ))
}

/// Search link with a marker at a point
pub fn place_marker_url(location: &Coordinates, label: Option<&str>) -> String {
    let mut url = format!(
        "{}?api=1&query={},{}",
        MAPS_SEARCH_BASE_URL, location.lat, location.lng
    );
    if let Some(label) = label {
        url.push_str("&query_place_id=");
        url.push_str(&encode(label));
    }
    url
}
