use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a route starts or ends: either a point or something to geocode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Location {
    Coordinates(Coordinates),
    Address(String),
}

impl Location {
    /// Read `"lat,lng"` as coordinates, anything else as an address
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if let Some((lat, lng)) = trimmed.split_once(',') {
            if let (Ok(lat), Ok(lng)) = (lat.trim().parse::<f64>(), lng.trim().parse::<f64>()) {
                if let Ok(coords) = Coordinates::new(lat, lng) {
                    return Location::Coordinates(coords);
                }
            }
        }
        Location::Address(trimmed.to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            Location::Coordinates(coords) => coords.validate(),
            Location::Address(address) if address.trim().is_empty() => {
                Err("Location address must not be empty".to_string())
            }
            Location::Address(_) => Ok(()),
        }
    }

    /// Coordinates when no geocoding is needed
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Location::Coordinates(coords) => Some(*coords),
            Location::Address(_) => None,
        }
    }
}

impl From<Coordinates> for Location {
    fn from(coords: Coordinates) -> Self {
        Location::Coordinates(coords)
    }
}

impl From<&str> for Location {
    fn from(address: &str) -> Self {
        Location::Address(address.to_string())
    }
}

/// The string handed to upstream APIs and to shareable map links
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Coordinates(coords) => write!(f, "{}", coords),
            Location::Address(address) => f.write_str(address),
        }
    }
}
