use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First geocoding match for a free-form address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeocodedLocation {
    pub coordinates: Coordinates,
    pub formatted_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub coordinates: Coordinates,
}

/// Things runners look for along a route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AmenityType {
    Restroom,
    Water,
    Cafe,
    Park,
    Gym,
    Store,
    /// Passed through verbatim as a places type
    #[serde(untagged)]
    Other(String),
}

impl AmenityType {
    /// Places API type searched for this amenity
    pub fn place_type(&self) -> &str {
        match self {
            AmenityType::Restroom => "toilet",
            // Parks usually have drinking fountains
            AmenityType::Water => "park",
            AmenityType::Cafe => "cafe",
            AmenityType::Park => "park",
            AmenityType::Gym => "gym",
            AmenityType::Store => "convenience_store",
            AmenityType::Other(place_type) => place_type,
        }
    }
}

impl fmt::Display for AmenityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmenityType::Restroom => write!(f, "restroom"),
            AmenityType::Water => write!(f, "water"),
            AmenityType::Cafe => write!(f, "cafe"),
            AmenityType::Park => write!(f, "park"),
            AmenityType::Gym => write!(f, "gym"),
            AmenityType::Store => write!(f, "store"),
            AmenityType::Other(place_type) => write!(f, "{}", place_type),
        }
    }
}

impl FromStr for AmenityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "" => Err("Amenity type must not be empty".to_string()),
            "restroom" => Ok(AmenityType::Restroom),
            "water" => Ok(AmenityType::Water),
            "cafe" => Ok(AmenityType::Cafe),
            "park" => Ok(AmenityType::Park),
            "gym" => Ok(AmenityType::Gym),
            "store" => Ok(AmenityType::Store),
            _ => Ok(AmenityType::Other(normalized)),
        }
    }
}

/// Outcome of one amenity lookup; lookups fail independently
#[derive(Debug, Clone, Serialize)]
pub struct AmenityResult {
    pub amenity_type: AmenityType,
    pub places: Vec<Place>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartPointSuggestion {
    pub location: String,
    pub coordinates: Coordinates,
    pub nearby_parks: Vec<Place>,
    pub recommendation: &'static str,
}
