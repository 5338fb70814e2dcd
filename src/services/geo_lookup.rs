use crate::constants::NEARBY_PLACES_LIMIT;
use crate::error::{AppError, Result};
use crate::models::{
    AmenityResult, AmenityType, Coordinates, GeocodedLocation, Location, Place,
    StartPointSuggestion,
};
use crate::services::google_maps::{ApiLatLng, GoogleApi, GoogleMapsClient};
use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;
use std::sync::Arc;

const START_POINT_RECOMMENDATION: &str =
    "Parks are excellent starting points with paths, water, and restrooms";

/// Address and place lookups
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<GeocodedLocation>;

    async fn nearby_places(
        &self,
        center: &Coordinates,
        radius_m: u32,
        place_type: &str,
    ) -> Result<Vec<Place>>;
}

#[derive(Clone)]
pub struct GoogleGeocoder {
    client: GoogleMapsClient,
}

impl GoogleGeocoder {
    pub fn new(client: GoogleMapsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeocodedLocation> {
        let body: GeocodeBody = self
            .client
            .fetch(GoogleApi::Geocoding, &[("address", address.to_string())])
            .await?;

        let first = body.results.into_iter().next().ok_or_else(|| {
            AppError::Transport(format!("Geocoding response for '{}' had no results", address))
        })?;

        let coordinates = first.geometry.location.into_coordinates()?;
        tracing::debug!(
            address = address,
            lat = coordinates.lat,
            lng = coordinates.lng,
            "Geocoded '{}' to ({:.5}, {:.5})",
            address, coordinates.lat, coordinates.lng
        );

        Ok(GeocodedLocation {
            coordinates,
            formatted_address: first.formatted_address,
            place_id: first.place_id,
        })
    }

    async fn nearby_places(
        &self,
        center: &Coordinates,
        radius_m: u32,
        place_type: &str,
    ) -> Result<Vec<Place>> {
        let body: NearbyBody = self
            .client
            .fetch(
                GoogleApi::PlacesNearby,
                &[
                    ("location", center.to_string()),
                    ("radius", radius_m.to_string()),
                    ("type", place_type.to_string()),
                ],
            )
            .await?;

        body.results
            .into_iter()
            .take(NEARBY_PLACES_LIMIT)
            .map(|result| {
                Ok(Place {
                    name: result.name,
                    address: result.vicinity,
                    rating: result.rating,
                    coordinates: result.geometry.location.into_coordinates()?,
                })
            })
            .collect()
    }
}

// Upstream response types

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GeocodeBody {
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: ApiGeometry,
    formatted_address: String,
    #[serde(default)]
    place_id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct NearbyBody {
    results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    name: String,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    geometry: ApiGeometry,
}

#[derive(Debug, Deserialize)]
struct ApiGeometry {
    location: ApiLatLng,
}

/// Geocoding, nearby search and the runner-oriented lookups built on them
#[derive(Clone)]
pub struct GeoLookup {
    geocoder: Arc<dyn Geocoder>,
}

impl GeoLookup {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    pub async fn geocode(&self, address: &str) -> Result<GeocodedLocation> {
        if address.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "Address must not be empty".to_string(),
            ));
        }
        self.geocoder.geocode(address).await
    }

    /// Coordinates for a location, geocoding only when it is an address
    pub async fn resolve(&self, location: &Location) -> Result<Coordinates> {
        match location {
            Location::Coordinates(coords) => Ok(*coords),
            Location::Address(address) => Ok(self.geocode(address).await?.coordinates),
        }
    }

    pub async fn nearby_places(
        &self,
        center: &Coordinates,
        radius_m: u32,
        place_type: &str,
    ) -> Result<Vec<Place>> {
        center.validate().map_err(AppError::InvalidArgument)?;
        if radius_m == 0 {
            return Err(AppError::InvalidArgument(
                "Search radius must be greater than 0".to_string(),
            ));
        }
        self.geocoder
            .nearby_places(center, radius_m, place_type)
            .await
    }

    /// Look up several amenity types around `center` concurrently.
    /// Each lookup succeeds or fails on its own; results keep request order.
    pub async fn find_amenities(
        &self,
        center: &Coordinates,
        amenities: &[AmenityType],
        radius_m: u32,
    ) -> Result<Vec<AmenityResult>> {
        center.validate().map_err(AppError::InvalidArgument)?;
        if amenities.is_empty() {
            return Err(AppError::InvalidArgument(
                "At least one amenity type is required".to_string(),
            ));
        }

        tracing::info!(
            lat = center.lat,
            lng = center.lng,
            amenities = amenities.len(),
            radius_m = radius_m,
            "Searching {} amenity types within {}m",
            amenities.len(), radius_m
        );

        let lookups = amenities.iter().map(|amenity| async move {
            let outcome = self
                .nearby_places(center, radius_m, amenity.place_type())
                .await;
            match outcome {
                Ok(places) => AmenityResult {
                    amenity_type: amenity.clone(),
                    places,
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(
                        amenity = %amenity,
                        error = %e,
                        "Amenity lookup for {} failed: {}",
                        amenity, e
                    );
                    AmenityResult {
                        amenity_type: amenity.clone(),
                        places: Vec::new(),
                        error: Some(e.to_string()),
                    }
                }
            }
        });

        Ok(join_all(lookups).await)
    }

    /// Geocode a general area and list parks nearby as candidate start points.
    /// A failed park search still yields the geocoded point.
    pub async fn find_start_points(
        &self,
        location: &str,
        radius_m: u32,
    ) -> Result<StartPointSuggestion> {
        let geocoded = self.geocode(location).await?;

        let nearby_parks = match self
            .nearby_places(&geocoded.coordinates, radius_m, "park")
            .await
        {
            Ok(parks) => parks,
            Err(e) => {
                tracing::warn!(
                    location = location,
                    error = %e,
                    "Park search around '{}' failed, continuing without parks",
                    location
                );
                Vec::new()
            }
        };

        Ok(StartPointSuggestion {
            location: location.to_string(),
            coordinates: geocoded.coordinates,
            nearby_parks,
            recommendation: START_POINT_RECOMMENDATION,
        })
    }
}
