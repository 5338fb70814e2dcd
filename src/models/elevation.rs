use crate::error::{AppError, Result};
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gain thresholds (m), checked in order: the first tier whose limit the
/// gain stays below wins. Anything at or above the last limit is VeryHilly.
const DIFFICULTY_THRESHOLDS: &[(f64, DifficultyTier)] = &[
    (50.0, DifficultyTier::Flat),
    (150.0, DifficultyTier::Rolling),
    (300.0, DifficultyTier::Hilly),
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyTier {
    Flat,
    Rolling,
    Hilly,
    VeryHilly,
}

impl DifficultyTier {
    pub fn from_gain(elevation_gain_m: f64) -> Self {
        DIFFICULTY_THRESHOLDS
            .iter()
            .find(|(limit, _)| elevation_gain_m < *limit)
            .map(|(_, tier)| *tier)
            .unwrap_or(DifficultyTier::VeryHilly)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DifficultyTier::Flat => "Flat - Great for speed work",
            DifficultyTier::Rolling => "Rolling - Moderate hills",
            DifficultyTier::Hilly => "Hilly - Challenging",
            DifficultyTier::VeryHilly => "Very Hilly - Advanced",
        }
    }

    pub fn training_benefit(&self) -> &'static str {
        match self {
            DifficultyTier::Flat => "Perfect for tempo runs and interval training",
            DifficultyTier::Rolling => "Good for building leg strength and endurance",
            DifficultyTier::Hilly => "Excellent hill training, builds power and stamina",
            DifficultyTier::VeryHilly => "Serious hill work, great for race prep and strength",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyTier::Flat => write!(f, "FLAT"),
            DifficultyTier::Rolling => write!(f, "ROLLING"),
            DifficultyTier::Hilly => write!(f, "HILLY"),
            DifficultyTier::VeryHilly => write!(f, "VERY_HILLY"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ElevationSample {
    #[serde(flatten)]
    pub coordinates: Coordinates,
    pub elevation_m: f64,
}

impl ElevationSample {
    pub fn new(coordinates: Coordinates, elevation_m: f64) -> Self {
        ElevationSample {
            coordinates,
            elevation_m,
        }
    }
}

/// Samples along a path plus the terrain statistics derived from them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevationProfile {
    pub samples: Vec<ElevationSample>,
    pub elevation_gain_m: f64,
    pub elevation_loss_m: f64,
    pub max_elevation_m: f64,
    pub min_elevation_m: f64,
    /// Sum of flat-Earth segment lengths between consecutive samples
    pub planar_distance_m: f64,
    pub average_grade_pct: f64,
    pub difficulty_tier: DifficultyTier,
}

impl ElevationProfile {
    pub fn from_samples(samples: Vec<ElevationSample>) -> Result<Self> {
        let first = samples.first().ok_or_else(|| {
            AppError::InvalidArgument("Elevation profile needs at least one sample".to_string())
        })?;

        let mut gain = 0.0;
        let mut loss = 0.0;
        let mut planar_distance_m = 0.0;
        let mut max_elevation_m = first.elevation_m;
        let mut min_elevation_m = first.elevation_m;

        for pair in samples.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let delta = next.elevation_m - prev.elevation_m;
            if delta > 0.0 {
                gain += delta;
            } else {
                loss -= delta;
            }
            planar_distance_m += prev.coordinates.planar_distance_m(&next.coordinates);
            max_elevation_m = max_elevation_m.max(next.elevation_m);
            min_elevation_m = min_elevation_m.min(next.elevation_m);
        }

        let average_grade_pct = if planar_distance_m > 0.0 {
            gain / planar_distance_m * 100.0
        } else {
            0.0
        };

        Ok(ElevationProfile {
            samples,
            elevation_gain_m: gain,
            elevation_loss_m: loss,
            max_elevation_m,
            min_elevation_m,
            planar_distance_m,
            average_grade_pct,
            // Tiered on the gain to the nearest centimetre
            difficulty_tier: DifficultyTier::from_gain((gain * 100.0).round() / 100.0),
        })
    }

    pub fn recommendation(&self) -> String {
        format!(
            "This route has {:.0}m elevation gain over approximately {:.1}km. {}. {}.",
            self.elevation_gain_m,
            self.planar_distance_m / 1000.0,
            self.difficulty_tier.label(),
            self.difficulty_tier.training_benefit()
        )
    }
}
