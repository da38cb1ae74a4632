//! Pretrained linear model coefficients consumed by the risk model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelWeights {
    pub income: f64,
    pub transit: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub trained_on: String,
    #[serde(default)]
    pub trained_at: Option<String>,
    #[serde(default)]
    pub r_squared: Option<f64>,
}

/// Versioned coefficient record. Read-only input to scoring; never refit at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCoefficients {
    pub weights: ModelWeights,
    pub intercept: f64,
    pub version: String,
    pub training: TrainingMetadata,
}

impl ModelCoefficients {
    /// Coefficients exported from the `synthetic_city_v1` regression.
    pub fn trained_v1() -> Self {
        Self {
            weights: ModelWeights {
                income: 0.3421,
                transit: 0.2155,
                distance: 0.5892,
            },
            intercept: -0.0543,
            version: "1.0.0".to_string(),
            training: TrainingMetadata {
                trained_on: "synthetic_city_v1".to_string(),
                trained_at: Some("2025-11-02".to_string()),
                r_squared: Some(0.85),
            },
        }
    }

    /// Linear combination of the three vulnerability components.
    pub fn predict(&self, income: f64, transit: f64, distance: f64) -> f64 {
        income * self.weights.income
            + transit * self.weights.transit
            + distance * self.weights.distance
            + self.intercept
    }
}

impl Default for ModelCoefficients {
    fn default() -> Self {
        Self::trained_v1()
    }
}
