//! Scenario configuration: city catalog, synthesis constants and model coefficients

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coefficients::ModelCoefficients;
use crate::error::ConfigError;
use crate::geo::Coordinate;

/// A selectable city. Selecting one discards all prior units and facilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityProfile {
    pub name: String,
    pub center: Coordinate,
    /// Map zoom level; lower values synthesize a wider area.
    pub zoom: i32,
    #[serde(default = "default_density_scale")]
    pub population_density_scale: f64,
    pub initial_facility_count: u32,
}

fn default_density_scale() -> f64 {
    1.0
}

impl CityProfile {
    pub fn new(
        name: impl Into<String>,
        center: Coordinate,
        zoom: i32,
        population_density_scale: f64,
        initial_facility_count: u32,
    ) -> Self {
        Self {
            name: name.into(),
            center,
            zoom,
            population_density_scale,
            initial_facility_count,
        }
    }

    /// Filesystem-friendly form of the name, e.g. `san_francisco_ca`.
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.name.len());
        for ch in self.name.chars() {
            if ch.is_ascii_alphanumeric() {
                slug.push(ch.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('_') {
                slug.push('_');
            }
        }
        slug.trim_end_matches('_').to_string()
    }
}

/// Tuning constants for population synthesis and facility seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Side length of the square unit grid.
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    /// Angular extent of the population grid at the reference zoom, in degrees.
    #[serde(default = "default_population_spread")]
    pub population_spread_deg: f64,
    /// Angular extent of initial facility scatter at the reference zoom.
    #[serde(default = "default_facility_spread")]
    pub facility_spread_deg: f64,
    #[serde(default = "default_reference_zoom")]
    pub reference_zoom: i32,
    /// Seed influence falloff; larger values make tighter neighborhoods.
    #[serde(default = "default_falloff")]
    pub seed_falloff: f64,
}

fn default_grid_size() -> usize {
    24
}

fn default_population_spread() -> f64 {
    0.15
}

fn default_facility_spread() -> f64 {
    0.08
}

fn default_reference_zoom() -> i32 {
    12
}

fn default_falloff() -> f64 {
    3.5
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            population_spread_deg: default_population_spread(),
            facility_spread_deg: default_facility_spread(),
            reference_zoom: default_reference_zoom(),
            seed_falloff: default_falloff(),
        }
    }
}

impl SynthesisConfig {
    fn zoom_factor(&self, city: &CityProfile) -> f64 {
        2f64.powi(self.reference_zoom - city.zoom)
    }

    pub fn population_spread(&self, city: &CityProfile) -> f64 {
        self.population_spread_deg * self.zoom_factor(city)
    }

    pub fn facility_spread(&self, city: &CityProfile) -> f64 {
        self.facility_spread_deg * self.zoom_factor(city)
    }
}

/// Top-level scenario document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub default_city: Option<String>,
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    #[serde(default)]
    pub model: ModelCoefficients,
    #[serde(default = "builtin_cities")]
    pub cities: Vec<CityProfile>,
}

fn default_seed() -> u64 {
    7
}

/// Built-in city catalog.
pub fn builtin_cities() -> Vec<CityProfile> {
    vec![
        CityProfile::new(
            "San Francisco, CA",
            Coordinate::new(37.7749, -122.4194),
            12,
            0.8,
            8,
        ),
        CityProfile::new("Austin, TX", Coordinate::new(30.2672, -97.7431), 12, 0.9, 4),
        CityProfile::new(
            "Boston, MA",
            Coordinate::new(42.3601, -71.0589),
            12,
            1.1,
            10,
        ),
        CityProfile::new(
            "Baltimore, MD",
            Coordinate::new(39.2904, -76.6122),
            12,
            1.0,
            6,
        ),
        CityProfile::new(
            "Jersey City, NJ",
            Coordinate::new(40.7178, -74.0431),
            13,
            1.2,
            7,
        ),
        CityProfile::new(
            "Phoenix, AZ",
            Coordinate::new(33.4484, -112.0740),
            11,
            1.0,
            5,
        ),
    ]
}

impl Default for Scenario {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Scenario {
    pub fn builtin() -> Self {
        Self {
            name: "builtin".to_string(),
            description: None,
            seed: default_seed(),
            default_city: None,
            synthesis: SynthesisConfig::default(),
            model: ModelCoefficients::default(),
            cities: builtin_cities(),
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let scenario: Scenario = serde_yaml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cities.is_empty() {
            return Err(ConfigError::Validation("scenario must define at least one city".into()));
        }

        let mut seen = HashSet::new();
        for city in &self.cities {
            if !seen.insert(city.name.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "city '{}' defined more than once",
                    city.name
                )));
            }
            if !(city.population_density_scale > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "city '{}' must have a positive population density scale",
                    city.name
                )));
            }
        }

        if self.synthesis.grid_size == 0 {
            return Err(ConfigError::Validation("grid size must be greater than zero".into()));
        }
        if !(self.synthesis.population_spread_deg > 0.0)
            || !(self.synthesis.facility_spread_deg > 0.0)
        {
            return Err(ConfigError::Validation("synthesis spreads must be positive".into()));
        }
        if !(self.synthesis.seed_falloff > 0.0) {
            return Err(ConfigError::Validation("seed falloff must be positive".into()));
        }

        if let Some(name) = &self.default_city {
            if self.city(name).is_none() {
                return Err(ConfigError::Validation(format!(
                    "default city '{name}' is not in the catalog"
                )));
            }
        }

        Ok(())
    }

    /// Case-insensitive lookup by full name, then by unique-enough prefix.
    pub fn city(&self, name: &str) -> Option<&CityProfile> {
        let needle = name.trim().to_lowercase();
        self.cities
            .iter()
            .find(|city| city.name.to_lowercase() == needle)
            .or_else(|| {
                self.cities
                    .iter()
                    .find(|city| city.name.to_lowercase().starts_with(&needle))
            })
    }

    /// The configured default city, falling back to the first catalog entry.
    pub fn initial_city(&self) -> Option<&CityProfile> {
        self.default_city
            .as_deref()
            .and_then(|name| self.city(name))
            .or_else(|| self.cities.first())
    }
}
