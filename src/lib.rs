//! Synthetic healthcare-access disparity model.
//!
//! Synthesizes a population grid and an initial facility set for a city,
//! scores each unit's access risk against the facilities, and summarizes the
//! result with population-weighted statistics.

pub mod coefficients;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod systems;
pub mod world;

pub use coefficients::ModelCoefficients;
pub use components::{Facility, FacilityId, FacilityKind, SpatialUnit, UnitId};
pub use config::{CityProfile, Scenario, SynthesisConfig};
pub use engine::{Simulation, SimulationBuilder};
pub use error::{ConfigError, SimulationError, SnapshotError};
pub use geo::{distance_km, Coordinate};
pub use systems::{score, seed_facilities, summarize, synthesize, SimulationStats};
pub use world::{World, WorldSnapshot};
