mod facilities;
mod population;
mod risk;
mod stats;

pub use facilities::{seed_facilities, FacilitySeeder};
pub use population::{
    neighborhood_seeds, synthesize, NeighborhoodSeed, PopulationSynthesizer, SeedKind, MAX_INCOME,
    MIN_INCOME, MIN_POPULATION,
};
pub use risk::{
    score, NearestFacility, RiskModel, Vulnerability, INCOME_CEILING, MAX_CONSIDERED_DISTANCE_KM,
    NO_FACILITY_DISTANCE_KM,
};
pub use stats::{summarize, SimulationStats, StatsDelta, COVERAGE_RADIUS_KM};
