use tracing::{debug, info};

use crate::{
    coefficients::ModelCoefficients,
    components::{Facility, FacilityId, FacilityKind},
    config::{CityProfile, Scenario},
    error::SimulationError,
    geo::Coordinate,
    rng::{RngManager, FACILITY_STREAM, POPULATION_STREAM},
    systems::{FacilitySeeder, PopulationSynthesizer, RiskModel},
    world::World,
};

pub struct SimulationBuilder {
    scenario: Scenario,
    seed: Option<u64>,
    coefficients: Option<ModelCoefficients>,
    city: Option<String>,
}

impl SimulationBuilder {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            seed: None,
            coefficients: None,
            city: None,
        }
    }

    /// Overrides the scenario seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the scenario's model coefficients.
    pub fn with_coefficients(mut self, coefficients: ModelCoefficients) -> Self {
        self.coefficients = Some(coefficients);
        self
    }

    /// Overrides the initially selected city.
    pub fn with_city(mut self, name: impl Into<String>) -> Self {
        self.city = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Simulation, SimulationError> {
        let city = match &self.city {
            Some(name) => self
                .scenario
                .city(name)
                .cloned()
                .ok_or_else(|| SimulationError::UnknownCity(name.clone()))?,
            None => self
                .scenario
                .initial_city()
                .cloned()
                .ok_or_else(|| SimulationError::UnknownCity(String::new()))?,
        };

        let seed = self.seed.unwrap_or(self.scenario.seed);
        let coefficients = self
            .coefficients
            .unwrap_or_else(|| self.scenario.model.clone());
        let synthesizer = PopulationSynthesizer::new(self.scenario.synthesis.clone());
        let seeder = FacilitySeeder::new(self.scenario.synthesis.clone());
        let model = RiskModel::new(coefficients);
        let rng = RngManager::new(seed);
        let world = generate_world(&city, &rng, &synthesizer, &seeder, &model);

        info!(
            target: "synthequity::engine",
            scenario = %self.scenario.name,
            seed,
            model_version = %model.coefficients().version,
            "simulation ready"
        );
        log_stats("city selected", &world);

        Ok(Simulation {
            scenario: self.scenario,
            rng,
            synthesizer,
            seeder,
            model,
            world,
        })
    }
}

/// Interactive session over one city at a time.
pub struct Simulation {
    scenario: Scenario,
    rng: RngManager,
    synthesizer: PopulationSynthesizer,
    seeder: FacilitySeeder,
    model: RiskModel,
    world: World,
}

impl Simulation {
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn model(&self) -> &RiskModel {
        &self.model
    }

    pub fn seed(&self) -> u64 {
        self.rng.master_seed()
    }

    /// Discards the current units and facilities and regenerates for the
    /// named catalog city.
    pub fn select_city(&mut self, name: &str) -> Result<&World, SimulationError> {
        let city = self
            .scenario
            .city(name)
            .cloned()
            .ok_or_else(|| SimulationError::UnknownCity(name.to_string()))?;
        Ok(self.select_profile(city))
    }

    /// Like [`Simulation::select_city`] for a profile outside the catalog.
    pub fn select_profile(&mut self, city: CityProfile) -> &World {
        self.world = generate_world(
            &city,
            &self.rng,
            &self.synthesizer,
            &self.seeder,
            &self.model,
        );
        log_stats("city selected", &self.world);
        &self.world
    }

    pub fn add_facility(&mut self, location: Coordinate, kind: FacilityKind) -> FacilityId {
        let id = self.world.allocate_facility_id();
        let mut facilities = self.world.facilities().to_vec();
        facilities.push(Facility::new(id.clone(), location, kind, false));
        self.world.replace_facilities(facilities, &self.model);
        debug!(
            target: "synthequity::engine",
            facility = %id,
            kind = %kind,
            lat = location.lat,
            lng = location.lng,
            "facility added"
        );
        log_stats("facility added", &self.world);
        id
    }

    /// Removes a facility of any provenance. Unknown ids leave state untouched.
    pub fn remove_facility(&mut self, id: &FacilityId) -> Result<Facility, SimulationError> {
        let removed = self
            .world
            .facility(id)
            .cloned()
            .ok_or_else(|| SimulationError::UnknownFacility(id.clone()))?;
        let facilities = self
            .world
            .facilities()
            .iter()
            .filter(|f| &f.id != id)
            .cloned()
            .collect();
        self.world.replace_facilities(facilities, &self.model);
        log_stats("facility removed", &self.world);
        Ok(removed)
    }
}

fn generate_world(
    city: &CityProfile,
    rng: &RngManager,
    synthesizer: &PopulationSynthesizer,
    seeder: &FacilitySeeder,
    model: &RiskModel,
) -> World {
    let units = synthesizer.synthesize(city, &mut rng.stream(POPULATION_STREAM, &city.name));
    let facilities = seeder.seed(city, &mut rng.stream(FACILITY_STREAM, &city.name));
    World::new(city.clone(), units, facilities, model)
}

fn log_stats(event: &str, world: &World) {
    let stats = world.stats();
    info!(
        target: "synthequity::engine",
        city = %world.city().name,
        units = world.units().len(),
        facilities = stats.total_facilities,
        average_disparity = stats.average_disparity,
        max_disparity = stats.max_disparity,
        coverage = stats.coverage_percentage,
        "{event}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulation() -> Simulation {
        SimulationBuilder::new(Scenario::builtin())
            .with_seed(3)
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_selects_first_city() {
        let sim = simulation();
        assert_eq!(sim.world().city().name, "San Francisco, CA");
        assert_eq!(sim.world().units().len(), 576);
        assert_eq!(sim.world().facilities().len(), 8);
        assert_eq!(sim.seed(), 3);
        assert_eq!(sim.scenario().name, "builtin");
        assert_eq!(sim.model().coefficients().version, "1.0.0");
    }

    #[test]
    fn test_unknown_city() {
        let mut sim = simulation();
        assert!(matches!(
            sim.select_city("Atlantis"),
            Err(SimulationError::UnknownCity(_))
        ));
        assert_eq!(sim.world().city().name, "San Francisco, CA");
    }

    #[test]
    fn test_add_and_remove_facility() {
        let mut sim = simulation();
        let center = sim.world().city().center;
        let id = sim.add_facility(center, FacilityKind::Kiosk);
        assert_eq!(id.as_str(), "new-1");
        assert_eq!(sim.world().stats().kiosk_count, 1);
        assert!(!sim.world().facility(&id).unwrap().is_preexisting);

        let removed = sim.remove_facility(&id).unwrap();
        assert_eq!(removed.kind, FacilityKind::Kiosk);
        assert_eq!(sim.world().stats().kiosk_count, 0);

        let preexisting = FacilityId::preexisting(0);
        assert!(sim.remove_facility(&preexisting).is_ok());
        assert_eq!(sim.world().facilities().len(), 7);
    }

    #[test]
    fn test_remove_unknown_facility_leaves_state() {
        let mut sim = simulation();
        let before = sim.world().stats().clone();
        let err = sim
            .remove_facility(&FacilityId::from("missing"))
            .unwrap_err();
        assert!(matches!(err, SimulationError::UnknownFacility(_)));
        assert_eq!(sim.world().stats(), &before);
        assert!(sim.world().previous_stats().is_none());
    }
}
