use rand::Rng;

use crate::{
    components::{Facility, FacilityId, FacilityKind},
    config::{CityProfile, SynthesisConfig},
};

/// Scatters a city's preexisting facilities uniformly around its center.
#[derive(Debug, Clone, Default)]
pub struct FacilitySeeder {
    config: SynthesisConfig,
}

impl FacilitySeeder {
    pub fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    pub fn seed<R: Rng + ?Sized>(&self, city: &CityProfile, rng: &mut R) -> Vec<Facility> {
        let spread = self.config.facility_spread(city);
        (0..city.initial_facility_count as usize)
            .map(|index| {
                let location = city.center.offset(
                    (rng.gen::<f64>() - 0.5) * spread,
                    (rng.gen::<f64>() - 0.5) * spread,
                );
                Facility::new(
                    FacilityId::preexisting(index),
                    location,
                    FacilityKind::Base,
                    true,
                )
            })
            .collect()
    }
}

pub fn seed_facilities<R: Rng + ?Sized>(
    city: &CityProfile,
    config: &SynthesisConfig,
    rng: &mut R,
) -> Vec<Facility> {
    FacilitySeeder::new(config.clone()).seed(city, rng)
}
