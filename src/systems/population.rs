//! Population synthesis
//!
//! Builds a square grid of population units around a city center. Each unit
//! starts from a noisy baseline and is then perturbed additively by a fixed set
//! of neighborhood seeds. Overlapping seeds produce abrupt transitions (a
//! wealthy pocket beside a transit desert) rather than a smooth radial gradient.

use rand::Rng;

use crate::{
    components::{SpatialUnit, UnitId},
    config::{CityProfile, SynthesisConfig},
    geo::Coordinate,
};

pub const MIN_INCOME: f64 = 15_000.0;
pub const MAX_INCOME: f64 = 250_000.0;
pub const MIN_POPULATION: f64 = 50.0;

const BASE_INCOME: (f64, f64) = (45_000.0, 75_000.0);
const BASE_TRANSIT: (f64, f64) = (0.3, 0.6);
const BASE_POPULATION: (f64, f64) = (100.0, 400.0);

const WEALTH_INCOME_BOOST: f64 = 120_000.0;
const WEALTH_DENSITY_DROP: f64 = 100.0;
const POVERTY_INCOME_DROP: f64 = 25_000.0;
const POVERTY_DENSITY_GAIN: f64 = 300.0;
const TRANSIT_HUB_BOOST: f64 = 0.6;
const TRANSIT_DESERT_DROP: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedKind {
    Wealth,
    Poverty,
    TransitHub,
    TransitDesert,
}

/// Fixed synthetic influence point.
#[derive(Debug, Clone, Copy)]
pub struct NeighborhoodSeed {
    pub kind: SeedKind,
    pub location: Coordinate,
    pub strength: f64,
}

/// The four seeds placed relative to a city center, scaled by the grid spread.
pub fn neighborhood_seeds(center: Coordinate, spread: f64) -> [NeighborhoodSeed; 4] {
    [
        NeighborhoodSeed {
            kind: SeedKind::Wealth,
            location: center.offset(spread * 0.3, -spread * 0.2),
            strength: 0.9,
        },
        NeighborhoodSeed {
            kind: SeedKind::Poverty,
            location: center.offset(-spread * 0.2, spread * 0.2),
            strength: 0.9,
        },
        NeighborhoodSeed {
            kind: SeedKind::TransitHub,
            location: center,
            strength: 1.0,
        },
        NeighborhoodSeed {
            kind: SeedKind::TransitDesert,
            location: center.offset(spread * 0.4, spread * 0.4),
            strength: 0.8,
        },
    ]
}

#[derive(Debug, Clone, Copy)]
struct Attributes {
    income: f64,
    transit: f64,
    population: f64,
}

impl Attributes {
    fn apply(&mut self, seed: &NeighborhoodSeed, influence: f64) {
        let weighted = influence * seed.strength;
        match seed.kind {
            SeedKind::Wealth => {
                self.income += WEALTH_INCOME_BOOST * weighted;
                self.population -= WEALTH_DENSITY_DROP * influence;
            }
            SeedKind::Poverty => {
                self.income -= POVERTY_INCOME_DROP * weighted;
                self.population += POVERTY_DENSITY_GAIN * influence;
            }
            SeedKind::TransitHub => self.transit += TRANSIT_HUB_BOOST * weighted,
            SeedKind::TransitDesert => self.transit -= TRANSIT_DESERT_DROP * weighted,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PopulationSynthesizer {
    config: SynthesisConfig,
}

impl PopulationSynthesizer {
    pub fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    /// Generates `grid_size²` unscored units, row-major.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        city: &CityProfile,
        rng: &mut R,
    ) -> Vec<SpatialUnit> {
        let grid = self.config.grid_size;
        let spread = self.config.population_spread(city);
        let seeds = neighborhood_seeds(city.center, spread);
        let mut units = Vec::with_capacity(grid * grid);

        for row in 0..grid {
            for col in 0..grid {
                let location = city.center.offset(
                    (row as f64 / grid as f64 - 0.5) * spread,
                    (col as f64 / grid as f64 - 0.5) * spread,
                );

                let mut attrs = Attributes {
                    income: rng.gen_range(BASE_INCOME.0..BASE_INCOME.1),
                    transit: rng.gen_range(BASE_TRANSIT.0..BASE_TRANSIT.1),
                    population: rng.gen_range(BASE_POPULATION.0..BASE_POPULATION.1),
                };

                for seed in &seeds {
                    let influence = self.influence(location, seed, spread);
                    if influence > 0.0 {
                        attrs.apply(seed, influence);
                    }
                }

                let scaled = attrs.population.max(MIN_POPULATION) * city.population_density_scale;
                let population = scaled.floor() as u32;
                units.push(SpatialUnit::unscored(
                    UnitId::from_grid(row, col),
                    location,
                    population,
                    attrs.income.clamp(MIN_INCOME, MAX_INCOME),
                    attrs.transit.clamp(0.0, 1.0),
                ));
            }
        }

        units
    }

    fn influence(&self, location: Coordinate, seed: &NeighborhoodSeed, spread: f64) -> f64 {
        let dist = location.planar_distance(seed.location);
        (1.0 - dist / spread * self.config.seed_falloff).max(0.0)
    }
}

/// Convenience wrapper around [`PopulationSynthesizer::synthesize`].
pub fn synthesize<R: Rng + ?Sized>(
    city: &CityProfile,
    config: &SynthesisConfig,
    rng: &mut R,
) -> Vec<SpatialUnit> {
    PopulationSynthesizer::new(config.clone()).synthesize(city, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::UNSCORED_DISTANCE_KM;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn austin() -> CityProfile {
        CityProfile::new("Austin, TX", Coordinate::new(30.2672, -97.7431), 12, 0.9, 4)
    }

    #[test]
    fn test_grid_shape_and_ids() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let units = PopulationSynthesizer::default().synthesize(&austin(), &mut rng);
        assert_eq!(units.len(), 24 * 24);
        assert_eq!(units[0].id.as_str(), "block-0-0");
        assert_eq!(units[25].id.as_str(), "block-1-1");
        assert_eq!(units.last().unwrap().id.as_str(), "block-23-23");
    }

    #[test]
    fn test_first_cell_offset() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let city = austin();
        let units = PopulationSynthesizer::default().synthesize(&city, &mut rng);
        let first = &units[0];
        let corner = city.center.offset(-0.075, -0.075);
        assert!((first.location.lat - corner.lat).abs() < 1e-12);
        assert!((first.location.lng - corner.lng).abs() < 1e-12);
    }

    #[test]
    fn test_attributes_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let city = austin();
        let units = PopulationSynthesizer::default().synthesize(&city, &mut rng);
        let floor = (MIN_POPULATION * city.population_density_scale).floor() as u32;
        for unit in &units {
            assert!((MIN_INCOME..=MAX_INCOME).contains(&unit.avg_income));
            assert!((0.0..=1.0).contains(&unit.transit_score));
            assert!(unit.population >= floor);
            assert_eq!(unit.distance_to_nearest_facility, UNSCORED_DISTANCE_KM);
            assert_eq!(unit.disparity_score, 0.0);
        }
    }

    #[test]
    fn test_seeded_synthesis_is_reproducible() {
        let city = austin();
        let synth = PopulationSynthesizer::default();
        let a = synth.synthesize(&city, &mut ChaCha8Rng::seed_from_u64(5));
        let b = synth.synthesize(&city, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeds_shape_neighborhoods() {
        let city = austin();
        let spread = SynthesisConfig::default().population_spread(&city);
        let units = PopulationSynthesizer::default()
            .synthesize(&city, &mut ChaCha8Rng::seed_from_u64(3));
        let seeds = neighborhood_seeds(city.center, spread);

        let nearest = |target: Coordinate| {
            units
                .iter()
                .min_by(|a, b| {
                    a.location
                        .planar_distance(target)
                        .total_cmp(&b.location.planar_distance(target))
                })
                .unwrap()
        };

        // Baseline income tops out at 75k; the wealth pole pushes well past it.
        assert!(nearest(seeds[0].location).avg_income > 100_000.0);
        // Poverty pole: baseline minus a large share of 25k.
        assert!(nearest(seeds[1].location).avg_income < 60_000.0);
        // Transit hub lifts the center above the 0.6 baseline ceiling.
        assert!(nearest(seeds[2].location).transit_score > 0.6);
        // Transit desert removes roughly 0.29 from a baseline of at most 0.6.
        assert!(nearest(seeds[3].location).transit_score < 0.31);
    }

    #[test]
    fn test_far_corner_is_uninfluenced() {
        let city = austin();
        let spread = SynthesisConfig::default().population_spread(&city);
        let synth = PopulationSynthesizer::default();
        let corner = city.center.offset(-0.5 * spread, -0.5 * spread);
        for seed in neighborhood_seeds(city.center, spread) {
            assert_eq!(synth.influence(corner, &seed, spread), 0.0);
        }
    }
}
