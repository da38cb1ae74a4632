use serde::{Deserialize, Serialize};

use crate::components::{Facility, FacilityKind, SpatialUnit};

/// Units closer than this to any facility count as covered, whatever its kind.
pub const COVERAGE_RADIUS_KM: f64 = 3.0;

/// Population-weighted summary of a scored unit set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub average_disparity: f64,
    pub max_disparity: f64,
    pub coverage_percentage: f64,
    pub total_facilities: usize,
    pub clinic_count: usize,
    pub kiosk_count: usize,
    pub base_count: usize,
    pub total_population: u64,
}

impl SimulationStats {
    pub fn count_of(&self, kind: FacilityKind) -> usize {
        match kind {
            FacilityKind::Base => self.base_count,
            FacilityKind::Clinic => self.clinic_count,
            FacilityKind::Kiosk => self.kiosk_count,
        }
    }
}

/// Change between two consecutive summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsDelta {
    pub average_disparity: f64,
    pub max_disparity: f64,
    pub coverage_percentage: f64,
    pub total_facilities: i64,
}

impl StatsDelta {
    pub fn between(previous: &SimulationStats, current: &SimulationStats) -> Self {
        Self {
            average_disparity: current.average_disparity - previous.average_disparity,
            max_disparity: current.max_disparity - previous.max_disparity,
            coverage_percentage: current.coverage_percentage - previous.coverage_percentage,
            total_facilities: current.total_facilities as i64 - previous.total_facilities as i64,
        }
    }
}

/// Reduces scored units and the facility set to summary statistics.
///
/// An empty unit set yields all-zero stats, facility counts included. A
/// zero-population set yields zero averages rather than dividing by zero.
/// NaN scores propagate into both the average and the maximum.
pub fn summarize(units: &[SpatialUnit], facilities: &[Facility]) -> SimulationStats {
    if units.is_empty() {
        return SimulationStats::default();
    }

    let mut total_population = 0_u64;
    let mut weighted_disparity = 0.0;
    let mut covered_population = 0_u64;
    let mut max_disparity = 0.0_f64;

    for unit in units {
        let population = u64::from(unit.population);
        total_population += population;
        weighted_disparity += unit.disparity_score * population as f64;
        max_disparity = if unit.disparity_score.is_nan() || max_disparity.is_nan() {
            f64::NAN
        } else {
            max_disparity.max(unit.disparity_score)
        };
        if unit.distance_to_nearest_facility < COVERAGE_RADIUS_KM {
            covered_population += population;
        }
    }

    let (average_disparity, coverage_percentage) = if total_population > 0 {
        (
            weighted_disparity / total_population as f64,
            covered_population as f64 / total_population as f64 * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    let count = |kind: FacilityKind| facilities.iter().filter(|f| f.kind == kind).count();

    SimulationStats {
        average_disparity,
        max_disparity,
        coverage_percentage,
        total_facilities: facilities.len(),
        clinic_count: count(FacilityKind::Clinic),
        kiosk_count: count(FacilityKind::Kiosk),
        base_count: count(FacilityKind::Base),
        total_population,
    }
}
