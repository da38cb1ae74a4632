//! Disparity risk model
//!
//! Scores every unit against the current facility set. Scoring is a pure
//! transform: the input slices are left as they are and a full replacement
//! sequence is returned.

use crate::{
    coefficients::ModelCoefficients,
    components::{Facility, SpatialUnit},
    geo::{distance_km, Coordinate},
};

/// Effective distances beyond this are treated as equally uncovered.
pub const MAX_CONSIDERED_DISTANCE_KM: f64 = 8.0;
/// Reported distance when no facility exists.
pub const NO_FACILITY_DISTANCE_KM: f64 = 9999.0;
/// Incomes at or above this carry no income vulnerability.
pub const INCOME_CEILING: f64 = 100_000.0;

/// Distances from a unit to the closest facilities.
///
/// `physical_km` and `effective_km` may refer to different facilities: a
/// nearby kiosk can be physically closest while a clinic further out is
/// effectively closest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestFacility {
    pub physical_km: f64,
    pub effective_km: f64,
}

impl NearestFacility {
    pub fn search(location: Coordinate, facilities: &[Facility]) -> Self {
        let mut nearest = NearestFacility {
            physical_km: NO_FACILITY_DISTANCE_KM,
            effective_km: NO_FACILITY_DISTANCE_KM,
        };
        for facility in facilities {
            let d = distance_km(location, facility.location);
            let effective = d / facility.kind.efficiency();
            nearest.effective_km = nan_min(nearest.effective_km, effective);
            nearest.physical_km = nan_min(nearest.physical_km, d);
        }
        nearest
    }
}

fn nan_min(current: f64, candidate: f64) -> f64 {
    if current.is_nan() || candidate.is_nan() {
        f64::NAN
    } else {
        current.min(candidate)
    }
}

/// Vulnerability components, each in `[0, 1]` for valid inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vulnerability {
    pub income: f64,
    pub transit: f64,
    pub distance: f64,
}

impl Vulnerability {
    pub fn assess(avg_income: f64, transit_score: f64, effective_distance_km: f64) -> Self {
        let distance = if effective_distance_km.is_nan() {
            f64::NAN
        } else {
            effective_distance_km.min(MAX_CONSIDERED_DISTANCE_KM) / MAX_CONSIDERED_DISTANCE_KM
        };
        Self {
            income: 1.0 - avg_income.min(INCOME_CEILING) / INCOME_CEILING,
            transit: 1.0 - transit_score,
            distance,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RiskModel {
    coefficients: ModelCoefficients,
}

impl RiskModel {
    pub fn new(coefficients: ModelCoefficients) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &ModelCoefficients {
        &self.coefficients
    }

    /// Disparity score in `[0, 100]` from raw inputs.
    pub fn disparity(&self, vulnerability: Vulnerability) -> f64 {
        let raw = self.coefficients.predict(
            vulnerability.income,
            vulnerability.transit,
            vulnerability.distance,
        );
        (raw * 100.0).clamp(0.0, 100.0)
    }

    pub fn score_unit(&self, unit: &SpatialUnit, facilities: &[Facility]) -> SpatialUnit {
        let nearest = NearestFacility::search(unit.location, facilities);
        let vulnerability = Vulnerability::assess(
            unit.avg_income,
            unit.transit_score,
            nearest.effective_km,
        );
        unit.scored(nearest.physical_km, self.disparity(vulnerability))
    }

    /// O(units × facilities).
    pub fn score(&self, units: &[SpatialUnit], facilities: &[Facility]) -> Vec<SpatialUnit> {
        units
            .iter()
            .map(|unit| self.score_unit(unit, facilities))
            .collect()
    }
}

/// Scores `units` with the given coefficient record.
pub fn score(
    units: &[SpatialUnit],
    facilities: &[Facility],
    coefficients: &ModelCoefficients,
) -> Vec<SpatialUnit> {
    RiskModel::new(coefficients.clone()).score(units, facilities)
}
