use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Placeholder distance carried by a unit before its first scoring pass.
pub const UNSCORED_DISTANCE_KM: f64 = 999.0;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    pub fn from_grid(row: usize, col: usize) -> Self {
        Self(format!("block-{row}-{col}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(String);

impl FacilityId {
    pub fn preexisting(index: usize) -> Self {
        Self(format!("existing-{index}"))
    }

    pub fn added(sequence: u64) -> Self {
        Self(format!("new-{sequence}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FacilityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FacilityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability class of a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FacilityKind {
    Base,
    Clinic,
    Kiosk,
}

impl FacilityKind {
    /// Distance divisor applied when scoring. Kiosks cover less per kilometer.
    pub fn efficiency(self) -> f64 {
        match self {
            FacilityKind::Clinic => 1.0,
            FacilityKind::Kiosk => 0.6,
            FacilityKind::Base => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FacilityKind::Base => "BASE",
            FacilityKind::Clinic => "CLINIC",
            FacilityKind::Kiosk => "KIOSK",
        }
    }
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized kinds fall back to `Base`, a full-capability facility.
impl FromStr for FacilityKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "CLINIC" => FacilityKind::Clinic,
            "KIOSK" => FacilityKind::Kiosk,
            _ => FacilityKind::Base,
        })
    }
}

impl From<String> for FacilityKind {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<FacilityKind> for String {
    fn from(value: FacilityKind) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: FacilityId,
    pub location: Coordinate,
    pub kind: FacilityKind,
    /// Provenance only. Has no effect on scoring or removability.
    pub is_preexisting: bool,
}

impl Facility {
    pub fn new(
        id: FacilityId,
        location: Coordinate,
        kind: FacilityKind,
        is_preexisting: bool,
    ) -> Self {
        Self {
            id,
            location,
            kind,
            is_preexisting,
        }
    }
}

/// Synthetic population block.
///
/// `distance_to_nearest_facility` and `disparity_score` are outputs of the risk
/// model and carry placeholders until the unit has been scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialUnit {
    pub id: UnitId,
    pub location: Coordinate,
    pub population: u32,
    pub avg_income: f64,
    pub transit_score: f64,
    pub distance_to_nearest_facility: f64,
    pub disparity_score: f64,
}

impl SpatialUnit {
    pub fn unscored(
        id: UnitId,
        location: Coordinate,
        population: u32,
        avg_income: f64,
        transit_score: f64,
    ) -> Self {
        Self {
            id,
            location,
            population,
            avg_income,
            transit_score,
            distance_to_nearest_facility: UNSCORED_DISTANCE_KM,
            disparity_score: 0.0,
        }
    }

    /// Copy of this unit carrying freshly computed scores.
    pub fn scored(&self, distance_to_nearest_facility: f64, disparity_score: f64) -> Self {
        Self {
            distance_to_nearest_facility,
            disparity_score,
            ..self.clone()
        }
    }
}
