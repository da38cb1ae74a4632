use serde::{Deserialize, Serialize};

use crate::{
    components::{Facility, FacilityId, SpatialUnit},
    config::CityProfile,
    systems::{summarize, RiskModel, SimulationStats, StatsDelta},
};

/// Owned, serializable view of a world at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub city: CityProfile,
    pub model_version: String,
    pub stats: SimulationStats,
    pub previous_stats: Option<SimulationStats>,
    pub facilities: Vec<Facility>,
    pub units: Vec<SpatialUnit>,
}

/// Scored state for the selected city.
///
/// Units and stats are only ever replaced together: every facility change
/// rescores all units and summarizes the freshly scored sequence, so the
/// stats can never describe a stale scoring pass.
#[derive(Debug, Clone)]
pub struct World {
    city: CityProfile,
    model_version: String,
    units: Vec<SpatialUnit>,
    facilities: Vec<Facility>,
    stats: SimulationStats,
    previous_stats: Option<SimulationStats>,
    next_facility_seq: u64,
}

impl World {
    pub fn new(
        city: CityProfile,
        units: Vec<SpatialUnit>,
        facilities: Vec<Facility>,
        model: &RiskModel,
    ) -> Self {
        let units = model.score(&units, &facilities);
        let stats = summarize(&units, &facilities);
        Self {
            city,
            model_version: model.coefficients().version.clone(),
            units,
            facilities,
            stats,
            previous_stats: None,
            next_facility_seq: 0,
        }
    }

    pub fn city(&self) -> &CityProfile {
        &self.city
    }

    pub fn units(&self) -> &[SpatialUnit] {
        &self.units
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn facility(&self, id: &FacilityId) -> Option<&Facility> {
        self.facilities.iter().find(|f| &f.id == id)
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Stats from before the most recent facility change, if any.
    pub fn previous_stats(&self) -> Option<&SimulationStats> {
        self.previous_stats.as_ref()
    }

    pub fn stats_delta(&self) -> Option<StatsDelta> {
        self.previous_stats
            .as_ref()
            .map(|previous| StatsDelta::between(previous, &self.stats))
    }

    pub fn total_population(&self) -> u64 {
        self.stats.total_population
    }

    pub(crate) fn allocate_facility_id(&mut self) -> FacilityId {
        self.next_facility_seq += 1;
        FacilityId::added(self.next_facility_seq)
    }

    /// Swaps in a new facility set, rescoring and resummarizing from scratch.
    pub(crate) fn replace_facilities(&mut self, facilities: Vec<Facility>, model: &RiskModel) {
        let units = model.score(&self.units, &facilities);
        let stats = summarize(&units, &facilities);
        self.previous_stats = Some(std::mem::replace(&mut self.stats, stats));
        self.units = units;
        self.facilities = facilities;
        self.model_version = model.coefficients().version.clone();
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            city: self.city.clone(),
            model_version: self.model_version.clone(),
            stats: self.stats.clone(),
            previous_stats: self.previous_stats.clone(),
            facilities: self.facilities.clone(),
            units: self.units.clone(),
        }
    }
}
