use synthequity::{FacilityId, FacilityKind, Scenario, SimulationBuilder, SimulationError};

fn build(seed: u64, city: &str) -> synthequity::Simulation {
    SimulationBuilder::new(Scenario::builtin())
        .with_seed(seed)
        .with_city(city)
        .build()
        .expect("simulation builds")
}

#[test]
fn same_seed_is_deterministic() {
    let a = build(42, "Boston");
    let b = build(42, "Boston");
    assert_eq!(a.world().units(), b.world().units());
    assert_eq!(a.world().facilities(), b.world().facilities());
    assert_eq!(a.world().stats(), b.world().stats());
}

#[test]
fn different_seeds_differ() {
    let a = build(1, "Boston");
    let b = build(2, "Boston");
    assert_ne!(a.world().units(), b.world().units());
}

#[test]
fn reselecting_a_city_regenerates_from_scratch() {
    let mut sim = build(9, "Phoenix");
    let original = sim.world().snapshot();

    sim.add_facility(sim.world().city().center, FacilityKind::Clinic);
    sim.select_city("Austin").unwrap();
    assert_eq!(sim.world().city().name, "Austin, TX");
    assert_eq!(sim.world().facilities().len(), 4);
    assert!(sim.world().previous_stats().is_none());

    sim.select_city("Phoenix").unwrap();
    assert_eq!(sim.world().snapshot(), original);
}

#[test]
fn stats_follow_every_mutation() {
    let mut sim = build(5, "San Francisco");
    let initial = sim.world().stats().clone();
    assert_eq!(initial.total_facilities, 8);
    assert_eq!(initial.base_count, 8);

    let center = sim.world().city().center;
    let clinic = sim.add_facility(center.offset(0.03, -0.03), FacilityKind::Clinic);
    let after_add = sim.world().stats().clone();
    assert_eq!(after_add.total_facilities, 9);
    assert_eq!(after_add.clinic_count, 1);
    assert!(after_add.average_disparity <= initial.average_disparity);
    assert!(after_add.coverage_percentage >= initial.coverage_percentage);
    assert_eq!(sim.world().previous_stats(), Some(&initial));

    sim.remove_facility(&clinic).unwrap();
    let after_remove = sim.world().stats();
    assert_eq!(after_remove.total_facilities, 8);
    let disparity_drift = after_remove.average_disparity - initial.average_disparity;
    let coverage_drift = after_remove.coverage_percentage - initial.coverage_percentage;
    assert!(disparity_drift.abs() < 1e-9);
    assert!(coverage_drift.abs() < 1e-9);
}

#[test]
fn stats_match_scored_units() {
    let mut sim = build(11, "Jersey City");
    sim.add_facility(sim.world().city().center, FacilityKind::Kiosk);
    let world = sim.world();
    let recomputed = synthequity::summarize(world.units(), world.facilities());
    assert_eq!(&recomputed, world.stats());
}

#[test]
fn removing_every_facility_never_lowers_scores() {
    let mut sim = build(13, "Baltimore");
    let before: Vec<f64> = sim
        .world()
        .units()
        .iter()
        .map(|u| u.disparity_score)
        .collect();
    let ids: Vec<FacilityId> = sim
        .world()
        .facilities()
        .iter()
        .map(|f| f.id.clone())
        .collect();
    for id in &ids {
        sim.remove_facility(id).unwrap();
    }

    let world = sim.world();
    assert!(world.facilities().is_empty());
    assert_eq!(world.stats().coverage_percentage, 0.0);
    for (unit, old) in world.units().iter().zip(before) {
        assert!(unit.disparity_score >= old);
    }
}

#[test]
fn unknown_ids_are_rejected() {
    let mut sim = build(3, "Austin");
    let err = sim
        .remove_facility(&FacilityId::from("new-99"))
        .unwrap_err();
    assert!(matches!(err, SimulationError::UnknownFacility(_)));
    assert!(err.to_string().contains("new-99"));
}
