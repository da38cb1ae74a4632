use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use synthequity::{
    score, seed_facilities, summarize, synthesize,
    systems::{RiskModel, Vulnerability, NO_FACILITY_DISTANCE_KM},
    CityProfile, Coordinate, Facility, FacilityId, FacilityKind, ModelCoefficients, Scenario,
    SpatialUnit, SynthesisConfig,
};

fn city() -> CityProfile {
    Scenario::builtin().city("Baltimore").cloned().unwrap()
}

fn generated(seed: u64) -> (Vec<SpatialUnit>, Vec<Facility>) {
    let city = city();
    let config = SynthesisConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let units = synthesize(&city, &config, &mut rng);
    let facilities = seed_facilities(&city, &config, &mut rng);
    (units, facilities)
}

#[test]
fn scores_stay_in_range() {
    let (units, facilities) = generated(17);
    let scored = score(&units, &facilities, &ModelCoefficients::trained_v1());
    assert_eq!(scored.len(), units.len());
    for unit in &scored {
        assert!((0.0..=100.0).contains(&unit.disparity_score));
        assert!(unit.distance_to_nearest_facility >= 0.0);
    }
}

#[test]
fn scoring_leaves_inputs_untouched() {
    let (units, facilities) = generated(4);
    let before_units = units.clone();
    let before_facilities = facilities.clone();
    let _ = score(&units, &facilities, &ModelCoefficients::trained_v1());
    assert_eq!(units, before_units);
    assert_eq!(facilities, before_facilities);
}

#[test]
fn closer_clinic_never_raises_score() {
    let (units, facilities) = generated(8);
    let model = RiskModel::default();
    let baseline = model.score(&units, &facilities);

    for (unit, before) in units.iter().zip(&baseline).step_by(37) {
        let mut with_clinic = facilities.clone();
        with_clinic.push(Facility::new(
            FacilityId::from("candidate"),
            unit.location.offset(0.0001, 0.0),
            FacilityKind::Clinic,
            false,
        ));
        let after = model.score_unit(unit, &with_clinic);
        assert!(after.disparity_score <= before.disparity_score);
        let nearest = before.distance_to_nearest_facility;
        assert!(after.distance_to_nearest_facility <= nearest);
    }
}

#[test]
fn kiosk_never_beats_clinic_at_same_site() {
    let (units, facilities) = generated(21);
    let model = RiskModel::default();
    let site = city().center.offset(0.01, -0.02);

    let mut with_clinic = facilities.clone();
    let id = FacilityId::added(1);
    with_clinic.push(Facility::new(id.clone(), site, FacilityKind::Clinic, false));
    let mut with_kiosk = facilities;
    with_kiosk.push(Facility::new(id, site, FacilityKind::Kiosk, false));

    let clinic_scores = model.score(&units, &with_clinic);
    let kiosk_scores = model.score(&units, &with_kiosk);
    for (clinic, kiosk) in clinic_scores.iter().zip(&kiosk_scores) {
        assert!(kiosk.disparity_score >= clinic.disparity_score);
    }
    assert!(
        summarize(&kiosk_scores, &[]).average_disparity
            >= summarize(&clinic_scores, &[]).average_disparity
    );
}

#[test]
fn removing_all_facilities_saturates_distance() {
    let (units, facilities) = generated(2);
    let model = RiskModel::default();
    let with_facilities = model.score(&units, &facilities);
    let without = model.score(&with_facilities, &[]);

    for (before, after) in with_facilities.iter().zip(&without) {
        assert_eq!(after.distance_to_nearest_facility, NO_FACILITY_DISTANCE_KM);
        let v = Vulnerability::assess(
            after.avg_income,
            after.transit_score,
            after.distance_to_nearest_facility,
        );
        assert_eq!(v.distance, 1.0);
        assert!(after.disparity_score >= before.disparity_score);
    }
}

#[test]
fn zero_facility_stats_show_no_coverage() {
    let (units, _) = generated(6);
    let scored = score(&units, &[], &ModelCoefficients::trained_v1());
    let stats = summarize(&scored, &[]);
    assert_eq!(stats.coverage_percentage, 0.0);
    assert_eq!(stats.total_facilities, 0);
    assert!(stats.average_disparity > 0.0);
}

#[test]
fn clinic_on_unit_covers_it() {
    let unit = SpatialUnit::unscored(
        synthequity::UnitId::from_grid(0, 0),
        Coordinate::new(39.29, -76.61),
        500,
        60_000.0,
        0.5,
    );
    let facilities = vec![Facility::new(
        FacilityId::added(1),
        Coordinate::new(39.30, -76.61),
        FacilityKind::Kiosk,
        false,
    )];
    let scored = score(&[unit], &facilities, &ModelCoefficients::trained_v1());
    let stats = summarize(&scored, &facilities);
    assert_eq!(stats.coverage_percentage, 100.0);
    assert_eq!(stats.kiosk_count, 1);
}
