//! Cross-module properties checked through the public API only.

use mech_core::calculations::bearing::{equivalent_load, life_hours, life_revolutions, BearingLoadCase};
use mech_core::calculations::gear_train::{compose, FixedMember, GearStage, GearTrain, PlanetaryStage};
use mech_core::calculations::linkage::{analyze, FourBarLinkage};
use mech_core::calculations::{parse_calculations, CalculationOutput};
use mech_core::equations::{belt_ratio, gear_ratio, spring_index};
use mech_core::units::MM_TO_M;
use mech_core::{DesignSettings, MechError};

#[test]
fn bearing_chain_matches_reference_values() {
    let case = BearingLoadCase::ball(1000.0, 0.0, 1.0, 0.0, 10_000.0);
    assert_eq!(equivalent_load(&case).unwrap(), 1000.0);

    let l10 = life_revolutions(10_000.0, 5_000.0, 3.0).unwrap();
    assert!((l10 / 8.0e6 - 1.0).abs() < 0.01);

    let hours = life_hours(l10, 1500.0).unwrap();
    assert!((hours / 88.9 - 1.0).abs() < 0.01);

    match life_revolutions(10_000.0, 0.0, 3.0) {
        Err(MechError::DivisionByZero { .. }) => {}
        other => panic!("expected DivisionByZero, got {:?}", other),
    }
}

#[test]
fn composer_agrees_with_single_formula_helpers() {
    let train = GearTrain::new("helpers")
        .with_stage(GearStage::external(2.0, 21, 55))
        .with_stage(GearStage::external(2.0, 13, 40));
    let result = compose(&train).unwrap();
    let expected = gear_ratio(21, 55) * gear_ratio(13, 40);
    assert!((result.overall_ratio - expected).abs() < 1e-12);

    // Same ratio arithmetic applies to pulley diameters
    assert!((belt_ratio(100.0, 250.0) - 2.5).abs() < 1e-12);
    assert!((spring_index(40.0, 5.0) - 8.0).abs() < 1e-12);
    assert!((250.0 * MM_TO_M - 0.25).abs() < 1e-15);
}

#[test]
fn planetary_requires_explicit_fixed_member() {
    let mut stage = PlanetaryStage::new(20, 30, 80, FixedMember::Ring);
    let ok = GearTrain::new("p").with_stage(GearStage::planetary(1.0, stage.clone()));
    assert!((compose(&ok).unwrap().overall_ratio - 5.0).abs() < 1e-12);

    stage.fixed_member = None;
    let missing = GearTrain::new("p").with_stage(GearStage::planetary(1.0, stage));
    assert!(matches!(compose(&missing), Err(MechError::ConfigurationError { .. })));
}

#[test]
fn linkage_closure_failure_is_reported_with_lengths() {
    match analyze(&FourBarLinkage::from_lengths([10.0, 25.0, 10.0, 10.0])) {
        Err(MechError::UnclosableLinkage { lengths, .. }) => {
            assert_eq!(lengths, [10.0, 25.0, 10.0, 10.0]);
        }
        other => panic!("expected UnclosableLinkage, got {:?}", other),
    }
}

#[test]
fn settings_file_changes_advisory_only() {
    let lenient = DesignSettings::from_toml_str(
        "transmission_angle_min_deg = 30.0\ntransmission_angle_max_deg = 150.0\n",
    )
    .unwrap();

    let items = parse_calculations(
        r#"[{ "type": "Linkage", "label": "L", "ground": 7.0, "crank": 2.0, "coupler": 9.0, "rocker": 6.0 }]"#,
    )
    .unwrap();

    let strict = items[0].run(&DesignSettings::default()).unwrap();
    let relaxed = items[0].run(&lenient).unwrap();

    match (&strict, &relaxed) {
        (CalculationOutput::Linkage(a), CalculationOutput::Linkage(b)) => {
            assert_eq!(a.transmission_angle_range_deg, b.transmission_angle_range_deg);
            assert!(a.poor_transmission);
            assert!(!b.poor_transmission);
        }
        other => panic!("unexpected outputs: {:?}", other),
    }
}

#[test]
fn calculations_are_usable_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let train = GearTrain::new("threaded").with_stage(GearStage::external(1.0, 20 + i, 60));
                compose(&train).map(|r| r.overall_ratio)
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let ratio = handle.join().unwrap().unwrap();
        assert!((ratio - 60.0 / (20.0 + i as f64)).abs() < 1e-12);
    }
}
