//! End-to-end queries through the calculator.

use approx::assert_abs_diff_eq;
use surya_rs::*;

const TOL: f64 = 1e-6;

#[test]
fn repeated_queries_are_identical() {
    let mut a = Calculator::new();
    let mut b = Calculator::new();
    for (y, m, d) in [(-3101, 2, 18), (2000, 1, 1), (2024, 1, 15)] {
        for body in [Body::Sun, Body::Moon] {
            let first = a.position(body, y, m, d).unwrap();
            let again = a.position(body, y, m, d).unwrap();
            let fresh = b.position(body, y, m, d).unwrap();
            assert_eq!(first, again);
            assert_eq!(first, fresh);
        }
    }
}

#[test]
fn leap_day_rules() {
    let mut calc = Calculator::new();
    assert!(matches!(
        calc.position(Body::Sun, 2024, 2, 30),
        Err(ModelError::Time(TimeError::InvalidDate { .. }))
    ));
    assert!(calc.position(Body::Sun, 2024, 2, 29).is_ok());
    assert!(matches!(
        calc.position(Body::Sun, 2023, 2, 29),
        Err(ModelError::Time(TimeError::InvalidDate { .. }))
    ));
    // no century exception in the Julian calendar
    assert!(calc.position(Body::Sun, 1900, 2, 29).is_ok());
    assert_eq!(calc.position(Body::Sun, 2024, 2, 29).unwrap().ahargana, 1_871_917.0);
}

#[test]
fn golden_2024_01_15() {
    let mut calc = Calculator::new();
    let sun = calc.position(Body::Sun, 2024, 1, 15).unwrap();
    assert_eq!(sun.ahargana, 1_871_872.0);
    assert_abs_diff_eq!(sun.true_longitude, 282.381_288_671, epsilon = TOL);
    assert_abs_diff_eq!(
        calc.position(Body::Moon, 2024, 1, 15).unwrap().true_longitude,
        129.838_986_807,
        epsilon = TOL
    );
    assert_abs_diff_eq!(
        calc.position(Body::Mars, 2024, 1, 15).unwrap().true_longitude,
        114.051_029_374,
        epsilon = TOL
    );
    assert_abs_diff_eq!(
        calc.position(Body::Jupiter, 2024, 1, 15).unwrap().true_longitude,
        120.453_568_508,
        epsilon = TOL
    );
}

#[test]
fn epoch_positions() {
    let mut calc = Calculator::new();
    let apogee = calc.position(Body::MoonApogee, -3101, 2, 18).unwrap();
    assert_eq!(apogee.ahargana, 0.0);
    assert_abs_diff_eq!(apogee.true_longitude, 80.0, epsilon = 1e-12);
    let node = calc.position(Body::MoonNode, -3101, 2, 18).unwrap();
    assert_abs_diff_eq!(node.true_longitude, 0.0, epsilon = 1e-12);
}

#[test]
fn lunar_phenomena_are_consistent() {
    let mut calc = Calculator::new();
    let l = calc.lunar_phenomena(2000, 1, 1).unwrap();
    assert_abs_diff_eq!(l.moon_longitude, 1.290_506_742, epsilon = TOL);
    assert_abs_diff_eq!(l.sun_longitude, 268.796_836_998, epsilon = TOL);
    assert_abs_diff_eq!(l.node_longitude, 70.499_760_044, epsilon = TOL);

    // elongation ~92.5 degrees: eighth tithi
    assert_eq!(l.tithi.tithi_number, 8);
    assert!(l.latitude.latitude < 0.0);
    assert!(l.latitude.latitude.abs() <= 4.5);
    assert!(!l.solar_eclipse.eclipse_occurring);
    assert!(!l.lunar_eclipse.eclipse_occurring);
    assert_eq!(l.solar_eclipse.magnitude, 0.0);
}

#[test]
fn conjunction_report_2000() {
    let mut calc = Calculator::new();
    let r = calc.conjunctions(2000, 1, 1).unwrap();
    assert_eq!(r.positions.len(), 7);
    assert_eq!(r.group.group_size, 7);
    assert!(!r.group.is_group);

    // Sun 268.80 and Saturn 267.68 are within the close orb.
    let sun_saturn = r
        .pairs
        .iter()
        .find(|p| p.body1 == Body::Sun && p.body2 == Body::Saturn)
        .unwrap();
    assert!(sun_saturn.conjunction.is_close);
    assert!(!sun_saturn.conjunction.is_exact);

    for p in &r.pairs {
        assert!(
            p.conjunction.is_exact
                || p.conjunction.is_close
                || p.configuration.configuration != Configuration::None
        );
    }
}

#[test]
fn validation_report() {
    let mut calc = Calculator::new();
    let report = calc.validate().unwrap();
    assert!(report.epoch.passed);
    assert!(report.manda_physics.all_correct);
    assert_eq!(report.mean_motion.len(), 7);
    assert!(report.modern_comparison_independent());
    assert!(report.passed());

    assert_eq!(report.positions.len(), 2);
    assert_eq!(report.positions[0].description, "J2000 epoch");
    assert_abs_diff_eq!(report.positions[0].sun_longitude, 268.796_836_998, epsilon = TOL);
    assert_abs_diff_eq!(report.positions[1].moon_longitude, 305.241_015_280, epsilon = TOL);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["positions"][1]["description"], "Current year");
}

#[test]
fn log_flush_and_summary() {
    let mut calc = Calculator::new();
    calc.position(Body::Mars, 2000, 1, 1).unwrap();
    let summary = calc.log_summary();
    // daily motion table, ahargana, mean+manda for Mars and Sun, sighra
    assert_eq!(summary.total_entries, 7);
    assert_eq!(summary.by_stage[&Stage::Calendar], 1);
    assert_eq!(summary.by_type[&CorrectionKind::SighraCorrection], 1);
    assert!(summary.first <= summary.last);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrections.jsonl");
    calc.save_log(&path).unwrap();
    let reloaded = CorrectionLog::load_jsonl(&path).unwrap();
    assert_eq!(&reloaded, calc.log());

    calc.clear_log();
    assert_eq!(calc.log_summary().total_entries, 0);
    assert!(calc.log_summary().first.is_none());
}

#[test]
fn streaming_sink_calculator() {
    let mut calc = Calculator::with_sink(ModelConfig::default(), JsonLinesSink::new(Vec::new())).unwrap();
    calc.position(Body::Venus, 2024, 1, 1).unwrap();
    let bytes = calc.into_sink().finish().unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.lines().count(), 7);
}
