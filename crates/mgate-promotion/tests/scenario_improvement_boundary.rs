use mgate_promotion::{decide, GateThresholds, ModelMetadata, RegressionMetrics};

fn current(r2: f64) -> ModelMetadata {
    ModelMetadata {
        timestamp: "2025-03-14T09:26:53.589793".into(),
        metrics: RegressionMetrics {
            r2_score: r2,
            rmse: 0.51,
            mae: 0.33,
        },
        model_type: "RandomForestRegressor".into(),
        params: Default::default(),
    }
}

const THR: GateThresholds = GateThresholds {
    improvement_threshold: 0.02,
    min_r2_score: 0.5,
};

#[test]
fn improvement_equal_to_threshold_deploys() {
    // 0.82 - 0.80 is not exactly 0.02 in binary floating point.
    let d = decide(0.82, Some(&current(0.80)), &THR);

    assert!(d.should_deploy, "{}", d.reason);
    assert_eq!(d.reason, "New model improved by 0.0200 (≥ 0.0200)");
}

#[test]
fn exactly_representable_boundary_deploys() {
    let thr = GateThresholds {
        improvement_threshold: 0.25,
        min_r2_score: 0.0,
    };
    let d = decide(0.75, Some(&current(0.5)), &thr);
    assert!(d.should_deploy, "{}", d.reason);
}

#[test]
fn improvement_just_below_threshold_rejects() {
    let d = decide(0.80 + 0.02 - 1e-9, Some(&current(0.80)), &THR);
    assert!(!d.should_deploy, "{}", d.reason);
    assert!(d.reason.starts_with("Improvement"), "{}", d.reason);
}

#[test]
fn improvement_a_few_ulps_below_exact_threshold_rejects() {
    let thr = GateThresholds {
        improvement_threshold: 0.25,
        min_r2_score: 0.0,
    };
    let d = decide(0.75 - 1e-15, Some(&current(0.5)), &thr);
    assert!(!d.should_deploy, "{}", d.reason);
    assert!(d.reason.starts_with("Improvement"), "{}", d.reason);
}

#[test]
fn tiny_regression_rejects_under_zero_threshold() {
    let thr = GateThresholds {
        improvement_threshold: 0.0,
        min_r2_score: 0.5,
    };
    let d = decide(0.8 - 5e-13, Some(&current(0.8)), &thr);
    assert!(!d.should_deploy, "{}", d.reason);
    assert_eq!(d.reason, "Improvement -0.0000 below threshold (0.0000)");
}

#[test]
fn small_improvement_rejects() {
    let d = decide(0.81, Some(&current(0.80)), &THR);

    assert!(!d.should_deploy);
    assert_eq!(d.reason, "Improvement 0.0100 below threshold (0.0200)");
}

#[test]
fn negative_improvement_always_rejects() {
    let d = decide(0.70, Some(&current(0.80)), &THR);

    assert!(!d.should_deploy);
    assert_eq!(d.reason, "Improvement -0.1000 below threshold (0.0200)");
}

#[test]
fn large_improvement_deploys() {
    let d = decide(0.90, Some(&current(0.60)), &THR);

    assert!(d.should_deploy);
    assert_eq!(d.reason, "New model improved by 0.3000 (≥ 0.0200)");
}

#[test]
fn zero_threshold_deploys_equal_score() {
    let thr = GateThresholds {
        improvement_threshold: 0.0,
        min_r2_score: 0.5,
    };
    let d = decide(0.80, Some(&current(0.80)), &thr);
    assert!(d.should_deploy, "{}", d.reason);
}

#[test]
fn decision_is_deterministic() {
    let c = current(0.80);
    let a = decide(0.83, Some(&c), &THR);
    let b = decide(0.83, Some(&c), &THR);
    assert_eq!(a, b);
}
