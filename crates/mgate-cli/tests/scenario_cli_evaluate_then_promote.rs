//! End to end: score predictions into a candidate, then promote it.

use assert_cmd::Command;
use predicates::prelude::*;

const CONFIG: &str = r#"
paths:
  metadata: "models/metadata.json"
model:
  type: "RandomForestRegressor"
params:
  n_estimators: 100
  max_depth: 10
thresholds:
  improvement_threshold: 0.02
  min_r2_score: 0.5
"#;

fn mgate(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("mgate").unwrap();
    cmd.current_dir(dir)
        .env_remove("MGATE_CONFIG")
        .env("RUST_LOG", "warn");
    cmd
}

fn setup() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.yaml"), CONFIG).unwrap();
    // Perfect predictions: r2 = 1.0
    std::fs::write(
        dir.path().join("good.csv"),
        "y_true,y_pred\n1.0,1.0\n2.0,2.0\n3.0,3.0\n",
    )
    .unwrap();
    // Mean predictions: r2 = 0.0
    std::fs::write(
        dir.path().join("bad.csv"),
        "y_true,y_pred\n1.0,2.0\n2.0,2.0\n3.0,2.0\n",
    )
    .unwrap();
    dir
}

#[test]
fn evaluate_prints_metrics_without_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("p.csv"), "y_true,y_pred\n1,1\n3,3\n").unwrap();

    mgate(dir.path())
        .args(["evaluate", "--predictions", "p.csv"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("r2_score=1.0000"))
        .stdout(predicate::str::contains("samples=2"));
}

#[test]
fn evaluate_rejects_bad_csv() {
    let dir = setup();
    std::fs::write(dir.path().join("broken.csv"), "y_true\n1.0\n").unwrap();

    mgate(dir.path())
        .args(["evaluate", "--predictions", "broken.csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("y_pred"));
}

#[test]
fn first_candidate_is_promoted_then_worse_one_is_kept_out() {
    let dir = setup();
    let meta_path = dir.path().join("models").join("metadata.json");

    mgate(dir.path())
        .args(["evaluate", "--predictions", "good.csv", "--out", "good.json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("candidate_path=good.json"));

    let candidate: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("good.json")).unwrap())
            .unwrap();
    assert_eq!(candidate["model_type"], "RandomForestRegressor");
    assert_eq!(candidate["params"]["max_depth"], 10);
    assert_eq!(candidate["metrics"]["r2_score"], 1.0);

    mgate(dir.path())
        .args(["promote", "--candidate", "good.json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("promoted=true"))
        .stdout(predicate::str::contains("reason=First model deployment"));
    assert!(meta_path.exists());
    let promoted = std::fs::read_to_string(&meta_path).unwrap();

    mgate(dir.path())
        .args(["evaluate", "--predictions", "bad.csv", "--out", "bad.json"])
        .assert()
        .code(0);

    mgate(dir.path())
        .args(["promote", "--candidate", "bad.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("promoted=false"));

    assert_eq!(
        std::fs::read_to_string(&meta_path).unwrap(),
        promoted,
        "rejected candidate must not touch the current record"
    );

    mgate(dir.path())
        .arg("current")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("current_model=present"))
        .stdout(predicate::str::contains("r2_score=1.0000"));
}

#[test]
fn current_reports_none_before_any_promotion() {
    let dir = setup();

    mgate(dir.path())
        .arg("current")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("current_model=none"));
}

#[test]
fn missing_candidate_is_fatal() {
    let dir = setup();

    mgate(dir.path())
        .args(["promote", "--candidate", "nope.json"])
        .assert()
        .code(2);
}

#[test]
fn config_hash_prints_hash_and_canonical_json() {
    let dir = setup();

    mgate(dir.path())
        .args(["config-hash", "config.yaml"])
        .assert()
        .code(0)
        .stdout(predicate::str::is_match("config_hash=[0-9a-f]{64}").unwrap())
        .stdout(predicate::str::contains("\"min_r2_score\":0.5"));
}
