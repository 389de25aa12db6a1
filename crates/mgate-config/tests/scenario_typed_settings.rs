use std::path::PathBuf;

use mgate_config::{load_layered_yaml_from_strings, ModelSettings, PathSettings};

#[test]
fn path_and_model_settings_read_from_yaml() {
    let yaml = r#"
paths:
  metadata: "models/metadata.json"
model:
  type: "RandomForestRegressor"
params:
  n_estimators: 100
  max_depth: 10
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();

    let paths = PathSettings::from_config_json(&loaded.config_json).unwrap();
    assert_eq!(paths.metadata, PathBuf::from("models/metadata.json"));

    let model = ModelSettings::from_config_json(&loaded.config_json).unwrap();
    assert_eq!(model.model_type, "RandomForestRegressor");
    assert_eq!(model.params["n_estimators"], 100);
    assert_eq!(model.params["max_depth"], 10);
}

#[test]
fn missing_metadata_path_is_fatal() {
    let loaded = load_layered_yaml_from_strings(&["paths: {}"]).unwrap();
    let err = PathSettings::from_config_json(&loaded.config_json).unwrap_err();
    assert!(err.to_string().contains("/paths/metadata"));
}

#[test]
fn params_section_is_optional() {
    let loaded = load_layered_yaml_from_strings(&["model:\n  type: LinearRegression\n"]).unwrap();
    let model = ModelSettings::from_config_json(&loaded.config_json).unwrap();
    assert!(model.params.is_empty());
}
