use std::fs;
use std::path::Path;

use corrosion_assistant::config::Settings;
use corrosion_assistant::model::artifacts::{ArtifactSet, PipelineVariant};
use corrosion_assistant::model::classifier::Classify;
use corrosion_assistant::pipeline::lexical;
use serde_json::{json, Value};
use tempfile::tempdir;

fn write_artifact(dir: &Path, name: &str, value: &Value) {
    fs::write(dir.join(name), serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// A minimal consistent tfidf-pca artifact directory: one vocabulary
/// term, one component, classifier fitted on 4 + 1 columns.
fn write_fitted_directory(dir: &Path, classifier_width: usize) {
    write_artifact(
        dir,
        "env_target_encoder.json",
        &json!({ "mapping": { "Seawater": 0.42 } }),
    );
    write_artifact(dir, "uns_encoder.json", &json!({ "classes": ["S30403"] }));
    write_artifact(
        dir,
        "temperature_scaler.json",
        &json!({ "mean": 20.0, "scale": 10.0 }),
    );
    write_artifact(
        dir,
        "tfidf_vectorizer.json",
        &json!({ "vocabulary": ["acidic"], "idf": [1.0] }),
    );

    let mut input_columns: Vec<&str> = lexical::COLUMNS.to_vec();
    input_columns.push("acidic");
    let width = input_columns.len();
    write_artifact(
        dir,
        "pca_tfidf.json",
        &json!({
            "input_columns": input_columns,
            "mean": vec![0.0; width],
            "components": [vec![0.0; width]],
        }),
    );
    write_artifact(
        dir,
        "classifier.json",
        &json!({
            "n_features": classifier_width,
            "trees": [{ "nodes": [{ "kind": "leaf", "class_id": 0 }] }],
        }),
    );
}

fn settings_for(dir: &Path) -> Settings {
    Settings {
        artifacts_dir: dir.to_path_buf(),
        outputs_dir: dir.to_path_buf(),
        variant: PipelineVariant::TfidfPca,
        groq_api_keys: Vec::new(),
    }
}

#[test]
fn loads_a_consistent_artifact_directory() {
    let dir = tempdir().unwrap();
    write_fitted_directory(dir.path(), 5);

    let artifacts = ArtifactSet::load(&settings_for(dir.path())).unwrap();
    assert_eq!(artifacts.classifier.n_features(), 5);
    assert_eq!(
        artifacts.composed_columns(),
        vec![
            "Environment",
            "UNS",
            "Temperature (deg C)",
            "Concentration_clean",
            "PCA_1"
        ]
    );
}

#[test]
fn rejects_a_classifier_fitted_on_the_wrong_width() {
    let dir = tempdir().unwrap();
    write_fitted_directory(dir.path(), 7);

    let err = ArtifactSet::load(&settings_for(dir.path())).unwrap_err();
    assert!(err.to_string().contains("validating fitted artifacts"));
}

#[test]
fn rejects_a_reducer_with_a_reordered_schema() {
    let dir = tempdir().unwrap();
    write_fitted_directory(dir.path(), 5);

    // Swap the first two fitted columns; the load-time schema check
    // must catch the disagreement.
    let mut input_columns: Vec<&str> = lexical::COLUMNS.to_vec();
    input_columns.push("acidic");
    input_columns.swap(0, 1);
    let width = input_columns.len();
    write_artifact(
        dir.path(),
        "pca_tfidf.json",
        &json!({
            "input_columns": input_columns,
            "mean": vec![0.0; width],
            "components": [vec![0.0; width]],
        }),
    );

    assert!(ArtifactSet::load(&settings_for(dir.path())).is_err());
}

#[test]
fn missing_artifact_files_fail_with_the_path() {
    let dir = tempdir().unwrap();
    let err = ArtifactSet::load(&settings_for(dir.path())).unwrap_err();
    assert!(err.to_string().contains("env_target_encoder.json"));
}
