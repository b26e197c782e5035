mod common;

use corrosion_assistant::advisory::{
    advise, build_material_prompt, build_prompt, recommend_materials, strip_think_tags,
    MaterialQuery, FALLBACK_PREFIX, GROQ_MODELS,
};
use corrosion_assistant::config::Settings;
use corrosion_assistant::model::artifacts::PipelineVariant;
use corrosion_assistant::pipeline;

fn keyless_settings() -> Settings {
    Settings {
        artifacts_dir: "./artifacts".into(),
        outputs_dir: "./outputs".into(),
        variant: PipelineVariant::TfidfPca,
        groq_api_keys: Vec::new(),
    }
}

fn offshore_query() -> MaterialQuery {
    MaterialQuery {
        environment: "Seawater".to_string(),
        ph: 8.1,
        chloride: "High".to_string(),
        temperature_c: 15.0,
        pressure_bar: 3.0,
        flow: "Turbulent".to_string(),
        galvanic_contact: true,
        design_life_years: 25,
        maintenance: "Low".to_string(),
        budget: "Medium".to_string(),
        notes: "splash zone exposure".to_string(),
    }
}

#[test]
fn think_tags_are_stripped() {
    let raw = "<think>internal reasoning\nmore</think>Use a coating.";
    assert_eq!(strip_think_tags(raw), "Use a coating.");
}

#[test]
fn text_without_think_tags_passes_through() {
    assert_eq!(strip_think_tags("  plain advice  "), "plain advice");
}

#[test]
fn prompt_carries_the_prediction_and_inputs() {
    let artifacts = common::fitted_artifacts();
    let obs = common::seawater_observation();
    let result = pipeline::predict(&artifacts, &obs).unwrap();
    let prompt = build_prompt(&obs, &result);
    assert!(prompt.contains("Resistant"));
    assert!(prompt.contains("Seawater"));
    assert!(prompt.contains("S30403"));
    assert!(prompt.contains("5 bullet points"));
}

#[test]
fn model_rotation_covers_the_full_roster() {
    assert_eq!(GROQ_MODELS.len(), 5);
    assert!(GROQ_MODELS.contains(&"meta-llama/llama-4-maverick-17b-128e-instruct"));
    assert!(GROQ_MODELS.contains(&"qwen-qwq-32b"));
}

#[test]
fn material_prompt_carries_the_conditions() {
    let prompt = build_material_prompt(&offshore_query());
    assert!(prompt.contains("Environment: Seawater"));
    assert!(prompt.contains("Chloride presence: High"));
    assert!(prompt.contains("Galvanic contact with other metals: Yes"));
    assert!(prompt.contains("Required design life: 25 years"));
    assert!(prompt.contains("splash zone exposure"));
    assert!(prompt.contains("UNS code"));
    assert!(prompt.contains("top 2-3 materials"));
}

#[tokio::test]
async fn missing_api_keys_fall_back_visibly() {
    let settings = keyless_settings();
    let artifacts = common::fitted_artifacts();
    let obs = common::seawater_observation();
    let result = pipeline::predict(&artifacts, &obs).unwrap();

    let advisory = advise(&settings, &obs, &result).await;
    assert!(advisory.starts_with(FALLBACK_PREFIX));
}

#[tokio::test]
async fn material_recommendation_falls_back_without_keys() {
    let recommendation = recommend_materials(&keyless_settings(), &offshore_query()).await;
    assert!(recommendation.starts_with(FALLBACK_PREFIX));
}
