//! Best-effort LLM text generation via the Groq chat API.
//!
//! Two surfaces share the request plumbing here: advisory text for a
//! completed prediction, and material recommendations for a described
//! corrosion environment. The numeric prediction is complete and valid
//! before the advisory path runs; any failure in this module is recovered
//! locally with a visibly marked fallback message and never aborts the
//! caller.

use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::{
    config::Settings,
    pipeline::{compose::RawObservation, PredictionResult},
};

const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Models cycled through round-robin, balancing quota across them.
pub const GROQ_MODELS: &[&str] = &[
    "llama-3.3-70b-versatile",
    "llama3-70b-8192",
    "deepseek-r1-distill-llama-70b",
    "meta-llama/llama-4-maverick-17b-128e-instruct",
    "qwen-qwq-32b",
];

/// Prefix marking a fallback message so it can never pass for model
/// output.
pub const FALLBACK_PREFIX: &str = "⚠️ advisory unavailable:";

static THINK_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid regex"));

/// Shared client so connection pools survive across requests.
static HTTP: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("corrosion-assistant/0.1")
        .build()
        .expect("reqwest client")
});

static ROUND_ROBIN: AtomicUsize = AtomicUsize::new(0);

/// Strip the chain-of-thought spans some models wrap in `<think>` tags.
pub fn strip_think_tags(text: &str) -> String {
    THINK_TAGS.replace_all(text, "").trim().to_string()
}

/// Build the field-engineer prompt for a completed prediction.
pub fn build_prompt(obs: &RawObservation, result: &PredictionResult) -> String {
    format!(
        "You are a corrosion control expert assisting engineers in preventing \
         material degradation in industrial environments.\n\n\
         Predicted severity: {severity} (expected corrosion rate {band}).\n\
         Inputs: environment {env}, alloy UNS {uns}, temperature {temp} deg C, \
         concentration {conc}%, condition description: {cond:?}.\n\n\
         Severity scale: Resistant < 0.002 inches/year; Good < 0.020 inches/year; \
         Questionable 0.020 - 0.050 inches/year; Poor > 0.050 inches/year.\n\n\
         Generate a concise technical recommendation suitable for field \
         engineers, covering the severity implications, likely causes given the \
         material and environment, specific mitigation strategies (coating \
         types, inhibitor types, or environmental controls), and suggested \
         monitoring or tests (e.g. EIS, weight loss, visual inspection). \
         Respond in exactly 5 bullet points.",
        severity = result.severity,
        band = result.severity.rate_band(),
        env = obs.environment,
        uns = obs.uns,
        temp = obs.temperature_c,
        conc = obs.concentration_pct,
        cond = obs.condition_text,
    )
}

/// Generate advisory text for a completed prediction. Never fails: any
/// error becomes a marked fallback message.
pub async fn advise(
    settings: &Settings,
    obs: &RawObservation,
    result: &PredictionResult,
) -> String {
    match request(settings, &build_prompt(obs, result)).await {
        Ok(text) => strip_think_tags(&text),
        Err(err) => {
            warn!(error = %err, "advisory generation failed");
            format!("{FALLBACK_PREFIX} {err}")
        }
    }
}

/// Operating and environmental conditions for material selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MaterialQuery {
    pub environment: String,
    pub ph: f64,
    /// Chloride presence: None, Low, Moderate, or High.
    pub chloride: String,
    pub temperature_c: f64,
    pub pressure_bar: f64,
    /// Flow condition: Static, Low velocity, High velocity, or Turbulent.
    pub flow: String,
    pub galvanic_contact: bool,
    pub design_life_years: u32,
    /// Maintenance frequency: Low, Moderate, or High.
    pub maintenance: String,
    /// Budget constraint: None, Low, Medium, or High.
    pub budget: String,
    #[serde(default)]
    pub notes: String,
}

/// Build the material-selection prompt for a described environment.
pub fn build_material_prompt(query: &MaterialQuery) -> String {
    format!(
        "You are a corrosion engineering assistant helping select optimal \
         materials for corrosion resistance in industrial settings.\n\n\
         Based on the following operating and environmental conditions, \
         recommend the top 2-3 materials:\n\
         - Environment: {env}\n\
         - pH level: {ph}\n\
         - Chloride presence: {chloride}\n\
         - Temperature: {temp} deg C\n\
         - Pressure: {pressure} bar\n\
         - Flow condition: {flow}\n\
         - Galvanic contact with other metals: {contact}\n\
         - Required design life: {life} years\n\
         - Maintenance requirements: {maintenance}\n\
         - Budget constraints: {budget}\n\
         - Additional notes: {notes}\n\n\
         For each material, give its name with UNS code, why it is suitable \
         (corrosion resistance, mechanical properties, compatibility), its \
         limitations or special handling considerations, and suggested \
         surface treatments or enhancements if needed. Conclude with a final \
         recommendation if one material clearly stands out for the given \
         case, plus reminders such as the importance of site-specific \
         testing and monitoring methods. Use a professional and concise \
         tone, structured with bullet points or short paragraphs for \
         engineers in the field.",
        env = query.environment,
        ph = query.ph,
        chloride = query.chloride,
        temp = query.temperature_c,
        pressure = query.pressure_bar,
        flow = query.flow,
        contact = if query.galvanic_contact { "Yes" } else { "No" },
        life = query.design_life_years,
        maintenance = query.maintenance,
        budget = query.budget,
        notes = query.notes,
    )
}

/// Recommend materials for a described corrosion environment. Never
/// fails: any error becomes a marked fallback message.
pub async fn recommend_materials(settings: &Settings, query: &MaterialQuery) -> String {
    match request(settings, &build_material_prompt(query)).await {
        Ok(text) => strip_think_tags(&text),
        Err(err) => {
            warn!(error = %err, "material recommendation failed");
            format!("{FALLBACK_PREFIX} {err}")
        }
    }
}

async fn request(settings: &Settings, prompt: &str) -> anyhow::Result<String> {
    anyhow::ensure!(
        !settings.groq_api_keys.is_empty(),
        "no GROQ_API_KEY_* configured"
    );
    let turn = ROUND_ROBIN.fetch_add(1, Ordering::Relaxed);
    let api_key = &settings.groq_api_keys[turn % settings.groq_api_keys.len()];
    let model = GROQ_MODELS[turn % GROQ_MODELS.len()];

    let resp = HTTP
        .post(GROQ_ENDPOINT)
        .bearer_auth(api_key)
        .json(&json!({
            "model": model,
            "temperature": 0.3,
            "max_tokens": 1024,
            "messages": [{ "role": "user", "content": prompt }],
        }))
        .send()
        .await?;
    anyhow::ensure!(resp.status().is_success(), "groq returned {}", resp.status());
    let payload: Value = resp.json().await?;
    payload
        .pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("groq response missing message content"))
}
