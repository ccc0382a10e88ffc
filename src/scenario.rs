//! Scenario engine view model.
//!
//! The engine answers with free-form JSON. `build_engine_view` maps it to
//! a fixed shape:
//!
//! | field | source | default |
//! |---|---|---|
//! | `sentiment` | `sentiment` via [`normalize_sentiment`] | `Uncertain` |
//! | `framing` | `scenarioFraming` | [`DEFAULT_FRAMING`] |
//! | `summary` | `summary`, then `output`, then a bare JSON string | [`DEFAULT_SUMMARY`] |
//! | `impacts` | `mainImpacts` | `[]` |
//! | `risks` | `keyRisks` | `[]` |
//! | `watchpoints` | `thingsToMonitor` | `[]` |
//! | `progression_hint` | `progressionHint` | `None` |

use crate::json::{string_list_at, text_at};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_FRAMING: &str = "This scenario is interpreted as a synthetic what-if projection.";
pub const DEFAULT_SUMMARY: &str = "The engine responds with a high-level narrative about how this scenario could unfold under typical market conditions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Mixed,
    CautiouslyOptimistic,
    Uncertain,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "Bullish",
            Sentiment::Bearish => "Bearish",
            Sentiment::Mixed => "Mixed",
            Sentiment::CautiouslyOptimistic => "Cautiously Optimistic",
            Sentiment::Uncertain => "Unclear",
        }
    }
}

/// Classify an upstream sentiment label.
///
/// Opposing directions, or a bullish call hedged with caution, read as
/// `Mixed`. A lone caution word reads as `CautiouslyOptimistic`. Blank
/// input is `Uncertain`; any other unrecognized text is `Mixed`.
pub fn normalize_sentiment(value: Option<&str>) -> Sentiment {
    let raw = value.unwrap_or("").trim().to_lowercase();
    let bull = raw.contains("bull");
    let bear = raw.contains("bear");
    let cautious = raw.contains("cautious") || raw.contains("careful");

    if bull && (bear || cautious) {
        Sentiment::Mixed
    } else if bull {
        Sentiment::Bullish
    } else if bear {
        Sentiment::Bearish
    } else if cautious {
        Sentiment::CautiouslyOptimistic
    } else if raw.is_empty() {
        Sentiment::Uncertain
    } else {
        Sentiment::Mixed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioEngineView {
    pub sentiment: Sentiment,
    pub framing: String,
    pub summary: String,
    pub impacts: Vec<String>,
    pub risks: Vec<String>,
    pub watchpoints: Vec<String>,
    pub progression_hint: Option<String>,
    pub raw: Value,
}

fn summary_text(raw: &Value) -> Option<String> {
    if let Value::String(s) = raw {
        let trimmed = s.trim();
        return (!trimmed.is_empty()).then(|| trimmed.to_string());
    }
    text_at(raw, &["summary"]).or_else(|| text_at(raw, &["output"]))
}

/// Normalize an engine response. Never fails.
pub fn build_engine_view(raw: &Value) -> ScenarioEngineView {
    let sentiment = raw.get("sentiment").and_then(Value::as_str);
    ScenarioEngineView {
        sentiment: normalize_sentiment(sentiment),
        framing: text_at(raw, &["scenarioFraming"]).unwrap_or_else(|| DEFAULT_FRAMING.to_string()),
        summary: summary_text(raw).unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
        impacts: string_list_at(raw, &["mainImpacts"]),
        risks: string_list_at(raw, &["keyRisks"]),
        watchpoints: string_list_at(raw, &["thingsToMonitor"]),
        progression_hint: text_at(raw, &["progressionHint"]),
        raw: raw.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioInput {
    pub prompt: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub input: ScenarioInput,
    pub sentiment: Sentiment,
    pub sentiment_label: &'static str,
    pub framing: String,
    pub summary: String,
    pub impacts: Vec<String>,
    pub risks: Vec<String>,
    pub watchpoints: Vec<String>,
    pub progression_hint: Option<String>,
    pub progression_points: u32,
    pub progression_label: String,
    pub created_at: DateTime<Utc>,
    pub raw: Value,
}

pub fn build_scenario_result(
    input: ScenarioInput,
    engine: ScenarioEngineView,
    progression_points: u32,
    progression_label: &str,
) -> ScenarioResult {
    ScenarioResult {
        input,
        sentiment: engine.sentiment,
        sentiment_label: engine.sentiment.label(),
        framing: engine.framing,
        summary: engine.summary,
        impacts: engine.impacts,
        risks: engine.risks,
        watchpoints: engine.watchpoints,
        progression_hint: engine.progression_hint,
        progression_points,
        progression_label: progression_label.to_string(),
        created_at: Utc::now(),
        raw: engine.raw,
    }
}
