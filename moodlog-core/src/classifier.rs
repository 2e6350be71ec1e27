//! Emotion classification of journal text through a [`LanguageModel`].
//!
//! Classification is best effort: the model's answer is never trusted to match a schema.
//! [`parse_scores`] pulls out whatever labels it can and leaves the rest at `0.0`.

use crate::emotion::{Emotion, EmotionScores};
use crate::entry::journal_text;
use crate::error::JournalError;
use crate::llm::LanguageModel;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::{debug, warn};

/// Outcome of parsing a model reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedScores {
    pub scores: EmotionScores,
    /// Labels the reply didn't provide a usable value for. They were set to `0.0`.
    pub missing: Vec<Emotion>,
}

impl ParsedScores {
    pub fn is_degraded(&self) -> bool {
        !self.missing.is_empty()
    }
}

/// Builds the fixed classification instruction around `text`.
pub fn build_prompt(text: &str) -> String {
    let labels = Emotion::all()
        .map(|emotion| format!("\"{emotion}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Analyze the emotions expressed in the journal entry below.\n\
         Respond with only a JSON object whose keys are {labels} and whose values are \
         numbers between 0 and 1 giving the intensity of each emotion.\n\n\
         Journal entry:\n\"\"\"\n{text}\n\"\"\""
    )
}

/// Classifies `text`, always returning a score for every label.
///
/// Only a failing provider is an error; a reply that can't be (fully) parsed degrades to
/// zero scores and is logged.
pub fn classify(text: &str, model: &dyn LanguageModel) -> Result<EmotionScores, JournalError> {
    let text = journal_text(text)?;
    let reply = model.complete(&build_prompt(text))?;
    debug!(reply = %reply, "classifier reply");

    let parsed = parse_scores(&reply);
    if parsed.is_degraded() {
        let missing: Vec<String> = parsed.missing.iter().map(|e| e.to_string()).collect();
        warn!(
            missing = ?missing,
            "classification degraded, missing labels scored as 0"
        );
    }
    Ok(parsed.scores)
}

/// Parses a model reply into scores.
///
/// Accepts a bare JSON object or one wrapped in prose / code fences. Keys match labels
/// case-insensitively; values may be numbers or numeric strings. If no label sits at the top
/// level, the first nested object (e.g. `{"emotions": {...}}`) is tried.
pub fn parse_scores(reply: &str) -> ParsedScores {
    let mut scores = EmotionScores::new();
    let mut found = Vec::new();

    if let Some(object) = extract_object(reply) {
        let object = label_object(&object);
        for (key, value) in object {
            let Ok(emotion) = Emotion::from_str(key.trim()) else {
                continue;
            };
            if let Some(score) = numeric_value(value) {
                scores.set(emotion, score);
                if !found.contains(&emotion) {
                    found.push(emotion);
                }
            }
        }
    }

    let missing = Emotion::all()
        .filter(|emotion| !found.contains(emotion))
        .collect();
    ParsedScores { scores, missing }
}

/// The first JSON object in `reply`, reading forward from each `{` in turn.
///
/// Trailing text after a complete object is ignored, braces in it included.
fn extract_object(reply: &str) -> Option<Map<String, Value>> {
    reply.match_indices('{').find_map(|(start, _)| {
        let mut values = serde_json::Deserializer::from_str(&reply[start..]).into_iter::<Value>();
        match values.next() {
            Some(Ok(Value::Object(map))) => Some(map),
            _ => None,
        }
    })
}

fn label_object(object: &Map<String, Value>) -> &Map<String, Value> {
    let has_label = object
        .keys()
        .any(|key| Emotion::from_str(key.trim()).is_ok());
    if has_label {
        return object;
    }
    object
        .values()
        .find_map(Value::as_object)
        .unwrap_or(object)
}

fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}
