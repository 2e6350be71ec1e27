use crate::emotion::EmotionScores;
use crate::error::JournalError;
use chrono::{DateTime, FixedOffset, Local};

/// One journaled text with its emotion scores.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub timestamp: DateTime<FixedOffset>,
    pub text: String,
    pub scores: EmotionScores,
}

impl JournalEntry {
    /// Builds an entry stamped with the current local time.
    pub fn new(text: &str, scores: EmotionScores) -> Result<Self, JournalError> {
        Self::at(Local::now().fixed_offset(), text, scores)
    }

    /// Builds an entry with an explicit timestamp. The text is stored trimmed.
    pub fn at(
        timestamp: DateTime<FixedOffset>,
        text: &str,
        scores: EmotionScores,
    ) -> Result<Self, JournalError> {
        let text = journal_text(text)?;
        Ok(Self {
            timestamp,
            text: text.to_string(),
            scores,
        })
    }
}

/// Trims `input` and rejects it when nothing is left.
pub fn journal_text(input: &str) -> Result<&str, JournalError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(JournalError::EmptyInput);
    }
    Ok(trimmed)
}
