//! The fixed emotion label set and the score mapping produced for every entry.

use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Emotion labels known to the journal.
///
/// The declaration order is the column order of the durable log.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
    strum_macros::EnumCount,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
}

pub const EMOTION_COUNT: usize = <Emotion as EnumCount>::COUNT;

impl Emotion {
    /// All labels in column order.
    pub fn all() -> impl Iterator<Item = Emotion> {
        Emotion::iter()
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Clamp a raw intensity into `[0, 1]`. Non-finite values become the neutral `0.0`.
pub fn normalize_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// A complete mapping from every [`Emotion`] to an intensity.
///
/// Labels can't be missing: unset labels hold `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EmotionScores([f64; EMOTION_COUNT]);

impl EmotionScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        self.0[emotion.slot()]
    }

    pub fn set(&mut self, emotion: Emotion, value: f64) {
        self.0[emotion.slot()] = normalize_score(value);
    }

    /// Builder-style [`EmotionScores::set`].
    pub fn with(mut self, emotion: Emotion, value: f64) -> Self {
        self.set(emotion, value);
        self
    }

    /// `(label, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::all().map(|emotion| (emotion, self.get(emotion)))
    }

    /// The label with the highest score, if any score is above zero.
    pub fn dominant(&self) -> Option<(Emotion, f64)> {
        self.iter()
            .filter(|(_, value)| *value > 0.0)
            .fold(None, |best, (emotion, value)| match best {
                Some((_, top)) if top >= value => best,
                _ => Some((emotion, value)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(Emotion::from_str("joy").unwrap(), Emotion::Joy);
        assert_eq!(Emotion::from_str("SADNESS").unwrap(), Emotion::Sadness);
        assert!(Emotion::from_str("boredom").is_err());
    }

    #[test]
    fn labels_render_lowercase_in_column_order() {
        let names: Vec<String> = Emotion::all().map(|e| e.to_string()).collect();
        assert_eq!(names, ["joy", "sadness", "anger", "fear", "surprise"]);
        assert_eq!(EMOTION_COUNT, 5);
    }

    #[test]
    fn new_scores_are_complete_and_neutral() {
        let scores = EmotionScores::new();
        assert_eq!(scores.iter().count(), EMOTION_COUNT);
        assert!(scores.iter().all(|(_, v)| v == 0.0));
        assert_eq!(scores.dominant(), None);
    }

    #[test]
    fn set_clamps_and_neutralizes_bad_values() {
        let scores = EmotionScores::new()
            .with(Emotion::Joy, 1.7)
            .with(Emotion::Sadness, -0.2)
            .with(Emotion::Fear, f64::NAN);
        assert_eq!(scores.get(Emotion::Joy), 1.0);
        assert_eq!(scores.get(Emotion::Sadness), 0.0);
        assert_eq!(scores.get(Emotion::Fear), 0.0);
    }

    #[test]
    fn dominant_prefers_first_label_on_ties() {
        let scores = EmotionScores::new()
            .with(Emotion::Anger, 0.4)
            .with(Emotion::Joy, 0.4)
            .with(Emotion::Sadness, 0.1);
        assert_eq!(scores.dominant(), Some((Emotion::Joy, 0.4)));
    }
}
