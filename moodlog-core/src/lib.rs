pub mod chat;
pub mod classifier;
pub mod config;
pub mod emotion;
pub mod entry;
pub mod error;
pub mod llm;
pub mod moodlog;
pub mod store;
pub mod trend;

#[cfg(test)]
pub(crate) mod tests;

pub use classifier::{ParsedScores, classify, parse_scores};
pub use config::{Config, ModelSettings};
pub use emotion::{Emotion, EmotionScores};
pub use entry::JournalEntry;
pub use error::{JournalError, ModelError};
pub use llm::{ChatCompletionsClient, LanguageModel};
pub use moodlog::Moodlog;
pub use store::EntryStore;
pub use trend::{Trend, TrendPoint, TrendSeries};
