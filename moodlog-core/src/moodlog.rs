use crate::{
    Config,
    classifier::classify,
    entry::{JournalEntry, journal_text},
    error::{JournalError, ModelError},
    llm::{ChatCompletionsClient, LanguageModel},
    store::EntryStore,
    trend::{Trend, render},
};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use std::fs;

/// Application context: configuration plus the durable log it points at.
///
/// Built once at startup and handed to every mode; nothing is global.
#[derive(Debug)]
pub struct Moodlog {
    pub config: Config,
    pub store: EntryStore,
}

impl Moodlog {
    /// Creates a new `Moodlog` instance, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a new `Moodlog` instance with a specific `Config`.
    ///
    /// This also ensures that the data directory exists.
    pub fn with_config(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)
            .with_context(|| format!("creating data dir {}", config.data_dir.display()))?;
        let store = EntryStore::new(config.journal_file());
        Ok(Self { config, store })
    }

    /// Model client configured from `[model]`. Fails when the API key is not set.
    pub fn model_client(&self) -> Result<ChatCompletionsClient, ModelError> {
        ChatCompletionsClient::new(self.config.model.clone())
    }

    /// Classifies `text` and appends it to the log, stamped now.
    pub fn record_entry(
        &self,
        text: &str,
        model: &dyn LanguageModel,
    ) -> Result<JournalEntry, JournalError> {
        self.record_entry_at(text, Local::now().fixed_offset(), model)
    }

    /// Classify, then persist. Blank text never reaches the model, and a failed
    /// classification never reaches the store.
    pub fn record_entry_at(
        &self,
        text: &str,
        timestamp: DateTime<FixedOffset>,
        model: &dyn LanguageModel,
    ) -> Result<JournalEntry, JournalError> {
        let text = journal_text(text)?;
        let scores = classify(text, model)?;
        let entry = JournalEntry::at(timestamp, text, scores)?;
        self.store.append(&entry)?;
        Ok(entry)
    }

    /// Every entry, in append order.
    pub fn entries(&self) -> Result<Vec<JournalEntry>, JournalError> {
        self.store.load_all()
    }

    /// Reloads the log and renders the configured trend columns.
    pub fn trend(&self) -> Result<Trend, JournalError> {
        let entries = self.store.load_all()?;
        Ok(render(&entries, &self.config.trend_columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::Emotion;
    use crate::tests::{StubModel, mk_config};
    use crate::trend::TrendPoint;
    use tempfile::tempdir;

    fn mk_moodlog() -> (Moodlog, tempfile::TempDir) {
        let tmp = tempdir().unwrap();
        let config = mk_config(tmp.path().join("moodlog"));
        let moodlog = Moodlog::with_config(config).expect("moodlog with config");
        (moodlog, tmp)
    }

    #[test]
    fn with_config_creates_data_dir_but_not_log() {
        let (moodlog, _tmp) = mk_moodlog();
        assert!(moodlog.config.data_dir.is_dir());
        assert!(!moodlog.store.path().exists());
        assert_eq!(moodlog.store.path(), moodlog.config.journal_file());
    }

    #[test]
    fn empty_store_renders_no_data() {
        let (moodlog, _tmp) = mk_moodlog();
        assert!(moodlog.entries().unwrap().is_empty());
        assert_eq!(moodlog.trend().unwrap(), Trend::NoData);
    }

    #[test]
    fn wonderful_day_end_to_end() {
        let (moodlog, _tmp) = mk_moodlog();
        let model = StubModel::reply(r#"{"joy": 0.8, "sadness": 0.05}"#);
        let now = Local::now().fixed_offset();

        let saved = moodlog
            .record_entry_at("I had a wonderful day", now, &model)
            .unwrap();
        assert_eq!(saved.text, "I had a wonderful day");
        assert_eq!(saved.scores.get(Emotion::Joy), 0.8);
        assert_eq!(saved.scores.get(Emotion::Sadness), 0.05);

        let loaded = moodlog.entries().unwrap();
        assert_eq!(loaded, vec![saved]);

        match moodlog.trend().unwrap() {
            Trend::Series(series) => {
                assert_eq!(series.columns, [Emotion::Joy, Emotion::Sadness]);
                assert_eq!(
                    series.points,
                    vec![TrendPoint {
                        timestamp: now,
                        values: vec![0.8, 0.05],
                    }]
                );
            }
            Trend::NoData => panic!("expected a series"),
        }
    }

    #[test]
    fn whitespace_text_writes_nothing_and_skips_model() {
        let (moodlog, _tmp) = mk_moodlog();
        let model = StubModel::reply(r#"{"joy": 1}"#);
        let err = moodlog.record_entry("   \n\t", &model).unwrap_err();
        assert!(matches!(err, JournalError::EmptyInput));
        assert_eq!(model.calls(), 0);
        assert!(!moodlog.store.path().exists());
    }

    #[test]
    fn model_failure_persists_nothing() {
        let (moodlog, _tmp) = mk_moodlog();
        let model = StubModel::unavailable();
        let err = moodlog.record_entry("rough day", &model).unwrap_err();
        assert!(matches!(err, JournalError::ModelUnavailable(_)));
        assert!(moodlog.entries().unwrap().is_empty());
    }

    #[test]
    fn degraded_reply_still_saves_complete_scores() {
        let (moodlog, _tmp) = mk_moodlog();
        let model = StubModel::reply("I think you felt fine.");
        let saved = moodlog.record_entry("meh", &model).unwrap();
        assert!(saved.scores.iter().all(|(_, v)| v == 0.0));
        assert_eq!(moodlog.entries().unwrap().len(), 1);
    }

    #[test]
    fn trend_is_idempotent_and_sorted_over_repeated_appends() {
        let (moodlog, _tmp) = mk_moodlog();
        let model = StubModel::reply(r#"{"joy": 0.5, "sadness": 0.5}"#);
        let t3 = DateTime::parse_from_rfc3339("2025-08-03T10:00:00Z").unwrap();
        let t1 = DateTime::parse_from_rfc3339("2025-08-01T10:00:00Z").unwrap();
        let t2 = DateTime::parse_from_rfc3339("2025-08-02T10:00:00Z").unwrap();
        for (stamp, text) in [(t3, "third"), (t1, "first"), (t2, "second")] {
            let saved = moodlog.record_entry_at(text, stamp, &model).unwrap();
            assert_eq!(moodlog.entries().unwrap().last(), Some(&saved));
        }

        let first = moodlog.trend().unwrap();
        let second = moodlog.trend().unwrap();
        assert_eq!(first, second);
        let Trend::Series(series) = first else {
            panic!("expected a series");
        };
        let stamps: Vec<_> = series.points.iter().map(|p| p.timestamp).collect();
        assert_eq!(stamps, [t1, t2, t3]);
    }

    #[test]
    fn corrupt_log_is_an_error_not_no_data() {
        let (moodlog, _tmp) = mk_moodlog();
        fs::write(moodlog.store.path(), "timestamp,text,joy\nnot-a-time,x,0.1\n").unwrap();
        assert!(matches!(
            moodlog.trend(),
            Err(JournalError::StoreRead { .. })
        ));
    }
}
