use crate::config::{Config, ModelSettings};
use crate::error::ModelError;
use crate::llm::LanguageModel;
use crate::trend::DEFAULT_TREND_COLUMNS;
use std::cell::RefCell;
use std::path::PathBuf;

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(data_dir: PathBuf) -> Config {
    Config {
        data_dir,
        editor: None,
        timestamp_format: "%a, %d %b %Y %H:%M".to_string(),
        trend_columns: DEFAULT_TREND_COLUMNS.to_vec(),
        model: ModelSettings::default(),
    }
}

/// Scripted [`LanguageModel`] that records every prompt it receives.
pub struct StubModel {
    reply: Option<String>,
    prompts: RefCell<Vec<String>>,
}

impl StubModel {
    pub fn reply(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// A provider that always fails with a 503.
    pub fn unavailable() -> Self {
        Self {
            reply: None,
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl LanguageModel for StubModel {
    fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(ModelError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            }),
        }
    }
}
