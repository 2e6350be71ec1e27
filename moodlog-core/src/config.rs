use crate::emotion::Emotion;
use crate::trend::DEFAULT_TREND_COLUMNS;
use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf, str::FromStr};
use tracing::{debug, warn};

pub const JOURNAL_FILE_NAME: &str = "journal.csv";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the durable log (`journal.csv`).
    pub data_dir: PathBuf,
    /// Preferred editor name/binary (e.g. hx for Helix). Optional; the CLI will fall back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// chrono format used when printing timestamps.
    pub timestamp_format: String,
    /// Emotions charted by the trend view, in series order.
    pub trend_columns: Vec<Emotion>,
    pub model: ModelSettings,
}

/// Where and how to reach the chat-completions provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    /// Base URL of an OpenAI-compatible API, without the `/chat/completions` suffix.
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            temperature: 0.0,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    editor: Option<String>,
    timestamp_format: Option<String>,
    trend_columns: Option<Vec<String>>,
    model: Option<FileModelConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct FileModelConfig {
    base_url: Option<String>,
    model: Option<String>,
    api_key_env: Option<String>,
    temperature: Option<f32>,
    timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk (first XDG path, then native) and apply defaults.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config()?;
        Ok(Self::from_file_config(file_config))
    }

    /// The durable log inside `data_dir`.
    pub fn journal_file(&self) -> PathBuf {
        self.data_dir.join(JOURNAL_FILE_NAME)
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let data_dir = file_config
            .data_dir
            .unwrap_or_else(Self::default_data_dir);

        let timestamp_format = file_config
            .timestamp_format
            .unwrap_or_else(|| "%a, %d %b %Y %H:%M".to_string());

        let trend_columns = file_config
            .trend_columns
            .as_deref()
            .map(Self::parse_trend_columns)
            .filter(|columns| !columns.is_empty())
            .unwrap_or_else(|| DEFAULT_TREND_COLUMNS.to_vec());

        let model = Self::model_settings(file_config.model.unwrap_or_default());

        Self {
            data_dir,
            editor: file_config.editor,
            timestamp_format,
            trend_columns,
            model,
        }
    }

    fn model_settings(file: FileModelConfig) -> ModelSettings {
        let defaults = ModelSettings::default();
        ModelSettings {
            base_url: file.base_url.unwrap_or(defaults.base_url),
            model: file.model.unwrap_or(defaults.model),
            api_key_env: file.api_key_env.unwrap_or(defaults.api_key_env),
            temperature: file.temperature.unwrap_or(defaults.temperature),
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }

    /// Keeps known labels in the given order, skipping unknown ones and duplicates.
    fn parse_trend_columns(names: &[String]) -> Vec<Emotion> {
        let mut columns = Vec::new();
        for name in names {
            match Emotion::from_str(name.trim()) {
                Ok(emotion) if !columns.contains(&emotion) => columns.push(emotion),
                Ok(_) => {}
                Err(_) => warn!(column = %name, "ignoring unknown emotion in trend_columns"),
            }
        }
        columns
    }

    /// Default data root: `{data_dir}/moodlog`
    /// - macOS:   `~/Library/Application Support/moodlog`
    /// - Linux:   `$XDG_DATA_HOME/moodlog` or `~/.local/share/moodlog`
    /// - Windows: `%APPDATA%\moodlog`
    fn default_data_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            base.data_dir().join("moodlog")
        } else {
            PathBuf::from("./moodlog")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            v.push(
                b.home_dir()
                    .join(".config")
                    .join("moodlog")
                    .join("config.toml"),
            );
            v.push(b.config_dir().join("moodlog").join("config.toml"));
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            debug!(path = %path.display(), "loading config");
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}
