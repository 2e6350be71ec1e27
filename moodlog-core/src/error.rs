use std::path::PathBuf;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures talking to the model provider.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no API key found, set the {var} environment variable")]
    MissingApiKey { var: String },
    #[error("request to the model provider failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model provider answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model provider returned an empty completion")]
    EmptyResponse,
}

/// Errors surfaced by the journal pipeline.
///
/// Degraded classification is not an error; see [`crate::classifier::ParsedScores`].
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal text is empty")]
    EmptyInput,
    #[error("model unavailable: {0}")]
    ModelUnavailable(#[from] ModelError),
    #[error("reading {}: {source}", .path.display())]
    StoreRead {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
    #[error("writing {}: {source}", .path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

impl JournalError {
    pub(crate) fn read(path: &std::path::Path, source: impl Into<BoxError>) -> Self {
        Self::StoreRead {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub(crate) fn write(path: &std::path::Path, source: impl Into<BoxError>) -> Self {
        Self::StoreWrite {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}

/// Content problems found while reading the durable log.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("line {line}: invalid timestamp `{value}`")]
    BadTimestamp { line: u64, value: String },
    #[error("line {line}: column `{column}` is not a number: `{value}`")]
    BadScore {
        line: u64,
        column: String,
        value: String,
    },
}
