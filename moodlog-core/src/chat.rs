//! Single-turn "basic chatbot" flow over the same [`LanguageModel`] the journal uses.

use crate::entry::journal_text;
use crate::error::JournalError;
use crate::llm::LanguageModel;
use tracing::debug;

/// Sends `message` to the model and returns its trimmed reply.
pub fn respond(message: &str, model: &dyn LanguageModel) -> Result<String, JournalError> {
    let message = journal_text(message)?;
    debug!(chars = message.len(), "sending chat message");
    let reply = model.complete(message)?;
    Ok(reply.trim().to_string())
}
