use super::{
    CliModeResult,
    editor_utils::{create_editor_buffer, resolve_editor},
};
use crate::{Cli, render::Renderer};
use anyhow::{Context, Result};
use moodlog_core::Moodlog;

pub fn write_mode(cli: &Cli, renderer: &Renderer, moodlog: &Moodlog) -> Result<CliModeResult> {
    let input = if !cli.text.is_empty() {
        cli.text.join(" ")
    } else {
        let editor = resolve_editor(&moodlog.config.editor);
        create_editor_buffer(&editor)?
    };

    // Blank input never reaches the model or the journal file.
    if input.trim().is_empty() {
        renderer.print_info("No entry to save, because no text was received.");
        return Ok(CliModeResult::Finish);
    }

    let model = moodlog
        .model_client()
        .context("LLM model could not be initialized")?;
    let entry = moodlog
        .record_entry(&input, &model)
        .context("saving journal entry")?;

    renderer.print_info(&format!(
        "Journal entry saved to {}",
        moodlog.store.path().display()
    ));
    renderer.print_entry_line(&entry);
    Ok(CliModeResult::Finish)
}
