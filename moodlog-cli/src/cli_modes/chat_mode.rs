use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::{Context, Result};
use moodlog_core::{Moodlog, chat};

pub fn chat_mode(cli: &Cli, renderer: &Renderer, moodlog: &Moodlog) -> Result<CliModeResult> {
    let Some(words) = &cli.chat else {
        return Ok(CliModeResult::NothingToDo);
    };
    let message = words.join(" ");
    if message.trim().is_empty() {
        renderer.print_info("Nothing to send, the message is empty.");
        return Ok(CliModeResult::Finish);
    }

    let model = moodlog
        .model_client()
        .context("LLM model could not be initialized")?;
    let reply = chat::respond(&message, &model).context("running chatbot")?;
    renderer.print_reply(&reply);
    Ok(CliModeResult::Finish)
}
