use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use moodlog_core::Moodlog;

pub fn read_mode(cli: &Cli, renderer: &Renderer, moodlog: &Moodlog) -> Result<CliModeResult> {
    if !cli.list {
        return Ok(CliModeResult::NothingToDo);
    }
    let entries = moodlog.entries()?;
    if entries.is_empty() {
        renderer.print_info("No entries found. Start journaling!");
    } else {
        renderer.print_info(&format!("{} entries found.", entries.len()));
        renderer.print_entries(&entries);
    }
    Ok(CliModeResult::Finish)
}
