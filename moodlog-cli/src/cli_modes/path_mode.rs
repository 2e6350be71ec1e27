use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use moodlog_core::Moodlog;

pub fn path_mode(cli: &Cli, renderer: &Renderer, moodlog: &Moodlog) -> Result<CliModeResult> {
    if !cli.path {
        return Ok(CliModeResult::NothingToDo);
    }
    renderer.print_plain(&moodlog.store.path().display().to_string());
    Ok(CliModeResult::Finish)
}
