use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use moodlog_core::{Moodlog, Trend};

pub fn trend_mode(cli: &Cli, renderer: &Renderer, moodlog: &Moodlog) -> Result<CliModeResult> {
    if !cli.trend {
        return Ok(CliModeResult::NothingToDo);
    }
    match moodlog.trend()? {
        Trend::NoData => renderer.print_info("No emotion data yet. Start journaling!"),
        Trend::Series(series) => renderer.print_trend(&series),
    }
    Ok(CliModeResult::Finish)
}
