mod cli;
mod cli_modes;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use cli_modes::{CliModeResult, chat_mode, path_mode, read_mode, trend_mode, use_color, write_mode};
use moodlog_core::Moodlog;
use render::{RenderOptions, Renderer};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Mode = fn(&Cli, &Renderer, &Moodlog) -> Result<CliModeResult>;

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("moodlog: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `MOODLOG_LOG` takes an `EnvFilter` directive (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("MOODLOG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let moodlog = Moodlog::new()?;
    debug!(journal = %moodlog.store.path().display(), "journal location");
    let renderer = Renderer::new(Some(RenderOptions {
        timestamp_format: moodlog.config.timestamp_format.clone(),
        use_color: use_color(&cli),
    }));

    // Write mode goes last: it is the default when no other mode claims the invocation.
    let modes: [Mode; 5] = [path_mode, read_mode, trend_mode, chat_mode, write_mode];
    for mode in modes {
        if let CliModeResult::Finish = mode(&cli, &renderer, &moodlog)? {
            break;
        }
    }
    Ok(())
}
