use clap::{ArgGroup, Parser};

use crate::render::ColorMode;

/// moodlog: journal your day and watch your emotions over time
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    group(ArgGroup::new("mode").args(["path", "list", "trend", "chat"]).multiple(false)),
)]
pub struct Cli {
    /// Prints the journal file location.
    #[arg(long, short)]
    pub path: bool,
    /// Prints every entry with its emotion scores, in the order they were written.
    #[arg(long, short)]
    pub list: bool,
    /// Shows emotion trends over time.
    #[arg(long, short)]
    pub trend: bool,
    /// Sends a single message to the chatbot (e.g., `moodlog --chat what is a haiku?`).
    #[arg(long, short, num_args(1..), value_name = "MESSAGE")]
    pub chat: Option<Vec<String>>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Journal text (e.g., `moodlog I had a wonderful day`). Opens $EDITOR when empty.
    #[arg(conflicts_with = "mode")]
    pub text: Vec<String>,
}
