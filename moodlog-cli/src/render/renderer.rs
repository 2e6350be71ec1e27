use super::theme::OneDark;
use chrono::{DateTime, FixedOffset};
use moodlog_core::{Emotion, JournalEntry, TrendSeries};
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

/// Width, in cells, of a full-intensity bar.
const BAR_WIDTH: usize = 20;

#[derive(Clone)]
pub struct RenderOptions {
    pub timestamp_format: String,
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::default_onedark_skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    timestamp_format: "%a, %d %b %Y %H:%M".to_string(),
                    use_color: true,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        self.skin.print_text(md);
    }

    pub fn print_plain(&self, text: &str) {
        println!("{text}");
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_reply(&self, reply: &str) {
        if self.opts.use_color {
            self.print_md(reply);
        } else {
            println!("{reply}");
        }
    }

    /// One-line summary: timestamp, dominant emotion and the start of the text.
    pub fn print_entry_line(&self, entry: &JournalEntry) {
        let mut when = self.timestamp(&entry.timestamp);
        let mut mood = match entry.scores.dominant() {
            Some((emotion, value)) => format!("{emotion} {value:.2}"),
            None => "neutral".to_string(),
        };
        let mut text = snippet(&entry.text, 60);
        if self.opts.use_color {
            when = when.with(Color::Cyan).to_string();
            mood = mood.with(Color::Yellow).to_string();
            text = text.with(Color::Grey).to_string();
        }
        println!("{when} [{mood}] {text}");
    }

    pub fn print_entries(&self, entries: &[JournalEntry]) {
        for (i, entry) in entries.iter().enumerate() {
            let heading = format!("## {}", self.timestamp(&entry.timestamp));
            let scores = entry
                .scores
                .iter()
                .map(|(emotion, value)| format!("{emotion} {value:.2}"))
                .collect::<Vec<_>>()
                .join(" · ");

            if self.opts.use_color {
                self.print_md(&format!("{heading}\n{}\n*{scores}*", entry.text.trim_end()));
                self.print_md("---");
            } else {
                println!("{heading}\n{}\n{scores}", entry.text.trim_end());
                if i + 1 < entries.len() {
                    println!("---");
                }
            }
        }
    }

    /// Draws the series as a table, one row per point. Without color the output is
    /// tab-separated so it can be piped into other tools.
    pub fn print_trend(&self, series: &TrendSeries) {
        if self.opts.use_color {
            self.print_md(&trend_markdown(series, &self.opts.timestamp_format));
            self.print_legend(&series.columns);
        } else {
            print!("{}", trend_tsv(series));
        }
    }

    fn print_legend(&self, columns: &[Emotion]) {
        let legend = columns
            .iter()
            .enumerate()
            .map(|(i, emotion)| {
                format!("{} {emotion}", "█".with(OneDark::series_color(i)))
            })
            .collect::<Vec<_>>()
            .join("   ");
        println!("{legend}");
    }

    fn timestamp(&self, timestamp: &DateTime<FixedOffset>) -> String {
        timestamp.format(&self.opts.timestamp_format).to_string()
    }
}

fn trend_markdown(series: &TrendSeries, timestamp_format: &str) -> String {
    let mut md = String::from("# Emotion trends over time\n");
    let align = ":-|".repeat(series.columns.len() + 1);
    md.push_str(&format!("|{align}\n"));

    md.push_str("|**when**|");
    for emotion in &series.columns {
        md.push_str(&format!("**{emotion}**|"));
    }
    md.push('\n');
    md.push_str(&format!("|{align}\n"));

    for point in &series.points {
        md.push_str(&format!("|{}|", point.timestamp.format(timestamp_format)));
        for value in &point.values {
            md.push_str(&format!("`{}` {value:.2}|", bar(*value)));
        }
        md.push('\n');
    }
    md.push_str(&format!("|{align}\n"));
    md.push_str("|*mean*|");
    for emotion in &series.columns {
        match series.average(*emotion) {
            Some(mean) => md.push_str(&format!("*{mean:.2}*|")),
            None => md.push_str("-|"),
        }
    }
    md.push('\n');
    md.push_str("|-|\n");
    md
}

fn trend_tsv(series: &TrendSeries) -> String {
    let mut out = String::from("timestamp");
    for emotion in &series.columns {
        out.push('\t');
        out.push_str(emotion.as_ref());
    }
    out.push('\n');
    for point in &series.points {
        out.push_str(&point.timestamp.to_rfc3339());
        for value in &point.values {
            out.push_str(&format!("\t{value}"));
        }
        out.push('\n');
    }
    out
}

/// A bar proportional to `value` in `[0, 1]`, padded to a fixed width.
fn bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

fn snippet(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or_default().trim();
    if first_line.chars().count() <= max_chars && !text.trim().contains('\n') {
        return first_line.to_string();
    }
    let cut: String = first_line.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}
