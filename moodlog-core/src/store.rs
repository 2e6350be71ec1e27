//! Append-only CSV log of journal entries.
//!
//! Layout: `timestamp,text,joy,sadness,anger,fear,surprise`, one row per entry, header written
//! once when the file is created. Rows are only ever appended.

use crate::emotion::{Emotion, EmotionScores};
use crate::entry::JournalEntry;
use crate::error::{JournalError, RowError};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, SecondsFormat, TimeZone};
use csv::StringRecord;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const TEXT_COLUMN: &str = "text";

/// Naive layouts accepted for rows written by other tools. They are read as local time.
const NAIVE_TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone)]
pub struct EntryStore {
    path: PathBuf,
}

impl EntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row, creating the file (and its header) if needed.
    ///
    /// The row follows the column order of the header already in the file. Score columns
    /// the header lacks are not written, and unknown columns get an empty cell.
    pub fn append(&self, entry: &JournalEntry) -> Result<(), JournalError> {
        let path = self.path.as_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| JournalError::write(path, e))?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| JournalError::write(path, e))?;

        let len = file.metadata().map_err(|e| JournalError::write(path, e))?.len();
        let existing = if len == 0 { None } else { existing_header(path)? };
        if len > 0
            && !ends_with_newline(&mut file).map_err(|e| JournalError::write(path, e))?
        {
            // A hand-edited file may lack the final newline; keep the last row intact.
            file.write_all(b"\n")
                .map_err(|e| JournalError::write(path, e))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        let layout = match existing {
            Some(headers) => headers,
            None => {
                let headers = StringRecord::from(header());
                writer
                    .write_record(&headers)
                    .map_err(|e| JournalError::write(path, e))?;
                headers
            }
        };
        writer
            .write_record(to_record(entry, &layout))
            .map_err(|e| JournalError::write(path, e))?;
        writer.flush().map_err(|e| JournalError::write(path, e))?;

        info!(path = %path.display(), timestamp = %entry.timestamp, "appended journal entry");
        Ok(())
    }

    /// Reads every entry in append order.
    ///
    /// A missing or empty file is an empty journal. Anything unreadable is an error.
    pub fn load_all(&self) -> Result<Vec<JournalEntry>, JournalError> {
        let path = self.path.as_path();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no journal yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(JournalError::read(path, e)),
        };
        if file.metadata().map_err(|e| JournalError::read(path, e))?.len() == 0 {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);
        let headers = reader
            .headers()
            .map_err(|e| JournalError::read(path, e))?
            .clone();
        let columns = Columns::locate(&headers).map_err(|e| JournalError::read(path, e))?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| JournalError::read(path, e))?;
            let entry = columns
                .entry(&record)
                .map_err(|e| JournalError::read(path, e))?;
            entries.push(entry);
        }
        debug!(path = %path.display(), count = entries.len(), "loaded journal");
        Ok(entries)
    }
}

/// Header row in column order.
pub fn header() -> Vec<String> {
    let mut row = vec![TIMESTAMP_COLUMN.to_string(), TEXT_COLUMN.to_string()];
    row.extend(Emotion::all().map(|emotion| emotion.to_string()));
    row
}

/// The header of a non-empty log, or `None` when it holds only blank lines.
///
/// A header `load_all` would reject is refused here too, so nothing is written after it.
fn existing_header(path: &Path) -> Result<Option<StringRecord>, JournalError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| JournalError::write(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| JournalError::write(path, e))?
        .clone();
    if headers.is_empty() {
        return Ok(None);
    }
    Columns::locate(&headers).map_err(|e| JournalError::write(path, e))?;
    Ok(Some(headers))
}

fn to_record(entry: &JournalEntry, layout: &StringRecord) -> Vec<String> {
    layout
        .iter()
        .map(|name| {
            let name = name.trim();
            if name.eq_ignore_ascii_case(TIMESTAMP_COLUMN) {
                entry
                    .timestamp
                    .to_rfc3339_opts(SecondsFormat::AutoSi, false)
            } else if name.eq_ignore_ascii_case(TEXT_COLUMN) {
                entry.text.clone()
            } else if let Ok(emotion) = Emotion::from_str(name) {
                entry.scores.get(emotion).to_string()
            } else {
                String::new()
            }
        })
        .collect()
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Parses RFC 3339, falling back to naive layouts in local time.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp);
    }
    NAIVE_TIMESTAMP_FORMATS.iter().find_map(|format| {
        let naive = NaiveDateTime::parse_from_str(value, format).ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.fixed_offset())
    })
}

/// Column positions resolved from the header row.
struct Columns {
    timestamp: usize,
    text: usize,
    scores: Vec<(Emotion, Option<usize>)>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, RowError> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let timestamp =
            position(TIMESTAMP_COLUMN).ok_or(RowError::MissingColumn(TIMESTAMP_COLUMN))?;
        let text = position(TEXT_COLUMN).ok_or(RowError::MissingColumn(TEXT_COLUMN))?;
        let scores = Emotion::all()
            .map(|emotion| (emotion, position(emotion.as_ref())))
            .collect();
        Ok(Self {
            timestamp,
            text,
            scores,
        })
    }

    fn entry(&self, record: &StringRecord) -> Result<JournalEntry, RowError> {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let field = |index: usize| record.get(index).unwrap_or_default();

        let raw_timestamp = field(self.timestamp);
        let timestamp = parse_timestamp(raw_timestamp).ok_or_else(|| RowError::BadTimestamp {
            line,
            value: raw_timestamp.to_string(),
        })?;

        let mut scores = EmotionScores::new();
        for (emotion, index) in &self.scores {
            let Some(index) = index else { continue };
            let raw = field(*index).trim();
            if raw.is_empty() {
                continue;
            }
            let value = raw.parse::<f64>().map_err(|_| RowError::BadScore {
                line,
                column: emotion.to_string(),
                value: raw.to_string(),
            })?;
            scores.set(*emotion, value);
        }

        Ok(JournalEntry {
            timestamp,
            text: field(self.text).to_string(),
            scores,
        })
    }
}
