use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::roster::RosterError;

/// Errors raised while reading inputs or writing schedule files.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to encode {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Start file {0} has no schedule window row")]
    MissingWindow(PathBuf),

    #[error("Invalid timestamp '{value}' in {path} (expected e.g. '2022 Jul 25 00:00:00')")]
    Timestamp { path: PathBuf, value: String },

    #[error("Schedule end {end} is not after start {start}")]
    EmptyWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Unknown visibility state '{state}' in {path}")]
    UnknownState { path: PathBuf, state: String },

    #[error("Invalid handover marker '{value}' for user area {ua}")]
    HandoverMarker { ua: String, value: String },

    #[error(transparent)]
    Roster(#[from] RosterError),
}
