//! Start file: the schedule window followed by the user area roster.
//!
//! ```text
//! utc_start,utc_end
//! 2022 Jul 25 00:00:00,2022 Jul 26 00:00:00
//!
//! ua_no,ua_name,prev_sat,cur_sat,ho_utc,ua_filename,cur_gw,other_gw
//! 1,London,S11,S12,None,UA_London.csv,GW1A,GW1B
//! ```

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::debug;

use super::IoError;
use crate::roster::{DemandPoint, Prior, Roster};
use crate::schedule::{FAILURE_LABEL, UNASSIGNED_LABEL};
use crate::units::Step;

/// Timestamp layout shared by every input and output file.
pub const TIMESTAMP_FORMAT: &str = "%Y %b %d %H:%M:%S";

/// The UTC interval being scheduled. One step per whole minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ScheduleWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, IoError> {
        if end <= start {
            return Err(IoError::EmptyWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn horizon_steps(&self) -> Step {
        (self.end - self.start).num_minutes().max(0) as Step
    }

    /// Timestamp of a step.
    pub fn at(&self, step: Step) -> NaiveDateTime {
        self.start + chrono::Duration::minutes(step as i64)
    }

    /// Whole-minute offset of `time` from the start, truncated toward zero.
    pub fn offset_minutes(&self, time: NaiveDateTime) -> i64 {
        (time - self.start).num_minutes()
    }

    /// The start formatted for file names.
    pub fn label(&self) -> String {
        self.start.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Per user area file references from the start file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UaEntry {
    pub demand: DemandPoint,
    pub coverage_file: String,
    pub current_gateway: String,
    pub other_gateway: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartFile {
    pub window: ScheduleWindow,
    pub entries: Vec<UaEntry>,
}

impl StartFile {
    pub fn roster(&self) -> Result<Roster, IoError> {
        Ok(Roster::new(
            self.entries.iter().map(|e| e.demand.clone()).collect(),
        )?)
    }

    pub fn horizon_steps(&self) -> Step {
        self.window.horizon_steps()
    }
}

#[derive(Debug, Deserialize)]
struct WindowRecord {
    utc_start: String,
    utc_end: String,
}

#[derive(Debug, Deserialize)]
struct UaRecord {
    ua_no: u32,
    ua_name: String,
    cur_sat: String,
    ho_utc: String,
    ua_filename: String,
    cur_gw: String,
    other_gw: String,
}

pub fn read_start_file(path: impl AsRef<Path>) -> Result<StartFile, IoError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_start_file(&text, path)
}

/// Parses start file contents. `path` is only used in error messages.
pub fn parse_start_file(text: &str, path: &Path) -> Result<StartFile, IoError> {
    let mut lines = text.lines();
    let window_block: String = lines.by_ref().take(2).collect::<Vec<_>>().join("\n");
    let roster_block: String = lines
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let window = parse_window(&window_block, path)?;

    let mut entries = Vec::new();
    for record in reader(&roster_block).deserialize::<UaRecord>() {
        let record = record.map_err(|source| csv_error(path, source))?;
        entries.push(entry_from(record)?);
    }
    debug!(
        user_areas = entries.len(),
        start = %window.start,
        end = %window.end,
        "start file parsed"
    );

    Ok(StartFile { window, entries })
}

fn parse_window(block: &str, path: &Path) -> Result<ScheduleWindow, IoError> {
    let record: WindowRecord = reader(block)
        .deserialize()
        .next()
        .ok_or_else(|| IoError::MissingWindow(path.to_path_buf()))?
        .map_err(|source| csv_error(path, source))?;
    ScheduleWindow::new(
        parse_timestamp(&record.utc_start, path)?,
        parse_timestamp(&record.utc_end, path)?,
    )
}

fn entry_from(record: UaRecord) -> Result<UaEntry, IoError> {
    let handover = parse_marker(&record.ho_utc).ok_or_else(|| IoError::HandoverMarker {
        ua: record.ua_name.clone(),
        value: record.ho_utc.clone(),
    })?;
    let demand = DemandPoint::new(record.ua_no, record.ua_name)
        .with_prior(parse_prior(&record.cur_sat))
        .with_handover(handover);

    Ok(UaEntry {
        demand,
        coverage_file: record.ua_filename,
        current_gateway: record.cur_gw,
        other_gateway: record.other_gw,
    })
}

fn parse_prior(value: &str) -> Prior {
    match value {
        "" | UNASSIGNED_LABEL => Prior::None,
        FAILURE_LABEL => Prior::Failed,
        name => Prior::Satellite(name.to_string()),
    }
}

/// `None` (or empty) means no marker; anything else must be a step.
fn parse_marker(value: &str) -> Option<Option<Step>> {
    match value {
        "" | UNASSIGNED_LABEL => Some(None),
        step => step.parse().ok().map(Some),
    }
}

pub(crate) fn parse_timestamp(value: &str, path: &Path) -> Result<NaiveDateTime, IoError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|_| IoError::Timestamp {
        path: path.to_path_buf(),
        value: value.to_string(),
    })
}

pub(crate) fn reader(text: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(text.as_bytes())
}

pub(crate) fn csv_error(path: &Path, source: csv::Error) -> IoError {
    IoError::Csv {
        path: path.to_path_buf(),
        source,
    }
}
