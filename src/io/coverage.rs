//! Per user area coverage exports (one CSV per user area).
//!
//! Only `satCatlog`, `state` and `datetime` are read; the pointing columns
//! (`elev`, `azmth`, `distance`) are ignored.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use super::start_file::{csv_error, parse_timestamp, reader, ScheduleWindow, StartFile};
use super::IoError;
use crate::events::{EventTable, Transition, VisibilityEvent};
use crate::roster::DemandId;

#[derive(Debug, Deserialize)]
struct CoverageRecord {
    #[serde(rename = "satCatlog")]
    satellite: String,
    state: String,
    datetime: String,
}

fn parse_state(state: &str, path: &Path) -> Result<Option<Transition>, IoError> {
    match state.to_ascii_lowercase().as_str() {
        "rising" => Ok(Some(Transition::Rising)),
        "setting" => Ok(Some(Transition::Setting)),
        "culminate" => Ok(None),
        _ => Err(IoError::UnknownState {
            path: path.to_path_buf(),
            state: state.to_string(),
        }),
    }
}

/// Parses one coverage file into events for `demand`.
///
/// Events whose minute offset falls outside the window are dropped.
pub fn read_coverage(
    path: impl AsRef<Path>,
    demand: DemandId,
    window: &ScheduleWindow,
) -> Result<Vec<VisibilityEvent>, IoError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_coverage(&text, path, demand, window)?.events)
}

/// Events of one coverage file plus the rows that were set aside.
#[derive(Debug, Default)]
struct ParsedCoverage {
    events: Vec<VisibilityEvent>,
    culminate: usize,
    outside_window: usize,
}

fn parse_coverage(
    text: &str,
    path: &Path,
    demand: DemandId,
    window: &ScheduleWindow,
) -> Result<ParsedCoverage, IoError> {
    let horizon = window.horizon_steps() as i64;
    let mut parsed = ParsedCoverage::default();

    for record in reader(text).deserialize::<CoverageRecord>() {
        let record = record.map_err(|source| csv_error(path, source))?;
        let Some(transition) = parse_state(&record.state, path)? else {
            parsed.culminate += 1;
            continue;
        };
        let offset = window.offset_minutes(parse_timestamp(&record.datetime, path)?);
        if !(0..horizon).contains(&offset) {
            parsed.outside_window += 1;
            continue;
        }
        parsed.events.push(VisibilityEvent::new(
            offset as usize,
            record.satellite,
            demand,
            transition,
        ));
    }

    if parsed.culminate > 0 {
        warn!(
            file = %path.display(),
            discarded = parsed.culminate,
            "culminate records discarded"
        );
    }
    if parsed.outside_window > 0 {
        warn!(
            file = %path.display(),
            dropped = parsed.outside_window,
            "coverage events outside the schedule window ignored"
        );
    }
    debug!(file = %path.display(), events = parsed.events.len(), "coverage file parsed");
    Ok(parsed)
}

/// Reads the coverage file of every user area named in the start file.
///
/// File names are resolved against `dir`.
pub fn load_events(dir: impl AsRef<Path>, start: &StartFile) -> Result<EventTable, IoError> {
    let dir = dir.as_ref();
    let mut events = Vec::new();
    for entry in &start.entries {
        events.extend(read_coverage(
            dir.join(&entry.coverage_file),
            entry.demand.id(),
            &start.window,
        )?);
    }
    Ok(EventTable::from_events(events))
}
