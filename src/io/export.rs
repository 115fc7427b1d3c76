//! Schedule outputs: the master schedule CSV plus one user area file (UAF) and
//! one gateway antenna file (GAF) per user area.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::start_file::{csv_error, ScheduleWindow, StartFile, TIMESTAMP_FORMAT};
use super::IoError;
use crate::availability::{AvailabilityMatrix, Cell};
use crate::roster::Roster;
use crate::schedule::{LedgerRow, ScheduleLedger, UNASSIGNED_LABEL};
use crate::{generate_id, Id};

/// Where and under which names outputs are written.
#[derive(Debug, Clone)]
pub struct ExportContext {
    pub window: ScheduleWindow,
    /// Run sequence number appended to every file name.
    pub sequence: u32,
    pub output_dir: PathBuf,
    /// Time from which the terminal files take effect.
    pub activation: NaiveDateTime,
}

impl ExportContext {
    /// Context activating at the start of the window.
    pub fn new(window: ScheduleWindow, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            window,
            sequence: 1,
            output_dir: output_dir.into(),
            activation: window.start,
        }
    }

    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    fn file(&self, prefix: &str, name: Option<&str>, extension: &str) -> PathBuf {
        let stem = match name {
            Some(name) => format!("{prefix}_{name}_{}_{}", self.window.label(), self.sequence),
            None => format!("{prefix}_{}_{}", self.window.label(), self.sequence),
        };
        self.output_dir.join(format!("{stem}.{extension}"))
    }
}

/// Frequency plan row for one user area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreqCoord {
    #[serde(rename = "altAcquisitionFreq")]
    pub acquisition_freq: f64,
    pub polarisation: String,
    #[serde(rename = "symbolRate")]
    pub symbol_rate: f64,
}

/// Reads the frequency coordination file, one row per user area in start file order.
pub fn read_freq_coord(path: impl AsRef<Path>) -> Result<Vec<FreqCoord>, IoError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    super::start_file::reader(&text)
        .deserialize()
        .collect::<Result<Vec<FreqCoord>, _>>()
        .map_err(|source| csv_error(path, source))
}

fn cell_label(cell: Cell) -> &'static str {
    match cell {
        Cell::Available => "1",
        Cell::Unavailable => "0",
        Cell::Unknown => "NaN",
    }
}

fn marker_label(row: &LedgerRow) -> String {
    row.handover
        .map_or_else(|| UNASSIGNED_LABEL.to_string(), |s| s.to_string())
}

/// Writes the master schedule: one row per (step, user area) with the
/// assignment columns followed by that row's visibility of every satellite.
pub fn write_master_schedule(
    ctx: &ExportContext,
    ledger: &ScheduleLedger,
    matrix: &AvailabilityMatrix,
    roster: &Roster,
) -> Result<PathBuf, IoError> {
    let path = ctx.file("SSS_Master_Schedule", None, "csv");
    let resources = matrix.resources();
    let mut writer = csv::Writer::from_path(&path).map_err(|source| csv_error(&path, source))?;

    let mut header = vec![
        "utc_off", "ua_no", "ua_name", "prev_sat", "cur_sat", "ho_utc", "avail_sats",
    ];
    header.extend(resources.iter().map(|(_, name)| name));
    writer
        .write_record(&header)
        .map_err(|source| csv_error(&path, source))?;

    let width = roster.len().max(1);
    for (i, row) in ledger.rows().iter().enumerate() {
        let position = i % width;
        let name = roster.get(position).map(|d| d.name()).unwrap_or_default();

        let mut record = vec![
            row.step.to_string(),
            row.demand.to_string(),
            name.to_string(),
            ledger.prior_label(row, position, resources).to_string(),
            row.assigned.label(resources).to_string(),
            marker_label(row),
            matrix.available_count(row.step, position).to_string(),
        ];
        record.extend(
            matrix
                .row(row.step, position)
                .iter()
                .map(|c| cell_label(*c).to_string()),
        );
        writer
            .write_record(&record)
            .map_err(|source| csv_error(&path, source))?;
    }

    writer.flush().map_err(|source| IoError::Write {
        path: path.clone(),
        source,
    })?;
    info!(file = %path.display(), rows = ledger.rows().len(), "master schedule written");
    Ok(path)
}

/// A satellite change handed to a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoverEntry {
    pub satellite: String,
    pub start: NaiveDateTime,
    /// Start of the following entry, if any.
    pub end: Option<NaiveDateTime>,
}

/// Handover entries of one user area, addressed by roster position.
///
/// Rows with a marker become entries, except rows where an outage simply
/// continues.
pub fn handover_entries(
    ledger: &ScheduleLedger,
    matrix: &AvailabilityMatrix,
    window: &ScheduleWindow,
    position: usize,
) -> Vec<HandoverEntry> {
    let starts: Vec<(String, NaiveDateTime)> = ledger
        .demand_rows(position)
        .filter(|r| r.handover.is_some())
        .filter(|r| !(r.is_failed() && r.prior.is_failed()))
        .map(|r| {
            (
                r.assigned.label(matrix.resources()).to_string(),
                window.at(r.step),
            )
        })
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, (satellite, start))| HandoverEntry {
            satellite: satellite.clone(),
            start: *start,
            end: starts.get(i + 1).map(|(_, next)| *next),
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct TerminalFile<E> {
    reference: Id,
    #[serde(rename = "activationTime")]
    activation: String,
    entries: BTreeMap<usize, E>,
}

#[derive(Debug, Serialize)]
struct UafEntry<'a> {
    #[serde(rename = "SatCatNo")]
    satellite: &'a str,
    #[serde(rename = "startTime")]
    start: String,
    #[serde(rename = "endTime")]
    end: Option<String>,
    #[serde(flatten)]
    freq: Option<&'a FreqCoord>,
}

#[derive(Debug, Serialize)]
struct GafEntry<'a> {
    #[serde(rename = "SatCatNo")]
    satellite: &'a str,
    #[serde(rename = "startTime")]
    start: String,
    #[serde(rename = "endTime")]
    end: Option<String>,
    gw_ant: &'a str,
}

fn timestamp(t: NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

fn write_json<T: Serialize>(path: PathBuf, value: &T) -> Result<PathBuf, IoError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| IoError::Json {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, json).map_err(|source| IoError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Writes a UAF and a GAF for every user area in the start file.
///
/// `freq` rows are matched to start file entries by position; missing rows
/// leave the frequency fields out. GAF entries alternate between the current
/// and the other gateway antenna, starting with the current one.
pub fn write_terminal_files(
    ctx: &ExportContext,
    start: &StartFile,
    ledger: &ScheduleLedger,
    matrix: &AvailabilityMatrix,
    roster: &Roster,
    freq: &[FreqCoord],
) -> Result<Vec<PathBuf>, IoError> {
    let mut written = Vec::with_capacity(start.entries.len() * 2);
    let activation = timestamp(ctx.activation);

    for (i, entry) in start.entries.iter().enumerate() {
        let Some(position) = roster.position(entry.demand.id()) else {
            continue;
        };
        let name = entry.demand.name();
        let entries = handover_entries(ledger, matrix, &ctx.window, position);

        let uaf = TerminalFile {
            reference: generate_id(),
            activation: activation.clone(),
            entries: entries
                .iter()
                .enumerate()
                .map(|(k, e)| {
                    (
                        k,
                        UafEntry {
                            satellite: &e.satellite,
                            start: timestamp(e.start),
                            end: e.end.map(timestamp),
                            freq: freq.get(i),
                        },
                    )
                })
                .collect(),
        };
        written.push(write_json(ctx.file("UAF", Some(name), "json"), &uaf)?);

        let gaf = TerminalFile {
            reference: generate_id(),
            activation: activation.clone(),
            entries: entries
                .iter()
                .enumerate()
                .map(|(k, e)| {
                    let gw_ant = if k % 2 == 0 {
                        entry.current_gateway.as_str()
                    } else {
                        entry.other_gateway.as_str()
                    };
                    (
                        k,
                        GafEntry {
                            satellite: &e.satellite,
                            start: timestamp(e.start),
                            end: e.end.map(timestamp),
                            gw_ant,
                        },
                    )
                })
                .collect(),
        };
        written.push(write_json(ctx.file("GAF", Some(name), "json"), &gaf)?);
    }

    info!(
        files = written.len(),
        dir = %ctx.output_dir.display(),
        "terminal files written"
    );
    Ok(written)
}
