//! File formats of the batch tool.
//!
//! - [`start_file`] - schedule window and user area roster
//! - [`coverage`] - per user area rising/setting exports
//! - [`export`] - master schedule CSV and per user area / gateway JSON files

pub mod coverage;
mod error;
pub mod export;
pub mod start_file;

pub use coverage::{load_events, read_coverage};
pub use error::IoError;
pub use export::{
    handover_entries, read_freq_coord, write_master_schedule, write_terminal_files, ExportContext,
    FreqCoord, HandoverEntry,
};
pub use start_file::{read_start_file, ScheduleWindow, StartFile, TIMESTAMP_FORMAT};
