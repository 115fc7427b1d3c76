//! `sss` - batch satellite scheduling run.
//!
//! Reads the start file and the per user area coverage files, allocates
//! satellites for every minute of the window, prints the analytics and writes
//! the master schedule plus UAF/GAF files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use qtty::{Minute, Quantity};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use satsched::io::{self, ExportContext};
use satsched::{
    AllocationAlgorithm, GreedyAllocator, HandoverMarking, MatrixBuilder, ScheduleReport,
    SchedulerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "sss", version, about = "Satellite scheduling system batch run")]
struct Cli {
    /// Directory holding the start file and coverage files
    #[arg(long, default_value = "Input_Files")]
    input_dir: PathBuf,

    /// Directory the schedule files are written to
    #[arg(long, default_value = "Output_Files")]
    output_dir: PathBuf,

    /// Start file name, relative to the input directory
    #[arg(long, default_value = "SSS_Start_File.csv")]
    start_file: PathBuf,

    /// Frequency coordination file name, relative to the input directory.
    /// Skipped if it does not exist.
    #[arg(long, default_value = "SSS_Freq_Coord_File.csv")]
    freq_coord_file: PathBuf,

    /// Leave the prefix of each visibility column undefined instead of
    /// inferring it from the first transition
    #[arg(long)]
    no_backfill: bool,

    /// Handover duration in minutes
    #[arg(long, default_value_t = 1.0)]
    handover_minutes: f64,

    /// Handover marker policy for outage rows (consistent | reference)
    #[arg(long, default_value_t = HandoverMarking::Consistent)]
    handover_marking: HandoverMarking,

    /// Sequence number appended to output file names
    #[arg(long, default_value_t = 1)]
    sequence: u32,

    /// Print the analytics only
    #[arg(long)]
    no_exports: bool,
}

impl Cli {
    fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            backfill: !self.no_backfill,
            handover_duration: Quantity::<Minute>::new(self.handover_minutes),
            handover_marking: self.handover_marking,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    let config = cli.scheduler_config();

    let start_path = cli.input_dir.join(&cli.start_file);
    let start = io::read_start_file(&start_path)
        .with_context(|| format!("reading start file {}", start_path.display()))?;
    let roster = start.roster().context("building user area roster")?;
    let events = io::load_events(&cli.input_dir, &start).context("loading coverage files")?;
    info!(
        user_areas = roster.len(),
        events = events.len(),
        horizon = start.horizon_steps(),
        "inputs loaded"
    );

    let matrix = MatrixBuilder::new(&roster, start.horizon_steps())
        .with_backfill(config.backfill)
        .build(&events)
        .context("building availability matrix")?;
    let ledger = GreedyAllocator::new(config.clone())
        .allocate(&matrix, &roster)
        .context("allocating satellites")?;

    let report = ScheduleReport::compute(&ledger, &matrix, &roster);
    println!("{report}");
    println!(
        "Time performing handovers: {} minutes",
        report.handover_time(&config).value()
    );

    if cli.no_exports {
        return Ok(());
    }

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("creating {}", cli.output_dir.display()))?;
    let ctx = ExportContext::new(start.window, &cli.output_dir).with_sequence(cli.sequence);

    let master = io::write_master_schedule(&ctx, &ledger, &matrix, &roster)?;
    println!("Master schedule written to {}", master.display());

    let freq_path = cli.input_dir.join(&cli.freq_coord_file);
    let freq = if freq_path.exists() {
        io::read_freq_coord(&freq_path)?
    } else {
        warn!(file = %freq_path.display(), "no frequency coordination file; UAFs carry no frequencies");
        Vec::new()
    };
    let files = io::write_terminal_files(&ctx, &start, &ledger, &matrix, &roster, &freq)?;
    println!("{} UAF and GAF files written to {}", files.len(), cli.output_dir.display());

    Ok(())
}
