//! Statistics derived from a finished schedule.
//!
//! Everything here is a pure scan over the ledger and the matrix; nothing feeds
//! back into allocation.

use std::collections::BTreeMap;
use std::fmt;

use qtty::{Minute, Quantity};

use crate::availability::AvailabilityMatrix;
use crate::config::SchedulerConfig;
use crate::roster::{DemandId, Roster};
use crate::schedule::ScheduleLedger;
use crate::units::Step;

/// Per user area totals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DemandSummary {
    pub id: DemandId,
    pub name: String,
    /// Rows whose assignment differs from the previous step's.
    pub handovers: usize,
    /// Steps spent on the failure sentinel.
    pub outage_minutes: usize,
}

/// Schedule-wide analytics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScheduleReport {
    pub steps: Step,
    pub satellites: usize,
    /// User areas × schedule duration.
    pub ua_minutes: usize,
    /// Satellites × schedule duration.
    pub satellite_minutes: usize,
    /// How often each count of in-view satellites occurs over (step, user area) cells.
    pub availability_distribution: BTreeMap<usize, usize>,
    pub handovers: usize,
    pub outage_minutes: usize,
    pub demands: Vec<DemandSummary>,
}

impl ScheduleReport {
    pub fn compute(ledger: &ScheduleLedger, matrix: &AvailabilityMatrix, roster: &Roster) -> Self {
        let mut availability_distribution = BTreeMap::new();
        for step in 0..matrix.steps() {
            for demand in 0..matrix.demands() {
                *availability_distribution
                    .entry(matrix.available_count(step, demand))
                    .or_insert(0) += 1;
            }
        }

        let demands: Vec<DemandSummary> = roster
            .iter()
            .enumerate()
            .map(|(position, demand)| {
                DemandSummary {
                    id: demand.id(),
                    name: demand.name().to_string(),
                    handovers: ledger
                        .demand_rows(position)
                        .filter(|r| r.is_handover())
                        .count(),
                    outage_minutes: ledger.demand_rows(position).filter(|r| r.is_failed()).count(),
                }
            })
            .collect();

        let steps = ledger.committed_steps();
        Self {
            steps,
            satellites: matrix.resources().len(),
            ua_minutes: steps * roster.len(),
            satellite_minutes: steps * matrix.resources().len(),
            availability_distribution,
            handovers: demands.iter().map(|d| d.handovers).sum(),
            outage_minutes: demands.iter().map(|d| d.outage_minutes).sum(),
            demands,
        }
    }

    /// User area minutes as a percentage of satellite minutes.
    pub fn target_utilisation_pct(&self) -> f64 {
        percentage(self.ua_minutes, self.satellite_minutes)
    }

    /// Share of user area minutes not spent in outage.
    pub fn availability_pct(&self) -> f64 {
        100.0 - percentage(self.outage_minutes, self.ua_minutes)
    }

    /// Mean number of satellites serving a user area at any step.
    pub fn average_satellites_used(&self) -> f64 {
        if self.steps == 0 {
            return 0.0;
        }
        (self.ua_minutes - self.outage_minutes) as f64 / self.steps as f64
    }

    /// Mean number of satellites left idle at any step.
    pub fn average_satellites_unused(&self) -> f64 {
        self.satellites as f64 - self.average_satellites_used()
    }

    /// Time spent performing handovers, assuming each takes the configured duration.
    pub fn handover_time(&self, config: &SchedulerConfig) -> Quantity<Minute> {
        config.handover_duration * self.handovers as f64
    }

    /// Smallest in-view satellite count observed for any user area.
    pub fn min_available(&self) -> Option<usize> {
        self.availability_distribution.keys().next().copied()
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

impl fmt::Display for ScheduleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Schedule duration: {} hours {} minutes ({} minutes)",
            self.steps / 60,
            self.steps % 60,
            self.steps
        )?;
        writeln!(f, "User area minutes: {}", self.ua_minutes)?;
        writeln!(f, "Available satellite minutes: {}", self.satellite_minutes)?;
        writeln!(
            f,
            "Target utilisation: {:.0}%",
            self.target_utilisation_pct()
        )?;
        writeln!(f, "Satellites in view per user area (occurrences):")?;
        for (count, occurrences) in &self.availability_distribution {
            writeln!(f, "  {count:>3}: {occurrences}")?;
        }
        writeln!(f, "Handovers: {}", self.handovers)?;
        writeln!(
            f,
            "Average satellites concurrently used: {:.2}",
            self.average_satellites_used()
        )?;
        writeln!(
            f,
            "Average satellites concurrently unused: {:.2}",
            self.average_satellites_unused()
        )?;
        writeln!(f, "User area outage time: {} minutes", self.outage_minutes)?;
        writeln!(f, "Average availability: {:.2}%", self.availability_pct())?;
        writeln!(f, "By user area:")?;
        for demand in &self.demands {
            writeln!(
                f,
                "  {:>4} {:<16} handovers {:>5}  outage {:>5} min",
                demand.id, demand.name, demand.handovers, demand.outage_minutes
            )?;
        }
        Ok(())
    }
}
