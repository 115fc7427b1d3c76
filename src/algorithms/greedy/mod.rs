//! Sequential greedy satellite allocation with forward look-ahead.
//!
//! The allocator walks the horizon one step at a time and, within a step, the
//! user areas in ascending id order. The key principles are:
//!
//! 1. **Continuity first**: a user area keeps its satellite for as long as the
//!    satellite stays in view and no higher-priority user area has taken it.
//! 2. **Longest run on handover**: when continuity is impossible, the free
//!    satellite that stays in view for the most consecutive steps wins. Ties go
//!    to the lexically smaller satellite name.
//! 3. **Exclusivity**: a satellite handed out at a step is withdrawn from every
//!    other user area for that step only.
//! 4. **In-band failure**: a user area with nothing in view gets the failure
//!    sentinel and the run continues.
//!
//! Both orderings are part of the result: step `t + 1` reads step `t`'s committed
//! assignments, and a lower id always wins a contested satellite.
//!
//! # Module Structure
//!
//! - [`candidate`] - Satellite candidate with its look-ahead score
//! - [`metrics`] - Run-length computation and the [`RunLengthScorer`]
//! - [`ordering`] - Candidate comparison and tie-breaking
//! - [`engine`] - Per-step allocation and invariant checks

mod candidate;
mod engine;
mod metrics;
mod ordering;


pub use candidate::Candidate;
pub use metrics::{run_length, RunLengthScorer};

use tracing::info;

use crate::algorithms::{AllocationAlgorithm, AllocationError};
use crate::availability::AvailabilityMatrix;
use crate::config::SchedulerConfig;
use crate::roster::Roster;
use crate::schedule::ScheduleLedger;

use engine::{allocate_step, check_step};

/// Greedy longest-run allocator.
#[derive(Debug, Clone, Default)]
pub struct GreedyAllocator {
    config: SchedulerConfig,
}

impl GreedyAllocator {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}

impl AllocationAlgorithm for GreedyAllocator {
    fn allocate(
        &self,
        matrix: &AvailabilityMatrix,
        roster: &Roster,
    ) -> Result<ScheduleLedger, AllocationError> {
        if roster.len() != matrix.demands() {
            return Err(AllocationError::RosterMismatch {
                roster: roster.len(),
                matrix: matrix.demands(),
            });
        }

        let mut ledger = ScheduleLedger::new(roster, matrix.resources(), matrix.steps());

        for step in 0..matrix.steps() {
            let rows = allocate_step(
                matrix,
                step,
                ledger.pending(step)?,
                self.config.handover_marking,
            );
            check_step(matrix, step, &rows)?;
            ledger.commit(step, rows)?;
        }

        let handovers = ledger.rows().iter().filter(|r| r.handover.is_some()).count();
        let failures = ledger.rows().iter().filter(|r| r.is_failed()).count();
        info!(
            steps = matrix.steps(),
            user_areas = roster.len(),
            handovers,
            failures,
            marking = %self.config.handover_marking,
            "allocation finished"
        );

        Ok(ledger)
    }
}
