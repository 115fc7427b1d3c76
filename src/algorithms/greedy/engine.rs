//! Per-step allocation and invariant checks.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::algorithms::AllocationError;
use crate::availability::{AvailabilityMatrix, ResourceId};
use crate::config::HandoverMarking;
use crate::roster::DemandId;
use crate::schedule::{Assignment, LedgerRow};
use crate::units::Step;

use super::metrics::RunLengthScorer;

/// Allocates satellites for one step.
///
/// `pending` holds the open ledger rows of `step` in priority order. Each user
/// area, in turn:
/// 1. keeps its prior satellite if that satellite is still in view and not
///    taken by a higher-priority user area (no handover);
/// 2. otherwise takes the free satellite with the longest forward run
///    (handover at `step`);
/// 3. otherwise fails for this step.
///
/// A satellite handed out is withdrawn from every other user area for the rest
/// of the step, on a working copy of the step only.
pub fn allocate_step(
    matrix: &AvailabilityMatrix,
    step: Step,
    pending: &[LedgerRow],
    marking: HandoverMarking,
) -> Vec<LedgerRow> {
    let scorer = RunLengthScorer::new(matrix);
    let mut working = matrix.step_view(step);
    let mut rows = pending.to_vec();

    for (demand, row) in rows.iter_mut().enumerate() {
        if let Some(prior) = row.prior.resource() {
            if working.is_available(demand, prior) {
                row.assigned = Assignment::Resource(prior);
                row.handover = None;
                working.claim(demand, prior);
                continue;
            }
        }

        let candidates = working.available(demand);
        match scorer.best(step, demand, &candidates) {
            Some(best) => {
                row.assigned = Assignment::Resource(best.resource());
                row.handover = Some(step);
                working.claim(demand, best.resource());
                debug!(
                    step,
                    user_area = row.demand,
                    satellite = best.name(),
                    run_length = best.run_length(),
                    candidates = candidates.len(),
                    "handover"
                );
            }
            None => {
                let stays_failed = row.prior.is_failed();
                match marking {
                    HandoverMarking::Consistent => row.handover = None,
                    HandoverMarking::Reference if stays_failed => row.handover = None,
                    HandoverMarking::Reference => {}
                }
                row.assigned = Assignment::Failed;
                if !stays_failed {
                    debug!(step, user_area = row.demand, "no satellite in view");
                }
            }
        }
    }

    rows
}

/// Verifies exclusivity and that every held satellite is in view.
pub fn check_step(
    matrix: &AvailabilityMatrix,
    step: Step,
    rows: &[LedgerRow],
) -> Result<(), AllocationError> {
    let mut holders: HashMap<ResourceId, DemandId> = HashMap::with_capacity(rows.len());

    for (demand, row) in rows.iter().enumerate() {
        let Some(resource) = row.assigned.resource() else {
            continue;
        };
        let name = || matrix.resources().name(resource).to_string();

        if !matrix.is_available(step, demand, resource) {
            return Err(AllocationError::NotInView {
                step,
                demand: row.demand,
                resource: name(),
            });
        }

        match holders.entry(resource) {
            Entry::Occupied(first) => {
                return Err(AllocationError::DoubleBooking {
                    step,
                    resource: name(),
                    first: *first.get(),
                    second: row.demand,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(row.demand);
            }
        }
    }

    Ok(())
}
