//! Step-by-step record of satellite assignments.

mod assignment;
mod errors;

#[cfg(test)]
mod tests;

pub use assignment::{Assignment, FAILURE_LABEL, UNASSIGNED_LABEL};
pub use errors::LedgerError;

use tracing::warn;

use crate::availability::ResourceIndex;
use crate::roster::{DemandId, Prior, Roster};
use crate::units::Step;

/// Assignment state of one user area at one step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerRow {
    pub step: Step,
    pub demand: DemandId,
    /// Assignment carried over from the previous step (or the roster at step 0).
    pub prior: Assignment,
    pub assigned: Assignment,
    /// Step at which the assignment last changed to a new satellite.
    pub handover: Option<Step>,
    /// Step until which the assignment may not change. Reserved for handover
    /// locking; the allocator never sets or reads it.
    pub locked_until: Option<Step>,
}

impl LedgerRow {
    /// True if the satellite changed between the previous step and this one.
    pub fn is_handover(&self) -> bool {
        self.assigned != self.prior
    }

    pub fn is_failed(&self) -> bool {
        self.assigned.is_failed()
    }
}

/// Schedule table keyed by (step, user area).
///
/// Steps are committed strictly in order. Committing step `t` opens step `t + 1`
/// with each row's `prior` set to the assignment just committed, which is the
/// only state one step hands to the next.
///
/// # Examples
///
/// ```
/// use satsched::availability::ResourceIndex;
/// use satsched::roster::{DemandPoint, Roster};
/// use satsched::schedule::{Assignment, ScheduleLedger};
///
/// let roster = Roster::new(vec![DemandPoint::new(0, "London")]).unwrap();
/// let resources = ResourceIndex::from_names(["S11"]);
/// let s11 = resources.get("S11").unwrap();
///
/// let mut ledger = ScheduleLedger::new(&roster, &resources, 2);
/// let mut rows = ledger.pending(0).unwrap().to_vec();
/// rows[0].assigned = Assignment::Resource(s11);
/// ledger.commit(0, rows).unwrap();
///
/// assert_eq!(ledger.pending(1).unwrap()[0].prior, Assignment::Resource(s11));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleLedger {
    horizon: Step,
    demand_ids: Vec<DemandId>,
    seed_markers: Vec<Option<Step>>,
    unresolved_priors: Vec<Option<String>>,
    rows: Vec<LedgerRow>,
    committed: Step,
}

impl ScheduleLedger {
    /// Creates a ledger whose step 0 is seeded from the roster.
    ///
    /// Roster priors naming a satellite absent from `resources` are seeded as
    /// unassigned: such a satellite can never be in view. The name is kept for
    /// [`prior_label`](Self::prior_label).
    pub fn new(roster: &Roster, resources: &ResourceIndex, horizon: Step) -> Self {
        let demand_ids: Vec<DemandId> = roster.iter().map(|d| d.id()).collect();
        let seed_markers: Vec<Option<Step>> = roster.iter().map(|d| d.handover()).collect();
        let unresolved_priors: Vec<Option<String>> = roster
            .iter()
            .map(|d| match d.prior() {
                Prior::Satellite(name) if resources.get(name).is_none() => Some(name.clone()),
                _ => None,
            })
            .collect();

        let mut rows = Vec::with_capacity(horizon * demand_ids.len());
        if horizon > 0 {
            rows.extend(roster.iter().map(|demand| LedgerRow {
                step: 0,
                demand: demand.id(),
                prior: resolve_prior(demand.id(), demand.prior(), resources),
                assigned: Assignment::Unassigned,
                handover: demand.handover(),
                locked_until: None,
            }));
        }

        Self {
            horizon,
            demand_ids,
            seed_markers,
            unresolved_priors,
            rows,
            committed: 0,
        }
    }

    pub fn horizon(&self) -> Step {
        self.horizon
    }

    /// Number of user areas per step.
    pub fn demands(&self) -> usize {
        self.demand_ids.len()
    }

    pub fn committed_steps(&self) -> Step {
        self.committed
    }

    pub fn is_complete(&self) -> bool {
        self.committed == self.horizon
    }

    /// The step awaiting allocation, if any.
    pub fn open_step(&self) -> Option<Step> {
        (self.committed < self.horizon).then_some(self.committed)
    }

    /// Rows of the open step, pre-filled with priors and seeded markers.
    pub fn pending(&self, step: Step) -> Result<&[LedgerRow], LedgerError> {
        self.check_open(step)?;
        let start = step * self.demands();
        Ok(&self.rows[start..start + self.demands()])
    }

    /// Finalises the open step and opens the next one.
    pub fn commit(&mut self, step: Step, rows: Vec<LedgerRow>) -> Result<(), LedgerError> {
        self.check_open(step)?;
        if rows.len() != self.demands() {
            return Err(LedgerError::RowCountMismatch {
                step,
                expected: self.demands(),
                found: rows.len(),
            });
        }

        let start = step * self.demands();
        self.rows.truncate(start);
        self.rows.extend(rows);
        self.committed += 1;

        if self.committed < self.horizon {
            let next = self.committed;
            let carried: Vec<LedgerRow> = self.rows[start..]
                .iter()
                .zip(&self.seed_markers)
                .map(|(row, marker)| LedgerRow {
                    step: next,
                    demand: row.demand,
                    prior: row.assigned,
                    assigned: Assignment::Unassigned,
                    handover: *marker,
                    locked_until: None,
                })
                .collect();
            self.rows.extend(carried);
        }
        Ok(())
    }

    fn check_open(&self, step: Step) -> Result<(), LedgerError> {
        if step >= self.horizon {
            return Err(LedgerError::BeyondHorizon(step));
        }
        if step != self.committed {
            return Err(LedgerError::StepOutOfOrder {
                expected: self.committed,
                found: step,
            });
        }
        Ok(())
    }

    /// All committed rows, step-major in priority order.
    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows[..self.committed * self.demands()]
    }

    /// Committed rows of one step.
    pub fn step_rows(&self, step: Step) -> Option<&[LedgerRow]> {
        if step >= self.committed {
            return None;
        }
        let start = step * self.demands();
        Some(&self.rows[start..start + self.demands()])
    }

    /// Committed row for a user area, addressed by roster position.
    pub fn row(&self, step: Step, demand: usize) -> Option<&LedgerRow> {
        self.step_rows(step)?.get(demand)
    }

    /// Committed rows of one user area across all steps.
    ///
    /// Empty if `demand` is not a roster position.
    pub fn demand_rows(&self, demand: usize) -> impl Iterator<Item = &LedgerRow> + '_ {
        let width = self.demands().max(1);
        let steps = if demand < self.demands() { self.committed } else { 0 };
        self.rows().iter().skip(demand).step_by(width).take(steps)
    }

    /// Satellite named by the roster prior of `demand` when it is absent from
    /// the visibility data. Such a prior is seeded as unassigned.
    pub fn unresolved_prior(&self, demand: usize) -> Option<&str> {
        self.unresolved_priors.get(demand)?.as_deref()
    }

    /// Output label for a row's prior. At step 0 an unresolved roster prior
    /// keeps the satellite name the roster gave.
    pub fn prior_label<'a>(
        &'a self,
        row: &LedgerRow,
        demand: usize,
        resources: &'a ResourceIndex,
    ) -> &'a str {
        match self.unresolved_prior(demand) {
            Some(name) if row.step == 0 => name,
            _ => row.prior.label(resources),
        }
    }
}

fn resolve_prior(demand: DemandId, prior: &Prior, resources: &ResourceIndex) -> Assignment {
    match prior {
        Prior::None => Assignment::Unassigned,
        Prior::Failed => Assignment::Failed,
        Prior::Satellite(name) => match resources.get(name) {
            Some(id) => Assignment::Resource(id),
            None => {
                warn!(
                    user_area = demand,
                    satellite = %name,
                    "prior satellite never appears in the visibility data; treating as unassigned"
                );
                Assignment::Unassigned
            }
        },
    }
}
