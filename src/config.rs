//! Configuration for matrix construction and allocation.

use std::fmt;
use std::str::FromStr;

use qtty::{Minute, Quantity};

use crate::units::{to_steps, Step};

/// How the handover marker is written when a user area starves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum HandoverMarking {
    /// A marker is present only on rows where the assignment changed to a real
    /// satellite. Continuity and failure rows never carry one.
    #[default]
    Consistent,
    /// Failure rows keep whatever marker the row was seeded with, except when the
    /// previous step had failed too, in which case the marker is cleared.
    Reference,
}

impl fmt::Display for HandoverMarking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandoverMarking::Consistent => write!(f, "consistent"),
            HandoverMarking::Reference => write!(f, "reference"),
        }
    }
}

impl FromStr for HandoverMarking {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consistent" => Ok(HandoverMarking::Consistent),
            "reference" => Ok(HandoverMarking::Reference),
            other => Err(format!(
                "unknown handover marking '{other}' (expected 'consistent' or 'reference')"
            )),
        }
    }
}

/// Scheduler configuration.
///
/// Controls how sparse visibility events are expanded into the availability
/// matrix and how the allocator records handovers.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Propagate the first observed transition of each (UA, satellite) column
    /// back to the schedule start.
    pub backfill: bool,
    /// Time a handover takes. Carried for handover locking; the allocator does
    /// not consult it.
    pub handover_duration: Quantity<Minute>,
    /// Handover marker policy for starvation rows.
    pub handover_marking: HandoverMarking,
}

impl SchedulerConfig {
    /// Handover duration expressed in whole schedule steps.
    pub fn handover_steps(&self) -> Step {
        to_steps(self.handover_duration)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            backfill: true,
            handover_duration: Quantity::new(1.0),
            handover_marking: HandoverMarking::default(),
        }
    }
}
