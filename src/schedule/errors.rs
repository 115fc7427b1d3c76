use thiserror::Error;

use crate::units::Step;

/// Errors raised when a step is committed to a [`ScheduleLedger`](super::ScheduleLedger)
/// out of order or with the wrong shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Step {found} committed while step {expected} is open")]
    StepOutOfOrder { expected: Step, found: Step },

    #[error("Step {0} is beyond the schedule horizon")]
    BeyondHorizon(Step),

    #[error("Step {step} committed with {found} rows, expected {expected}")]
    RowCountMismatch {
        step: Step,
        expected: usize,
        found: usize,
    },
}
