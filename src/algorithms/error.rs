use thiserror::Error;

use crate::roster::DemandId;
use crate::schedule::LedgerError;
use crate::units::Step;

/// Errors raised while allocating.
///
/// Apart from [`AllocationError::RosterMismatch`], these all indicate a defect in
/// the allocator rather than bad input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("Roster has {roster} user areas but the matrix was built for {matrix}")]
    RosterMismatch { roster: usize, matrix: usize },

    #[error("Satellite {resource} given to user areas {first} and {second} at step {step}")]
    DoubleBooking {
        step: Step,
        resource: String,
        first: DemandId,
        second: DemandId,
    },

    #[error("User area {demand} holds satellite {resource} at step {step} but it is not in view")]
    NotInView {
        step: Step,
        demand: DemandId,
        resource: String,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
