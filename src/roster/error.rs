use thiserror::Error;

use super::DemandId;

/// Errors raised while assembling a [`Roster`](super::Roster).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Roster contains no user areas")]
    Empty,

    #[error("User area number already exists: {0}")]
    DuplicateId(DemandId),

    #[error("User area name already exists: {0}")]
    DuplicateName(String),
}
