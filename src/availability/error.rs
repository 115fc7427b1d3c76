use thiserror::Error;

use crate::roster::DemandId;
use crate::units::Step;

/// Errors raised while building an availability matrix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Schedule horizon must span at least one step")]
    EmptyHorizon,

    #[error("Cannot build a matrix for an empty roster")]
    EmptyRoster,

    #[error("Event at step {step} refers to unknown user area {demand}")]
    UnknownDemand { step: Step, demand: DemandId },

    #[error(
        "Backfill tried to overwrite a known cell at step {step} (user area {demand}, satellite {resource})"
    )]
    BackfillOverwrite {
        step: Step,
        demand: DemandId,
        resource: String,
    },
}
