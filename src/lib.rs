//! satsched - Satellite-to-user-area scheduling
//!
//! Builds a minute-by-minute satellite visibility matrix from rising/setting
//! events and allocates at most one satellite to every user area at every step,
//! preferring continuity and, on handover, the satellite that stays in view
//! longest.

pub mod algorithms;
pub mod availability;
pub mod config;
pub mod events;
#[cfg(feature = "io")]
pub mod io;
pub mod report;
pub mod roster;
pub mod schedule;
pub mod synthetic;
pub mod units;

pub use algorithms::{AllocationAlgorithm, AllocationError, GreedyAllocator};
pub use availability::{AvailabilityMatrix, MatrixBuilder, MatrixError};
pub use config::{HandoverMarking, SchedulerConfig};
pub use events::{EventTable, Transition, VisibilityEvent};
pub use report::ScheduleReport;
pub use roster::{DemandPoint, Prior, Roster};
pub use schedule::{Assignment, LedgerRow, ScheduleLedger};

// Re-export unit conversion traits for ergonomic use
pub use units::{convert, SameDim};

/// Identifier type used for exported schedule artifacts.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
