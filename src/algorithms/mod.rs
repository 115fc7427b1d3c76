pub mod error;
pub mod greedy;

pub use error::AllocationError;
pub use greedy::{GreedyAllocator, RunLengthScorer};

use crate::availability::AvailabilityMatrix;
use crate::roster::Roster;
use crate::schedule::ScheduleLedger;

/// Algorithm that turns an availability matrix into a full schedule.
pub trait AllocationAlgorithm {
    /// Allocates satellites to every user area for every step of the matrix.
    ///
    /// # Arguments
    ///
    /// * `matrix` - Visibility of each satellite from each user area per step
    /// * `roster` - User areas in priority order, with their state at schedule start
    ///
    /// # Returns
    ///
    /// A complete [`ScheduleLedger`], or an [`AllocationError`] if an internal
    /// invariant was broken.
    fn allocate(
        &self,
        matrix: &AvailabilityMatrix,
        roster: &Roster,
    ) -> Result<ScheduleLedger, AllocationError>;
}
