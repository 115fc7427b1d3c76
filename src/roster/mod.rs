//! User areas and their state at schedule start.

mod demand;
mod error;

use std::collections::HashSet;

pub use demand::{DemandPoint, Prior};
pub use error::RosterError;

/// Stable user area number.
pub type DemandId = u32;

/// The user areas of a run, held in priority order (ascending id).
///
/// A user area's position in the roster is the demand axis index used by the
/// availability matrix and the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    demands: Vec<DemandPoint>,
}

impl Roster {
    /// Builds a roster, sorting user areas by id.
    ///
    /// Requires at least one user area, unique ids and unique names.
    pub fn new(mut demands: Vec<DemandPoint>) -> Result<Self, RosterError> {
        if demands.is_empty() {
            return Err(RosterError::Empty);
        }

        demands.sort_by_key(DemandPoint::id);

        let mut names = HashSet::with_capacity(demands.len());
        for pair in demands.windows(2) {
            if pair[0].id() == pair[1].id() {
                return Err(RosterError::DuplicateId(pair[1].id()));
            }
        }
        for demand in &demands {
            if !names.insert(demand.name()) {
                return Err(RosterError::DuplicateName(demand.name().to_string()));
            }
        }

        Ok(Self { demands })
    }

    pub fn len(&self) -> usize {
        self.demands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demands.is_empty()
    }

    /// Returns the user area at a demand axis position.
    pub fn get(&self, position: usize) -> Option<&DemandPoint> {
        self.demands.get(position)
    }

    /// Demand axis position of the user area with `id`.
    pub fn position(&self, id: DemandId) -> Option<usize> {
        self.demands.binary_search_by_key(&id, DemandPoint::id).ok()
    }

    /// Demand axis position of the user area called `name`.
    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.demands.iter().position(|d| d.name() == name)
    }

    /// Iterates over user areas in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &DemandPoint> + '_ {
        self.demands.iter()
    }
}
