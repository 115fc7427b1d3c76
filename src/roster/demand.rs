use crate::units::Step;

use super::DemandId;

/// Assignment a user area held when the previous schedule ended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prior {
    /// No satellite was allocated.
    #[default]
    None,
    /// The previous schedule ended in an outage.
    Failed,
    /// The named satellite was serving the user area.
    Satellite(String),
}

/// A fixed-location consumer of coverage (user area).
///
/// The id doubles as the priority rank: lower ids are served first at every step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandPoint {
    id: DemandId,
    name: String,
    prior: Prior,
    handover: Option<Step>,
}

impl DemandPoint {
    /// Creates a user area with no prior assignment and no handover marker.
    pub fn new(id: DemandId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            prior: Prior::None,
            handover: None,
        }
    }

    pub fn with_prior(mut self, prior: Prior) -> Self {
        self.prior = prior;
        self
    }

    /// Sets the handover marker the ledger rows for this user area are seeded with.
    pub fn with_handover(mut self, handover: Option<Step>) -> Self {
        self.handover = handover;
        self
    }

    pub fn id(&self) -> DemandId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prior(&self) -> &Prior {
        &self.prior
    }

    pub fn handover(&self) -> Option<Step> {
        self.handover
    }
}
