use crate::availability::{ResourceId, ResourceIndex};

/// Label written for a user area with no satellite.
pub const UNASSIGNED_LABEL: &str = "None";

/// Label written for the failure sentinel.
pub const FAILURE_LABEL: &str = "ERR";

/// What a user area holds at one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Assignment {
    /// No satellite and no outage recorded. Only seeded rows carry it.
    #[default]
    Unassigned,
    /// No satellite could be allocated at this step.
    Failed,
    /// The satellite serving the user area.
    Resource(ResourceId),
}

impl Assignment {
    pub fn is_failed(self) -> bool {
        matches!(self, Assignment::Failed)
    }

    pub fn resource(self) -> Option<ResourceId> {
        match self {
            Assignment::Resource(id) => Some(id),
            _ => None,
        }
    }

    /// Human-readable label: the satellite name or one of the sentinels.
    pub fn label<'a>(&self, resources: &'a ResourceIndex) -> &'a str {
        match self {
            Assignment::Unassigned => UNASSIGNED_LABEL,
            Assignment::Failed => FAILURE_LABEL,
            Assignment::Resource(id) => resources.name(*id),
        }
    }
}
