//! Satellite candidate with its look-ahead score.

use crate::availability::ResourceId;
use crate::units::Step;

/// A satellite that could be handed to a user area, scored by how long it
/// stays in view from the current step onward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub(crate) resource: ResourceId,
    pub(crate) name: &'a str,
    pub(crate) run_length: Step,
}

impl<'a> Candidate<'a> {
    pub fn new(resource: ResourceId, name: &'a str, run_length: Step) -> Self {
        Self {
            resource,
            name,
            run_length,
        }
    }

    pub fn resource(&self) -> ResourceId {
        self.resource
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Consecutive steps in view, starting at (and including) the scoring step.
    pub fn run_length(&self) -> Step {
        self.run_length
    }
}
