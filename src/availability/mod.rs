//! Dense (step, user area, satellite) visibility grid.
//!
//! The [`AvailabilityMatrix`] is built once by [`MatrixBuilder`] from an
//! [`EventTable`](crate::events::EventTable) and is read-only afterwards. The
//! allocator takes a per-step [`StepAvailability`] working copy when it needs to
//! withdraw satellites that have already been handed out at that step.
//!
//! # Layout
//!
//! Cells are stored in one contiguous buffer, step-major, then user area, then
//! satellite, which keeps a whole step row contiguous for the carry-forward copy
//! during construction and for the working copy during allocation.

mod builder;
mod error;
mod index;

#[cfg(test)]
mod tests;

pub use builder::MatrixBuilder;
pub use error::MatrixError;
pub use index::{ResourceId, ResourceIndex};

use crate::units::Step;

/// Visibility of one satellite from one user area at one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Nothing observed or backfilled yet. Treated as unavailable.
    #[default]
    Unknown,
    Unavailable,
    Available,
}

impl Cell {
    pub fn is_available(self) -> bool {
        matches!(self, Cell::Available)
    }

    pub fn is_known(self) -> bool {
        !matches!(self, Cell::Unknown)
    }
}

/// Read-only satellite visibility grid indexed by (step, user area, satellite).
///
/// User areas are addressed by roster position; satellites by [`ResourceId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityMatrix {
    steps: Step,
    demands: usize,
    resources: ResourceIndex,
    cells: Vec<Cell>,
}

impl AvailabilityMatrix {
    pub(crate) fn from_parts(
        steps: Step,
        demands: usize,
        resources: ResourceIndex,
        cells: Vec<Cell>,
    ) -> Self {
        debug_assert_eq!(cells.len(), steps * demands * resources.len());
        Self {
            steps,
            demands,
            resources,
            cells,
        }
    }

    /// Number of steps in the horizon.
    pub fn steps(&self) -> Step {
        self.steps
    }

    /// Number of user areas.
    pub fn demands(&self) -> usize {
        self.demands
    }

    pub fn resources(&self) -> &ResourceIndex {
        &self.resources
    }

    fn offset(&self, step: Step, demand: usize, resource: ResourceId) -> usize {
        (step * self.demands + demand) * self.resources.len() + resource.index()
    }

    /// Returns the cell, or `None` outside the grid.
    pub fn get(&self, step: Step, demand: usize, resource: ResourceId) -> Option<Cell> {
        if step >= self.steps || demand >= self.demands || resource.index() >= self.resources.len()
        {
            return None;
        }
        Some(self.cells[self.offset(step, demand, resource)])
    }

    /// True if the satellite is known to be in view. Unknown and out-of-range
    /// cells are unavailable.
    pub fn is_available(&self, step: Step, demand: usize, resource: ResourceId) -> bool {
        self.get(step, demand, resource)
            .is_some_and(Cell::is_available)
    }

    /// The satellite cells for one user area at one step. Empty outside the grid.
    pub fn row(&self, step: Step, demand: usize) -> &[Cell] {
        if step >= self.steps || demand >= self.demands {
            return &[];
        }
        let start = self.offset(step, demand, ResourceId(0));
        &self.cells[start..start + self.resources.len()]
    }

    /// Satellites in view of `demand` at `step`, ascending by id.
    pub fn available_resources(
        &self,
        step: Step,
        demand: usize,
    ) -> impl Iterator<Item = ResourceId> + '_ {
        self.row(step, demand)
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_available())
            .map(|(i, _)| ResourceId(i as u32))
    }

    /// Number of satellites in view of `demand` at `step`.
    ///
    /// Diagnostic only; the allocator never consults it.
    pub fn available_count(&self, step: Step, demand: usize) -> usize {
        self.row(step, demand)
            .iter()
            .filter(|cell| cell.is_available())
            .count()
    }

    /// The full history of one (user area, satellite) column. Empty outside the grid.
    pub fn column(&self, demand: usize, resource: ResourceId) -> impl Iterator<Item = Cell> + '_ {
        let steps = if demand < self.demands && resource.index() < self.resources.len() {
            self.steps
        } else {
            0
        };
        (0..steps).map(move |step| self.cells[self.offset(step, demand, resource)])
    }

    /// Working copy of one step for in-step exclusivity bookkeeping.
    ///
    /// # Panics
    ///
    /// Panics if `step` is not below [`steps`](Self::steps).
    pub fn step_view(&self, step: Step) -> StepAvailability {
        assert!(
            step < self.steps,
            "step {step} outside a {}-step matrix",
            self.steps
        );
        let width = self.demands * self.resources.len();
        let start = step * width;
        StepAvailability {
            step,
            demands: self.demands,
            resources: self.resources.len(),
            cells: self.cells[start..start + width]
                .iter()
                .map(|cell| cell.is_available())
                .collect(),
        }
    }
}

/// Mutable copy of one matrix step.
///
/// Satellites claimed by a user area are withdrawn from every other user area;
/// the persisted matrix is never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepAvailability {
    step: Step,
    demands: usize,
    resources: usize,
    cells: Vec<bool>,
}

impl StepAvailability {
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_available(&self, demand: usize, resource: ResourceId) -> bool {
        demand < self.demands
            && resource.index() < self.resources
            && self.cells[demand * self.resources + resource.index()]
    }

    /// Satellites still available to `demand`, ascending by id. Empty for an
    /// unknown user area.
    pub fn available(&self, demand: usize) -> Vec<ResourceId> {
        if demand >= self.demands {
            return Vec::new();
        }
        let start = demand * self.resources;
        self.cells[start..start + self.resources]
            .iter()
            .enumerate()
            .filter(|(_, available)| **available)
            .map(|(i, _)| ResourceId(i as u32))
            .collect()
    }

    /// Gives `resource` to `demand` for this step.
    ///
    /// # Panics
    ///
    /// Panics if `demand` or `resource` is outside the step.
    pub fn claim(&mut self, demand: usize, resource: ResourceId) {
        let column = resource.index();
        assert!(
            demand < self.demands && column < self.resources,
            "claim of {resource} by user area {demand} outside the step"
        );
        for d in 0..self.demands {
            self.cells[d * self.resources + column] = false;
        }
        self.cells[demand * self.resources + column] = true;
    }
}
