//! Replays visibility events into an [`AvailabilityMatrix`].

use tracing::{debug, info, warn};

use super::{AvailabilityMatrix, Cell, MatrixError, ResourceId, ResourceIndex};
use crate::events::{EventTable, VisibilityEvent};
use crate::roster::Roster;
use crate::units::Step;

/// Builds the availability matrix for a roster over a fixed horizon.
///
/// Steps are replayed in order. Each step starts as a copy of the previous one,
/// so a satellite stays in view until a setting event says otherwise. With
/// backfill enabled, every transition also fills the never-observed cells that
/// precede it in its (user area, satellite) column: with `1` before a setting
/// (the satellite was already in view) and with `0` before a rising.
#[derive(Debug, Clone)]
pub struct MatrixBuilder<'a> {
    roster: &'a Roster,
    horizon: Step,
    backfill: bool,
}

impl<'a> MatrixBuilder<'a> {
    /// Creates a builder with backfill enabled.
    pub fn new(roster: &'a Roster, horizon: Step) -> Self {
        Self {
            roster,
            horizon,
            backfill: true,
        }
    }

    pub fn with_backfill(mut self, backfill: bool) -> Self {
        self.backfill = backfill;
        self
    }

    /// Builds the matrix.
    ///
    /// Events at or beyond the horizon are ignored. Every event must name a user
    /// area present in the roster.
    pub fn build(&self, events: &EventTable) -> Result<AvailabilityMatrix, MatrixError> {
        if self.horizon == 0 {
            return Err(MatrixError::EmptyHorizon);
        }
        if self.roster.is_empty() {
            return Err(MatrixError::EmptyRoster);
        }

        for event in events.iter() {
            if self.roster.position(event.demand).is_none() {
                return Err(MatrixError::UnknownDemand {
                    step: event.step,
                    demand: event.demand,
                });
            }
        }

        let resources = ResourceIndex::from_names(events.resource_names());
        let demands = self.roster.len();
        let row_width = demands * resources.len();
        let mut grid = Grid {
            cells: vec![Cell::Unknown; self.horizon * row_width],
            demands,
            resources: resources.len(),
        };

        let mut backfilled = 0usize;
        for step in 0..self.horizon {
            if step > 0 {
                let previous = (step - 1) * row_width;
                grid.cells
                    .copy_within(previous..previous + row_width, step * row_width);
            }

            for event in events.at_step(step) {
                backfilled += self.apply(&mut grid, &resources, event)?;
            }
        }

        let ignored = events.count_from(self.horizon);
        if ignored > 0 {
            warn!(
                ignored,
                horizon = self.horizon,
                "visibility events beyond the schedule horizon were ignored"
            );
        }

        info!(
            steps = self.horizon,
            user_areas = demands,
            satellites = resources.len(),
            events = events.len() - ignored,
            backfilled,
            "availability matrix built"
        );

        Ok(AvailabilityMatrix::from_parts(
            self.horizon,
            demands,
            resources,
            grid.cells,
        ))
    }

    /// Writes one event and, when enabled, backfills its column.
    ///
    /// Returns the number of backfilled cells.
    fn apply(
        &self,
        grid: &mut Grid,
        resources: &ResourceIndex,
        event: &VisibilityEvent,
    ) -> Result<usize, MatrixError> {
        // Both lookups were validated in `build`.
        let (Some(demand), Some(resource)) = (
            self.roster.position(event.demand),
            resources.get(&event.resource),
        ) else {
            return Ok(0);
        };

        let at = grid.offset(event.step, demand, resource);
        grid.cells[at] = event.transition.cell();

        if !self.backfill {
            return Ok(0);
        }

        let fill = event.transition.backfill_cell();
        let mut filled = 0;
        let mut step = event.step;
        while step > 0 {
            step -= 1;
            let at = grid.offset(step, demand, resource);
            if grid.cells[at].is_known() {
                break;
            }
            fill_unknown(&mut grid.cells[at], fill).map_err(|()| {
                MatrixError::BackfillOverwrite {
                    step,
                    demand: event.demand,
                    resource: event.resource.clone(),
                }
            })?;
            filled += 1;
        }

        if filled > 0 {
            debug!(
                step = event.step,
                user_area = event.demand,
                satellite = %event.resource,
                transition = %event.transition,
                filled,
                "backfilled column"
            );
        }
        Ok(filled)
    }
}

/// Cell buffer under construction.
struct Grid {
    cells: Vec<Cell>,
    demands: usize,
    resources: usize,
}

impl Grid {
    fn offset(&self, step: Step, demand: usize, resource: ResourceId) -> usize {
        (step * self.demands + demand) * self.resources + resource.index()
    }
}

/// Writes `value` into an undefined cell; known cells are never overwritten.
fn fill_unknown(cell: &mut Cell, value: Cell) -> Result<(), ()> {
    debug_assert!(!cell.is_known(), "backfill reached a known cell");
    if cell.is_known() {
        return Err(());
    }
    *cell = value;
    Ok(())
}
