//! Seeded random constellation scenarios.
//!
//! Generates a roster and a stream of alternating rising/setting passes for every
//! (user area, satellite) pair. Used by the demo and by randomized invariant tests.

use rand::Rng;

use crate::events::{EventTable, Transition, VisibilityEvent};
use crate::roster::{DemandPoint, Roster, RosterError};
use crate::units::Step;

/// Shape of a generated scenario.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    /// Number of user areas.
    pub demands: usize,
    /// Number of satellites.
    pub satellites: usize,
    /// Horizon length in steps.
    pub horizon: Step,
    /// Shortest pass (steps in view).
    pub min_pass: Step,
    /// Longest pass (steps in view).
    pub max_pass: Step,
    /// Longest gap between passes.
    pub max_gap: Step,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            demands: 4,
            satellites: 6,
            horizon: 240,
            min_pass: 10,
            max_pass: 60,
            max_gap: 40,
        }
    }
}

/// A generated roster with its visibility events.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub roster: Roster,
    pub events: EventTable,
    pub horizon: Step,
}

/// Satellite name used by generated scenarios, e.g. `S03`.
pub fn satellite_name(index: usize) -> String {
    format!("S{index:02}")
}

/// Generates a scenario.
///
/// User areas are numbered from 0 and start unassigned. Pass and gap bounds
/// below one step are raised to one.
pub fn generate<R: Rng>(params: &ScenarioParams, rng: &mut R) -> Result<Scenario, RosterError> {
    let roster = Roster::new(
        (0..params.demands)
            .map(|i| DemandPoint::new(i as u32, format!("UA{i}")))
            .collect(),
    )?;

    let min_pass = params.min_pass.max(1);
    let max_pass = params.max_pass.max(min_pass);
    let max_gap = params.max_gap.max(1);

    let mut events = Vec::new();
    for demand in roster.iter() {
        for sat in 0..params.satellites {
            let name = satellite_name(sat);
            let mut visible = rng.gen_bool(0.5);
            let mut step = rng.gen_range(0..max_gap);

            while step < params.horizon {
                let transition = if visible {
                    Transition::Setting
                } else {
                    Transition::Rising
                };
                events.push(VisibilityEvent::new(step, name.clone(), demand.id(), transition));
                visible = !visible;
                step += if visible {
                    rng.gen_range(min_pass..=max_pass)
                } else {
                    rng.gen_range(1..=max_gap)
                };
            }
        }
    }

    Ok(Scenario {
        roster,
        events: EventTable::from_events(events),
        horizon: params.horizon,
    })
}
