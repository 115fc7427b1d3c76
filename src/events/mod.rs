//! Time-ordered satellite visibility transitions.

use std::collections::BTreeSet;
use std::fmt;

use crate::availability::Cell;
use crate::roster::DemandId;
use crate::units::Step;

/// Direction of a visibility change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Transition {
    /// The satellite comes into view of the user area.
    Rising,
    /// The satellite drops out of view of the user area.
    Setting,
}

impl Transition {
    /// Cell value at the step of the transition.
    pub fn cell(self) -> Cell {
        match self {
            Transition::Rising => Cell::Available,
            Transition::Setting => Cell::Unavailable,
        }
    }

    /// Cell value implied for the steps before the transition.
    pub fn backfill_cell(self) -> Cell {
        match self {
            Transition::Rising => Cell::Unavailable,
            Transition::Setting => Cell::Available,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Rising => write!(f, "rising"),
            Transition::Setting => write!(f, "setting"),
        }
    }
}

/// One rising or setting of a satellite over a user area.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityEvent {
    pub step: Step,
    pub resource: String,
    pub demand: DemandId,
    pub transition: Transition,
}

impl VisibilityEvent {
    pub fn new(
        step: Step,
        resource: impl Into<String>,
        demand: DemandId,
        transition: Transition,
    ) -> Self {
        Self {
            step,
            resource: resource.into(),
            demand,
            transition,
        }
    }
}

/// Visibility events sorted by step.
///
/// Events that share a step keep their insertion order, which is the order the
/// matrix builder applies them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTable {
    events: Vec<VisibilityEvent>,
}

impl EventTable {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Builds a table from unordered events (stable sort by step).
    pub fn from_events(mut events: Vec<VisibilityEvent>) -> Self {
        events.sort_by_key(|e| e.step);
        Self { events }
    }

    /// Inserts an event after every event already recorded at the same step.
    pub fn push(&mut self, event: VisibilityEvent) {
        let at = self.events.partition_point(|e| e.step <= event.step);
        self.events.insert(at, event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisibilityEvent> + '_ {
        self.events.iter()
    }

    /// Events recorded at exactly `step`, in application order.
    pub fn at_step(&self, step: Step) -> &[VisibilityEvent] {
        let lo = self.events.partition_point(|e| e.step < step);
        let hi = self.events.partition_point(|e| e.step <= step);
        &self.events[lo..hi]
    }

    /// Number of events at or beyond `horizon`.
    pub fn count_from(&self, horizon: Step) -> usize {
        self.events.len() - self.events.partition_point(|e| e.step < horizon)
    }

    /// Distinct satellite names, ascending.
    pub fn resource_names(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|e| e.resource.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl Extend<VisibilityEvent> for EventTable {
    fn extend<I: IntoIterator<Item = VisibilityEvent>>(&mut self, iter: I) {
        self.events.extend(iter);
        self.events.sort_by_key(|e| e.step);
    }
}

impl FromIterator<VisibilityEvent> for EventTable {
    fn from_iter<I: IntoIterator<Item = VisibilityEvent>>(iter: I) -> Self {
        Self::from_events(iter.into_iter().collect())
    }
}
