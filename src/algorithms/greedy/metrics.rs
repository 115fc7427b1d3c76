//! Forward look-ahead scoring of candidate satellites.

use crate::availability::{AvailabilityMatrix, ResourceId};
use crate::units::Step;

use super::candidate::Candidate;
use super::ordering::compare_candidates;

/// Number of consecutive steps, from `start` inclusive, for which `resource`
/// is in view of `demand`. Stops at the first unavailable step or the horizon.
pub fn run_length(
    matrix: &AvailabilityMatrix,
    start: Step,
    demand: usize,
    resource: ResourceId,
) -> Step {
    (start..matrix.steps())
        .take_while(|&step| matrix.is_available(step, demand, resource))
        .count()
}

/// Scores candidate satellites for one user area against the persisted matrix.
///
/// Read-only: scoring never touches the matrix or the ledger, and the in-step
/// exclusivity working copy is not consulted.
#[derive(Debug, Clone, Copy)]
pub struct RunLengthScorer<'m> {
    matrix: &'m AvailabilityMatrix,
}

impl<'m> RunLengthScorer<'m> {
    pub fn new(matrix: &'m AvailabilityMatrix) -> Self {
        Self { matrix }
    }

    /// Scores every candidate, best first (longest run, then ascending name).
    ///
    /// The result does not depend on the order of `candidates`.
    pub fn score(
        &self,
        start: Step,
        demand: usize,
        candidates: &[ResourceId],
    ) -> Vec<Candidate<'m>> {
        let resources = self.matrix.resources();
        let mut scored: Vec<Candidate<'m>> = candidates
            .iter()
            .map(|&resource| {
                Candidate::new(
                    resource,
                    resources.name(resource),
                    run_length(self.matrix, start, demand, resource),
                )
            })
            .collect();
        scored.sort_by(compare_candidates);
        scored
    }

    /// The winning candidate, or `None` when there are no candidates.
    pub fn best(
        &self,
        start: Step,
        demand: usize,
        candidates: &[ResourceId],
    ) -> Option<Candidate<'m>> {
        self.score(start, demand, candidates).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::MatrixBuilder;
    use crate::events::{EventTable, Transition, VisibilityEvent};
    use crate::roster::{DemandPoint, Roster};

    fn matrix(events: Vec<VisibilityEvent>, horizon: Step) -> AvailabilityMatrix {
        let roster = Roster::new(vec![DemandPoint::new(0, "London")]).unwrap();
        MatrixBuilder::new(&roster, horizon)
            .build(&EventTable::from_events(events))
            .unwrap()
    }

    fn pass(sat: &str, rise: Step, set: Step) -> Vec<VisibilityEvent> {
        vec![
            VisibilityEvent::new(rise, sat, 0, Transition::Rising),
            VisibilityEvent::new(set, sat, 0, Transition::Setting),
        ]
    }

    #[test]
    fn run_length_counts_from_start_inclusive() {
        let m = matrix(pass("X", 2, 6), 10);
        let x = m.resources().get("X").unwrap();
        assert_eq!(run_length(&m, 2, 0, x), 4);
        assert_eq!(run_length(&m, 4, 0, x), 2);
        assert_eq!(run_length(&m, 0, 0, x), 0);
        assert_eq!(run_length(&m, 7, 0, x), 0);
    }

    #[test]
    fn run_length_stops_at_horizon() {
        let m = matrix(vec![VisibilityEvent::new(1, "X", 0, Transition::Rising)], 5);
        let x = m.resources().get("X").unwrap();
        assert_eq!(run_length(&m, 1, 0, x), 4);
        assert_eq!(run_length(&m, 5, 0, x), 0);
    }

    #[test]
    fn best_prefers_longest_run() {
        let mut events = pass("X", 0, 4);
        events.extend(pass("Y", 0, 2));
        let m = matrix(events, 6);
        let x = m.resources().get("X").unwrap();
        let y = m.resources().get("Y").unwrap();

        let best = RunLengthScorer::new(&m).best(0, 0, &[y, x]).unwrap();
        assert_eq!(best.name(), "X");
        assert_eq!(best.run_length(), 4);
    }

    #[test]
    fn ties_resolve_to_smaller_name_regardless_of_input_order() {
        let mut events = pass("S12", 0, 3);
        events.extend(pass("S11", 0, 3));
        let m = matrix(events, 6);
        let s11 = m.resources().get("S11").unwrap();
        let s12 = m.resources().get("S12").unwrap();
        let scorer = RunLengthScorer::new(&m);

        assert_eq!(scorer.best(0, 0, &[s12, s11]).unwrap().name(), "S11");
        assert_eq!(scorer.best(0, 0, &[s11, s12]).unwrap().name(), "S11");
    }

    #[test]
    fn score_lists_every_candidate_best_first() {
        let mut events = pass("A", 0, 1);
        events.extend(pass("B", 0, 5));
        events.extend(pass("C", 0, 3));
        let m = matrix(events, 6);
        let ids: Vec<_> = m.resources().ids().collect();

        let names: Vec<_> = RunLengthScorer::new(&m)
            .score(0, 0, &ids)
            .iter()
            .map(|c| (c.name(), c.run_length()))
            .collect();
        assert_eq!(names, vec![("B", 5), ("C", 3), ("A", 1)]);
    }

    #[test]
    fn no_candidates_has_no_winner() {
        let m = matrix(pass("X", 0, 1), 2);
        assert!(RunLengthScorer::new(&m).best(0, 0, &[]).is_none());
    }
}
