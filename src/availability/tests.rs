//! Test suite for matrix construction.

use super::*;
use crate::events::{EventTable, Transition, VisibilityEvent};
use crate::roster::{DemandPoint, Roster};

fn roster(n: u32) -> Roster {
    Roster::new((0..n).map(|i| DemandPoint::new(i, format!("UA{i}"))).collect()).unwrap()
}

fn ev(step: Step, sat: &str, demand: u32, transition: Transition) -> VisibilityEvent {
    VisibilityEvent::new(step, sat, demand, transition)
}

fn column(matrix: &AvailabilityMatrix, demand: usize, sat: &str) -> Vec<Cell> {
    let id = matrix.resources().get(sat).unwrap();
    matrix.column(demand, id).collect()
}

#[cfg(test)]
mod backfill {
    use super::*;

    #[test]
    fn setting_backfills_available() {
        let roster = roster(1);
        let events = EventTable::from_events(vec![ev(10, "A", 0, Transition::Setting)]);
        let matrix = MatrixBuilder::new(&roster, 15).build(&events).unwrap();

        let cells = column(&matrix, 0, "A");
        assert!(cells[..10].iter().all(|c| *c == Cell::Available));
        assert_eq!(cells[10], Cell::Unavailable);

        let id = matrix.resources().get("A").unwrap();
        for step in 11..15 {
            assert!(!matrix.is_available(step, 0, id));
        }
    }

    #[test]
    fn rising_backfills_unavailable() {
        let roster = roster(1);
        let events = EventTable::from_events(vec![ev(10, "A", 0, Transition::Rising)]);
        let matrix = MatrixBuilder::new(&roster, 15).build(&events).unwrap();

        let cells = column(&matrix, 0, "A");
        assert!(cells[..10].iter().all(|c| *c == Cell::Unavailable));
        assert!(cells[10..].iter().all(|c| *c == Cell::Available));
    }

    #[test]
    fn backfill_stops_at_first_known_cell() {
        let roster = roster(1);
        let events = EventTable::from_events(vec![
            ev(3, "A", 0, Transition::Rising),
            ev(8, "A", 0, Transition::Setting),
        ]);
        let matrix = MatrixBuilder::new(&roster, 10).build(&events).unwrap();

        let available: Vec<bool> = column(&matrix, 0, "A")
            .into_iter()
            .map(Cell::is_available)
            .collect();
        assert_eq!(
            available,
            vec![false, false, false, true, true, true, true, true, false, false]
        );
    }

    #[test]
    fn disabled_backfill_leaves_prefix_unknown() {
        let roster = roster(1);
        let events = EventTable::from_events(vec![ev(4, "A", 0, Transition::Setting)]);
        let matrix = MatrixBuilder::new(&roster, 6)
            .with_backfill(false)
            .build(&events)
            .unwrap();

        let cells = column(&matrix, 0, "A");
        assert!(cells[..4].iter().all(|c| *c == Cell::Unknown));
        assert_eq!(cells[4], Cell::Unavailable);
        assert_eq!(cells[5], Cell::Unavailable);
    }

    #[test]
    fn backfill_is_per_column() {
        let roster = roster(2);
        let events = EventTable::from_events(vec![
            ev(5, "A", 0, Transition::Setting),
            ev(2, "B", 1, Transition::Rising),
        ]);
        let matrix = MatrixBuilder::new(&roster, 6).build(&events).unwrap();

        assert!(column(&matrix, 1, "A").iter().all(|c| *c == Cell::Unknown));
        assert!(column(&matrix, 0, "B").iter().all(|c| *c == Cell::Unknown));
        assert_eq!(column(&matrix, 1, "B")[0], Cell::Unavailable);
        assert_eq!(column(&matrix, 0, "A")[0], Cell::Available);
    }
}

#[cfg(test)]
mod replay {
    use super::*;

    #[test]
    fn values_carry_forward_between_events() {
        let roster = roster(1);
        let events = EventTable::from_events(vec![
            ev(0, "A", 0, Transition::Rising),
            ev(4, "A", 0, Transition::Setting),
            ev(6, "A", 0, Transition::Rising),
        ]);
        let matrix = MatrixBuilder::new(&roster, 8).build(&events).unwrap();
        let id = matrix.resources().get("A").unwrap();

        let available: Vec<bool> = (0..8).map(|s| matrix.is_available(s, 0, id)).collect();
        assert_eq!(
            available,
            vec![true, true, true, true, false, false, true, true]
        );
    }

    #[test]
    fn later_event_at_same_step_wins() {
        let roster = roster(1);
        let events = EventTable::from_events(vec![
            ev(2, "A", 0, Transition::Rising),
            ev(2, "A", 0, Transition::Setting),
        ]);
        let matrix = MatrixBuilder::new(&roster, 4).build(&events).unwrap();
        assert_eq!(column(&matrix, 0, "A")[2], Cell::Unavailable);
    }

    #[test]
    fn events_beyond_horizon_are_ignored() {
        let roster = roster(1);
        let events = EventTable::from_events(vec![
            ev(1, "A", 0, Transition::Rising),
            ev(50, "A", 0, Transition::Setting),
        ]);
        let matrix = MatrixBuilder::new(&roster, 5).build(&events).unwrap();
        let id = matrix.resources().get("A").unwrap();
        assert!((1..5).all(|s| matrix.is_available(s, 0, id)));
        assert!(!matrix.is_available(0, 0, id));
    }

    #[test]
    fn resources_are_indexed_by_name() {
        let roster = roster(1);
        let events = EventTable::from_events(vec![
            ev(0, "S21", 0, Transition::Rising),
            ev(0, "S11", 0, Transition::Rising),
        ]);
        let matrix = MatrixBuilder::new(&roster, 1).build(&events).unwrap();
        let names: Vec<_> = matrix.resources().iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["S11", "S21"]);
    }
}

#[cfg(test)]
mod queries {
    use super::*;

    fn two_by_two() -> AvailabilityMatrix {
        let roster = roster(2);
        let events = EventTable::from_events(vec![
            ev(0, "A", 0, Transition::Rising),
            ev(0, "B", 0, Transition::Rising),
            ev(0, "A", 1, Transition::Rising),
            ev(2, "B", 0, Transition::Setting),
        ]);
        MatrixBuilder::new(&roster, 3).build(&events).unwrap()
    }

    #[test]
    fn available_count_per_demand() {
        let matrix = two_by_two();
        assert_eq!(matrix.available_count(0, 0), 2);
        assert_eq!(matrix.available_count(0, 1), 1);
        assert_eq!(matrix.available_count(2, 0), 1);
    }

    #[test]
    fn available_resources_ascending() {
        let matrix = two_by_two();
        let a = matrix.resources().get("A").unwrap();
        let b = matrix.resources().get("B").unwrap();
        assert_eq!(matrix.available_resources(1, 0).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(matrix.available_resources(2, 0).collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn out_of_range_is_unavailable() {
        let matrix = two_by_two();
        let a = matrix.resources().get("A").unwrap();
        assert_eq!(matrix.get(3, 0, a), None);
        assert!(!matrix.is_available(3, 0, a));
        assert!(!matrix.is_available(0, 5, a));
    }

    #[test]
    fn out_of_range_rows_and_columns_are_empty() {
        let matrix = two_by_two();
        let b = matrix.resources().get("B").unwrap();
        assert!(matrix.row(0, 2).is_empty());
        assert!(matrix.row(3, 0).is_empty());
        assert_eq!(matrix.column(2, b).count(), 0);
        assert_eq!(matrix.column(0, ResourceId(2)).count(), 0);
        assert_eq!(matrix.available_count(0, 2), 0);
        assert!(matrix.step_view(0).available(2).is_empty());
    }

    #[test]
    #[should_panic(expected = "outside a 3-step matrix")]
    fn step_view_past_the_horizon_panics() {
        two_by_two().step_view(3);
    }

    #[test]
    #[should_panic(expected = "outside the step")]
    fn claim_of_unknown_resource_panics() {
        two_by_two().step_view(0).claim(0, ResourceId(2));
    }

    #[test]
    fn step_view_claim_is_local_to_the_copy() {
        let matrix = two_by_two();
        let a = matrix.resources().get("A").unwrap();
        let mut view = matrix.step_view(0);

        view.claim(0, a);
        assert!(view.is_available(0, a));
        assert!(!view.is_available(1, a));
        assert!(view.available(1).is_empty());

        assert!(matrix.is_available(0, 1, a));
    }
}

#[cfg(test)]
mod errors {
    use super::*;

    #[test]
    fn zero_horizon_is_rejected() {
        let roster = roster(1);
        let result = MatrixBuilder::new(&roster, 0).build(&EventTable::new());
        assert_eq!(result, Err(MatrixError::EmptyHorizon));
    }

    #[test]
    fn unknown_demand_is_rejected() {
        let roster = roster(1);
        let events = EventTable::from_events(vec![ev(0, "A", 7, Transition::Rising)]);
        let result = MatrixBuilder::new(&roster, 3).build(&events);
        assert_eq!(result, Err(MatrixError::UnknownDemand { step: 0, demand: 7 }));
    }

    #[test]
    fn no_events_gives_an_empty_resource_axis() {
        let roster = roster(2);
        let matrix = MatrixBuilder::new(&roster, 3).build(&EventTable::new()).unwrap();
        assert!(matrix.resources().is_empty());
        assert_eq!(matrix.available_count(0, 1), 0);
    }
}
