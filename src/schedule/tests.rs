//! Test suite for the schedule ledger.

use super::*;
use crate::roster::DemandPoint;

fn resources() -> ResourceIndex {
    ResourceIndex::from_names(["S11", "S12"])
}

fn roster() -> Roster {
    Roster::new(vec![
        DemandPoint::new(0, "London").with_prior(Prior::Satellite("S11".to_string())),
        DemandPoint::new(1, "Paris")
            .with_prior(Prior::Failed)
            .with_handover(Some(7)),
    ])
    .unwrap()
}

fn assign(rows: &[LedgerRow], assignments: &[Assignment]) -> Vec<LedgerRow> {
    rows.iter()
        .zip(assignments)
        .map(|(row, a)| LedgerRow {
            assigned: *a,
            ..row.clone()
        })
        .collect()
}

#[cfg(test)]
mod seeding {
    use super::*;

    #[test]
    fn step_zero_is_seeded_from_roster() {
        let index = resources();
        let ledger = ScheduleLedger::new(&roster(), &index, 3);
        let rows = ledger.pending(0).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].prior, Assignment::Resource(index.get("S11").unwrap()));
        assert_eq!(rows[0].handover, None);
        assert_eq!(rows[1].prior, Assignment::Failed);
        assert_eq!(rows[1].handover, Some(7));
        assert!(rows.iter().all(|r| r.assigned == Assignment::Unassigned));
        assert!(rows.iter().all(|r| r.locked_until.is_none()));
    }

    #[test]
    fn unknown_prior_satellite_seeds_unassigned() {
        let roster = Roster::new(vec![
            DemandPoint::new(0, "London").with_prior(Prior::Satellite("S99".to_string()))
        ])
        .unwrap();
        let ledger = ScheduleLedger::new(&roster, &resources(), 1);
        assert_eq!(ledger.pending(0).unwrap()[0].prior, Assignment::Unassigned);
        assert_eq!(ledger.unresolved_prior(0), Some("S99"));
    }

    #[test]
    fn unknown_prior_keeps_its_name_for_output() {
        let index = resources();
        let roster = Roster::new(vec![
            DemandPoint::new(0, "London").with_prior(Prior::Satellite("S99".to_string()))
        ])
        .unwrap();
        let mut ledger = ScheduleLedger::new(&roster, &index, 2);
        for step in 0..2 {
            let rows = assign(ledger.pending(step).unwrap(), &[Assignment::Failed]);
            ledger.commit(step, rows).unwrap();
        }

        let first = ledger.row(0, 0).unwrap();
        let second = ledger.row(1, 0).unwrap();
        assert_eq!(ledger.prior_label(first, 0, &index), "S99");
        assert_eq!(ledger.prior_label(second, 0, &index), "ERR");
    }

    #[test]
    fn resolved_priors_have_no_stored_name() {
        let ledger = ScheduleLedger::new(&roster(), &resources(), 1);
        assert_eq!(ledger.unresolved_prior(0), None);
        assert_eq!(ledger.unresolved_prior(1), None);
        assert_eq!(ledger.unresolved_prior(5), None);
    }

    #[test]
    fn zero_horizon_has_nothing_open() {
        let ledger = ScheduleLedger::new(&roster(), &resources(), 0);
        assert_eq!(ledger.open_step(), None);
        assert!(ledger.is_complete());
        assert!(ledger.rows().is_empty());
    }
}

#[cfg(test)]
mod committing {
    use super::*;

    #[test]
    fn commit_carries_assignment_into_next_prior() {
        let index = resources();
        let s12 = Assignment::Resource(index.get("S12").unwrap());
        let mut ledger = ScheduleLedger::new(&roster(), &index, 3);

        let rows = assign(ledger.pending(0).unwrap(), &[s12, Assignment::Failed]);
        ledger.commit(0, rows).unwrap();

        let next = ledger.pending(1).unwrap();
        assert_eq!(next[0].prior, s12);
        assert_eq!(next[1].prior, Assignment::Failed);
        assert_eq!(next[0].step, 1);
        assert_eq!(next[0].assigned, Assignment::Unassigned);
    }

    #[test]
    fn next_step_is_reseeded_with_roster_markers() {
        let index = resources();
        let mut ledger = ScheduleLedger::new(&roster(), &index, 2);

        let mut rows = assign(ledger.pending(0).unwrap(), &[Assignment::Failed; 2]);
        rows[1].handover = None;
        ledger.commit(0, rows).unwrap();

        assert_eq!(ledger.pending(1).unwrap()[1].handover, Some(7));
        assert_eq!(ledger.row(0, 1).unwrap().handover, None);
    }

    #[test]
    fn out_of_order_commit_is_rejected() {
        let mut ledger = ScheduleLedger::new(&roster(), &resources(), 3);
        let rows = ledger.pending(0).unwrap().to_vec();
        assert_eq!(
            ledger.commit(1, rows),
            Err(LedgerError::StepOutOfOrder {
                expected: 0,
                found: 1
            })
        );
    }

    #[test]
    fn wrong_row_count_is_rejected() {
        let mut ledger = ScheduleLedger::new(&roster(), &resources(), 3);
        let rows = ledger.pending(0).unwrap()[..1].to_vec();
        assert_eq!(
            ledger.commit(0, rows),
            Err(LedgerError::RowCountMismatch {
                step: 0,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn commit_beyond_horizon_is_rejected() {
        let mut ledger = ScheduleLedger::new(&roster(), &resources(), 1);
        let rows = ledger.pending(0).unwrap().to_vec();
        ledger.commit(0, rows.clone()).unwrap();
        assert!(ledger.is_complete());
        assert_eq!(ledger.commit(1, rows), Err(LedgerError::BeyondHorizon(1)));
        assert_eq!(ledger.pending(1), Err(LedgerError::BeyondHorizon(1)));
    }
}

#[cfg(test)]
mod queries {
    use super::*;

    fn filled() -> ScheduleLedger {
        let index = resources();
        let s11 = Assignment::Resource(index.get("S11").unwrap());
        let s12 = Assignment::Resource(index.get("S12").unwrap());
        let mut ledger = ScheduleLedger::new(&roster(), &index, 3);
        for (step, pair) in [[s11, s12], [s11, Assignment::Failed], [s12, s11]]
            .iter()
            .enumerate()
        {
            let rows = assign(ledger.pending(step).unwrap(), pair);
            ledger.commit(step, rows).unwrap();
        }
        ledger
    }

    #[test]
    fn rows_are_step_major() {
        let ledger = filled();
        assert_eq!(ledger.rows().len(), 6);
        let order: Vec<_> = ledger.rows().iter().map(|r| (r.step, r.demand)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn demand_rows_follow_one_user_area() {
        let ledger = filled();
        let paris: Vec<_> = ledger.demand_rows(1).map(|r| r.is_failed()).collect();
        assert_eq!(paris, vec![false, true, false]);
    }

    #[test]
    fn demand_rows_past_the_roster_are_empty() {
        let ledger = filled();
        assert_eq!(ledger.demand_rows(2).count(), 0);
        assert_eq!(ledger.demand_rows(3).count(), 0);
    }

    #[test]
    fn handover_detection_compares_with_prior() {
        let ledger = filled();
        assert!(!ledger.row(0, 0).unwrap().is_handover());
        assert!(ledger.row(2, 0).unwrap().is_handover());
        assert!(ledger.row(1, 1).unwrap().is_handover());
    }

    #[test]
    fn uncommitted_steps_are_not_visible() {
        let index = resources();
        let ledger = ScheduleLedger::new(&roster(), &index, 3);
        assert_eq!(ledger.step_rows(0), None);
        assert_eq!(ledger.row(0, 0), None);
    }
}
