//! Schedules a randomly generated constellation and prints the analytics.

use rand::rngs::StdRng;
use rand::SeedableRng;
use satsched::synthetic::{generate, ScenarioParams};
use satsched::{AllocationAlgorithm, GreedyAllocator, MatrixBuilder, ScheduleReport};

fn main() {
    let params = ScenarioParams {
        demands: 6,
        satellites: 9,
        horizon: 24 * 60,
        ..ScenarioParams::default()
    };
    let scenario = generate(&params, &mut StdRng::seed_from_u64(2022)).expect("valid roster");

    println!(
        "Generated {} user areas, {} satellites, {} visibility events",
        scenario.roster.len(),
        params.satellites,
        scenario.events.len()
    );

    let matrix = MatrixBuilder::new(&scenario.roster, scenario.horizon)
        .build(&scenario.events)
        .expect("matrix");
    let ledger = GreedyAllocator::default()
        .allocate(&matrix, &scenario.roster)
        .expect("allocation");

    // First hour for the first user area
    for row in ledger.demand_rows(0).take(60) {
        if row.is_handover() {
            println!(
                "  t={:>4}  {} -> {}",
                row.step,
                row.prior.label(matrix.resources()),
                row.assigned.label(matrix.resources())
            );
        }
    }

    println!();
    println!(
        "{}",
        ScheduleReport::compute(&ledger, &matrix, &scenario.roster)
    );
}

