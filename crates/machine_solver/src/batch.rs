use crate::constraint::ConstraintSystem;
use crate::machine::Machine;
use crate::solve::{IlpBackend, MachineOutcome, solve_machine};
use log::{info, warn};
use rayon::prelude::*;
use std::time::Duration;

/// Aggregated result of one input set. `outcomes` is in record order;
/// `failed` holds the 1-based numbers of machines that did not reach
/// `Solved`, also in record order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<MachineOutcome>,
    pub total_presses: u64,
    pub solved_count: usize,
    pub failed: Vec<usize>,
}

impl BatchReport {
    pub fn machine_count(&self) -> usize {
        self.outcomes.len()
    }

    /// The grand total is only reportable as a final answer when every
    /// machine solved; otherwise it is a partial bound over the solved ones.
    pub fn is_final(&self) -> bool {
        self.failed.is_empty()
    }

    fn from_outcomes(outcomes: Vec<MachineOutcome>) -> Self {
        let mut total_presses = 0;
        let mut solved_count = 0;
        let mut failed = Vec::new();
        for (i, outcome) in outcomes.iter().enumerate() {
            match outcome {
                MachineOutcome::Solved { total_presses: n, .. } => {
                    total_presses += n;
                    solved_count += 1;
                }
                _ => failed.push(i + 1),
            }
        }
        Self {
            outcomes,
            total_presses,
            solved_count,
            failed,
        }
    }
}

/// Full pipeline for one record: parse, build the equality system, reject
/// unreachable counters before paying for the solver, then solve and verify.
/// Every failure is folded into the outcome; nothing escapes to the batch.
pub fn solve_record(record: &str, backend: &dyn IlpBackend, budget: Duration) -> MachineOutcome {
    let machine = match Machine::parse(record) {
        Ok(machine) => machine,
        Err(e) => {
            return MachineOutcome::ParseError {
                detail: e.to_string(),
            };
        }
    };

    let system = ConstraintSystem::build(&machine);
    if let Err(e) = system.check_reachable() {
        return MachineOutcome::Infeasible {
            reason: e.to_string(),
        };
    }

    solve_machine(&system, backend, budget)
}

/// Runs every machine in `input` (one record per non-blank line) through the
/// pipeline. Machines are independent, so they are solved on the rayon pool;
/// the report still lists outcomes in record order.
pub fn run_batch(input: &str, backend: &dyn IlpBackend, budget: Duration) -> BatchReport {
    let records: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    info!("Found {} machines to solve", records.len());

    let outcomes: Vec<MachineOutcome> = records
        .par_iter()
        .enumerate()
        .map(|(i, record)| {
            let outcome = solve_record(record, backend, budget);
            if outcome.is_solved() {
                info!("Machine {}: {}", i + 1, outcome);
            } else {
                warn!("Machine {}: {}", i + 1, outcome);
            }
            outcome
        })
        .collect();

    BatchReport::from_outcomes(outcomes)
}
