use crate::constraint::ConstraintSystem;
use crate::verify::{Solution, verify};
use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution as LpSolution, SolverModel, Variable,
    coin_cbc, variable,
};
use log::debug;
use std::fmt;
use std::time::Duration;

/// Outcome of one integer-programming invocation, before verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    /// Proven-minimal press counts, one per button.
    Optimal(Vec<u64>),
    /// Proven: no non-negative integer assignment satisfies the system.
    Infeasible,
    /// Budget exhausted with no proof either way.
    TimedOut,
    /// Anything else the backend reports.
    Other(String),
}

/// The integer-programming capability: minimize the total press count over
/// non-negative integer variables subject to the system's equalities.
///
/// Kept narrow so any conforming engine can be plugged in; nothing outside an
/// implementation may depend on backend-specific types. Tests substitute
/// scripted fakes through this seam.
pub trait IlpBackend: Sync {
    fn minimize_presses(&self, system: &ConstraintSystem, budget: Duration) -> SolveStatus;
}

/// Production backend: CBC via `good_lp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CbcBackend;

impl IlpBackend for CbcBackend {
    fn minimize_presses(&self, system: &ConstraintSystem, budget: Duration) -> SolveStatus {
        let mut vars = ProblemVariables::new();
        let x: Vec<Variable> = (0..system.num_buttons())
            .map(|_| vars.add(variable().integer().min(0)))
            .collect();

        // minimize Σ x_j
        let objective: Expression = x.iter().copied().sum();
        let mut model = vars.minimise(objective).using(coin_cbc);
        model.set_parameter("log", "0");
        model.set_parameter("sec", &budget.as_secs().to_string());

        // Σ_{j ∈ affecting[i]} x_j == target[i] for every counter i
        for counter in 0..system.num_counters() {
            let lhs: Expression = system
                .affecting(counter)
                .iter()
                .map(|&button| x[button])
                .sum();
            model = model.with(lhs.eq(system.target(counter) as f64));
        }

        debug!(
            "CBC model: {} variables, {} equality constraints, budget {}s",
            system.num_buttons(),
            system.num_counters(),
            budget.as_secs()
        );

        match model.solve() {
            Ok(solution) => {
                let presses = x
                    .iter()
                    .map(|&var| solution.value(var).round() as u64)
                    .collect();
                SolveStatus::Optimal(presses)
            }
            Err(ResolutionError::Infeasible) => SolveStatus::Infeasible,
            // CBC reports a hit time limit as a stopped run.
            Err(ResolutionError::Other("Stopped")) => SolveStatus::TimedOut,
            Err(e) => SolveStatus::Other(e.to_string()),
        }
    }
}

/// Per-machine result. Owned by the batch aggregator; never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineOutcome {
    Solved { total_presses: u64, presses: Vec<u64> },
    Infeasible { reason: String },
    TimedOut,
    ParseError { detail: String },
    VerificationFailed { counter: usize, expected: u64, actual: u64 },
}

impl MachineOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, MachineOutcome::Solved { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MachineOutcome::Solved { .. } => "solved",
            MachineOutcome::Infeasible { .. } => "infeasible",
            MachineOutcome::TimedOut => "timed-out",
            MachineOutcome::ParseError { .. } => "parse-error",
            MachineOutcome::VerificationFailed { .. } => "verification-failed",
        }
    }
}

impl fmt::Display for MachineOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineOutcome::Solved { total_presses, .. } => {
                write!(f, "{total_presses} presses")
            }
            MachineOutcome::Infeasible { reason } => write!(f, "infeasible: {reason}"),
            MachineOutcome::TimedOut => write!(f, "time budget exhausted"),
            MachineOutcome::ParseError { detail } => write!(f, "parse error: {detail}"),
            MachineOutcome::VerificationFailed {
                counter,
                expected,
                actual,
            } => write!(
                f,
                "verification failed: counter {counter} expected {expected} but achieved {actual}"
            ),
        }
    }
}

/// Runs the backend on an already-validated system and maps its status to a
/// domain outcome. Every `Optimal` claim is replayed through the verifier
/// before it is trusted.
pub fn solve_machine(
    system: &ConstraintSystem,
    backend: &dyn IlpBackend,
    budget: Duration,
) -> MachineOutcome {
    match backend.minimize_presses(system, budget) {
        SolveStatus::Optimal(presses) => {
            let solution = Solution { presses };
            match verify(system, &solution) {
                Ok(()) => MachineOutcome::Solved {
                    total_presses: solution.total(),
                    presses: solution.presses,
                },
                Err(mismatch) => MachineOutcome::VerificationFailed {
                    counter: mismatch.counter,
                    expected: mismatch.expected,
                    actual: mismatch.actual,
                },
            }
        }
        SolveStatus::Infeasible => MachineOutcome::Infeasible {
            reason: "solver proved no integer solution exists".to_string(),
        },
        SolveStatus::TimedOut => MachineOutcome::TimedOut,
        SolveStatus::Other(status) => MachineOutcome::Infeasible {
            reason: format!("solver returned '{status}'"),
        },
    }
}
