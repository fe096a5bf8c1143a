pub mod batch;
pub mod config;
pub mod constraint;
pub mod error;
pub mod export;
pub mod machine;
pub mod solve;
pub mod verify;

pub use batch::{BatchReport, run_batch, solve_record};
pub use config::Config;
pub use constraint::ConstraintSystem;
pub use error::SolverError;
pub use machine::{ButtonEffect, Machine};
pub use solve::{CbcBackend, IlpBackend, MachineOutcome, SolveStatus, solve_machine};
pub use verify::{Mismatch, Solution, verify};
