use crate::error::{Result, SolverError};
use crate::machine::Machine;

/// Read-only equality system derived from a [`Machine`]: for every counter,
/// the buttons that increment it, plus the target vector.
///
/// The system a machine induces is `A·x = target` where `A[i][j]` is 1 exactly
/// when button `j` affects counter `i`; `affecting` stores the sparse rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSystem {
    affecting: Vec<Vec<usize>>,
    targets: Vec<u64>,
    num_buttons: usize,
}

impl ConstraintSystem {
    pub fn build(machine: &Machine) -> Self {
        let mut affecting = vec![Vec::new(); machine.targets.len()];
        for button in &machine.buttons {
            for &counter in &button.counters {
                affecting[counter].push(button.index);
            }
        }
        // Buttons are visited in index order, so every row is ascending.
        Self {
            affecting,
            targets: machine.targets.clone(),
            num_buttons: machine.buttons.len(),
        }
    }

    /// Fails on the first counter no button can reach. Whatever the objective,
    /// such a system has no solution, so this must be checked before paying
    /// for a solver invocation.
    pub fn check_reachable(&self) -> Result<()> {
        match self.affecting.iter().position(|row| row.is_empty()) {
            Some(counter) => Err(SolverError::UnreachableCounter { counter }),
            None => Ok(()),
        }
    }

    /// Ascending button indices affecting `counter`.
    pub fn affecting(&self, counter: usize) -> &[usize] {
        &self.affecting[counter]
    }

    pub fn target(&self, counter: usize) -> u64 {
        self.targets[counter]
    }

    pub fn num_counters(&self) -> usize {
        self.targets.len()
    }

    pub fn num_buttons(&self) -> usize {
        self.num_buttons
    }

    pub fn total_work(&self) -> u64 {
        self.targets.iter().sum()
    }
}
