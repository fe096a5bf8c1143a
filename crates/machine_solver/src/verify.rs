use crate::constraint::ConstraintSystem;

/// Press counts per button, in button-index order. Produced by the solve
/// orchestrator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub presses: Vec<u64>,
}

impl Solution {
    pub fn total(&self) -> u64 {
        self.presses.iter().sum()
    }
}

/// First counter whose replayed sum disagrees with its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub counter: usize,
    pub expected: u64,
    pub actual: u64,
}

/// Replays `solution` against the machine's button effects and checks that
/// every counter lands exactly on its target.
///
/// This runs on every solver success: a status-mapping bug or a tolerance
/// artifact in the backend would otherwise corrupt batch totals silently.
pub fn verify(system: &ConstraintSystem, solution: &Solution) -> Result<(), Mismatch> {
    for counter in 0..system.num_counters() {
        let achieved: u64 = system
            .affecting(counter)
            .iter()
            .map(|&button| solution.presses[button])
            .sum();
        let expected = system.target(counter);
        if achieved != expected {
            return Err(Mismatch {
                counter,
                expected,
                actual: achieved,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Machine;

    fn system(record: &str) -> ConstraintSystem {
        ConstraintSystem::build(&Machine::parse(record).unwrap())
    }

    #[test]
    fn accepts_exact_solution() {
        let system = system("(0,1)(1){2,5}");
        let solution = Solution {
            presses: vec![2, 3],
        };
        assert!(verify(&system, &solution).is_ok());
        assert_eq!(solution.total(), 5);
    }

    #[test]
    fn rejects_overshoot() {
        let system = system("(0,1)(1){2,5}");
        let solution = Solution {
            presses: vec![2, 4],
        };
        assert_eq!(
            verify(&system, &solution),
            Err(Mismatch {
                counter: 1,
                expected: 5,
                actual: 6,
            })
        );
    }

    #[test]
    fn reports_first_mismatch_by_counter_index() {
        let system = system("(0)(1){2,5}");
        let solution = Solution {
            presses: vec![1, 1],
        };
        // Both counters are wrong; counter 0 wins.
        assert_eq!(
            verify(&system, &solution),
            Err(Mismatch {
                counter: 0,
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn zero_targets_need_zero_presses() {
        let system = system("(0)(1){0,0}");
        assert!(
            verify(
                &system,
                &Solution {
                    presses: vec![0, 0]
                }
            )
            .is_ok()
        );
        assert!(
            verify(
                &system,
                &Solution {
                    presses: vec![1, 0]
                }
            )
            .is_err()
        );
    }
}
