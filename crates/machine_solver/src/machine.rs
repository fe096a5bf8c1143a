use crate::error::{Result, SolverError};
use std::collections::BTreeSet;

/// One button: pressing it increments every counter in `counters` by one.
///
/// `index` is the button's position in the textual record, which is also its
/// canonical identity everywhere else in the pipeline. An empty counter set is
/// legal; such a button is dead weight and the analyzer flags it, the solver
/// simply never presses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonEffect {
    pub index: usize,
    pub counters: BTreeSet<usize>,
}

/// One puzzle instance: buttons plus the exact target for each counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub buttons: Vec<ButtonEffect>,
    pub targets: Vec<u64>,
}

impl Machine {
    /// Parses one textual record.
    ///
    /// A record is zero or more `(i1,i2,...)` button groups followed by
    /// exactly one `{t0,t1,...}` target group. Button indices are assigned in
    /// left-to-right order of the groups. Text outside the groups is ignored.
    pub fn parse(record: &str) -> Result<Self> {
        let record = record.trim();
        if record.is_empty() {
            return Err(SolverError::EmptyRecord);
        }

        let mut button_groups: Vec<Vec<u64>> = Vec::new();
        let mut targets: Option<Vec<u64>> = None;

        let mut rest = record;
        while let Some(pos) = rest.find(['(', '{']) {
            let open = rest.as_bytes()[pos] as char;
            let close = if open == '(' { ')' } else { '}' };
            let body_start = pos + 1;
            let Some(len) = rest[body_start..].find(close) else {
                return Err(SolverError::UnterminatedGroup { open });
            };
            let values = parse_number_list(&rest[body_start..body_start + len])?;
            if open == '(' {
                button_groups.push(values);
            } else if targets.is_none() {
                targets = Some(values);
            } else {
                return Err(SolverError::DuplicateTargetGroup);
            }
            rest = &rest[body_start + len + 1..];
        }

        let targets = targets.ok_or(SolverError::MissingTargetGroup)?;

        let mut buttons = Vec::with_capacity(button_groups.len());
        for (index, group) in button_groups.into_iter().enumerate() {
            let mut counters = BTreeSet::new();
            for value in group {
                let counter = value as usize;
                if counter >= targets.len() {
                    return Err(SolverError::CounterOutOfRange {
                        button: index,
                        counter,
                        counters: targets.len(),
                    });
                }
                counters.insert(counter);
            }
            buttons.push(ButtonEffect { index, counters });
        }

        Ok(Self { buttons, targets })
    }

    pub fn num_buttons(&self) -> usize {
        self.buttons.len()
    }

    pub fn num_counters(&self) -> usize {
        self.targets.len()
    }

    /// Sum of all targets, i.e. the total increments the machine needs.
    pub fn total_work(&self) -> u64 {
        self.targets.iter().sum()
    }
}

/// Parses a comma-separated list of non-negative integers. An empty (or
/// all-whitespace) body yields an empty list, so `()` is a valid dead button.
fn parse_number_list(body: &str) -> Result<Vec<u64>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    body.split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<u64>().map_err(|e| SolverError::InvalidInteger {
                token: token.to_string(),
                source: e,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_buttons_and_targets() {
        let machine = Machine::parse("(0,1)(1){2,5}").unwrap();
        assert_eq!(machine.num_buttons(), 2);
        assert_eq!(machine.targets, vec![2, 5]);
        assert_eq!(machine.buttons[0].index, 0);
        assert_eq!(
            machine.buttons[0].counters,
            BTreeSet::from([0, 1]),
        );
        assert_eq!(machine.buttons[1].counters, BTreeSet::from([1]));
    }

    #[test]
    fn parses_with_whitespace() {
        let machine = Machine::parse("  ( 0 , 1 ) ( 1 ) { 2 , 5 }  ").unwrap();
        assert_eq!(machine.num_buttons(), 2);
        assert_eq!(machine.targets, vec![2, 5]);
    }

    #[test]
    fn collapses_duplicate_counter_indices() {
        let machine = Machine::parse("(0,0,1){1,1}").unwrap();
        assert_eq!(machine.buttons[0].counters, BTreeSet::from([0, 1]));
    }

    #[test]
    fn accepts_dead_button() {
        let machine = Machine::parse("()(0){3}").unwrap();
        assert!(machine.buttons[0].counters.is_empty());
        assert_eq!(machine.buttons[1].counters, BTreeSet::from([0]));
    }

    #[test]
    fn ignores_text_outside_groups() {
        // Input files sometimes carry extra annotations between groups.
        let machine = Machine::parse("[.#] (0) | (1) {1,2}").unwrap();
        assert_eq!(machine.num_buttons(), 2);
        assert_eq!(machine.targets, vec![1, 2]);
    }

    #[test]
    fn rejects_empty_record() {
        assert!(matches!(
            Machine::parse(""),
            Err(SolverError::EmptyRecord)
        ));
        assert!(matches!(
            Machine::parse("   \t "),
            Err(SolverError::EmptyRecord)
        ));
    }

    #[test]
    fn rejects_missing_target_group() {
        assert!(matches!(
            Machine::parse("(0)(1)"),
            Err(SolverError::MissingTargetGroup)
        ));
    }

    #[test]
    fn rejects_second_target_group() {
        assert!(matches!(
            Machine::parse("(0){1}{2}"),
            Err(SolverError::DuplicateTargetGroup)
        ));
    }

    #[test]
    fn rejects_non_integer_token() {
        assert!(matches!(
            Machine::parse("(a){1}"),
            Err(SolverError::InvalidInteger { .. })
        ));
        assert!(matches!(
            Machine::parse("(0){1,x}"),
            Err(SolverError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn rejects_unterminated_group() {
        assert!(matches!(
            Machine::parse("(0,1{2}"),
            Err(SolverError::UnterminatedGroup { open: '(' })
        ));
        assert!(matches!(
            Machine::parse("(0){2"),
            Err(SolverError::UnterminatedGroup { open: '{' })
        ));
    }

    #[test]
    fn rejects_counter_out_of_range() {
        let err = Machine::parse("(0)(2){1,1}").unwrap_err();
        match err {
            SolverError::CounterOutOfRange {
                button,
                counter,
                counters,
            } => {
                assert_eq!(button, 1);
                assert_eq!(counter, 2);
                assert_eq!(counters, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn total_work_sums_targets() {
        let machine = Machine::parse("(0)(1){3,4}").unwrap();
        assert_eq!(machine.total_work(), 7);
    }
}
