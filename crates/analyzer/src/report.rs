use crate::config::AnalyzerConfig;
use machine_solver::ConstraintSystem;
use serde::Serialize;
use std::fmt::Write;
use strum_macros::Display;

/// How pinned-down a counter is, from its tightness (number of affecting
/// buttons). A counter nothing reaches has tightness 0 and makes the machine
/// unsolvable; it keeps the weakest label here and callers surface it via
/// `tightness == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TightnessLabel {
    Forced,
    Constrained,
    Unconstrained,
}

impl TightnessLabel {
    fn from_tightness(tightness: usize) -> Self {
        match tightness {
            1 => TightnessLabel::Forced,
            2 => TightnessLabel::Constrained,
            _ => TightnessLabel::Unconstrained,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterDiagnosis {
    pub counter: usize,
    pub target: u64,
    /// Ascending button indices that can increment this counter.
    pub affecting: Vec<usize>,
    pub tightness: usize,
    pub label: TightnessLabel,
    pub high_target: bool,
    /// Low flexibility and high value at once: tightness at most the
    /// configured cutoff while the target is high.
    pub bottleneck: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonDiagnosis {
    pub button: usize,
    /// Ascending counter indices this button increments.
    pub affects: Vec<usize>,
    pub fan_out: usize,
    /// Sum of the targets of all counters this button touches.
    pub total_help: u64,
    /// `total_help / fan_out`; 0 for a button that affects nothing.
    pub efficiency: f64,
}

/// Feasibility diagnostics for one machine. Derived on demand from the
/// constraint system; explains why an instance is hard (or impossible)
/// without ever invoking a solver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BottleneckReport {
    /// Total increments the machine needs (sum of all targets).
    pub total_work: u64,
    /// Counters ranked by ascending tightness, then descending target, so
    /// high-value low-flexibility counters surface first.
    pub counters: Vec<CounterDiagnosis>,
    /// Buttons ranked by descending efficiency; ties by ascending index.
    pub buttons: Vec<ButtonDiagnosis>,
}

impl BottleneckReport {
    pub fn build(system: &ConstraintSystem, config: &AnalyzerConfig) -> Self {
        let mut counters: Vec<CounterDiagnosis> = (0..system.num_counters())
            .map(|counter| {
                let affecting = system.affecting(counter).to_vec();
                let tightness = affecting.len();
                let target = system.target(counter);
                let high_target = target >= config.high_target;
                CounterDiagnosis {
                    counter,
                    target,
                    tightness,
                    label: TightnessLabel::from_tightness(tightness),
                    high_target,
                    bottleneck: tightness <= config.bottleneck_tightness && high_target,
                    affecting,
                }
            })
            .collect();
        counters.sort_by(|a, b| {
            a.tightness
                .cmp(&b.tightness)
                .then(b.target.cmp(&a.target))
                .then(a.counter.cmp(&b.counter))
        });

        let mut affects = vec![Vec::new(); system.num_buttons()];
        for counter in 0..system.num_counters() {
            for &button in system.affecting(counter) {
                affects[button].push(counter);
            }
        }

        let mut buttons: Vec<ButtonDiagnosis> = affects
            .into_iter()
            .enumerate()
            .map(|(button, affects)| {
                let fan_out = affects.len();
                let total_help: u64 = affects.iter().map(|&c| system.target(c)).sum();
                let efficiency = if fan_out == 0 {
                    0.0
                } else {
                    total_help as f64 / fan_out as f64
                };
                ButtonDiagnosis {
                    button,
                    affects,
                    fan_out,
                    total_help,
                    efficiency,
                }
            })
            .collect();
        buttons.sort_by(|a, b| {
            b.efficiency
                .total_cmp(&a.efficiency)
                .then(a.button.cmp(&b.button))
        });

        Self {
            total_work: system.total_work(),
            counters,
            buttons,
        }
    }

    /// Counters whose single affecting button is pinned to exactly the
    /// counter's target.
    pub fn forced(&self) -> impl Iterator<Item = &CounterDiagnosis> {
        self.counters.iter().filter(|c| c.tightness == 1)
    }

    pub fn bottlenecks(&self) -> impl Iterator<Item = &CounterDiagnosis> {
        self.counters.iter().filter(|c| c.bottleneck)
    }

    /// Counters no button reaches; the machine cannot be solved while any
    /// exist.
    pub fn unreachable(&self) -> impl Iterator<Item = &CounterDiagnosis> {
        self.counters.iter().filter(|c| c.tightness == 0)
    }

    /// Buttons that affect nothing and can never contribute.
    pub fn dead_buttons(&self) -> impl Iterator<Item = &ButtonDiagnosis> {
        self.buttons.iter().filter(|b| b.fan_out == 0)
    }
}

/// Renders the 0/1 button-by-counter coefficient matrix with the target
/// column, for eyeballing structure in small machines.
pub fn coefficient_matrix(system: &ConstraintSystem) -> String {
    let mut out = String::new();
    let _ = write!(out, "     ");
    for button in 0..system.num_buttons() {
        let _ = write!(out, " B{button:2}");
    }
    let _ = writeln!(out);
    for counter in 0..system.num_counters() {
        let _ = write!(out, "C{counter:2}: ");
        let row = system.affecting(counter);
        for button in 0..system.num_buttons() {
            let bit = u8::from(row.binary_search(&button).is_ok());
            let _ = write!(out, " {bit:3}");
        }
        let _ = writeln!(out, " | target={}", system.target(counter));
    }
    out
}
