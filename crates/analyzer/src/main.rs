use analyzer::config::AnalyzerConfig;
use analyzer::report::{BottleneckReport, TightnessLabel, coefficient_matrix};
use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use log::warn;
use machine_solver::{ConstraintSystem, Machine};
use serde::Serialize;
use std::path::PathBuf;

/// Inspect machines without solving them: rank buttons by efficiency, rank
/// counters by tightness, and point at the bottlenecks that make an instance
/// hard.
#[derive(Parser, Debug)]
#[command(name = "analyzer")]
struct Cli {
    /// Input file, one machine record per line
    input: PathBuf,

    /// Only analyze this machine (1-based position in the file)
    #[arg(long)]
    machine: Option<usize>,

    /// Emit the reports as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also print the button/counter coefficient matrix
    #[arg(long)]
    matrix: bool,

    /// TOML file overriding the analysis thresholds
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct MachineReport {
    machine: usize,
    report: BottleneckReport,
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let cli = Cli::parse();
    let config = AnalyzerConfig::load(cli.config.as_deref())?;
    let input = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read input file {}", cli.input.display()))?;

    let mut reports = Vec::new();
    let records = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate();

    for (i, record) in records {
        let machine_number = i + 1;
        if let Some(only) = cli.machine
            && machine_number != only
        {
            continue;
        }

        let machine = match Machine::parse(record) {
            Ok(machine) => machine,
            Err(e) => {
                warn!("Machine {machine_number}: skipped, {e}");
                continue;
            }
        };

        let system = ConstraintSystem::build(&machine);
        let report = BottleneckReport::build(&system, &config);

        if cli.json {
            reports.push(MachineReport {
                machine: machine_number,
                report,
            });
        } else {
            print_report(machine_number, &system, &report);
            if cli.matrix {
                println!("{}", coefficient_matrix(&system));
            }
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}

fn print_report(machine_number: usize, system: &ConstraintSystem, report: &BottleneckReport) {
    println!("=== MACHINE {machine_number} ===");
    println!(
        "{} buttons, {} counters, total work needed: {}",
        system.num_buttons(),
        system.num_counters(),
        report.total_work
    );

    println!("\nButtons by efficiency:");
    for b in &report.buttons {
        println!(
            "  Button {:2}: affects [{}] -> total help {:3}, efficiency {:.1}",
            b.button,
            b.affects.iter().join(","),
            b.total_help,
            b.efficiency
        );
    }

    println!("\nCounters by tightness:");
    for c in &report.counters {
        println!(
            "  Counter {:2}: target {:3}, reachable by {} button(s) [{}] ({})",
            c.counter,
            c.target,
            c.tightness,
            c.affecting.iter().join(","),
            c.label
        );
    }

    for c in report.unreachable() {
        println!(
            "UNREACHABLE: counter {} (target {}) cannot be affected by any button",
            c.counter, c.target
        );
    }
    for c in report.forced() {
        println!(
            "FORCED: counter {} requires exactly {} presses of button {}",
            c.counter,
            c.target,
            c.affecting[0]
        );
    }
    for c in &report.counters {
        if c.label == TightnessLabel::Constrained {
            println!(
                "CONSTRAINED: counter {} (target {}) can only use buttons [{}]",
                c.counter,
                c.target,
                c.affecting.iter().join(",")
            );
        }
    }
    for c in report.bottlenecks() {
        println!(
            "BOTTLENECK: counter {} carries target {} with only {} button(s) to reach it",
            c.counter, c.target, c.tightness
        );
    }
    let dead: Vec<usize> = report.dead_buttons().map(|b| b.button).collect();
    if !dead.is_empty() {
        println!("DEAD BUTTONS: [{}] affect nothing", dead.iter().join(","));
    }
    println!();
}
