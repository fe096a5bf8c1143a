use anyhow::{Context, Result};
use log::{error, info};
use machine_solver::{
    batch::{self, BatchReport},
    config::Config,
    export,
    solve::CbcBackend,
};
use std::io::Write;

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let config = Config::from_env()?;
    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/sample.txt".to_string());

    info!("Machine Solver starting...");
    info!("Input file: {input_path}");
    info!(
        "Time budget per machine: {}s",
        config.time_budget.as_secs()
    );
    match &config.output_dir {
        Some(dir) => info!("Report directory: {}", dir.display()),
        None => info!("Report directory: (current working directory)"),
    }

    // The one fatal error: the input source itself cannot be read. Everything
    // past this point is recovered per machine.
    let input = std::fs::read_to_string(&input_path)
        .with_context(|| format!("Failed to read input file {input_path}"))?;

    let report = batch::run_batch(&input, &CbcBackend, config.time_budget);

    report_and_exit(&report, &config)
}

fn report_and_exit(report: &BatchReport, config: &Config) -> ! {
    info!(
        "Solved: {}/{} machines",
        report.solved_count,
        report.machine_count()
    );

    if report.is_final() {
        info!("Total button presses: {}", report.total_presses);
        info!("All machines solved successfully!");
    } else {
        for &machine in &report.failed {
            error!(
                "Machine {machine} failed: {}",
                report.outcomes[machine - 1]
            );
        }
        error!(
            "Provisional total over {} solved machines: {} (NOT a final answer)",
            report.solved_count, report.total_presses
        );
    }

    match export::export_report_csv(report, config.output_dir.as_deref()) {
        Ok(path) => info!("Report saved to: {}", path.display()),
        Err(e) => error!("Failed to save report: {e}"),
    }

    let _ = std::io::stderr().flush();
    std::process::exit(if report.is_final() { 0 } else { 1 });
}
