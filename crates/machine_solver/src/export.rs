use crate::batch::BatchReport;
use crate::error::{Result, SolverError};
use crate::solve::MachineOutcome;
use chrono::Local;
use csv::WriterBuilder;
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

/// Writes the batch report as CSV, one row per machine plus a summary row,
/// and returns the path written.
pub fn export_report_csv(report: &BatchReport, output_dir: Option<&Path>) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let filename = format!("machines_{timestamp}.csv");

    let file_path = if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir).map_err(|e| SolverError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        dir.join(&filename)
    } else {
        filename.into()
    };

    let file = File::create(&file_path).map_err(|e| SolverError::CreateFile {
        path: file_path.clone(),
        source: e,
    })?;

    let writer = BufWriter::new(file);
    #[allow(unused_mut)]
    let mut builder = WriterBuilder::new();
    #[cfg(windows)]
    {
        use csv::Terminator;
        builder = builder.terminator(Terminator::CRLF);
    }

    let mut wtr = builder.from_writer(writer);

    wtr.write_record(["Machine", "Status", "Presses", "Detail"])?;
    for (i, outcome) in report.outcomes.iter().enumerate() {
        let (presses, detail) = match outcome {
            MachineOutcome::Solved { total_presses, .. } => (total_presses.to_string(), String::new()),
            other => (String::new(), other.to_string()),
        };
        let machine = (i + 1).to_string();
        wtr.write_record([
            machine.as_str(),
            outcome.kind(),
            presses.as_str(),
            detail.as_str(),
        ])?;
    }

    let total_status = if report.is_final() { "final" } else { "provisional" };
    wtr.write_record([
        "total",
        total_status,
        report.total_presses.to_string().as_str(),
        "",
    ])?;

    wtr.flush()?;
    Ok(file_path)
}
