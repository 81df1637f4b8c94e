//! Export results.
//!
//! - aggregate runs as JSON (`AggregateReport`)
//! - density sweeps as CSV, easy to consume in spreadsheets or plotting scripts

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Utc;

use crate::domain::{AggregateReport, AggregateResult, InstrumentConfig, SweepPoint, TargetClass};
use crate::error::AppError;

/// Build the portable JSON representation of an aggregate run.
pub fn aggregate_report(
    instrument: &InstrumentConfig,
    classes: &[TargetClass],
    result: &AggregateResult,
) -> AggregateReport {
    AggregateReport {
        tool: format!("faprob {}", env!("CARGO_PKG_VERSION")),
        generated: Utc::now(),
        instrument: *instrument,
        classes: classes.to_vec(),
        result: result.clone(),
    }
}

/// Write an aggregate report JSON file.
pub fn write_aggregate_json(path: &Path, report: &AggregateReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;
    Ok(())
}

/// Write sweep points to a CSV file.
pub fn write_sweep_csv(path: &Path, points: &[SweepPoint], instrument: &InstrumentConfig) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create sweep CSV '{}': {e}", path.display())))?;

    writeln!(
        file,
        "density,total_targets,assigned_fibers,assigned_fraction,fiber_usage,focal_plane_area,fiber_patrol_area,fiber_count"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write sweep CSV header: {e}")))?;

    for p in points {
        writeln!(
            file,
            "{:.6},{},{},{:.10},{:.10},{},{},{}",
            p.density,
            p.total_targets,
            p.assigned_fibers,
            p.assigned_fraction,
            p.fiber_usage,
            instrument.focal_plane_area,
            instrument.fiber_patrol_area,
            instrument.fiber_count,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write sweep CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_csv_has_header_and_rows() {
        let path = std::env::temp_dir().join(format!("faprob_{}_sweep.csv", std::process::id()));
        let points = vec![
            SweepPoint {
                density: 0.0,
                total_targets: 0,
                assigned_fibers: 0,
                assigned_fraction: 0.0,
                fiber_usage: 0.0,
            },
            SweepPoint {
                density: 2000.0,
                total_targets: 17260,
                assigned_fibers: 11990,
                assigned_fraction: 11990.0 / 17260.0,
                fiber_usage: 11990.0 / 13000.0,
            },
        ];
        write_sweep_csv(&path, &points, &InstrumentConfig::default()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("density,total_targets"));
        assert!(lines[2].starts_with("2000.000000,17260,11990,"));
        assert!(lines[2].ends_with(",8.63,0.0015,13000"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn aggregate_json_serializes_result() {
        let path = std::env::temp_dir().join(format!("faprob_{}_report.json", std::process::id()));
        let result = AggregateResult {
            overall_probability: 0.5,
            per_class_assigned: vec![1],
            per_class_targets: vec![2],
        };
        let classes = vec![TargetClass { name: "LRG".to_string(), density: 1.0 }];
        let report = aggregate_report(&InstrumentConfig::default(), &classes, &result);
        write_aggregate_json(&path, &report).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: AggregateReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.result, result);
        assert_eq!(back.classes, classes);
        assert!(back.tool.starts_with("faprob"));
        let _ = std::fs::remove_file(&path);
    }
}
