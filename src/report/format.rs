//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the estimation code stays clean and testable
//! - output changes are localized

use crate::domain::{AggregateResult, EstimationResult, InstrumentConfig, SweepPoint, TargetClass};
use crate::estimate::budgets_before;
use crate::report::summarize_classes;

/// Format the instrument header shared by every report.
pub fn format_instrument(instrument: &InstrumentConfig) -> String {
    format!(
        "Instrument: focal plane={:.4} deg² | patrol={:.6} deg² | fibers={}\n",
        instrument.focal_plane_area,
        instrument.fiber_patrol_area,
        fmt_count(instrument.fiber_count),
    )
}

/// Format a single-class estimate.
pub fn format_estimate(density: f64, instrument: &InstrumentConfig, result: &EstimationResult) -> String {
    let mut out = String::new();
    out.push_str("=== faprob - single-class estimate ===\n");
    out.push_str(&format_instrument(instrument));
    out.push_str(&format!("Density: {density:.3} per deg²\n"));
    out.push_str(&format!("Targets: {}\n", result.total_targets));
    out.push_str(&format!("Assigned fibers: {}\n", result.assigned_fibers));
    out.push_str(&format!("Assigned fraction: {}\n", fmt_fraction(result.assigned_fraction())));

    let left = instrument.fiber_count - result.assigned_fibers as f64;
    out.push_str(&format!("Fibers left: {}\n", fmt_count(left.max(0.0))));
    out.push_str(&format!(
        "Every target is served while more than {:.0} fibers remain.\n",
        instrument.saturation_fibers()
    ));
    out
}

/// Format a multi-class aggregate as a priority-ordered table.
pub fn format_aggregate(classes: &[TargetClass], instrument: &InstrumentConfig, result: &AggregateResult) -> String {
    let mut out = String::new();
    out.push_str("=== faprob - multi-class aggregate ===\n");
    out.push_str(&format_instrument(instrument));
    out.push('\n');

    out.push_str(
        format!(
            "{:<4} {:<16} {:>10} {:>10} {:>10} {:>10} {:>12}\n",
            "#", "class", "density", "targets", "assigned", "fraction", "budget"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<4} {:-<16} {:->10} {:->10} {:->10} {:->10} {:->12}\n",
            "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    let budgets = budgets_before(result, instrument.fiber_count);
    for (i, (row, budget)) in summarize_classes(classes, result).iter().zip(budgets).enumerate() {
        out.push_str(
            format!(
                "{:<4} {:<16} {:>10.2} {:>10} {:>10} {:>10} {:>12}\n",
                i + 1,
                truncate(&row.name, 16),
                row.density,
                row.total_targets,
                row.assigned_fibers,
                fmt_fraction(row.assigned_fraction),
                fmt_count(budget),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format!(
        "Total: targets={} assigned={} overall probability={:.4}\n",
        result.total_targets(),
        result.total_assigned(),
        result.overall_probability,
    ));
    out
}

/// Format a density sweep table.
pub fn format_sweep(points: &[SweepPoint], instrument: &InstrumentConfig) -> String {
    let mut out = String::new();
    out.push_str("=== faprob - density sweep ===\n");
    out.push_str(&format_instrument(instrument));
    out.push('\n');
    out.push_str(
        format!(
            "{:>12} {:>10} {:>10} {:>10} {:>10}\n",
            "density", "targets", "assigned", "fraction", "usage"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:->12} {:->10} {:->10} {:->10} {:->10}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    for p in points {
        out.push_str(
            format!(
                "{:>12.2} {:>10} {:>10} {:>10.4} {:>10.4}\n",
                p.density, p.total_targets, p.assigned_fibers, p.assigned_fraction, p.fiber_usage
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn fmt_fraction(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.4}"),
        None => "-".to_string(),
    }
}

fn fmt_count(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Scenario;

    #[test]
    fn estimate_report_lists_counts() {
        let result = EstimationResult {
            assigned_fibers: 11990,
            total_targets: 17260,
        };
        let text = format_estimate(2000.0, &InstrumentConfig::default(), &result);
        assert!(text.contains("Targets: 17260"));
        assert!(text.contains("Assigned fibers: 11990"));
        assert!(text.contains("Assigned fraction: 0.6947"));
        assert!(text.contains("Fibers left: 1010"));
        assert!(text.contains("more than 5753 fibers"));
    }

    #[test]
    fn estimate_report_without_targets_has_no_fraction() {
        let result = EstimationResult {
            assigned_fibers: 0,
            total_targets: 0,
        };
        let text = format_estimate(0.0, &InstrumentConfig::default(), &result);
        assert!(text.contains("Assigned fraction: -"));
    }

    #[test]
    fn aggregate_table_shows_budget_per_class() {
        let scenario = Scenario::from_densities(&[500.0, 500.0]);
        let result = AggregateResult {
            overall_probability: 77.0 / 8630.0,
            per_class_assigned: vec![52, 25],
            per_class_targets: vec![4315, 4315],
        };
        let instrument = InstrumentConfig::default().with_fiber_count(100.0);
        let text = format_aggregate(&scenario.classes, &instrument, &result);

        let rows: Vec<&str> = text.lines().filter(|l| l.contains("class1") || l.contains("class2")).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].ends_with("100"));
        assert!(rows[1].ends_with("48"));
        assert!(text.contains("assigned=77"));
        assert!(text.contains("overall probability=0.0089"));
    }

    #[test]
    fn truncate_marks_long_names() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
