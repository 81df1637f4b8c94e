//! Reporting utilities: per-class summaries and formatted terminal output.

use crate::domain::{AggregateResult, TargetClass};

pub mod format;

pub use format::*;

/// One row of an aggregate run, joined with its class metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSummary {
    pub name: String,
    pub density: f64,
    pub total_targets: u64,
    pub assigned_fibers: u64,
    /// `None` when the class has no targets.
    pub assigned_fraction: Option<f64>,
}

/// Join aggregate counts with class names, in priority order.
pub fn summarize_classes(classes: &[TargetClass], result: &AggregateResult) -> Vec<ClassSummary> {
    classes
        .iter()
        .zip(result.per_class_assigned.iter().zip(result.per_class_targets.iter()))
        .map(|(class, (&assigned, &targets))| ClassSummary {
            name: class.name.clone(),
            density: class.density,
            total_targets: targets,
            assigned_fibers: assigned,
            assigned_fraction: if targets == 0 {
                None
            } else {
                Some(assigned as f64 / targets as f64)
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Scenario;

    #[test]
    fn summaries_follow_priority_order() {
        let scenario = Scenario::from_densities(&[10.0, 0.0]);
        let result = AggregateResult {
            overall_probability: 1.0,
            per_class_assigned: vec![86, 0],
            per_class_targets: vec![86, 0],
        };
        let rows = summarize_classes(&scenario.classes, &result);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "class1");
        assert_eq!(rows[0].assigned_fraction, Some(1.0));
        assert_eq!(rows[1].assigned_fraction, None);
    }
}
