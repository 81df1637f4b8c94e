//! Multi-class budget sharing.
//!
//! Classes are served strictly in input order: class `i` sees the fiber budget
//! left over by classes `0..i`. Budget reduction uses the truncated per-class
//! counts returned by [`estimate`], so the remaining budget stays integral.

use tracing::debug;

use crate::domain::{AggregateResult, InstrumentConfig};
use crate::error::EstimateError;
use crate::estimate::single::{MAX_TARGETS, estimate, validate_instrument};

/// Estimate the overall assignment probability for prioritized target classes.
///
/// Returns [`EstimateError::EmptyTargetSet`] when no class contributes a target
/// (including an empty class list).
pub fn aggregate(target_densities: &[f64], instrument: &InstrumentConfig) -> Result<AggregateResult, EstimateError> {
    validate_instrument(instrument)?;

    let mut per_class_assigned = Vec::with_capacity(target_densities.len());
    let mut per_class_targets = Vec::with_capacity(target_densities.len());
    let mut consumed: u64 = 0;

    for (i, &density) in target_densities.iter().enumerate() {
        let remaining = instrument.fiber_count - consumed as f64;
        let r = estimate(density, &instrument.with_fiber_count(remaining))?;
        debug!(
            class = i,
            density,
            remaining,
            assigned = r.assigned_fibers,
            targets = r.total_targets,
            "aggregated class"
        );
        consumed = consumed.saturating_add(r.assigned_fibers);
        per_class_assigned.push(r.assigned_fibers);
        per_class_targets.push(r.total_targets);
    }

    let total_targets = per_class_targets
        .iter()
        .try_fold(0u64, |acc, &n| acc.checked_add(n))
        .ok_or_else(|| EstimateError::TooManyTargets {
            targets: per_class_targets.iter().map(|&n| n as f64).sum(),
            limit: u64::MAX,
        })?;
    if total_targets == 0 {
        return Err(EstimateError::EmptyTargetSet {
            classes: target_densities.len(),
        });
    }

    Ok(AggregateResult {
        overall_probability: consumed as f64 / total_targets as f64,
        per_class_assigned,
        per_class_targets,
    })
}

/// Fiber budget each class saw before it was served, in input order.
pub fn budgets_before(result: &AggregateResult, fiber_count: f64) -> Vec<f64> {
    let mut consumed = 0u64;
    result
        .per_class_assigned
        .iter()
        .map(|&assigned| {
            let before = fiber_count - consumed as f64;
            consumed += assigned;
            before
        })
        .collect()
}
