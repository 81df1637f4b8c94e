//! Single-class fiber assignment estimate.
//!
//! Targets are visited one at a time. Target `k` finds a free fiber within its
//! patrol radius with probability
//!
//! `p_k = clamp((N - a_k) * patrol_area / focal_plane_area, 0, 1)`
//!
//! where `N` is the fiber budget and `a_k` the expected number of fibers
//! already consumed. The recursion `a_{k+1} = a_k + p_k` is an expected-value
//! model, not a random draw: results are deterministic.
//!
//! Notes:
//! - While `N - a_k` exceeds `focal_plane_area / patrol_area` every target is
//!   served (`p_k = 1`); below it the remaining supply decays geometrically.
//! - With `N <= 0` every `p_k` clamps to 0 and nothing is assigned.
//! - A step never takes more than the `N - a_k` fibers still free, so
//!   `a_k <= N` holds even when the patrol area exceeds the focal plane.
//! - A class may hold at most [`MAX_TARGETS`] targets.

use tracing::{debug, trace};

use crate::domain::{EstimationResult, InstrumentConfig};
use crate::error::EstimateError;

/// Largest per-class target count; every count up to it is exact in `f64`.
pub const MAX_TARGETS: u64 = 1 << 53;

/// Estimate assigned fibers and total targets for one target class.
pub fn estimate(target_density: f64, instrument: &InstrumentConfig) -> Result<EstimationResult, EstimateError> {
    validate_instrument(instrument)?;
    validate_density(target_density)?;

    let InstrumentConfig {
        focal_plane_area,
        fiber_patrol_area,
        fiber_count,
    } = *instrument;

    let expected_targets = target_density * focal_plane_area;
    if expected_targets > MAX_TARGETS as f64 {
        return Err(EstimateError::TooManyTargets {
            targets: expected_targets,
            limit: MAX_TARGETS,
        });
    }
    // Within [0, MAX_TARGETS] here, so the cast truncates exactly like floor.
    let total_targets = expected_targets.floor() as u64;
    if total_targets == 0 {
        debug!(target_density, "no targets in focal plane");
        return Ok(EstimationResult {
            assigned_fibers: 0,
            total_targets: 0,
        });
    }

    let mut assigned = 0.0_f64;
    for k in 0..total_targets {
        let left = fiber_count - assigned;
        let prob = (left * fiber_patrol_area / focal_plane_area)
            .clamp(0.0, 1.0)
            .min(left.max(0.0));
        if assigned + prob == assigned {
            // `assigned` is fixed from here on, so every later step is identical.
            trace!(step = k, assigned, "fiber supply stalled");
            break;
        }
        assigned += prob;
    }

    let result = EstimationResult {
        assigned_fibers: assigned.floor() as u64,
        total_targets,
    };
    debug!(
        target_density,
        fiber_count,
        total_targets,
        assigned_fibers = result.assigned_fibers,
        "estimated class"
    );
    Ok(result)
}

/// Reject instrument descriptions the recursion cannot handle.
///
/// A negative or fractional `fiber_count` is valid (it is a running budget).
pub fn validate_instrument(instrument: &InstrumentConfig) -> Result<(), EstimateError> {
    let fields = [
        ("focal_plane_area", instrument.focal_plane_area),
        ("fiber_patrol_area", instrument.fiber_patrol_area),
        ("fiber_count", instrument.fiber_count),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(EstimateError::NonFinite { name, value });
        }
    }
    if instrument.focal_plane_area <= 0.0 || instrument.fiber_patrol_area <= 0.0 {
        return Err(EstimateError::InvalidGeometry {
            focal_plane_area: instrument.focal_plane_area,
            fiber_patrol_area: instrument.fiber_patrol_area,
        });
    }
    Ok(())
}

fn validate_density(target_density: f64) -> Result<(), EstimateError> {
    if !target_density.is_finite() {
        return Err(EstimateError::NonFinite {
            name: "target_density",
            value: target_density,
        });
    }
    if target_density < 0.0 {
        return Err(EstimateError::NegativeDensity(target_density));
    }
    Ok(())
}
