//! Density sweeps.
//!
//! A sweep evaluates the single-class estimate on a grid of densities for a
//! fixed instrument. Grid points are independent, so they are evaluated in
//! parallel and collected back in grid order.

use rayon::prelude::*;

use crate::domain::{InstrumentConfig, SweepConfig, SweepPoint, SweepScale};
use crate::error::AppError;
use crate::estimate::single::{estimate, validate_instrument};

/// Generate the density grid for a sweep (endpoints inclusive).
pub fn density_grid(config: &SweepConfig) -> Result<Vec<f64>, AppError> {
    let SweepConfig {
        min_density: min,
        max_density: max,
        steps,
        scale,
    } = *config;

    if !(min.is_finite() && max.is_finite() && min >= 0.0 && max > min) {
        return Err(AppError::new(
            2,
            format!("Invalid density range: min={min}, max={max} (must be finite, >=0, and max>min)."),
        ));
    }
    if steps < 2 {
        return Err(AppError::new(2, "Sweep steps must be >= 2."));
    }

    let out = match scale {
        SweepScale::Linear => {
            let step = (max - min) / (steps as f64 - 1.0);
            (0..steps).map(|i| min + step * i as f64).collect()
        }
        SweepScale::Log => {
            if min <= 0.0 {
                return Err(AppError::new(2, "Log-scale sweeps need min density > 0."));
            }
            let ln_min = min.ln();
            let step = (max.ln() - ln_min) / (steps as f64 - 1.0);
            (0..steps).map(|i| (ln_min + step * i as f64).exp()).collect()
        }
    };
    Ok(out)
}

/// Evaluate the estimator on every grid density.
pub fn sweep(config: &SweepConfig, instrument: &InstrumentConfig) -> Result<Vec<SweepPoint>, AppError> {
    validate_instrument(instrument)?;
    let grid = density_grid(config)?;

    let points = grid
        .par_iter()
        .map(|&density| -> Result<SweepPoint, AppError> {
            let r = estimate(density, instrument)?;
            let assigned_fraction = r.assigned_fraction().unwrap_or(0.0);
            let fiber_usage = if instrument.fiber_count > 0.0 {
                r.assigned_fibers as f64 / instrument.fiber_count
            } else {
                0.0
            };
            Ok(SweepPoint {
                density,
                total_targets: r.total_targets,
                assigned_fibers: r.assigned_fibers,
                assigned_fraction,
                fiber_usage,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(points)
}
