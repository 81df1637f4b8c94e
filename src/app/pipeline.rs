//! Shared run logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! resolve instrument -> estimate / aggregate / sweep -> outputs
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::info;

use crate::domain::{
    AggregateResult, EstimationResult, InstrumentConfig, InstrumentOverrides, Scenario, SweepConfig, SweepPoint,
};
use crate::error::AppError;

/// Apply override layers on top of a base instrument, lowest priority first.
pub fn resolve_instrument(base: InstrumentConfig, layers: &[InstrumentOverrides]) -> InstrumentConfig {
    layers.iter().fold(base, |acc, layer| layer.apply(acc))
}

/// Outputs of a single-class run.
#[derive(Debug, Clone)]
pub struct EstimateRun {
    pub instrument: InstrumentConfig,
    pub density: f64,
    pub result: EstimationResult,
}

/// Outputs of a multi-class run.
#[derive(Debug, Clone)]
pub struct AggregateRun {
    pub instrument: InstrumentConfig,
    pub scenario: Scenario,
    pub result: AggregateResult,
}

/// Outputs of a density sweep.
#[derive(Debug, Clone)]
pub struct SweepRun {
    pub instrument: InstrumentConfig,
    pub config: SweepConfig,
    pub points: Vec<SweepPoint>,
}

pub fn run_estimate(instrument: InstrumentConfig, density: f64) -> Result<EstimateRun, AppError> {
    let result = crate::estimate::estimate(density, &instrument)?;
    info!(
        density,
        targets = result.total_targets,
        assigned = result.assigned_fibers,
        "single-class estimate done"
    );
    Ok(EstimateRun {
        instrument,
        density,
        result,
    })
}

/// Run the aggregator on a scenario.
///
/// `base` is the environment-resolved instrument; the scenario's own
/// overrides and then `flags` are layered on top of it.
pub fn run_aggregate(
    base: InstrumentConfig,
    scenario: Scenario,
    flags: &InstrumentOverrides,
) -> Result<AggregateRun, AppError> {
    if scenario.classes.is_empty() {
        return Err(AppError::new(2, "No target classes given (use --density or --scenario)."));
    }
    let instrument = resolve_instrument(base, &[scenario.instrument, *flags]);
    let result = crate::estimate::aggregate(&scenario.densities(), &instrument)?;
    info!(
        classes = scenario.classes.len(),
        assigned = result.total_assigned(),
        targets = result.total_targets(),
        probability = result.overall_probability,
        "aggregate done"
    );
    Ok(AggregateRun {
        instrument,
        scenario,
        result,
    })
}

pub fn run_sweep(instrument: InstrumentConfig, config: SweepConfig) -> Result<SweepRun, AppError> {
    let points = crate::estimate::sweep(&config, &instrument)?;
    info!(points = points.len(), "sweep done");
    Ok(SweepRun {
        instrument,
        config,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SweepScale;

    #[test]
    fn later_layers_win() {
        let scenario_layer = InstrumentOverrides {
            fiber_count: Some(9000.0),
            focal_plane_area: Some(7.0),
            ..Default::default()
        };
        let flag_layer = InstrumentOverrides {
            fiber_count: Some(100.0),
            ..Default::default()
        };
        let cfg = resolve_instrument(InstrumentConfig::default(), &[scenario_layer, flag_layer]);
        assert_eq!(cfg.fiber_count, 100.0);
        assert_eq!(cfg.focal_plane_area, 7.0);
        assert_eq!(cfg.fiber_patrol_area, 0.0015);
    }

    #[test]
    fn aggregate_uses_scenario_overrides() {
        let mut scenario = Scenario::from_densities(&[500.0, 500.0]);
        scenario.instrument.fiber_count = Some(100.0);
        let run = run_aggregate(InstrumentConfig::default(), scenario, &InstrumentOverrides::default()).unwrap();
        assert_eq!(run.instrument.fiber_count, 100.0);
        assert_eq!(run.result.per_class_assigned, vec![52, 25]);
    }

    #[test]
    fn aggregate_without_classes_is_usage_error() {
        let err = run_aggregate(
            InstrumentConfig::default(),
            Scenario::from_densities(&[]),
            &InstrumentOverrides::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn aggregate_with_no_targets_is_no_data_error() {
        let err = run_aggregate(
            InstrumentConfig::default(),
            Scenario::from_densities(&[0.0, 0.0, 0.0]),
            &InstrumentOverrides::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn estimate_propagates_geometry_errors() {
        let mut cfg = InstrumentConfig::default();
        cfg.focal_plane_area = -1.0;
        assert_eq!(run_estimate(cfg, 10.0).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn sweep_run_keeps_config() {
        let config = SweepConfig {
            min_density: 0.0,
            max_density: 10.0,
            steps: 3,
            scale: SweepScale::Linear,
        };
        let run = run_sweep(InstrumentConfig::default(), config).unwrap();
        assert_eq!(run.points.len(), 3);
        assert_eq!(run.config, config);
    }
}
