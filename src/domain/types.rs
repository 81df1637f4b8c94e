//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed by value into the estimator core
//! - read from scenario JSON files
//! - exported alongside computed results

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Reference focal-plane area (deg²).
pub const DEFAULT_FOCAL_PLANE_AREA: f64 = 8.63;

/// Reference per-fiber patrol area (deg²).
pub const DEFAULT_FIBER_PATROL_AREA: f64 = 0.0015;

/// Reference fiber count.
pub const DEFAULT_FIBER_COUNT: f64 = 13000.0;

/// Physical parameters of the instrument for one pointing.
///
/// The defaults reproduce the reference survey design (Stage-5 spectroscopic
/// survey numbers as revised in February 2024). Every field can be overridden
/// from the environment, a scenario file, or CLI flags.
///
/// `fiber_count` is a float because the aggregator passes a running budget
/// that may be fractional or negative (already over-drawn).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentConfig {
    /// Sky area imaged in one pointing (deg²).
    pub focal_plane_area: f64,
    /// Sky area a single fiber can physically reach (deg²).
    pub fiber_patrol_area: f64,
    /// Fibers available to this call.
    pub fiber_count: f64,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            focal_plane_area: DEFAULT_FOCAL_PLANE_AREA,
            fiber_patrol_area: DEFAULT_FIBER_PATROL_AREA,
            fiber_count: DEFAULT_FIBER_COUNT,
        }
    }
}

impl InstrumentConfig {
    /// Same geometry, different fiber budget.
    pub fn with_fiber_count(self, fiber_count: f64) -> Self {
        Self { fiber_count, ..self }
    }

    /// Fibers whose patrol areas would tile the focal plane exactly once.
    ///
    /// Above this remaining budget the per-target probability clamps to 1.
    pub fn saturation_fibers(&self) -> f64 {
        self.focal_plane_area / self.fiber_patrol_area
    }
}

/// Per-field instrument overrides; `None` keeps the underlying value.
///
/// Used for every configuration layer above the defaults (environment,
/// scenario files, CLI flags).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentOverrides {
    pub focal_plane_area: Option<f64>,
    pub fiber_patrol_area: Option<f64>,
    pub fiber_count: Option<f64>,
}

impl InstrumentOverrides {
    pub fn apply(&self, base: InstrumentConfig) -> InstrumentConfig {
        InstrumentConfig {
            focal_plane_area: self.focal_plane_area.unwrap_or(base.focal_plane_area),
            fiber_patrol_area: self.fiber_patrol_area.unwrap_or(base.fiber_patrol_area),
            fiber_count: self.fiber_count.unwrap_or(base.fiber_count),
        }
    }
}

/// Outcome of estimating a single target class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationResult {
    /// Expected fibers assigned, truncated toward zero.
    pub assigned_fibers: u64,
    /// `floor(density * focal_plane_area)`.
    pub total_targets: u64,
}

impl EstimationResult {
    /// Fraction of targets that receive a fiber (`None` with no targets).
    pub fn assigned_fraction(&self) -> Option<f64> {
        if self.total_targets == 0 {
            None
        } else {
            Some(self.assigned_fibers as f64 / self.total_targets as f64)
        }
    }
}

/// Outcome of sharing one fiber budget across prioritized target classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// `Σ assigned / Σ targets`, always in `[0, 1]`.
    pub overall_probability: f64,
    /// Assigned fibers per class, in input (priority) order.
    pub per_class_assigned: Vec<u64>,
    /// Total targets per class, in input (priority) order.
    pub per_class_targets: Vec<u64>,
}

impl AggregateResult {
    pub fn total_assigned(&self) -> u64 {
        self.per_class_assigned.iter().sum()
    }

    pub fn total_targets(&self) -> u64 {
        self.per_class_targets.iter().sum()
    }
}

/// A named target class as it appears in scenario files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetClass {
    pub name: String,
    /// Targets per unit focal-plane area.
    pub density: f64,
}

/// A multi-class scenario: instrument overrides plus classes in priority
/// order (first class is served first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub instrument: InstrumentOverrides,
    pub classes: Vec<TargetClass>,
}

impl Scenario {
    /// Build an anonymous scenario from bare densities (`class1`, `class2`, ...).
    pub fn from_densities(densities: &[f64]) -> Self {
        let classes = densities
            .iter()
            .enumerate()
            .map(|(i, &density)| TargetClass {
                name: format!("class{}", i + 1),
                density,
            })
            .collect();
        Self {
            instrument: InstrumentOverrides::default(),
            classes,
        }
    }

    pub fn densities(&self) -> Vec<f64> {
        self.classes.iter().map(|c| c.density).collect()
    }
}

/// Spacing of density grid points in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SweepScale {
    Linear,
    Log,
}

/// Density sweep request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub min_density: f64,
    pub max_density: f64,
    pub steps: usize,
    pub scale: SweepScale,
}

/// One evaluated grid point of a density sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub density: f64,
    pub total_targets: u64,
    pub assigned_fibers: u64,
    /// `assigned / targets` (0 when there are no targets).
    pub assigned_fraction: f64,
    /// `assigned / fiber_count` (0 when the budget is not positive).
    pub fiber_usage: f64,
}

/// A saved aggregate run (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateReport {
    pub tool: String,
    pub generated: chrono::DateTime<chrono::Utc>,
    pub instrument: InstrumentConfig,
    pub classes: Vec<TargetClass>,
    pub result: AggregateResult,
}
