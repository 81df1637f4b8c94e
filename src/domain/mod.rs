//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the instrument description (`InstrumentConfig`) and its reference defaults
//! - estimator outputs (`EstimationResult`, `AggregateResult`, `SweepPoint`)
//! - scenario / sweep inputs (`Scenario`, `TargetClass`, `SweepConfig`)

pub mod types;

pub use types::*;
