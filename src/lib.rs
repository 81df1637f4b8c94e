//! `fa-prob` library crate.
//!
//! Deterministic estimate of fiber assignment efficiency for one pointing of a
//! multi-object spectroscopic survey, for a single target class or for several
//! classes sharing one fiber budget in priority order.
//!
//! The binary (`faprob`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the estimator can be embedded in survey-planning scripts directly

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod estimate;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;

pub use domain::{AggregateResult, EstimationResult, InstrumentConfig};
pub use error::{AppError, EstimateError};
pub use estimate::{aggregate, estimate};
