//! Input/output helpers.
//!
//! - scenario JSON input (`scenario`)
//! - result exports (JSON/CSV) (`export`)

pub mod export;
pub mod scenario;

pub use export::*;
pub use scenario::*;
