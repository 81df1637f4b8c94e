//! Fiber assignment estimation.
//!
//! Responsibilities:
//!
//! - single-class depletion estimate (`single`)
//! - priority-ordered budget sharing across classes (`aggregate`)
//! - density sweeps for one instrument (parallel, `sweep`)

pub mod aggregate;
pub mod single;
pub mod sweep;

pub use aggregate::*;
pub use single::*;
pub use sweep::*;
