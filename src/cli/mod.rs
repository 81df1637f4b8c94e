//! Command-line parsing for the fiber assignment estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the estimation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{InstrumentOverrides, SweepScale};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "faprob", version, about = "Fiber assignment efficiency estimator for multi-object spectroscopy")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate assigned fibers for a single target class.
    Estimate(EstimateArgs),
    /// Share one fiber budget across target classes in priority order.
    Aggregate(AggregateArgs),
    /// Evaluate a single class over a grid of densities.
    Sweep(SweepArgs),
    /// Launch the interactive explorer.
    Tui(InstrumentArgs),
}

/// Instrument overrides shared by every subcommand.
///
/// Unset flags fall back to the environment (`FAPROB_*`, `.env`) and then to
/// the reference design.
#[derive(Debug, Args, Clone, Default)]
pub struct InstrumentArgs {
    /// Focal-plane area (deg²).
    #[arg(long = "fp-area")]
    pub fp_area: Option<f64>,

    /// Per-fiber patrol area (deg²).
    #[arg(long = "patrol-area")]
    pub patrol_area: Option<f64>,

    /// Fiber count (may be negative to model an over-drawn budget).
    #[arg(long, allow_negative_numbers = true)]
    pub fibers: Option<f64>,
}

impl InstrumentArgs {
    pub fn overrides(&self) -> InstrumentOverrides {
        InstrumentOverrides {
            focal_plane_area: self.fp_area,
            fiber_patrol_area: self.patrol_area,
            fiber_count: self.fibers,
        }
    }
}

/// Options for `faprob estimate`.
#[derive(Debug, Args, Clone)]
pub struct EstimateArgs {
    /// Target density (targets per deg²).
    #[arg(short = 'd', long)]
    pub density: f64,

    #[command(flatten)]
    pub instrument: InstrumentArgs,

    /// Print the result as JSON instead of a text report.
    #[arg(long)]
    pub json: bool,
}

/// Options for `faprob aggregate`.
#[derive(Debug, Args, Clone)]
pub struct AggregateArgs {
    /// Class densities in priority order (repeat the flag or comma-separate).
    #[arg(short = 'd', long = "density", value_delimiter = ',', conflicts_with = "scenario")]
    pub densities: Vec<f64>,

    /// Scenario JSON file with named classes and instrument overrides.
    #[arg(long, value_name = "JSON")]
    pub scenario: Option<PathBuf>,

    #[command(flatten)]
    pub instrument: InstrumentArgs,

    /// Export the run (instrument + classes + result) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Print the result as JSON instead of a text report.
    #[arg(long)]
    pub json: bool,
}

/// Options for `faprob sweep`.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    /// Lowest density of the grid.
    #[arg(long, default_value_t = 0.0)]
    pub min: f64,

    /// Highest density of the grid.
    #[arg(long, default_value_t = 4000.0)]
    pub max: f64,

    /// Number of grid points (endpoints included).
    #[arg(long, default_value_t = 41)]
    pub steps: usize,

    /// Grid spacing.
    #[arg(long, value_enum, default_value_t = SweepScale::Linear)]
    pub scale: SweepScale,

    #[command(flatten)]
    pub instrument: InstrumentArgs,

    /// Render an ASCII plot below the table.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export sweep points to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_and_delimited_densities() {
        let cli = Cli::parse_from(["faprob", "aggregate", "-d", "500,200", "--density", "50", "--fibers", "100"]);
        let Command::Aggregate(args) = cli.command else {
            panic!("expected aggregate");
        };
        assert_eq!(args.densities, vec![500.0, 200.0, 50.0]);
        assert_eq!(args.instrument.overrides().fiber_count, Some(100.0));
        assert_eq!(args.instrument.overrides().focal_plane_area, None);
    }

    #[test]
    fn scenario_conflicts_with_densities() {
        let res = Cli::try_parse_from(["faprob", "aggregate", "-d", "1", "--scenario", "s.json"]);
        assert!(res.is_err());
    }

    #[test]
    fn accepts_negative_fiber_budget() {
        let cli = Cli::parse_from(["faprob", "estimate", "-d", "500", "--fibers", "-50"]);
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate");
        };
        assert_eq!(args.instrument.fibers, Some(-50.0));
    }

    #[test]
    fn sweep_defaults() {
        let cli = Cli::parse_from(["faprob", "-v", "sweep"]);
        assert_eq!(cli.verbose, 1);
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(args.steps, 41);
        assert_eq!(args.scale, SweepScale::Linear);
        assert!(!args.plot);
    }
}
