//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - resolves the instrument (defaults, environment, scenario, flags)
//! - runs estimates / aggregates / sweeps
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{AggregateArgs, Command, EstimateArgs, InstrumentArgs, SweepArgs};
use crate::domain::{Scenario, SweepConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `faprob` binary.
pub fn run() -> Result<(), AppError> {
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    crate::logging::init(cli.verbose);

    match cli.command {
        Command::Estimate(args) => handle_estimate(args),
        Command::Aggregate(args) => handle_aggregate(args),
        Command::Sweep(args) => handle_sweep(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let instrument = args.instrument.overrides().apply(crate::config::instrument_from_env()?);
    let run = pipeline::run_estimate(instrument, args.density)?;

    if args.json {
        println!("{}", to_json(&run.result)?);
    } else {
        println!(
            "{}",
            crate::report::format_estimate(run.density, &run.instrument, &run.result)
        );
    }
    Ok(())
}

fn handle_aggregate(args: AggregateArgs) -> Result<(), AppError> {
    let base = crate::config::instrument_from_env()?;
    let scenario = match &args.scenario {
        Some(path) => crate::io::read_scenario_json(path)?,
        None => Scenario::from_densities(&args.densities),
    };
    let run = pipeline::run_aggregate(base, scenario, &args.instrument.overrides())?;

    if args.json {
        println!("{}", to_json(&run.result)?);
    } else {
        println!(
            "{}",
            crate::report::format_aggregate(&run.scenario.classes, &run.instrument, &run.result)
        );
    }

    if let Some(path) = &args.export {
        let report = crate::io::aggregate_report(&run.instrument, &run.scenario.classes, &run.result);
        crate::io::write_aggregate_json(path, &report)?;
    }
    Ok(())
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let instrument = args.instrument.overrides().apply(crate::config::instrument_from_env()?);
    let config = SweepConfig {
        min_density: args.min,
        max_density: args.max,
        steps: args.steps,
        scale: args.scale,
    };
    let run = pipeline::run_sweep(instrument, config)?;

    println!("{}", crate::report::format_sweep(&run.points, &run.instrument));
    if args.plot {
        println!(
            "{}",
            crate::plot::render_sweep_plot(&run.points, args.width, args.height)
        );
    }

    if let Some(path) = &args.export_csv {
        crate::io::write_sweep_csv(path, &run.points, &run.instrument)?;
    }
    Ok(())
}

fn handle_tui(args: InstrumentArgs) -> Result<(), AppError> {
    let instrument = args.overrides().apply(crate::config::instrument_from_env()?);
    crate::tui::run(instrument)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::new(4, format!("Failed to serialize result: {e}")))
}

/// Rewrite argv so common shorthands map onto subcommands.
///
/// Leading `-v`/`--verbose` flags are skipped before the rules apply:
/// - `faprob`                      -> `faprob tui`
/// - `faprob 2000 ...`             -> `faprob estimate --density 2000 ...`
/// - `faprob --fibers 5000 ...`    -> `faprob tui --fibers 5000 ...`
/// - `faprob --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let first = argv
        .iter()
        .skip(1)
        .position(|arg| !is_verbosity_flag(arg))
        .map(|i| i + 1);
    let Some(idx) = first else {
        argv.push("tui".to_string());
        return argv;
    };
    let arg = argv[idx].as_str();

    let is_top_level_help_or_version = matches!(arg, "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg, "estimate" | "aggregate" | "sweep" | "tui");
    if is_subcommand {
        return argv;
    }

    // A bare number is a density.
    if arg.parse::<f64>().is_ok() {
        argv.insert(idx, "--density".to_string());
        argv.insert(idx, "estimate".to_string());
        return argv;
    }

    // Any other flag is treated as "tui flags".
    if arg.starts_with('-') {
        argv.insert(idx, "tui".to_string());
        return argv;
    }

    argv
}

fn is_verbosity_flag(arg: &str) -> bool {
    arg == "--verbose" || arg.strip_prefix('-').is_some_and(|v| !v.is_empty() && v.chars().all(|c| c == 'v'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["faprob"])), argv(&["faprob", "tui"]));
    }

    #[test]
    fn bare_density_becomes_estimate() {
        assert_eq!(
            rewrite_args(argv(&["faprob", "2000", "--fibers", "5000"])),
            argv(&["faprob", "estimate", "--density", "2000", "--fibers", "5000"])
        );
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["faprob", "--fibers", "5000"])),
            argv(&["faprob", "tui", "--fibers", "5000"])
        );
    }

    #[test]
    fn verbosity_before_shorthands_is_kept_in_front() {
        assert_eq!(
            rewrite_args(argv(&["faprob", "-v", "--fibers", "5000"])),
            argv(&["faprob", "-v", "tui", "--fibers", "5000"])
        );
        assert_eq!(
            rewrite_args(argv(&["faprob", "-vv", "--verbose", "2000"])),
            argv(&["faprob", "-vv", "--verbose", "estimate", "--density", "2000"])
        );
        assert_eq!(rewrite_args(argv(&["faprob", "-v"])), argv(&["faprob", "-v", "tui"]));
    }

    #[test]
    fn subcommands_help_and_verbosity_untouched() {
        for args in [
            &["faprob", "sweep", "--plot"][..],
            &["faprob", "--help"][..],
            &["faprob", "-vv", "aggregate", "-d", "1"][..],
        ] {
            assert_eq!(rewrite_args(argv(args)), argv(args));
        }
    }
}
