//! Instrument configuration layering.
//!
//! Resolution order (later wins):
//!
//! 1. reference defaults (`InstrumentConfig::default()`)
//! 2. environment variables, optionally loaded from a `.env` file
//! 3. explicit overrides (scenario file, CLI flags)

use tracing::debug;

use crate::domain::{InstrumentConfig, InstrumentOverrides};
use crate::error::AppError;

pub const ENV_FOCAL_PLANE_AREA: &str = "FAPROB_FP_AREA";
pub const ENV_FIBER_PATROL_AREA: &str = "FAPROB_PATROL_AREA";
pub const ENV_FIBER_COUNT: &str = "FAPROB_FIBERS";

/// Defaults overlaid with the process environment (and `.env`, if present).
pub fn instrument_from_env() -> Result<InstrumentConfig, AppError> {
    dotenvy::dotenv().ok();
    instrument_from_lookup(|key| std::env::var(key).ok())
}

/// Defaults overlaid with values from an arbitrary key lookup.
pub fn instrument_from_lookup<F>(lookup: F) -> Result<InstrumentConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let overrides = InstrumentOverrides {
        focal_plane_area: parse_var(&lookup, ENV_FOCAL_PLANE_AREA)?,
        fiber_patrol_area: parse_var(&lookup, ENV_FIBER_PATROL_AREA)?,
        fiber_count: parse_var(&lookup, ENV_FIBER_COUNT)?,
    };
    if overrides != InstrumentOverrides::default() {
        debug!(?overrides, "instrument overrides from environment");
    }
    Ok(overrides.apply(InstrumentConfig::default()))
}

fn parse_var<F>(lookup: &F, key: &str) -> Result<Option<f64>, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|e| AppError::new(2, format!("Invalid {key}='{trimmed}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = instrument_from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg, InstrumentConfig::default());
    }

    #[test]
    fn environment_overrides_subset() {
        let cfg = instrument_from_lookup(lookup_from(&[(ENV_FIBER_COUNT, " 5000 "), (ENV_FOCAL_PLANE_AREA, "")]))
            .unwrap();
        assert_eq!(cfg.fiber_count, 5000.0);
        assert_eq!(cfg.focal_plane_area, 8.63);
        assert_eq!(cfg.fiber_patrol_area, 0.0015);
    }

    #[test]
    fn unparseable_value_is_config_error() {
        let err = instrument_from_lookup(lookup_from(&[(ENV_FIBER_PATROL_AREA, "wide")])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains(ENV_FIBER_PATROL_AREA));
    }
}
