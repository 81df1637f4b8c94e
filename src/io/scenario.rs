//! Read scenario JSON files.
//!
//! A scenario lists target classes in priority order plus optional instrument
//! overrides:
//!
//! ```json
//! {
//!   "instrument": { "fiber_count": 10000 },
//!   "classes": [
//!     { "name": "LRG", "density": 600.0 },
//!     { "name": "ELG", "density": 1500.0 }
//!   ]
//! }
//! ```
//!
//! Instrument fields left out keep the value from the lower configuration
//! layers (environment, then reference defaults).

use std::fs::File;
use std::path::Path;

use crate::domain::Scenario;
use crate::error::AppError;

/// Read a scenario JSON file.
pub fn read_scenario_json(path: &Path) -> Result<Scenario, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open scenario JSON '{}': {e}", path.display())))?;
    let scenario: Scenario =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid scenario JSON: {e}")))?;

    if scenario.classes.is_empty() {
        return Err(AppError::new(2, format!("Scenario '{}' has no classes.", path.display())));
    }
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InstrumentConfig, InstrumentOverrides, TargetClass};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("faprob_{}_{name}", std::process::id()))
    }

    #[test]
    fn reads_partial_instrument_overrides() {
        let path = temp_path("partial.json");
        std::fs::write(
            &path,
            r#"{"instrument": {"fiber_count": 100}, "classes": [{"name": "LRG", "density": 500}]}"#,
        )
        .unwrap();

        let s = read_scenario_json(&path).unwrap();
        assert_eq!(s.instrument.fiber_count, Some(100.0));
        assert_eq!(s.instrument.focal_plane_area, None);
        assert_eq!(s.instrument.apply(InstrumentConfig::default()).focal_plane_area, 8.63);
        assert_eq!(s.classes[0].name, "LRG");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn serialized_scenario_reads_back_in_priority_order() {
        let path = temp_path("order.json");
        let scenario = Scenario {
            instrument: InstrumentOverrides {
                fiber_count: Some(9000.0),
                ..Default::default()
            },
            classes: vec![
                TargetClass { name: "BGS".to_string(), density: 1400.0 },
                TargetClass { name: "QSO".to_string(), density: 310.0 },
            ],
        };
        std::fs::write(&path, serde_json::to_string_pretty(&scenario).unwrap()).unwrap();
        let back = read_scenario_json(&path).unwrap();
        assert_eq!(back, scenario);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rejects_empty_class_list() {
        let path = temp_path("empty.json");
        std::fs::write(&path, r#"{"classes": []}"#).unwrap();
        let err = read_scenario_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_input_error() {
        let err = read_scenario_json(&temp_path("does_not_exist.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
