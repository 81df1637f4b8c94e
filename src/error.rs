use thiserror::Error;

/// Failures of the estimator core.
///
/// Budget exhaustion is deliberately absent: an empty or over-drawn fiber
/// budget is a valid input that yields zero assignments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("Invalid instrument geometry: focal-plane area {focal_plane_area} and patrol area {fiber_patrol_area} must both be > 0.")]
    InvalidGeometry {
        focal_plane_area: f64,
        fiber_patrol_area: f64,
    },

    #[error("Target density must be >= 0 (got {0}).")]
    NegativeDensity(f64),

    #[error("Non-finite input: {name}={value}.")]
    NonFinite { name: &'static str, value: f64 },

    #[error("Too many targets in one class: {targets} exceeds the limit of {limit}.")]
    TooManyTargets { targets: f64, limit: u64 },

    #[error("No targets across {classes} class(es); assignment probability is undefined.")]
    EmptyTargetSet { classes: usize },
}

impl EstimateError {
    /// Process exit code used when this error reaches the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            EstimateError::EmptyTargetSet { .. } => 3,
            _ => 2,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<EstimateError> for AppError {
    fn from(err: EstimateError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_target_set_maps_to_no_data_exit_code() {
        let err: AppError = EstimateError::EmptyTargetSet { classes: 3 }.into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("3 class"));
    }

    #[test]
    fn validation_errors_map_to_usage_exit_code() {
        let err: AppError = EstimateError::NegativeDensity(-1.0).into();
        assert_eq!(err.exit_code(), 2);
    }
}
