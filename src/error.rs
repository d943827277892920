use std::fmt;

/// Configuration errors raised by the fitting engine
#[derive(Debug)]
pub enum FitError {
    EmptyFrequencyRange,
    ExpandUnsupported(String),
    InvalidDimension { expected: usize, actual: usize },
    InvalidFrequencyRange { f_min: f64, f_max: f64 },
    LengthMismatch { measured: usize, simulated: usize },
    Minimizer(MinimizerError),
    Options(String),
    UnknownModel(usize),
    UnsortedFrequency,
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FitError::EmptyFrequencyRange => {
                write!(f, "No frequency points inside the requested range")
            }
            FitError::ExpandUnsupported(model) => {
                write!(f, "Model {} has no defined expansion", model)
            }
            FitError::InvalidDimension { expected, actual } => write!(
                f,
                "Invalid parameter dimension: expected {}, got {}",
                expected, actual
            ),
            FitError::InvalidFrequencyRange { f_min, f_max } => write!(
                f,
                "Invalid frequency range: max {} Hz smaller than min {} Hz",
                f_max, f_min
            ),
            FitError::LengthMismatch {
                measured,
                simulated,
            } => write!(
                f,
                "Measured data has {} points but the model has {}",
                measured, simulated
            ),
            FitError::Minimizer(err) => write!(f, "Minimizer error: {}", err),
            FitError::Options(msg) => write!(f, "Invalid options: {}", msg),
            FitError::UnknownModel(id) => write!(f, "Model idx {} not found", id),
            FitError::UnsortedFrequency => write!(f, "Frequency vector must be non-decreasing"),
        }
    }
}

impl std::error::Error for FitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FitError::Minimizer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MinimizerError> for FitError {
    fn from(err: MinimizerError) -> Self {
        FitError::Minimizer(err)
    }
}

impl From<serde_json::Error> for FitError {
    fn from(err: serde_json::Error) -> Self {
        FitError::Options(err.to_string())
    }
}

/// Error types for optimizers
#[derive(Debug, PartialEq)]
pub enum MinimizerError {
    InvalidDimension,
    InvalidInitialSimplex,
    InvalidMaxEvaluations,
    InvalidStepSize,
    InvalidTolerance,
}

impl fmt::Display for MinimizerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MinimizerError::InvalidDimension => write!(f, "Invalid dimension or empty vector"),
            MinimizerError::InvalidInitialSimplex => {
                write!(f, "Invalid initial simplex configuration")
            }
            MinimizerError::InvalidMaxEvaluations => {
                write!(f, "Maximum evaluation count must be at least one")
            }
            MinimizerError::InvalidStepSize => {
                write!(f, "Step size must be non-zero and finite")
            }
            MinimizerError::InvalidTolerance => write!(f, "Tolerance must be non-negative"),
        }
    }
}

impl std::error::Error for MinimizerError {}

pub type Result<T> = std::result::Result<T, FitError>;
