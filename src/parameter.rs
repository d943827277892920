use core::fmt;
use ndarray::prelude::*;
use num::complex::Complex64;
use serde::{Deserialize, Serialize};
use simple_error::{bail, SimpleError};
use std::str::FromStr;

/// Network representation of a one-port measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementType {
    S,
    Y,
    #[default]
    Z,
}

impl MeasurementType {
    // Convert text from a String into MeasurementType
    pub fn from_string(val: String) -> Result<MeasurementType, SimpleError> {
        match val.to_lowercase().as_str() {
            "s" => Ok(MeasurementType::S),
            "y" => Ok(MeasurementType::Y),
            "z" => Ok(MeasurementType::Z),
            _ => bail!("string not a valid measurement type"),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            MeasurementType::S => "S",
            MeasurementType::Y => "Y",
            MeasurementType::Z => "Z",
        }
    }
}

impl FromStr for MeasurementType {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MeasurementType::from_string(s.to_string())
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Scalar projection of complex samples used by the least-squares objective.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexModifier {
    Real,
    Imag,
    #[default]
    Mag,
    /// Phase in degrees
    Angle,
    Db,
    /// Real and imaginary part interleaved, so the squared distance is |Δ|²
    Complex,
}

impl ComplexModifier {
    pub fn from_string(val: String) -> Result<ComplexModifier, SimpleError> {
        match val.to_lowercase().as_str() {
            "re" | "real" => Ok(ComplexModifier::Real),
            "im" | "imag" => Ok(ComplexModifier::Imag),
            "mag" | "abs" | "magnitude" => Ok(ComplexModifier::Mag),
            "ang" | "angle" | "phase" | "deg" => Ok(ComplexModifier::Angle),
            "db" => Ok(ComplexModifier::Db),
            "cpx" | "complex" | "ri" => Ok(ComplexModifier::Complex),
            _ => bail!("string not a valid complex modifier"),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            ComplexModifier::Real => "Re",
            ComplexModifier::Imag => "Im",
            ComplexModifier::Mag => "Mag",
            ComplexModifier::Angle => "Angle",
            ComplexModifier::Db => "dB",
            ComplexModifier::Complex => "Complex",
        }
    }

    /// Scalar form of one sample. `Complex` has none and falls back to the
    /// magnitude; [`ComplexModifier::project`] interleaves re and im for it.
    pub fn apply(&self, val: &Complex64) -> f64 {
        match self {
            ComplexModifier::Real => val.re,
            ComplexModifier::Imag => val.im,
            ComplexModifier::Mag => val.norm(),
            ComplexModifier::Angle => val.arg().to_degrees(),
            ComplexModifier::Db => 20.0 * val.norm().log10(),
            ComplexModifier::Complex => val.norm(),
        }
    }

    /// Projects a whole sweep into the real sequence the objective compares.
    pub fn project(&self, data: &Array1<Complex64>) -> Array1<f64> {
        match self {
            ComplexModifier::Complex => {
                Array1::from_shape_fn(2 * data.len(), |i| match i % 2 {
                    0 => data[i / 2].re,
                    _ => data[i / 2].im,
                })
            }
            _ => data.map(|x| self.apply(x)),
        }
    }
}

impl FromStr for ComplexModifier {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComplexModifier::from_string(s.to_string())
    }
}

impl fmt::Display for ComplexModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
