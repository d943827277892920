use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Descriptor of scaling
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Scale {
    Atto,
    Femto,
    Pico,
    Nano,
    Micro,
    Milli,
    #[default]
    Base,
    Kilo,
    Mega,
    Giga,
    Tera,
}

impl Scale {
    const ALL: [Scale; 11] = [
        Scale::Atto,
        Scale::Femto,
        Scale::Pico,
        Scale::Nano,
        Scale::Micro,
        Scale::Milli,
        Scale::Base,
        Scale::Kilo,
        Scale::Mega,
        Scale::Giga,
        Scale::Tera,
    ];

    pub fn to_str(&self) -> &str {
        match self {
            Scale::Atto => "a",
            Scale::Femto => "f",
            Scale::Pico => "p",
            Scale::Nano => "n",
            Scale::Micro => "u",
            Scale::Milli => "m",
            Scale::Base => "",
            Scale::Kilo => "k",
            Scale::Mega => "M",
            Scale::Giga => "G",
            Scale::Tera => "T",
        }
    }

    /// Provides multiplier for scale
    /// Scale::Pico = 1e-12
    pub fn multiplier(&self) -> f64 {
        match self {
            Scale::Atto => 1e-18,
            Scale::Femto => 1e-15,
            Scale::Pico => 1e-12,
            Scale::Nano => 1e-9,
            Scale::Micro => 1e-6,
            Scale::Milli => 1e-3,
            Scale::Base => 1.0,
            Scale::Kilo => 1e3,
            Scale::Mega => 1e6,
            Scale::Giga => 1e9,
            Scale::Tera => 1e12,
        }
    }

    /// Largest engineering prefix that keeps `val` at or above one, clamped to
    /// the atto..tera range. Zero and non-finite values map to `Scale::Base`.
    pub fn from_val(val: f64) -> Scale {
        let mag = val.abs();
        if mag == 0.0 || !mag.is_finite() {
            return Scale::Base;
        }
        Scale::ALL
            .iter()
            .rev()
            .find(|s| mag >= s.multiplier())
            .copied()
            .unwrap_or(Scale::Atto)
    }

    pub fn scale(&self, val: f64) -> f64 {
        val / self.multiplier()
    }

    pub fn scale_array(&self, val: &Array1<f64>) -> Array1<f64> {
        val.map(|&x| x / self.multiplier())
    }

    pub fn unscale(&self, val: f64) -> f64 {
        val * self.multiplier()
    }

    pub fn unscale_array(&self, val: &Array1<f64>) -> Array1<f64> {
        val.map(|&x| x * self.multiplier())
    }
}

impl FromStr for Scale {
    type Err = Box<dyn std::error::Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Atto" | "atto" | "a" | "aF" | "aH" => Ok(Scale::Atto),
            "Femto" | "femto" | "f" | "fF" | "fH" => Ok(Scale::Femto),
            "Pico" | "pico" | "p" | "pF" | "pH" => Ok(Scale::Pico),
            "Nano" | "nano" | "n" | "nF" | "nH" => Ok(Scale::Nano),
            "Micro" | "micro" | "u" | "uΩ" | "μΩ" | "uF" | "μF" | "uH" | "μH" => {
                Ok(Scale::Micro)
            }
            "Milli" | "milli" | "m" | "mΩ" | "mF" | "mH" => Ok(Scale::Milli),
            "Kilo" | "kilo" | "k" | "kΩ" | "kHz" | "khz" => Ok(Scale::Kilo),
            "Mega" | "mega" | "M" | "MΩ" | "MHz" | "mhz" => Ok(Scale::Mega),
            "Giga" | "giga" | "G" | "GΩ" | "GHz" | "ghz" => Ok(Scale::Giga),
            "Tera" | "tera" | "T" | "THz" | "thz" => Ok(Scale::Tera),
            _ => Ok(Scale::Base),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
