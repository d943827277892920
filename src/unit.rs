use crate::scale::Scale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Descriptor of unit
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    None, // No Unit
    Hz,     // Frequency in Hz
    Farad,  // Capacitance in farads
    Henry,  // Inductance in henries
    Ohm,    // Resistance in ohms
}

impl Unit {
    pub fn to_str(&self) -> &str {
        match self {
            Unit::None => "",
            Unit::Hz => "Hz",
            Unit::Farad => "F",
            Unit::Henry => "H",
            Unit::Ohm => "Ω",
        }
    }

    /// Format `val` with the closest engineering prefix, e.g. `2.2 nH`.
    pub fn format(&self, val: f64) -> String {
        if *self == Unit::None {
            return format!("{}", val);
        }
        let scale = Scale::from_val(val);
        format!("{} {}{}", scale.scale(val), scale, self)
    }
}

impl FromStr for Unit {
    type Err = Box<dyn std::error::Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HZ" | "Hz" | "hz" => Ok(Unit::Hz),
            "Farad" | "farad" | "F" => Ok(Unit::Farad),
            "Henry" | "henry" | "H" => Ok(Unit::Henry),
            "Ohm" | "ohm" | "Ω" => Ok(Unit::Ohm),
            _ => Ok(Unit::None),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
