use crate::circuit::Slot;
use crate::consts::{N_MODELS, SKIN_START};
use crate::error::{FitError, Result};
use serde::{Deserialize, Serialize};
use simple_error::{bail, SimpleError};
use std::fmt;
use std::str::FromStr;

/// How a topology computes its impedance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Family {
    /// Ratio of two polynomials in `jw`
    Rational,
    /// Explicit network with a skin effect resistor
    Skin,
}

/// The 21 equivalent circuit topologies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CircuitType {
    Model0,
    Model1,
    Model2,
    Model3,
    Model4,
    Model5,
    Model6,
    Model7,
    Model8,
    Model9,
    Model10,
    Model11,
    Model12,
    Model13,
    Model14,
    Model15,
    Model16,
    Model17,
    Model18,
    Model19,
    Model20,
}

struct Topology {
    family: Family,
    /// Active slots, listed in reduced vector order
    slots: &'static [Slot],
}

const R_L: &[Slot] = &[Slot::R0, Slot::L];
const R_C: &[Slot] = &[Slot::R0, Slot::C0];
const R_L_C: &[Slot] = &[Slot::R0, Slot::L, Slot::C0];
const R_R1_C: &[Slot] = &[Slot::R0, Slot::R1, Slot::C0];
const R_R1_L_C: &[Slot] = &[Slot::R0, Slot::R1, Slot::L, Slot::C0];
const R_L_C_C1: &[Slot] = &[Slot::R0, Slot::L, Slot::C0, Slot::C1];
const SKIN_L_C: &[Slot] = &[Slot::R0, Slot::F0, Slot::Alpha, Slot::L, Slot::C0];
const SKIN_R1_C: &[Slot] = &[Slot::R0, Slot::F0, Slot::Alpha, Slot::R1, Slot::C0];
const SKIN_R1_L_C: &[Slot] = &[Slot::R0, Slot::F0, Slot::Alpha, Slot::R1, Slot::L, Slot::C0];
const SKIN_L_C_C1: &[Slot] = &[Slot::R0, Slot::F0, Slot::Alpha, Slot::L, Slot::C0, Slot::C1];

const fn rational(slots: &'static [Slot]) -> Topology {
    Topology {
        family: Family::Rational,
        slots,
    }
}

const fn skin(slots: &'static [Slot]) -> Topology {
    Topology {
        family: Family::Skin,
        slots,
    }
}

static TOPOLOGIES: [Topology; N_MODELS] = [
    rational(R_L),
    rational(R_L),
    rational(R_C),
    rational(R_C),
    rational(R_L_C),
    rational(R_L_C),
    rational(R_L_C),
    rational(R_L_C),
    rational(R_R1_C),
    rational(R_R1_L_C),
    rational(R_R1_L_C),
    rational(R_R1_L_C),
    rational(R_L_C_C1),
    skin(SKIN_L_C),
    skin(SKIN_L_C),
    skin(SKIN_L_C),
    skin(SKIN_R1_C),
    skin(SKIN_R1_L_C),
    skin(SKIN_R1_L_C),
    skin(SKIN_R1_L_C),
    skin(SKIN_L_C_C1),
];

impl CircuitType {
    pub const ALL: [CircuitType; N_MODELS] = [
        CircuitType::Model0,
        CircuitType::Model1,
        CircuitType::Model2,
        CircuitType::Model3,
        CircuitType::Model4,
        CircuitType::Model5,
        CircuitType::Model6,
        CircuitType::Model7,
        CircuitType::Model8,
        CircuitType::Model9,
        CircuitType::Model10,
        CircuitType::Model11,
        CircuitType::Model12,
        CircuitType::Model13,
        CircuitType::Model14,
        CircuitType::Model15,
        CircuitType::Model16,
        CircuitType::Model17,
        CircuitType::Model18,
        CircuitType::Model19,
        CircuitType::Model20,
    ];

    pub fn from_id(id: usize) -> Result<CircuitType> {
        CircuitType::ALL
            .get(id)
            .copied()
            .ok_or(FitError::UnknownModel(id))
    }

    pub fn id(&self) -> usize {
        *self as usize
    }

    fn topology(&self) -> &'static Topology {
        &TOPOLOGIES[self.id()]
    }

    pub fn family(&self) -> Family {
        self.topology().family
    }

    pub fn is_skin(&self) -> bool {
        self.id() >= SKIN_START
    }

    pub fn n_elements(&self) -> usize {
        self.topology().slots.len()
    }

    /// Active slots in reduced vector order.
    pub fn slots(&self) -> &'static [Slot] {
        self.topology().slots
    }

    /// Position of `slot` in the reduced vector, `None` when inactive.
    pub fn position(&self, slot: Slot) -> Option<usize> {
        self.slots().iter().position(|s| *s == slot)
    }

    pub fn is_active(&self, slot: Slot) -> bool {
        self.slots().contains(&slot)
    }

    // Convert text such as "MODEL13", "model13" or "13" into CircuitType
    pub fn from_string(val: String) -> std::result::Result<CircuitType, SimpleError> {
        let lower = val.trim().to_lowercase();
        let digits = lower.strip_prefix("model").unwrap_or(&lower);
        match digits.parse::<usize>() {
            Ok(id) if id < N_MODELS => Ok(CircuitType::ALL[id]),
            _ => bail!("string not a valid circuit type"),
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            CircuitType::Model0 => "MODEL0",
            CircuitType::Model1 => "MODEL1",
            CircuitType::Model2 => "MODEL2",
            CircuitType::Model3 => "MODEL3",
            CircuitType::Model4 => "MODEL4",
            CircuitType::Model5 => "MODEL5",
            CircuitType::Model6 => "MODEL6",
            CircuitType::Model7 => "MODEL7",
            CircuitType::Model8 => "MODEL8",
            CircuitType::Model9 => "MODEL9",
            CircuitType::Model10 => "MODEL10",
            CircuitType::Model11 => "MODEL11",
            CircuitType::Model12 => "MODEL12",
            CircuitType::Model13 => "MODEL13",
            CircuitType::Model14 => "MODEL14",
            CircuitType::Model15 => "MODEL15",
            CircuitType::Model16 => "MODEL16",
            CircuitType::Model17 => "MODEL17",
            CircuitType::Model18 => "MODEL18",
            CircuitType::Model19 => "MODEL19",
            CircuitType::Model20 => "MODEL20",
        }
    }
}

impl FromStr for CircuitType {
    type Err = SimpleError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        CircuitType::from_string(s.to_string())
    }
}

impl fmt::Display for CircuitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[cfg(test)]
mod topology_tests {
    use super::*;

    #[test]
    fn test_element_counts() {
        let counts = [2, 2, 2, 2, 3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6];
        for (circuit, n) in CircuitType::ALL.iter().zip(counts.iter()) {
            assert_eq!(circuit.n_elements(), *n, "{}", circuit);
        }
    }

    #[test]
    fn test_family() {
        for circuit in CircuitType::ALL.iter() {
            let expected = if circuit.id() < SKIN_START {
                Family::Rational
            } else {
                Family::Skin
            };
            assert_eq!(circuit.family(), expected);
            assert_eq!(circuit.is_skin(), expected == Family::Skin);
            if circuit.is_skin() {
                assert_eq!(&circuit.slots()[..3], &[Slot::R0, Slot::F0, Slot::Alpha]);
            }
            // every topology has the base resistor at the front
            assert_eq!(circuit.position(Slot::R0), Some(0));
        }
    }

    #[test]
    fn test_slot_table() {
        assert_eq!(CircuitType::Model8.slots(), &[Slot::R0, Slot::R1, Slot::C0]);
        assert_eq!(CircuitType::Model9.position(Slot::L), Some(2));
        assert_eq!(CircuitType::Model9.position(Slot::C0), Some(3));
        assert_eq!(CircuitType::Model12.position(Slot::C1), Some(3));
        assert_eq!(CircuitType::Model16.position(Slot::L), None);
        assert_eq!(CircuitType::Model20.position(Slot::C1), Some(5));
        assert!(!CircuitType::Model20.is_active(Slot::R1));
    }

    #[test]
    fn test_from_id() {
        for (i, circuit) in CircuitType::ALL.iter().enumerate() {
            assert_eq!(CircuitType::from_id(i).unwrap(), *circuit);
            assert_eq!(circuit.id(), i);
        }
        assert!(matches!(
            CircuitType::from_id(21),
            Err(FitError::UnknownModel(21))
        ));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(CircuitType::from_str("MODEL13").unwrap(), CircuitType::Model13);
        assert_eq!(CircuitType::from_str("model0").unwrap(), CircuitType::Model0);
        assert_eq!(CircuitType::from_str("7").unwrap(), CircuitType::Model7);
        assert!(CircuitType::from_str("MODEL21").is_err());
        assert!(CircuitType::from_str("rlc").is_err());
        assert_eq!(CircuitType::Model20.to_string(), "MODEL20");
    }
}
