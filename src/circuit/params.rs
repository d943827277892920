use crate::circuit::CircuitType;
use crate::consts::{biased, N_PARAMS};
use crate::error::{FitError, Result};
use crate::unit::Unit;
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Named slot of the universal parameter vector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    R0,
    F0,
    Alpha,
    R1,
    L,
    C0,
    C1,
}

impl Slot {
    pub const ALL: [Slot; N_PARAMS] = [
        Slot::R0,
        Slot::F0,
        Slot::Alpha,
        Slot::R1,
        Slot::L,
        Slot::C0,
        Slot::C1,
    ];

    pub fn idx(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Slot::R0 => "R0",
            Slot::F0 => "f0",
            Slot::Alpha => "alpha",
            Slot::R1 => "R1",
            Slot::L => "L",
            Slot::C0 => "C0",
            Slot::C1 => "C1",
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            Slot::R0 | Slot::R1 => Unit::Ohm,
            Slot::F0 => Unit::Hz,
            Slot::Alpha => Unit::None,
            Slot::L => Unit::Henry,
            Slot::C0 | Slot::C1 => Unit::Farad,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Element values `R0, f0, alpha, R1, L, C0, C1` shared by every topology
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    vals: [f64; N_PARAMS],
}

impl Parameters {
    pub fn new(vals: [f64; N_PARAMS]) -> Parameters {
        Parameters { vals }
    }

    pub fn zeros() -> Parameters {
        Parameters::default()
    }

    pub fn from_slice(vals: &[f64]) -> Result<Parameters> {
        if vals.len() != N_PARAMS {
            return Err(FitError::InvalidDimension {
                expected: N_PARAMS,
                actual: vals.len(),
            });
        }
        let mut out = Parameters::zeros();
        out.vals.copy_from_slice(vals);
        Ok(out)
    }

    /// Sets the named slots, everything else stays zero.
    pub fn from_pairs(pairs: &[(Slot, f64)]) -> Parameters {
        let mut out = Parameters::zeros();
        for &(slot, val) in pairs {
            out[slot] = val;
        }
        out
    }

    pub fn values(&self) -> &[f64; N_PARAMS] {
        &self.vals
    }

    pub fn to_array(&self) -> Array1<f64> {
        Array1::from_vec(self.vals.to_vec())
    }

    pub fn get(&self, slot: Slot) -> f64 {
        self.vals[slot.idx()]
    }

    pub fn set(&mut self, slot: Slot, val: f64) {
        self.vals[slot.idx()] = val;
    }

    /// Slot value with the epsilon bias applied.
    pub fn biased(&self, slot: Slot) -> f64 {
        biased(self.vals[slot.idx()])
    }

    /// Zeroes every slot the topology does not use.
    pub fn clean(&mut self, circuit: CircuitType) {
        for slot in Slot::ALL.iter() {
            if !circuit.is_active(*slot) {
                self[*slot] = 0.0;
            }
        }
    }

    pub fn cleaned(mut self, circuit: CircuitType) -> Parameters {
        self.clean(circuit);
        self
    }
}

impl Index<Slot> for Parameters {
    type Output = f64;

    fn index(&self, slot: Slot) -> &f64 {
        &self.vals[slot.idx()]
    }
}

impl IndexMut<Slot> for Parameters {
    fn index_mut(&mut self, slot: Slot) -> &mut f64 {
        &mut self.vals[slot.idx()]
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in Slot::ALL.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:<5} = {}", slot.name(), slot.unit().format(self[*slot]))?;
        }
        Ok(())
    }
}
