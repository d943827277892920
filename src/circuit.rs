use crate::consts::Z0;
use crate::error::{FitError, Result};
use crate::frequency::Frequency;
use crate::network::{from_z, z_to_s, z_to_y};
use crate::parameter::MeasurementType;
use ndarray::prelude::*;
use num::complex::Complex64;
use std::fmt;

pub mod codec;
pub mod models;
pub mod params;
pub mod topology;

pub use self::codec::{expand, expand_locked, lock_mask, shorten, LockMask};
pub use self::params::{Parameters, Slot};
pub use self::topology::{CircuitType, Family};

/// One topology bound to element values, a sweep and a reference impedance
#[derive(Clone, Debug, PartialEq)]
pub struct EqCircuit {
    circuit: CircuitType,
    params: Parameters,
    w: Array1<f64>,
    z0: f64,
    lock: Option<LockMask>,
}

impl EqCircuit {
    /// New circuit with all elements at zero, `w` in rad/s.
    pub fn new(circuit: CircuitType, w: &Array1<f64>) -> EqCircuit {
        EqCircuit {
            circuit,
            params: Parameters::zeros(),
            w: w.to_owned(),
            z0: Z0,
            lock: None,
        }
    }

    pub fn with_params(circuit: CircuitType, params: Parameters, w: &Array1<f64>) -> EqCircuit {
        EqCircuit {
            params,
            ..EqCircuit::new(circuit, w)
        }
    }

    pub fn circuit_type(&self) -> CircuitType {
        self.circuit
    }

    pub fn n_elements(&self) -> usize {
        self.circuit.n_elements()
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn set_params(&mut self, params: Parameters) {
        self.params = params;
    }

    pub fn param(&self, slot: Slot) -> f64 {
        self.params[slot]
    }

    pub fn set_param(&mut self, slot: Slot, val: f64) {
        self.params[slot] = val;
    }

    pub fn w(&self) -> &Array1<f64> {
        &self.w
    }

    pub fn set_w(&mut self, w: &Array1<f64>) {
        self.w = w.to_owned();
    }

    pub fn z0(&self) -> f64 {
        self.z0
    }

    pub fn set_z0(&mut self, z0: f64) {
        self.z0 = z0;
    }

    pub fn lock(&self) -> Option<&LockMask> {
        self.lock.as_ref()
    }

    /// Slots set in `lock` keep their current value while the circuit is fitted.
    pub fn set_lock(&mut self, lock: Option<LockMask>) {
        self.lock = lock;
    }

    /// Zeroes every slot the topology does not use.
    pub fn clean(&mut self) {
        self.params.clean(self.circuit);
    }

    /// Dense vector of the active element values.
    pub fn shorten(&self) -> Array1<f64> {
        shorten(self.circuit, &self.params)
    }

    /// Parameters for a dense vector, honoring the lock mask.
    pub fn expand(&self, x: &Array1<f64>) -> Result<Parameters> {
        expand_locked(self.circuit, x, self.lock.as_ref(), Some(&self.params))
    }

    pub fn z(&self) -> Array1<Complex64> {
        models::impedance(self.circuit, &self.params, &self.w)
    }

    pub fn y(&self) -> Array1<Complex64> {
        z_to_y(&self.z())
    }

    /// Scattering parameter against the circuit's own reference impedance.
    pub fn s(&self) -> Array1<Complex64> {
        self.s_at(self.z0)
    }

    pub fn s_at(&self, zref: f64) -> Array1<Complex64> {
        z_to_s(zref, &self.z())
    }

    /// Response in the requested representation.
    pub fn curve(&self, meas: MeasurementType) -> Array1<Complex64> {
        from_z(meas, self.z0, &self.z())
    }

    /// Human readable dump of the seven element values.
    pub fn summary(&self) -> String {
        format!("{} Results\n{}", self.circuit, self.params)
    }
}

impl fmt::Display for EqCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Builder design pattern for EqCircuit
///
/// ## Example
/// ```
/// use ndarray::prelude::*;
/// use rlcfit::prelude::*;
///
/// let circuit = EqCircuitBuilder::new()
///     .model_id(0)
///     .param(Slot::R0, 50.0)
///     .param(Slot::L, 1e-9)
///     .w(array![1e3])
///     .build()
///     .unwrap();
/// assert_eq!(circuit.circuit_type(), CircuitType::Model0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EqCircuitBuilder {
    model_id: Option<usize>,
    params: Parameters,
    w: Option<Array1<f64>>,
    z0: Option<f64>,
    lock: Option<LockMask>,
}

impl EqCircuitBuilder {
    pub fn new() -> Self {
        EqCircuitBuilder::default()
    }

    pub fn circuit(mut self, circuit: CircuitType) -> Self {
        self.model_id = Some(circuit.id());
        self
    }

    /// Topology by catalog index, checked in [`EqCircuitBuilder::build`]
    pub fn model_id(mut self, id: usize) -> Self {
        self.model_id = Some(id);
        self
    }

    pub fn params(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }

    pub fn param(mut self, slot: Slot, val: f64) -> Self {
        self.params[slot] = val;
        self
    }

    /// Angular frequencies in rad/s
    pub fn w(mut self, w: Array1<f64>) -> Self {
        self.w = Some(w);
        self
    }

    /// Frequencies taken from a Frequency in Hz
    pub fn freq(mut self, freq: &Frequency) -> Self {
        self.w = Some(freq.w());
        self
    }

    pub fn z0(mut self, z0: f64) -> Self {
        self.z0 = Some(z0);
        self
    }

    pub fn lock(mut self, lock: LockMask) -> Self {
        self.lock = Some(lock);
        self
    }

    pub fn build(self) -> Result<EqCircuit> {
        let circuit = match self.model_id {
            Some(id) => CircuitType::from_id(id)?,
            None => return Err(FitError::Options("no circuit type given".to_string())),
        };
        let w = self.w.unwrap_or_else(|| Array1::zeros(0));
        let mut out = EqCircuit::with_params(circuit, self.params, &w);
        out.z0 = self.z0.unwrap_or(Z0);
        out.lock = self.lock;
        Ok(out)
    }
}
