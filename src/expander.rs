//! Grows a fitted two element circuit into a three element one.
//!
//! The third element is solved in closed form at the frequency where the
//! magnitude of the fitted impedance is furthest from the measurement.
use crate::circuit::{CircuitType, EqCircuit, Slot};
use crate::error::{FitError, Result};
use crate::util::{abs_array, max_index};
use ndarray::prelude::*;
use num::complex::Complex64;
use tracing::debug;

/// Three element topology `circuit` grows into.
pub fn expansion_of(circuit: CircuitType) -> Option<CircuitType> {
    match circuit {
        CircuitType::Model0 => Some(CircuitType::Model6),
        CircuitType::Model1 => Some(CircuitType::Model5),
        CircuitType::Model2 => Some(CircuitType::Model4),
        CircuitType::Model3 => Some(CircuitType::Model7),
        _ => None,
    }
}

/// Expands `circuit` against the measured impedance `z` sampled at the
/// angular frequencies `w`. R0 and the element already present carry over.
pub fn expand(circuit: &EqCircuit, z: &Array1<Complex64>, w: &Array1<f64>) -> Result<EqCircuit> {
    let target = expansion_of(circuit.circuit_type())
        .ok_or_else(|| FitError::ExpandUnsupported(circuit.circuit_type().to_string()))?;
    if z.len() != w.len() {
        return Err(FitError::LengthMismatch {
            measured: z.len(),
            simulated: w.len(),
        });
    }

    let mut fitted = circuit.clone();
    fitted.set_w(w);
    let delta = (abs_array(z) - abs_array(&fitted.z())).mapv(f64::abs);
    let idx = max_index(&delta).ok_or(FitError::EmptyFrequencyRange)?;
    let (wx, zx) = (w[idx], z[idx]);
    let y = zx.inv();

    let r0 = circuit.param(Slot::R0);
    let mut l = circuit.param(Slot::L);
    let mut c0 = circuit.param(Slot::C0);
    match circuit.circuit_type() {
        // (R0 + L) || C0
        CircuitType::Model0 => c0 = (y.im + wx * l / (r0.powi(2) + (wx * l).powi(2))) / wx,
        // R0 || L || C0
        CircuitType::Model1 => c0 = (y.im + 1.0 / (wx * l)) / wx,
        // R0 + L + C0
        CircuitType::Model2 => l = (zx.im + 1.0 / (wx * c0)) / wx,
        // (R0 || C0) + L
        CircuitType::Model3 => {
            l = (zx.im + wx * c0 / (1.0 / r0.powi(2) + (wx * c0).powi(2))) / wx
        }
        _ => {}
    }

    debug!(
        from = %circuit.circuit_type(),
        to = %target,
        idx,
        w = wx,
        "expanded equivalent circuit"
    );

    let mut out = EqCircuit::new(target, w);
    out.set_z0(circuit.z0());
    out.set_param(Slot::R0, r0);
    out.set_param(Slot::L, l);
    out.set_param(Slot::C0, c0);
    Ok(out)
}

#[cfg(test)]
mod expander_tests {
    use super::*;
    use crate::circuit::Parameters;
    use crate::frequency::Frequency;
    use crate::scale::Scale;
    use crate::util::comp_rel;

    const R0: f64 = 47.0;
    const L: f64 = 2e-9;
    const C0: f64 = 3e-12;

    fn sweep() -> Array1<f64> {
        Frequency::from_log_range(1.0, 1000.0, 41, Scale::Mega).w()
    }

    fn circuit(circuit: CircuitType, w: &Array1<f64>) -> EqCircuit {
        let params = Parameters::from_pairs(&[(Slot::R0, R0), (Slot::L, L), (Slot::C0, C0)]);
        EqCircuit::with_params(circuit, params.cleaned(circuit), w)
    }

    #[test]
    fn test_expansion_recovers_missing_element() {
        let w = sweep();
        let cases = [
            (CircuitType::Model0, CircuitType::Model6, Slot::C0, C0),
            (CircuitType::Model1, CircuitType::Model5, Slot::C0, C0),
            (CircuitType::Model2, CircuitType::Model4, Slot::L, L),
            (CircuitType::Model3, CircuitType::Model7, Slot::L, L),
        ];
        for (from, to, slot, val) in cases.iter() {
            let measured = circuit(*to, &w).z();
            let out = expand(&circuit(*from, &w), &measured, &w).unwrap();
            assert_eq!(out.circuit_type(), *to);
            assert_eq!(out.param(Slot::R0), R0);
            comp_rel(*val, out.param(*slot), 1e-6, &format!("{} -> {}", from, to));
            assert_eq!(out.w(), &w);
        }
    }

    #[test]
    fn test_expansion_unsupported() {
        let w = sweep();
        let eq = circuit(CircuitType::Model4, &w);
        assert!(matches!(
            expand(&eq, &eq.z(), &w),
            Err(FitError::ExpandUnsupported(_))
        ));
        assert_eq!(expansion_of(CircuitType::Model13), None);
    }

    #[test]
    fn test_expansion_length_mismatch() {
        let w = sweep();
        let eq = circuit(CircuitType::Model0, &w);
        let measured = eq.z().slice(s![..10]).to_owned();
        assert!(matches!(
            expand(&eq, &measured, &w),
            Err(FitError::LengthMismatch { .. })
        ));
    }
}
