//! Least squares fit of one topology to a measured sweep.
use crate::circuit::{CircuitType, EqCircuit, Parameters};
use crate::error::{FitError, Result};
use crate::minimize::{Minimizer, NelderMead, ObjFn, Termination};
use crate::options::FitOptions;
use crate::parameter::{ComplexModifier, MeasurementType};
use ndarray::prelude::*;
use num::complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Sum of squared differences between the projected measurement and the
/// projected response of a circuit.
#[derive(Clone, Debug)]
pub struct ErrorSum {
    circuit: EqCircuit,
    target: Array1<f64>,
    meas_type: MeasurementType,
    cpx_mod: ComplexModifier,
}

impl ErrorSum {
    /// `measured` is given in `meas_type` at the angular frequencies of `circuit`.
    pub fn new(
        circuit: &EqCircuit,
        measured: &Array1<Complex64>,
        meas_type: MeasurementType,
        cpx_mod: ComplexModifier,
    ) -> Result<ErrorSum> {
        if measured.len() != circuit.w().len() {
            return Err(FitError::LengthMismatch {
                measured: measured.len(),
                simulated: circuit.w().len(),
            });
        }
        Ok(ErrorSum {
            circuit: circuit.clone(),
            target: cpx_mod.project(measured),
            meas_type,
            cpx_mod,
        })
    }

    pub fn circuit_type(&self) -> CircuitType {
        self.circuit.circuit_type()
    }

    /// Residual at the reduced vector `x` and the parameters it stands for.
    pub fn evaluate(&self, x: &Array1<f64>) -> Result<(f64, Parameters)> {
        let params = self.circuit.expand(x)?;
        let mut trial = self.circuit.clone();
        trial.set_params(params);
        let sim = self.cpx_mod.project(&trial.curve(self.meas_type));
        let residual = sim
            .iter()
            .zip(self.target.iter())
            .map(|(s, m)| (s - m).powi(2))
            .sum();
        Ok((residual, params))
    }
}

impl ObjFn for ErrorSum {
    fn call(&self, x: &Array1<f64>) -> f64 {
        match self.evaluate(x) {
            Ok((residual, _)) if !residual.is_nan() => residual,
            _ => f64::INFINITY,
        }
    }
}

/// Outcome of one fit attempt
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub circuit: CircuitType,
    pub params: Parameters,
    pub residual: f64,
    pub fn_evals: usize,
    pub iters: usize,
    pub termination: Termination,
}

impl FitResult {
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Fitted circuit bound to the angular frequencies `w`.
    pub fn to_circuit(&self, w: &Array1<f64>, z0: f64) -> EqCircuit {
        let mut out = EqCircuit::with_params(self.circuit, self.params, w);
        out.set_z0(z0);
        out
    }

    /// Simulated response of the fitted circuit over `w`.
    pub fn curve(&self, w: &Array1<f64>, meas: MeasurementType, z0: f64) -> Array1<Complex64> {
        self.to_circuit(w, z0).curve(meas)
    }
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Results", self.circuit)?;
        writeln!(
            f,
            "residual = {:e} ({} after {} evaluations)",
            self.residual, self.termination, self.fn_evals
        )?;
        write!(f, "{}", self.params)
    }
}

impl EqCircuit {
    /// Fits the circuit to `measured`, sampled at the circuit's own angular
    /// frequencies in `options.meas_type`. The current element values are the
    /// starting point and are replaced by the fitted ones.
    pub fn optimize(
        &mut self,
        measured: &Array1<Complex64>,
        options: &FitOptions,
    ) -> Result<FitResult> {
        self.set_z0(options.z0);
        let objective = ErrorSum::new(self, measured, options.meas_type, options.cpx_mod)?;
        let init = self.shorten();
        debug!(
            circuit = %self.circuit_type(),
            npts = measured.len(),
            meas = %options.meas_type,
            cpx_mod = %options.cpx_mod,
            "fit started"
        );

        let mut minimizer = NelderMead::new(objective.clone());
        let out = minimizer.minimize(&options.optimizer.nelder_mead(&init))?;

        let (residual, params) = objective.evaluate(&out.xmin())?;
        self.set_params(params);
        self.clean();

        let result = FitResult {
            circuit: self.circuit_type(),
            params: *self.params(),
            residual,
            fn_evals: out.fn_evals(),
            iters: out.iters(),
            termination: out.termination(),
        };
        match result.termination {
            Termination::Converged => debug!(
                circuit = %result.circuit,
                residual = result.residual,
                fn_evals = result.fn_evals,
                "fit converged"
            ),
            Termination::MaxEvaluations => warn!(
                circuit = %result.circuit,
                residual = result.residual,
                fn_evals = result.fn_evals,
                "fit stopped at the evaluation cap"
            ),
        }
        Ok(result)
    }
}

#[cfg(test)]
mod fit_tests {
    use super::*;
    use crate::circuit::{lock_mask, Slot};
    use crate::frequency::Frequency;
    use crate::options::FitOptionsBuilder;
    use crate::scale::Scale;

    fn model0(r: f64, l: f64, w: &Array1<f64>) -> EqCircuit {
        EqCircuit::with_params(
            CircuitType::Model0,
            Parameters::from_pairs(&[(Slot::R0, r), (Slot::L, l)]),
            w,
        )
    }

    #[test]
    fn test_error_sum_zero_on_identical_data() {
        let w = Frequency::from_log_range(1.0, 1000.0, 21, Scale::Mega).w();
        let target = model0(47.0, 2e-9, &w);
        for meas in [MeasurementType::S, MeasurementType::Y, MeasurementType::Z] {
            for cpx_mod in [ComplexModifier::Mag, ComplexModifier::Complex, ComplexModifier::Db] {
                let sum = ErrorSum::new(&target, &target.curve(meas), meas, cpx_mod).unwrap();
                let (residual, params) = sum.evaluate(&target.shorten()).unwrap();
                assert_eq!(residual, 0.0);
                assert_eq!(params, *target.params());

                let off = sum.call(&array![40.0, 2e-9]);
                assert!(off > 0.0, "{} {}", meas, cpx_mod);
            }
        }
    }

    #[test]
    fn test_error_sum_length_mismatch() {
        let circuit = model0(1.0, 1.0, &array![1.0, 2.0, 3.0]);
        let measured = Array1::from_elem(2, Complex64::new(1.0, 0.0));
        assert!(matches!(
            ErrorSum::new(&circuit, &measured, MeasurementType::Z, ComplexModifier::Mag),
            Err(FitError::LengthMismatch {
                measured: 2,
                simulated: 3
            })
        ));
    }

    #[test]
    fn test_error_sum_wrong_dimension_is_infinite() {
        let circuit = model0(1.0, 1.0, &array![1.0]);
        let sum = ErrorSum::new(&circuit, &circuit.z(), MeasurementType::Z, ComplexModifier::Mag)
            .unwrap();
        assert!(sum.evaluate(&array![1.0]).is_err());
        assert_eq!(sum.call(&array![1.0]), f64::INFINITY);
    }

    #[test]
    fn test_error_sum_accepts_degenerate_candidates() {
        let w = Frequency::from_log_range(1.0, 1000.0, 21, Scale::Mega).w();
        let rational = model0(47.0, 2e-9, &w);
        let skin = EqCircuit::with_params(
            CircuitType::Model13,
            Parameters::from_pairs(&[
                (Slot::R0, 47.0),
                (Slot::F0, 1e8),
                (Slot::Alpha, 0.5),
                (Slot::L, 2e-9),
                (Slot::C0, 3e-12),
            ]),
            &w,
        );
        let cases = [
            (rational, vec![array![0.0, 0.0], array![-47.0, -2e-9]]),
            (
                skin,
                vec![
                    Array1::zeros(5),
                    array![-47.0, -1e8, -0.5, -2e-9, -3e-12],
                    array![47.0, 0.0, 0.0, 0.0, 0.0],
                ],
            ),
        ];
        for (circuit, candidates) in cases.iter() {
            for meas in [MeasurementType::S, MeasurementType::Y, MeasurementType::Z] {
                let sum =
                    ErrorSum::new(circuit, &circuit.curve(meas), meas, ComplexModifier::Mag)
                        .unwrap();
                for x in candidates.iter() {
                    let (residual, params) = sum.evaluate(x).unwrap();
                    assert!(!(residual < 0.0), "{} {} {}", circuit.circuit_type(), meas, x);
                    assert_eq!(params[Slot::R0], x[0]);
                    let val = sum.call(x);
                    assert!(val >= 0.0, "{} {} {}", circuit.circuit_type(), meas, x);
                }
            }
        }
    }

    #[test]
    fn test_optimize_from_negative_start() {
        let w = Frequency::from_log_range(1.0, 1000.0, 21, Scale::Mega).w();
        let measured = model0(47.0, 2e-9, &w).z();
        let mut circuit = model0(-47.0, -2e-9, &w);
        let options = FitOptionsBuilder::new().max_evals(50).build().unwrap();
        let result = circuit.optimize(&measured, &options).unwrap();
        assert!(result.residual >= 0.0);
        assert!(result.fn_evals <= 50);
    }

    #[test]
    fn test_optimize_honors_lock() {
        let w = Frequency::from_log_range(1.0, 1000.0, 31, Scale::Mega).w();
        let measured = model0(47.0, 2e-9, &w).z();

        let mut circuit = model0(10.0, 3e-9, &w);
        circuit.set_lock(Some(lock_mask(&[Slot::L])));
        let start = ErrorSum::new(&circuit, &measured, MeasurementType::Z, ComplexModifier::Mag)
            .unwrap()
            .call(&circuit.shorten());
        let result = circuit.optimize(&measured, &FitOptions::default()).unwrap();
        assert_eq!(result.params[Slot::L], 3e-9);
        assert_eq!(circuit.param(Slot::L), 3e-9);
        assert!(result.residual < start);
    }

    #[test]
    fn test_optimize_length_mismatch() {
        let mut circuit = model0(1.0, 1.0, &array![1.0, 2.0]);
        let measured = array![Complex64::new(1.0, 0.0)];
        assert!(circuit.optimize(&measured, &FitOptions::default()).is_err());
    }

    #[test]
    fn test_fit_result_display() {
        let result = FitResult {
            circuit: CircuitType::Model3,
            params: Parameters::from_pairs(&[(Slot::R0, 47.0)]),
            residual: 0.5,
            fn_evals: 12,
            iters: 3,
            termination: Termination::MaxEvaluations,
        };
        let text = result.to_string();
        assert!(text.starts_with("MODEL3 Results\n"));
        assert!(text.contains("R0    = 47 Ω"));
        assert!(!result.converged());
    }
}
