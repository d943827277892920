//! Shared numeric constants of the fitting engine.

/// Bias added to every raw element value before it enters a formula.
pub const SMALL: f64 = 1e-50;

/// Number of slots in the universal parameter vector.
pub const N_PARAMS: usize = 7;

/// Number of equivalent circuit topologies in the catalog.
pub const N_MODELS: usize = 21;

/// First topology id that uses the skin effect resistor.
pub const SKIN_START: usize = 13;

/// Default simplex step added to each coordinate of the start point.
pub const OPT_STEP: f64 = 0.001;

/// Default relative function value threshold of the simplex search.
pub const OPT_REL_THRESHOLD: f64 = 1e-12;

/// Default absolute function value threshold of the simplex search.
pub const OPT_ABS_THRESHOLD: f64 = 1e-15;

/// Default cap on objective evaluations per fit.
pub const OPT_MAX_EVALS: usize = 10_000;

/// Default reference impedance in ohms.
pub const Z0: f64 = 50.0;

/// Adds the [`SMALL`] bias to a raw parameter value.
#[inline]
pub fn biased(x: f64) -> f64 {
    x + SMALL
}
