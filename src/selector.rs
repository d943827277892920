//! Model selection across the topology catalog.
use crate::circuit::{CircuitType, EqCircuit};
use crate::error::{FitError, Result};
use crate::fit::FitResult;
use crate::frequency::{hz_to_w, DataFormat, Frequency};
use crate::options::{FitOptions, SearchPool};
use ndarray::prelude::*;
use num::complex::Complex64;
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, info};

/// Topologies a fit with `options` tries, in catalog order.
pub fn create_model_list(options: &FitOptions) -> Result<Vec<CircuitType>> {
    options.check()?;
    if options.manual_select {
        return Ok(vec![CircuitType::from_id(options.model_id)?]);
    }

    let min = match options.n_elements_min_auto {
        true => 0,
        false => options.n_elements_min,
    };
    let max = match options.n_elements_max_auto {
        true => usize::MAX,
        false => options.n_elements_max,
    };
    let list: Vec<CircuitType> = CircuitType::ALL
        .iter()
        .copied()
        .filter(|c| options.search_pool == SearchPool::All || !c.is_skin())
        .filter(|c| (min..=max).contains(&c.n_elements()))
        .collect();

    if list.is_empty() {
        return Err(FitError::Options(format!(
            "no topology with {} to {} elements in the search pool",
            min, max
        )));
    }
    Ok(list)
}

/// Results of every candidate of a search
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Angular frequencies the candidates were fitted on
    pub w: Array1<f64>,
    pub results: Vec<FitResult>,
    best: usize,
}

impl SearchResult {
    pub fn best(&self) -> &FitResult {
        &self.results[self.best]
    }

    pub fn best_circuit(&self) -> CircuitType {
        self.best().circuit
    }

    pub fn get(&self, circuit: CircuitType) -> Option<&FitResult> {
        self.results.iter().find(|r| r.circuit == circuit)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Candidates sorted from the smallest residual up.
    pub fn ranked(&self) -> Vec<&FitResult> {
        let mut out: Vec<&FitResult> = self.results.iter().collect();
        out.sort_by(|a, b| cmp_residual(a.residual, b.residual));
        out
    }
}

// NaN residuals sort last
fn cmp_residual(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(&b),
    }
}

/// Fits every candidate topology to `measured`, sampled at `f` in Hz, and
/// keeps the one with the smallest residual. Candidates run in parallel and
/// only share the measurement.
pub fn search(
    f: &Array1<f64>,
    measured: &Array1<Complex64>,
    options: &FitOptions,
) -> Result<SearchResult> {
    let models = create_model_list(options)?;
    let freq = options.range.apply_to_freq(f, DataFormat::Hz)?;
    let data = options.range.apply_to_data(f, measured)?;
    let w = hz_to_w(&freq);
    debug!(
        candidates = models.len(),
        npts = w.len(),
        "searching equivalent circuits"
    );

    let results = models
        .par_iter()
        .map(|&circuit| {
            let mut eq = EqCircuit::new(circuit, &w);
            eq.optimize(&data, options)
        })
        .collect::<Result<Vec<FitResult>>>()?;

    let best = results
        .iter()
        .enumerate()
        .min_by(|a, b| cmp_residual(a.1.residual, b.1.residual))
        .map(|(i, _)| i)
        .ok_or(FitError::Options("no candidate topology".to_string()))?;

    let out = SearchResult { w, results, best };
    info!(
        best = %out.best_circuit(),
        residual = out.best().residual,
        candidates = out.len(),
        "equivalent circuit search finished"
    );
    Ok(out)
}

/// [`search`] over the sweep of a [`Frequency`].
pub fn search_freq(
    freq: &Frequency,
    measured: &Array1<Complex64>,
    options: &FitOptions,
) -> Result<SearchResult> {
    search(freq.freq(), measured, options)
}
