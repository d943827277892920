use crate::{
    consts::{OPT_ABS_THRESHOLD, OPT_MAX_EVALS, OPT_REL_THRESHOLD, OPT_STEP},
    error::MinimizerError,
    minimize::{Minimizer, MinimizerResult, ObjFn},
};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Simplex transformations performed by one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NelderMeadMethod {
    Initial,
    Reflection,
    Expansion,
    OutsideContraction,
    InsideContraction,
    Shrink,
}

impl fmt::Display for NelderMeadMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NelderMeadMethod::Initial => write!(f, "Initial"),
            NelderMeadMethod::Reflection => write!(f, "Reflection"),
            NelderMeadMethod::Expansion => write!(f, "Expansion"),
            NelderMeadMethod::OutsideContraction => write!(f, "OutsideContraction"),
            NelderMeadMethod::InsideContraction => write!(f, "InsideContraction"),
            NelderMeadMethod::Shrink => write!(f, "Shrink"),
        }
    }
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    Converged,
    MaxEvaluations,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Termination::Converged => write!(f, "Converged"),
            Termination::MaxEvaluations => write!(f, "MaxEvaluations"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NelderMeadOptions {
    initial_point: Array1<f64>,
    n: usize,
    step: f64,
    rel_threshold: f64,
    abs_threshold: f64,
    max_evals: usize,
    alpha: f64, // Reflection coefficient
    beta: f64,  // Contraction coefficient
    gamma: f64, // Expansion coefficient
    rho: f64,   // Shrink coefficient
}

impl NelderMeadOptions {
    pub fn new(
        init: &Array1<f64>,
        step: Option<f64>,
        rel_threshold: Option<f64>,
        abs_threshold: Option<f64>,
        max_evals: Option<usize>,
    ) -> Self {
        Self {
            initial_point: init.to_owned(),
            n: init.len(),
            step: step.unwrap_or(OPT_STEP),
            rel_threshold: rel_threshold.unwrap_or(OPT_REL_THRESHOLD),
            abs_threshold: abs_threshold.unwrap_or(OPT_ABS_THRESHOLD),
            max_evals: max_evals.unwrap_or(OPT_MAX_EVALS),
            alpha: 1.0,
            beta: 0.5,
            gamma: 2.0,
            rho: 0.5,
        }
    }

    pub fn set_initial_point(&mut self, init: Array1<f64>) {
        self.n = init.len();
        self.initial_point = init;
    }

    pub fn set_step(&mut self, step: f64) {
        self.step = step;
    }

    pub fn set_rel_threshold(&mut self, val: f64) {
        self.rel_threshold = val;
    }

    pub fn set_abs_threshold(&mut self, val: f64) {
        self.abs_threshold = val;
    }

    pub fn set_max_evals(&mut self, val: usize) {
        self.max_evals = val;
    }

    pub fn initial_point(&self) -> &Array1<f64> {
        &self.initial_point
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn rel_threshold(&self) -> f64 {
        self.rel_threshold
    }

    pub fn abs_threshold(&self) -> f64 {
        self.abs_threshold
    }

    pub fn max_evals(&self) -> usize {
        self.max_evals
    }

    pub fn validate(&self) -> Result<(), MinimizerError> {
        if self.n == 0 {
            return Err(MinimizerError::InvalidDimension);
        }
        if self.step == 0.0 || !self.step.is_finite() {
            return Err(MinimizerError::InvalidStepSize);
        }
        if !(self.rel_threshold >= 0.0) || !(self.abs_threshold >= 0.0) {
            return Err(MinimizerError::InvalidTolerance);
        }
        if self.max_evals == 0 {
            return Err(MinimizerError::InvalidMaxEvaluations);
        }
        if self.initial_point.iter().any(|x| !x.is_finite()) {
            return Err(MinimizerError::InvalidInitialSimplex);
        }
        Ok(())
    }

    // Simple value check on one vertex between two iterations
    fn value_converged(&self, prev: f64, curr: f64) -> bool {
        let diff = (prev - curr).abs();
        let size = prev.abs().max(curr.abs());
        diff <= size * self.rel_threshold || diff <= self.abs_threshold
    }

    fn converged(&self, prev: &Array1<f64>, curr: &Array1<f64>) -> bool {
        prev.iter()
            .zip(curr.iter())
            .all(|(&p, &c)| self.value_converged(p, c))
    }
}

impl Default for NelderMeadOptions {
    fn default() -> Self {
        NelderMeadOptions::new(&Array1::zeros(0), None, None, None, None)
    }
}

/// Result of Nelder-Mead optimization
#[derive(Clone)]
pub struct NelderMeadResult {
    pub simplex: Array2<f64>,
    pub res: Array1<f64>,
    f: Box<dyn ObjFn>,
    pub iters: usize,
    pub fn_evals: usize,
    pub options: NelderMeadOptions,
    pub termination: Termination,
    best_x: Array1<f64>,
    best_f: f64,
}

impl NelderMeadResult {
    pub fn new(options: &NelderMeadOptions, f: &Box<dyn ObjFn>) -> Self {
        Self {
            simplex: Array2::zeros((options.n + 1, options.n)),
            res: Array1::from_elem(options.n + 1, f64::INFINITY),
            f: f.clone(),
            iters: 0,
            fn_evals: 0,
            options: options.clone(),
            termination: Termination::MaxEvaluations,
            best_x: options.initial_point.clone(),
            best_f: f64::INFINITY,
        }
    }

    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    pub fn fmin(&self) -> f64 {
        self.best_f
    }

    pub fn fn_evals(&self) -> usize {
        self.fn_evals
    }

    pub fn iters(&self) -> usize {
        self.iters
    }

    pub fn xmin(&self) -> Array1<f64> {
        self.best_x.clone()
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Evaluates the objective, `None` once the evaluation budget is spent.
    fn calc_obj(&mut self, x: &Array1<f64>) -> Option<f64> {
        if self.fn_evals >= self.options.max_evals {
            return None;
        }
        self.fn_evals += 1;
        let mut val = self.f.call(x);
        if val.is_nan() {
            val = f64::INFINITY;
        }
        if val < self.best_f {
            self.best_f = val;
            self.best_x = x.clone();
        }
        Some(val)
    }

    fn initialize(&mut self) -> Option<NelderMeadMethod> {
        let n = self.options.n;
        let x0 = &self.options.initial_point;
        let step = self.options.step;
        // vertex k moves the first k coordinates by one step
        self.simplex = Array2::from_shape_fn((n + 1, n), |(i, j)| {
            if j < i {
                x0[j] + step
            } else {
                x0[j]
            }
        });
        for i in 0..=n {
            let x = self.simplex.row(i).to_owned();
            self.res[i] = self.calc_obj(&x)?;
        }
        self.sort_simplex();
        Some(NelderMeadMethod::Initial)
    }

    fn centroid(&self) -> Array1<f64> {
        let n = self.options.n;
        self.simplex.slice(s![..n, ..]).sum_axis(Axis(0)) / n as f64
    }

    fn replace_worst(&mut self, x: &Array1<f64>, f: f64) {
        let n = self.options.n;
        self.simplex.row_mut(n).assign(x);
        self.res[n] = f;
        self.sort_simplex();
    }

    fn iterate(&mut self) -> Option<NelderMeadMethod> {
        let n = self.options.n;
        let centroid = self.centroid();
        let worst = self.simplex.row(n).to_owned();
        let f_best = self.res[0];

        let x_r = &centroid + &((&centroid - &worst) * self.options.alpha);
        let f_r = self.calc_obj(&x_r)?;

        if f_best <= f_r && f_r < self.res[n - 1] {
            self.replace_worst(&x_r, f_r);
            return Some(NelderMeadMethod::Reflection);
        }

        if f_r < f_best {
            let x_e = &centroid + &((&x_r - &centroid) * self.options.gamma);
            let f_e = self.calc_obj(&x_e)?;
            if f_e < f_r {
                self.replace_worst(&x_e, f_e);
                return Some(NelderMeadMethod::Expansion);
            }
            self.replace_worst(&x_r, f_r);
            return Some(NelderMeadMethod::Reflection);
        }

        if f_r < self.res[n] {
            let x_oc = &centroid + &((&x_r - &centroid) * self.options.beta);
            let f_oc = self.calc_obj(&x_oc)?;
            if f_oc <= f_r {
                self.replace_worst(&x_oc, f_oc);
                return Some(NelderMeadMethod::OutsideContraction);
            }
        } else {
            let x_ic = &centroid + &((&worst - &centroid) * self.options.beta);
            let f_ic = self.calc_obj(&x_ic)?;
            if f_ic < self.res[n] {
                self.replace_worst(&x_ic, f_ic);
                return Some(NelderMeadMethod::InsideContraction);
            }
        }

        self.shrink()?;
        Some(NelderMeadMethod::Shrink)
    }

    fn shrink(&mut self) -> Option<()> {
        let best = self.simplex.row(0).to_owned();
        for i in 1..=self.options.n {
            let x = &best + &((&self.simplex.row(i) - &best) * self.options.rho);
            let f = self.calc_obj(&x)?;
            self.simplex.row_mut(i).assign(&x);
            self.res[i] = f;
        }
        self.sort_simplex();
        Some(())
    }

    // Sort points from best to worst, ties keep their order
    fn sort_simplex(&mut self) {
        let mut order: Vec<usize> = (0..self.res.len()).collect();
        order.sort_by(|&a, &b| self.res[a].total_cmp(&self.res[b]));
        let tmp_res = self.res.clone();
        let tmp_simplex = self.simplex.clone();
        for (i, &j) in order.iter().enumerate() {
            self.res[i] = tmp_res[j];
            self.simplex.row_mut(i).assign(&tmp_simplex.row(j));
        }
    }
}

impl MinimizerResult for NelderMeadResult {
    fn xmin(&self) -> Array1<f64> {
        self.xmin()
    }

    fn fmin(&self) -> f64 {
        self.fmin()
    }

    fn fn_evals(&self) -> usize {
        self.fn_evals
    }

    fn iters(&self) -> usize {
        self.iters
    }

    fn converged(&self) -> bool {
        self.converged()
    }
}

pub struct NelderMead {
    f: Box<dyn ObjFn>,
}

impl NelderMead {
    pub fn new<F>(f: F) -> Self
    where
        F: ObjFn + 'static,
    {
        NelderMead { f: Box::new(f) }
    }

    pub fn from_boxed(f: Box<dyn ObjFn>) -> Self {
        NelderMead { f }
    }

    pub fn name(&self) -> &str {
        "NelderMead"
    }
}

impl Minimizer for NelderMead {
    type Options = NelderMeadOptions;
    type Result = NelderMeadResult;

    fn minimize(&mut self, opt: &Self::Options) -> Result<Self::Result, MinimizerError> {
        opt.validate()?;
        let mut out = NelderMeadResult::new(opt, &self.f);

        if out.initialize().is_none() {
            debug!(fn_evals = out.fn_evals, "evaluation budget spent on the initial simplex");
            return Ok(out);
        }

        loop {
            let prev = out.res.clone();
            let Some(method) = out.iterate() else {
                out.termination = Termination::MaxEvaluations;
                break;
            };
            out.iters += 1;
            trace!(
                iteration = out.iters,
                fmin = out.res[0],
                fmax = out.res[out.options.n],
                "{}",
                method
            );
            if out.options.converged(&prev, &out.res) {
                out.termination = Termination::Converged;
                break;
            }
        }

        debug!(
            termination = %out.termination,
            fn_evals = out.fn_evals,
            iters = out.iters,
            fmin = out.best_f,
            "{} finished",
            self.name()
        );

        Ok(out)
    }
}
