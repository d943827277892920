use crate::consts::{OPT_ABS_THRESHOLD, OPT_MAX_EVALS, OPT_REL_THRESHOLD, OPT_STEP, Z0};
use crate::error::{FitError, Result};
use crate::frequency::FreqRange;
use crate::minimize::NelderMeadOptions;
use crate::parameter::{ComplexModifier, MeasurementType};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

/// Topologies considered by an automatic search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPool {
    /// Rational topologies only, skin effect models need a manual pick
    #[default]
    NonSkin,
    /// Every topology in the catalog
    All,
}

/// Knobs of the simplex search
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerOptions {
    pub step: f64,
    pub rel_threshold: f64,
    pub abs_threshold: f64,
    pub max_evals: usize,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        OptimizerOptions {
            step: OPT_STEP,
            rel_threshold: OPT_REL_THRESHOLD,
            abs_threshold: OPT_ABS_THRESHOLD,
            max_evals: OPT_MAX_EVALS,
        }
    }
}

impl OptimizerOptions {
    /// Simplex options starting at `init`.
    pub fn nelder_mead(&self, init: &Array1<f64>) -> NelderMeadOptions {
        NelderMeadOptions::new(
            init,
            Some(self.step),
            Some(self.rel_threshold),
            Some(self.abs_threshold),
            Some(self.max_evals),
        )
    }
}

/// Options of a fit or a model search
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Frequency band used by the fit, in Hz
    pub range: FreqRange,
    /// Representation the residual is computed in
    pub meas_type: MeasurementType,
    /// Projection of complex samples onto reals
    pub cpx_mod: ComplexModifier,
    pub n_elements_min: usize,
    pub n_elements_max: usize,
    pub n_elements_min_auto: bool,
    pub n_elements_max_auto: bool,
    /// Fit only `model_id` instead of searching
    pub manual_select: bool,
    pub model_id: usize,
    pub search_pool: SearchPool,
    /// Reference impedance for S parameters
    pub z0: f64,
    pub optimizer: OptimizerOptions,
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            range: FreqRange::default(),
            meas_type: MeasurementType::Z,
            cpx_mod: ComplexModifier::Mag,
            n_elements_min: 0,
            n_elements_max: 0,
            n_elements_min_auto: true,
            n_elements_max_auto: true,
            manual_select: false,
            model_id: 0,
            search_pool: SearchPool::NonSkin,
            z0: Z0,
            optimizer: OptimizerOptions::default(),
        }
    }
}

impl FitOptions {
    pub fn from_json(json: &str) -> Result<FitOptions> {
        let options: FitOptions = serde_json::from_str(json)?;
        options.check()?;
        Ok(options)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates values that would otherwise only fail deep inside a fit.
    pub fn check(&self) -> Result<()> {
        self.range.check()?;
        if !(self.z0 > 0.0) || !self.z0.is_finite() {
            return Err(FitError::Options(format!(
                "reference impedance must be positive, got {}",
                self.z0
            )));
        }
        if !self.n_elements_min_auto
            && !self.n_elements_max_auto
            && self.n_elements_max < self.n_elements_min
        {
            return Err(FitError::Options(format!(
                "max element count {} smaller than min {}",
                self.n_elements_max, self.n_elements_min
            )));
        }
        Ok(())
    }
}

/// Builder design pattern for FitOptions
///
/// ## Example
/// ```
/// use rlcfit::prelude::*;
///
/// let options = FitOptionsBuilder::new()
///     .f_min(1e5)
///     .f_max(1e8)
///     .meas_type(MeasurementType::S)
///     .n_elements(2, 3)
///     .build()
///     .unwrap();
/// assert!(!options.range.f_min_auto);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FitOptionsBuilder {
    options: FitOptions,
}

impl FitOptionsBuilder {
    pub fn new() -> Self {
        FitOptionsBuilder::default()
    }

    /// Lower band edge in Hz
    pub fn f_min(mut self, f: f64) -> Self {
        self.options.range.f_min = f;
        self.options.range.f_min_auto = false;
        self
    }

    /// Upper band edge in Hz
    pub fn f_max(mut self, f: f64) -> Self {
        self.options.range.f_max = f;
        self.options.range.f_max_auto = false;
        self
    }

    pub fn range(mut self, range: FreqRange) -> Self {
        self.options.range = range;
        self
    }

    pub fn meas_type(mut self, meas: MeasurementType) -> Self {
        self.options.meas_type = meas;
        self
    }

    pub fn cpx_mod(mut self, cpx_mod: ComplexModifier) -> Self {
        self.options.cpx_mod = cpx_mod;
        self
    }

    pub fn n_elements_min(mut self, n: usize) -> Self {
        self.options.n_elements_min = n;
        self.options.n_elements_min_auto = false;
        self
    }

    pub fn n_elements_max(mut self, n: usize) -> Self {
        self.options.n_elements_max = n;
        self.options.n_elements_max_auto = false;
        self
    }

    pub fn n_elements(self, min: usize, max: usize) -> Self {
        self.n_elements_min(min).n_elements_max(max)
    }

    /// Fit a single topology instead of searching
    pub fn model_id(mut self, id: usize) -> Self {
        self.options.manual_select = true;
        self.options.model_id = id;
        self
    }

    pub fn search_pool(mut self, pool: SearchPool) -> Self {
        self.options.search_pool = pool;
        self
    }

    pub fn z0(mut self, z0: f64) -> Self {
        self.options.z0 = z0;
        self
    }

    pub fn optimizer(mut self, optimizer: OptimizerOptions) -> Self {
        self.options.optimizer = optimizer;
        self
    }

    pub fn max_evals(mut self, max_evals: usize) -> Self {
        self.options.optimizer.max_evals = max_evals;
        self
    }

    pub fn thresholds(mut self, rel: f64, abs: f64) -> Self {
        self.options.optimizer.rel_threshold = rel;
        self.options.optimizer.abs_threshold = abs;
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.options.optimizer.step = step;
        self
    }

    pub fn build(self) -> Result<FitOptions> {
        self.options.check()?;
        Ok(self.options)
    }
}
