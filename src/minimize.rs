use crate::error::MinimizerError;
use dyn_clone::DynClone;
use ndarray::prelude::*;

pub mod nelder_mead;

pub use self::nelder_mead::{NelderMead, NelderMeadOptions, NelderMeadResult, Termination};

// Define a trait for the objective function
pub trait ObjFn: DynClone + Send + Sync {
    fn call(&self, x: &Array1<f64>) -> f64;
}
dyn_clone::clone_trait_object!(ObjFn);

// Wrapper for multi-dimensional functions
#[derive(Clone)]
pub struct MultiDimFn<F>(pub F)
where
    F: Fn(&Array1<f64>) -> f64 + Clone + Send + Sync;

// Convenience constructors
impl<F> MultiDimFn<F>
where
    F: Fn(&Array1<f64>) -> f64 + Clone + Send + Sync,
{
    pub fn new(f: F) -> Self {
        MultiDimFn(f)
    }
}

impl<F> ObjFn for MultiDimFn<F>
where
    F: Fn(&Array1<f64>) -> f64 + Clone + Send + Sync,
{
    fn call(&self, x: &Array1<f64>) -> f64 {
        (self.0)(x)
    }
}

pub trait Minimizer {
    type Options;
    type Result: MinimizerResult;

    fn minimize(&mut self, opt: &Self::Options) -> Result<Self::Result, MinimizerError>;
}

pub trait MinimizerResult {
    fn xmin(&self) -> Array1<f64>;
    fn fmin(&self) -> f64;
    fn fn_evals(&self) -> usize;
    fn iters(&self) -> usize;
    fn converged(&self) -> bool;
}
