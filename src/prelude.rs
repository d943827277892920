//! rlcfit prelude.
//!
//! This module contains the most used types, type aliases, traits, functions,
//! and macros that you can import easily as a group.
//!
//! ```
//! use rlcfit::prelude::*;
//!
//! ```

#[doc(no_inline)]
pub use crate::circuit::{
    CircuitType, EqCircuit, EqCircuitBuilder, Family, LockMask, Parameters, Slot,
};

#[doc(no_inline)]
pub use crate::error::{FitError, MinimizerError};

#[doc(no_inline)]
pub use crate::expander::expand as expand_circuit;

#[doc(no_inline)]
pub use crate::fit::{ErrorSum, FitResult};

#[doc(no_inline)]
pub use crate::frequency::{DataFormat, FreqRange, Frequency};

#[doc(no_inline)]
pub use crate::minimize::{
    Minimizer, MinimizerResult, NelderMead, NelderMeadOptions, Termination,
};

#[doc(no_inline)]
pub use crate::options::{FitOptions, FitOptionsBuilder, OptimizerOptions, SearchPool};

#[doc(no_inline)]
pub use crate::parameter::{ComplexModifier, MeasurementType};

#[doc(no_inline)]
pub use crate::scale::Scale;

#[doc(no_inline)]
pub use crate::selector::{create_model_list, search, SearchResult};

#[doc(no_inline)]
pub use crate::unit::Unit;
