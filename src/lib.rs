//! Equivalent circuit extraction for one-port RF measurements.
//!
//! A measured S, Y or Z sweep is fitted against a catalog of 21 lumped
//! element topologies with a Nelder-Mead search on a least squares residual.
pub mod circuit;
pub mod consts;
pub mod error;
pub mod expander;
pub mod fit;
pub mod frequency;
pub mod minimize;
pub mod network;
pub mod options;
pub mod parameter;
pub mod polynomial;
pub mod prelude;
pub mod scale;
pub mod selector;
pub mod unit;
pub mod util;
