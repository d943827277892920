//! One-port network parameter conversions.
//!
//! Every function works elementwise over a sweep and keeps order and length.
use crate::parameter::MeasurementType;
use ndarray::prelude::*;
use num::complex::Complex64;

pub fn z_to_y(z: &Array1<Complex64>) -> Array1<Complex64> {
    z.map(|x| x.inv())
}

pub fn y_to_z(y: &Array1<Complex64>) -> Array1<Complex64> {
    y.map(|x| x.inv())
}

/// Single-port scattering parameter `(Z - z0) / (Z + z0)`.
pub fn z_to_s(z0: f64, z: &Array1<Complex64>) -> Array1<Complex64> {
    z.map(|&x| (x - z0) / (x + z0))
}

/// Inverse of [`z_to_s`]: `z0 (1 + S) / (1 - S)`.
pub fn s_to_z(z0: f64, s: &Array1<Complex64>) -> Array1<Complex64> {
    s.map(|&x| z0 * (1.0 + x) / (1.0 - x))
}

/// Converts an impedance sweep into the requested representation.
pub fn from_z(meas: MeasurementType, z0: f64, z: &Array1<Complex64>) -> Array1<Complex64> {
    match meas {
        MeasurementType::S => z_to_s(z0, z),
        MeasurementType::Y => z_to_y(z),
        MeasurementType::Z => z.clone(),
    }
}

/// Converts a sweep given in `meas` representation into impedance.
pub fn to_z(meas: MeasurementType, z0: f64, data: &Array1<Complex64>) -> Array1<Complex64> {
    match meas {
        MeasurementType::S => s_to_z(z0, data),
        MeasurementType::Y => y_to_z(data),
        MeasurementType::Z => data.clone(),
    }
}
