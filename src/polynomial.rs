use ndarray::prelude::*;
use num::complex::{c64, Complex64};

/// Frequency dependent resistance `r0 (1 + (w / w0)^alpha)` applied to
/// selected coefficients of a polynomial.
#[derive(Clone, Debug, PartialEq)]
pub struct Skin {
    pub r0: f64,
    pub w0: f64,
    pub alpha: f64,
    /// Indices into the highest-first coefficient array that get scaled
    pub positions: Vec<usize>,
}

impl Skin {
    pub fn new(r0: f64, w0: f64, alpha: f64, positions: Vec<usize>) -> Skin {
        Skin {
            r0,
            w0,
            alpha,
            positions,
        }
    }

    pub fn at(&self, w: f64) -> f64 {
        self.r0 * (1.0 + (w / self.w0).powf(self.alpha))
    }
}

/// Real polynomial in `s`, coefficients stored highest exponent first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
    skin: Option<Skin>,
}

impl Polynomial {
    pub fn new(coeffs: &[f64]) -> Polynomial {
        Polynomial {
            coeffs: coeffs.to_vec(),
            skin: None,
        }
    }

    pub fn with_skin(mut self, skin: Skin) -> Polynomial {
        self.skin = Some(skin);
        self
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn set_coeffs(&mut self, coeffs: &[f64]) {
        self.coeffs = coeffs.to_vec();
    }

    pub fn skin(&self) -> Option<&Skin> {
        self.skin.as_ref()
    }

    pub fn set_skin(&mut self, skin: Option<Skin>) {
        self.skin = skin;
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Highest exponent with a non-zero coefficient.
    pub fn degree(&self) -> Option<usize> {
        let n = self.coeffs.len();
        self.coeffs.iter().position(|&c| c != 0.0).map(|i| n - 1 - i)
    }

    /// Plain evaluation at a complex point, skin ignored.
    pub fn eval(&self, x: Complex64) -> Complex64 {
        self.coeffs
            .iter()
            .fold(c64(0.0, 0.0), |acc, &c| acc * x + c)
    }

    /// Evaluation at `s = jw`, with the skin factor on the listed coefficients.
    pub fn eval_w(&self, w: f64) -> Complex64 {
        let x = c64(0.0, w);
        match &self.skin {
            None => self.eval(x),
            Some(skin) => {
                let d = skin.at(w);
                self.coeffs
                    .iter()
                    .enumerate()
                    .fold(c64(0.0, 0.0), |acc, (i, &c)| {
                        if skin.positions.contains(&i) {
                            acc * x + c * d
                        } else {
                            acc * x + c
                        }
                    })
            }
        }
    }

    pub fn eval_array(&self, w: &Array1<f64>) -> Array1<Complex64> {
        w.map(|&x| self.eval_w(x))
    }

    /// `self / den` at a complex point.
    pub fn div(&self, den: &Polynomial, x: Complex64) -> Complex64 {
        self.eval(x) / den.eval(x)
    }

    /// `self / den` over a sweep of angular frequencies.
    pub fn div_array(&self, den: &Polynomial, w: &Array1<f64>) -> Array1<Complex64> {
        w.map(|&x| self.eval_w(x) / den.eval_w(x))
    }
}
