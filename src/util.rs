use float_cmp::{approx_eq, F64Margin};
use ndarray::prelude::*;
use num::complex::Complex64;

/// Index of the largest finite value, `None` for an empty or all-NaN array.
pub fn max_index(vals: &Array1<f64>) -> Option<usize> {
    vals.iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
}

pub fn abs_array(vals: &Array1<Complex64>) -> Array1<f64> {
    vals.map(|x| x.norm())
}

pub fn comp_array_c64(
    exemplar: &Array1<Complex64>,
    calc: &Array1<Complex64>,
    precision: F64Margin,
    test: &str,
) {
    assert_eq!(exemplar.len(), calc.len(), "test {} length mismatch", test);
    azip!((index i, &e in exemplar, &c in calc) {
        comp_c64(&e, &c, precision, test, format!("({})", i).as_str());
    });
}

pub fn comp_array_f64(
    exemplar: &Array1<f64>,
    calc: &Array1<f64>,
    precision: F64Margin,
    test: &str,
) {
    assert_eq!(exemplar.len(), calc.len(), "test {} length mismatch", test);
    azip!((index i, &e in exemplar, &c in calc) {
        comp_f64(&e, &c, precision, test, format!("({})", i).as_str());
    });
}

pub fn comp_c64(
    exemplar: &Complex64,
    calc: &Complex64,
    precision: F64Margin,
    test: &str,
    idx: &str,
) {
    comp_f64(
        &(exemplar.re),
        &(calc.re),
        precision,
        test,
        &(idx.to_owned() + ".re"),
    );
    comp_f64(
        &(exemplar.im),
        &(calc.im),
        precision,
        test,
        &(idx.to_owned() + ".im"),
    );
}

pub fn comp_f64(exemplar: &f64, calc: &f64, precision: F64Margin, test: &str, idx: &str) {
    assert!(
        approx_eq!(f64, *calc, *exemplar, precision),
        " Failed test {} at location {}\n  exemplar: {}\n      calc: {}",
        test,
        idx,
        exemplar,
        calc
    );
}

/// Relative comparison for values spanning many decades.
pub fn comp_rel(exemplar: f64, calc: f64, rel: f64, test: &str) {
    let diff = (calc - exemplar).abs();
    assert!(
        diff <= rel * exemplar.abs().max(calc.abs()),
        " Failed test {}\n  exemplar: {}\n      calc: {}\n  rel diff: {}",
        test,
        exemplar,
        calc,
        diff / exemplar.abs().max(calc.abs())
    );
}
