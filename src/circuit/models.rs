//! Impedance of each catalog topology.
//!
//! Every raw element value passes through [`crate::consts::biased`] before it
//! enters a formula, so zero valued elements stay finite.
use crate::circuit::{CircuitType, Parameters, Slot};
use crate::consts::biased;
use crate::polynomial::Polynomial;
use ndarray::prelude::*;
use num::complex::{c64, Complex64};
use std::f64::consts::PI;

/// Impedance of `circuit` with element values `p` over the angular
/// frequencies `w`.
pub fn impedance(circuit: CircuitType, p: &Parameters, w: &Array1<f64>) -> Array1<Complex64> {
    match rational(circuit, p) {
        Some((num, den)) => num.div_array(&den, w),
        None => {
            let net = SkinNetwork::new(p);
            w.map(|&x| net.z(circuit, x))
        }
    }
}

/// Numerator and denominator of a rational topology, highest power first.
///
/// `None` for skin topologies, which have no rational form.
pub fn rational(circuit: CircuitType, p: &Parameters) -> Option<(Polynomial, Polynomial)> {
    let r = p.biased(Slot::R0);
    let r1 = p.biased(Slot::R1);
    let l = p.biased(Slot::L);
    let c = p.biased(Slot::C0);
    let c1 = p.biased(Slot::C1);

    let (num, den) = match circuit {
        // R0 + L in series
        CircuitType::Model0 => ([0.0, 0.0, l, r], [0.0, 0.0, 0.0, 1.0]),
        // R0 || L
        CircuitType::Model1 => ([0.0, 0.0, l * r, 0.0], [0.0, 0.0, l, r]),
        // R0 + C0 in series
        CircuitType::Model2 => ([0.0, 0.0, c * r, 1.0], [0.0, 0.0, c, 0.0]),
        // R0 || C0
        CircuitType::Model3 => ([0.0, 0.0, 0.0, r], [0.0, 0.0, c * r, 1.0]),
        // R0 + L + C0 in series
        CircuitType::Model4 => ([0.0, l * c, r * c, 1.0], [0.0, 0.0, c, 0.0]),
        // R0 || L || C0
        CircuitType::Model5 => ([0.0, 0.0, r * l, 0.0], [0.0, c * l * r, l, r]),
        // (R0 + L) || C0
        CircuitType::Model6 => ([0.0, 0.0, l, r], [0.0, c * l, c * r, 1.0]),
        // (R0 || C0) + L
        CircuitType::Model7 => ([0.0, c * l * r, l, r], [0.0, 0.0, c * r, 1.0]),
        // (R0 || C0) + R1
        CircuitType::Model8 => ([0.0, 0.0, c * r * r1, r + r1], [0.0, 0.0, c * r, 1.0]),
        // (R1 || C0) + R0 + L
        CircuitType::Model9 => (
            [0.0, l * c * r1, l + c * r1 * r, r + r1],
            [0.0, 0.0, c * r1, 1.0],
        ),
        // (R0 || L || C0) + R1
        CircuitType::Model10 => (
            [0.0, c * l * r * r1, l * r + l * r1, r1 * r],
            [0.0, c * l * r, l, r],
        ),
        // (R1 + L) || R0 || C0
        CircuitType::Model11 => (
            [0.0, 0.0, l * r, r1 * r],
            [0.0, c * l * r, c * r1 * r + l, r1 + r],
        ),
        // (R0 + L + C1) || C0
        CircuitType::Model12 => (
            [0.0, l * c1, r * c1, 1.0],
            [c * c1 * l, c * c1 * r, c + c1, 0.0],
        ),
        _ => return None,
    };

    Some((Polynomial::new(&num), Polynomial::new(&den)))
}

/// Biased element values of a skin effect topology
#[derive(Clone, Copy, Debug)]
struct SkinNetwork {
    r0: f64,
    w0: f64,
    alpha: f64,
    r1: f64,
    l: f64,
    c0: f64,
    c1: f64,
}

impl SkinNetwork {
    fn new(p: &Parameters) -> SkinNetwork {
        SkinNetwork {
            r0: p.biased(Slot::R0),
            w0: biased(2.0 * PI * p[Slot::F0]),
            alpha: p.biased(Slot::Alpha),
            r1: p.biased(Slot::R1),
            l: p.biased(Slot::L),
            c0: p.biased(Slot::C0),
            c1: p.biased(Slot::C1),
        }
    }

    fn zr(&self, r: f64, w: f64) -> Complex64 {
        c64(r * (1.0 + (w / self.w0).powf(self.alpha)), 0.0)
    }

    fn zl(&self, w: f64) -> Complex64 {
        c64(0.0, w * self.l)
    }

    fn zc(c: f64, w: f64) -> Complex64 {
        c64(0.0, -1.0 / (w * c))
    }

    fn z(&self, circuit: CircuitType, w: f64) -> Complex64 {
        let one = c64(1.0, 0.0);
        let zl = self.zl(w);
        let zc0 = SkinNetwork::zc(self.c0, w);
        let yc0 = zc0.inv();
        match circuit {
            CircuitType::Model13 => self.zr(self.r0, w) + zc0 + zl,
            CircuitType::Model14 => one / (one / (zl + self.zr(self.r0, w)) + yc0),
            CircuitType::Model15 => one / (yc0 + one / self.zr(self.r0, w)) + zl,
            CircuitType::Model16 => one / (yc0 + 1.0 / self.r1) + self.zr(self.r0, w),
            CircuitType::Model17 => one / (yc0 + 1.0 / self.r1) + self.zr(self.r0, w) + zl,
            CircuitType::Model18 => one / (1.0 / self.r0 + zl.inv() + yc0) + self.zr(self.r1, w),
            CircuitType::Model19 => {
                one / (1.0 / self.r0 + one / (zl + self.zr(self.r1, w)) + yc0)
            }
            CircuitType::Model20 => {
                let zc1 = SkinNetwork::zc(self.c1, w);
                one / (one / (self.zr(self.r0, w) + zc1 + zl) + yc0)
            }
            // rational topologies never reach the skin network
            _ => c64(f64::INFINITY, 0.0),
        }
    }
}

#[cfg(test)]
mod models_tests {
    use super::*;
    use crate::util::comp_rel;

    fn close(exemplar: Complex64, calc: Complex64, test: &str) {
        let diff = (calc - exemplar).norm();
        assert!(
            diff <= 1e-9 * exemplar.norm(),
            " Failed test {}\n  exemplar: {}\n      calc: {}",
            test,
            exemplar,
            calc
        );
    }

    fn par(a: Complex64, b: Complex64) -> Complex64 {
        a * b / (a + b)
    }

    fn sample() -> Parameters {
        Parameters::new([47.0, 0.0, 0.0, 220.0, 2e-9, 3e-12, 5e-12])
    }

    #[test]
    fn test_model0_closed_form() {
        let p = Parameters::from_pairs(&[(Slot::R0, 50.0), (Slot::L, 1e-9)]);
        let z = impedance(CircuitType::Model0, &p, &array![1000.0]);
        comp_rel(50.0, z[0].re, 1e-12, "Model0.re");
        comp_rel(1e-6, z[0].im, 1e-12, "Model0.im");
    }

    #[test]
    fn test_rational_networks() {
        let p = sample();
        let (r, r1, l, c, c1) = (47.0, 220.0, 2e-9, 3e-12, 5e-12);
        for &w in [1e6, 2.5e8, 1e10].iter() {
            let zr = c64(r, 0.0);
            let zr1 = c64(r1, 0.0);
            let zl = c64(0.0, w * l);
            let zc = c64(0.0, -1.0 / (w * c));
            let zc1 = c64(0.0, -1.0 / (w * c1));
            let expected = [
                zr + zl,
                par(zr, zl),
                zr + zc,
                par(zr, zc),
                zr + zl + zc,
                par(par(zr, zl), zc),
                par(zr + zl, zc),
                par(zr, zc) + zl,
                par(zr, zc) + zr1,
                par(zr1, zc) + zr + zl,
                par(par(zr, zl), zc) + zr1,
                par(par(zr1 + zl, zr), zc),
                par(zr + zl + zc1, zc),
            ];
            for (i, z) in expected.iter().enumerate() {
                let circuit = CircuitType::from_id(i).unwrap();
                let calc = impedance(circuit, &p, &array![w]);
                close(*z, calc[0], &format!("{} at {}", circuit, w));
            }
        }
    }

    #[test]
    fn test_skin_networks() {
        let mut p = sample();
        p[Slot::F0] = 1e8;
        p[Slot::Alpha] = 0.5;
        let (r, r1, l, c, c1) = (47.0, 220.0, 2e-9, 3e-12, 5e-12);
        let w0 = 2.0 * PI * 1e8;
        for &w in [1e6, 2.5e8, 1e10].iter() {
            let skin = 1.0 + (w / w0).sqrt();
            let zr = c64(r * skin, 0.0);
            let zr1_skin = c64(r1 * skin, 0.0);
            let r0 = c64(r, 0.0);
            let zr1 = c64(r1, 0.0);
            let zl = c64(0.0, w * l);
            let zc = c64(0.0, -1.0 / (w * c));
            let zc1 = c64(0.0, -1.0 / (w * c1));
            let expected = [
                zr + zc + zl,
                par(zl + zr, zc),
                par(zc, zr) + zl,
                par(zc, zr1) + zr,
                par(zc, zr1) + zr + zl,
                par(par(r0, zl), zc) + zr1_skin,
                par(par(r0, zl + zr1_skin), zc),
                par(zr + zc1 + zl, zc),
            ];
            for (i, z) in expected.iter().enumerate() {
                let circuit = CircuitType::from_id(13 + i).unwrap();
                let calc = impedance(circuit, &p, &array![w]);
                close(*z, calc[0], &format!("{} at {}", circuit, w));
            }
        }
    }

    #[test]
    fn test_zero_elements_stay_finite() {
        let p = Parameters::zeros();
        let w = array![1.0, 1e3, 1e9];
        for circuit in CircuitType::ALL.iter() {
            for z in impedance(*circuit, &p, &w).iter() {
                assert!(!z.re.is_nan() && !z.im.is_nan(), "{} gave {}", circuit, z);
            }
        }
    }

    #[test]
    fn test_rational_of_skin_model() {
        for circuit in CircuitType::ALL.iter() {
            assert_eq!(
                rational(*circuit, &sample()).is_some(),
                !circuit.is_skin(),
                "{}",
                circuit
            );
        }
    }
}
