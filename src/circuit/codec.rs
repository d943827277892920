//! Mapping between the universal parameter vector and the dense vector a
//! topology exposes to the optimizer.
//!
//! Both directions walk the same slot table of [`CircuitType`], so `shorten`
//! and `expand` are exact inverses on the active slots.
use crate::circuit::{CircuitType, Parameters, Slot};
use crate::consts::N_PARAMS;
use crate::error::{FitError, Result};
use ndarray::prelude::*;

/// Per-slot lock mask; a locked slot keeps its previous value during a fit.
pub type LockMask = [bool; N_PARAMS];

/// Copies the active slots of `params` into a dense vector.
pub fn shorten(circuit: CircuitType, params: &Parameters) -> Array1<f64> {
    circuit.slots().iter().map(|&slot| params[slot]).collect()
}

/// Inverse of [`shorten`]. Inactive slots come back as zero.
pub fn expand(circuit: CircuitType, x: &Array1<f64>) -> Result<Parameters> {
    expand_locked(circuit, x, None, None)
}

/// Like [`expand`], but every active slot set in `lock` takes its value from
/// `previous` instead of `x`.
pub fn expand_locked(
    circuit: CircuitType,
    x: &Array1<f64>,
    lock: Option<&LockMask>,
    previous: Option<&Parameters>,
) -> Result<Parameters> {
    if x.len() != circuit.n_elements() {
        return Err(FitError::InvalidDimension {
            expected: circuit.n_elements(),
            actual: x.len(),
        });
    }
    let mut out = Parameters::zeros();
    for (pos, &slot) in circuit.slots().iter().enumerate() {
        out[slot] = match (lock, previous) {
            (Some(lock), Some(previous)) if lock[slot.idx()] => previous[slot],
            _ => x[pos],
        };
    }
    Ok(out)
}

/// Lock mask with only the given slots set.
pub fn lock_mask(slots: &[Slot]) -> LockMask {
    let mut mask = [false; N_PARAMS];
    for slot in slots {
        mask[slot.idx()] = true;
    }
    mask
}

#[cfg(test)]
mod codec_tests {
    use super::*;

    #[test]
    fn test_shorten() {
        let p = Parameters::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(shorten(CircuitType::Model0, &p), array![1.0, 5.0]);
        assert_eq!(shorten(CircuitType::Model3, &p), array![1.0, 6.0]);
        assert_eq!(shorten(CircuitType::Model8, &p), array![1.0, 4.0, 6.0]);
        assert_eq!(shorten(CircuitType::Model9, &p), array![1.0, 4.0, 5.0, 6.0]);
        assert_eq!(shorten(CircuitType::Model12, &p), array![1.0, 5.0, 6.0, 7.0]);
        assert_eq!(
            shorten(CircuitType::Model16, &p),
            array![1.0, 2.0, 3.0, 4.0, 6.0]
        );
        assert_eq!(
            shorten(CircuitType::Model20, &p),
            array![1.0, 2.0, 3.0, 5.0, 6.0, 7.0]
        );
    }

    #[test]
    fn test_expand() {
        let p = expand(CircuitType::Model9, &array![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(p.values(), &[1.0, 0.0, 0.0, 2.0, 3.0, 4.0, 0.0]);

        let p = expand(CircuitType::Model8, &array![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(p.values(), &[1.0, 0.0, 0.0, 2.0, 0.0, 3.0, 0.0]);

        assert!(matches!(
            expand(CircuitType::Model0, &array![1.0, 2.0, 3.0]),
            Err(FitError::InvalidDimension {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_expand_locked() {
        let previous = Parameters::new([10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
        let lock = lock_mask(&[Slot::L, Slot::C1]);
        let x = array![1.0, 2.0, 3.0];

        let p = expand_locked(CircuitType::Model4, &x, Some(&lock), Some(&previous)).unwrap();
        assert_eq!(p.values(), &[1.0, 0.0, 0.0, 0.0, 50.0, 3.0, 0.0]);

        // a lock without a previous vector has nothing to hold on to
        let p = expand_locked(CircuitType::Model4, &x, Some(&lock), None).unwrap();
        assert_eq!(p.values(), &[1.0, 0.0, 0.0, 0.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn test_round_trip() {
        let full = Parameters::new([1.5, -2.0, 0.25, 1e3, 3e-9, 4e-12, -7.0]);
        for circuit in CircuitType::ALL.iter() {
            let x = Array1::from_shape_fn(circuit.n_elements(), |i| (i as f64 + 1.0) * 1.1);
            let back = shorten(*circuit, &expand(*circuit, &x).unwrap());
            assert_eq!(back, x, "{}", circuit);

            let again = expand(*circuit, &shorten(*circuit, &full)).unwrap();
            assert_eq!(again, full.cleaned(*circuit), "{}", circuit);
        }
    }
}
