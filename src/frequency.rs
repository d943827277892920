use crate::error::{FitError, Result};
use crate::scale::Scale;
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::Range;

/// Unit of a frequency vector handed back by the range filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum DataFormat {
    #[default]
    Hz,
    Omega,
}

// Frequency stores values in Hz
#[derive(Clone, Debug, PartialEq)]
pub struct Frequency {
    pts: Array1<f64>,
}

impl Frequency {
    pub fn new(pts: Array1<f64>) -> Frequency {
        Frequency { pts }
    }

    pub fn new_scaled(pts: Array1<f64>, scale: Scale) -> Frequency {
        Frequency {
            pts: scale.unscale_array(&pts),
        }
    }

    pub fn from_vec(f: Vec<f64>, scale: Scale) -> Frequency {
        Frequency::new_scaled(Array1::from_vec(f), scale)
    }

    /// `npts` points from `start` to `stop`, both included.
    pub fn from_lin_range(start: f64, stop: f64, npts: usize, scale: Scale) -> Frequency {
        Frequency::new_scaled(Array1::linspace(start, stop, npts), scale)
    }

    /// `npts` logarithmically spaced points from `start` to `stop`, both included.
    pub fn from_log_range(start: f64, stop: f64, npts: usize, scale: Scale) -> Frequency {
        let pts = Array1::logspace(10.0, start.log10(), stop.log10(), npts);
        let mut freq = Frequency::new_scaled(pts, scale);
        // pin the end points, logspace rounds them
        if npts > 0 {
            freq.pts[0] = scale.unscale(start);
            freq.pts[npts - 1] = scale.unscale(stop);
        }
        freq
    }

    pub fn freq(&self) -> &Array1<f64> {
        &self.pts
    }

    pub fn freq_at(&self, pt: usize) -> f64 {
        self.pts[pt]
    }

    pub fn freq_scaled(&self, scale: Scale) -> Array1<f64> {
        scale.scale_array(&self.pts)
    }

    pub fn npts(&self) -> usize {
        self.pts.len()
    }

    pub fn is_sorted(&self) -> bool {
        is_sorted(&self.pts)
    }

    pub fn w(&self) -> Array1<f64> {
        hz_to_w(&self.pts)
    }
}

pub fn hz_to_w(f: &Array1<f64>) -> Array1<f64> {
    f.map(|x| 2.0 * PI * x)
}

pub fn w_to_hz(w: &Array1<f64>) -> Array1<f64> {
    w.map(|x| x / (2.0 * PI))
}

pub fn is_sorted(f: &Array1<f64>) -> bool {
    f.windows(2).into_iter().all(|w| w[0] <= w[1])
}

/// Sub-band restriction of a sweep, in Hz. An `auto` side is unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FreqRange {
    pub f_min: f64,
    pub f_max: f64,
    pub f_min_auto: bool,
    pub f_max_auto: bool,
}

impl Default for FreqRange {
    fn default() -> Self {
        FreqRange {
            f_min: 0.0,
            f_max: 0.0,
            f_min_auto: true,
            f_max_auto: true,
        }
    }
}

impl FreqRange {
    pub fn new(f_min: Option<f64>, f_max: Option<f64>) -> FreqRange {
        FreqRange {
            f_min: f_min.unwrap_or(0.0),
            f_max: f_max.unwrap_or(0.0),
            f_min_auto: f_min.is_none(),
            f_max_auto: f_max.is_none(),
        }
    }

    pub fn check(&self) -> Result<()> {
        if !self.f_min_auto && !self.f_max_auto && self.f_max < self.f_min {
            return Err(FitError::InvalidFrequencyRange {
                f_min: self.f_min,
                f_max: self.f_max,
            });
        }
        Ok(())
    }

    fn above_min(&self, f: f64) -> bool {
        // zero and negative frequencies never take part in a fit
        f > 0.0 && (self.f_min_auto || f >= self.f_min)
    }

    fn below_max(&self, f: f64) -> bool {
        self.f_max_auto || f <= self.f_max
    }

    /// Index range of `f` (Hz, non-decreasing) that lies inside the band.
    pub fn bounds(&self, f: &Array1<f64>) -> Result<Range<usize>> {
        self.check()?;
        if !is_sorted(f) {
            return Err(FitError::UnsortedFrequency);
        }
        let low = f.iter().position(|&x| self.above_min(x));
        let high = f.iter().rposition(|&x| self.below_max(x));
        match (low, high) {
            (Some(low), Some(high)) if low <= high => Ok(low..high + 1),
            _ => Err(FitError::EmptyFrequencyRange),
        }
    }

    /// First index of `f` inside the band.
    pub fn first_index(&self, f: &Array1<f64>) -> Result<usize> {
        Ok(self.bounds(f)?.start)
    }

    /// Restricts `f` (Hz) to the band and returns it in the requested format.
    pub fn apply_to_freq(&self, f: &Array1<f64>, format: DataFormat) -> Result<Array1<f64>> {
        let range = self.bounds(f)?;
        let out = f.slice(s![range]).to_owned();
        match format {
            DataFormat::Hz => Ok(out),
            DataFormat::Omega => Ok(hz_to_w(&out)),
        }
    }

    /// Restricts `data`, sampled at `f` (Hz), to the band.
    pub fn apply_to_data<T: Clone>(&self, f: &Array1<f64>, data: &Array1<T>) -> Result<Array1<T>> {
        if f.len() != data.len() {
            return Err(FitError::LengthMismatch {
                measured: data.len(),
                simulated: f.len(),
            });
        }
        let range = self.bounds(f)?;
        Ok(data.slice(s![range]).to_owned())
    }
}
