//! Magnitude spectrum of a window of samples.
//!
//! Raw rectangular-window DFT: no taper, no detrending. Bins are reordered so
//! that zero frequency sits in the middle, and magnitudes are scaled by `1/N`.

use rustfft::FftPlanner;
use rustfft::num_complex::Complex;
use serde::Serialize;

use super::DisplayWindow;
use crate::telemetry::{Channel, SampleTable};

/// Centered frequency axis and matching magnitudes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spectrum {
    pub frequencies_hz: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    pub fn empty() -> Self {
        Self {
            frequencies_hz: Vec::new(),
            magnitudes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Spacing between adjacent bins in Hz
    pub fn resolution_hz(&self) -> Option<f64> {
        if self.frequencies_hz.len() < 2 {
            return None;
        }
        Some(self.frequencies_hz[1] - self.frequencies_hz[0])
    }

    /// Largest magnitude and the frequency it occurs at
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.frequencies_hz
            .iter()
            .zip(&self.magnitudes)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(&f, &m)| (f, m))
    }

    /// Largest magnitude among strictly positive frequencies
    pub fn positive_peak(&self) -> Option<(f64, f64)> {
        self.frequencies_hz
            .iter()
            .zip(&self.magnitudes)
            .filter(|(f, _)| **f > 0.0)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(&f, &m)| (f, m))
    }

    pub fn points(&self) -> Vec<[f64; 2]> {
        self.frequencies_hz
            .iter()
            .zip(&self.magnitudes)
            .map(|(&f, &m)| [f, m])
            .collect()
    }
}

/// DFT sample frequencies for `n` samples spaced `sample_period` apart
///
/// Unshifted order: `0, 1, ..., (n-1)/2, -(n/2), ..., -1`, each divided by
/// `n * sample_period`.
pub fn fft_frequencies(n: usize, sample_period: f64) -> Vec<f64> {
    if n == 0 || sample_period <= 0.0 {
        return Vec::new();
    }
    let scale = 1.0 / (n as f64 * sample_period);
    let positive = (n - 1) / 2 + 1;
    (0..n)
        .map(|k| {
            if k < positive {
                k as f64 * scale
            } else {
                (k as f64 - n as f64) * scale
            }
        })
        .collect()
}

/// Move the zero-frequency bin to the center
pub fn fft_shift<T: Copy>(values: &[T]) -> Vec<T> {
    let mut shifted = values.to_vec();
    shifted.rotate_right(values.len() / 2);
    shifted
}

/// Spectrum calculator holding a reusable FFT planner
pub struct SpectrumEstimator {
    planner: FftPlanner<f64>,
}

impl SpectrumEstimator {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Magnitude spectrum of `values` sampled every `sample_period` seconds
    ///
    /// A single value gives one bin at 0 Hz holding its absolute value; no values
    /// give an empty spectrum.
    pub fn compute(&mut self, values: &[f64], sample_period: f64) -> Spectrum {
        let n = values.len();
        if n == 0 {
            return Spectrum::empty();
        }

        let mut buffer: Vec<Complex<f64>> = values.iter().map(|&v| Complex::new(v, 0.0)).collect();
        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let scale = 1.0 / n as f64;
        let magnitudes: Vec<f64> = buffer.iter().map(|c| c.norm() * scale).collect();

        Spectrum {
            frequencies_hz: fft_shift(&fft_frequencies(n, sample_period)),
            magnitudes: fft_shift(&magnitudes),
        }
    }

    /// Spectrum of one channel over a window of the table
    pub fn channel_spectrum(
        &mut self,
        table: &SampleTable,
        channel: Channel,
        window: DisplayWindow,
    ) -> Spectrum {
        let values = table.column(channel, window.rows());
        log::debug!(
            "Spectrum of {} over rows {}..={} ({} samples)",
            channel,
            window.lo,
            window.hi,
            values.len()
        );
        self.compute(&values, table.sample_period())
    }

    /// Spectra of several channels over the same window, computed independently
    pub fn channel_spectra(
        &mut self,
        table: &SampleTable,
        channels: &[Channel],
        window: DisplayWindow,
    ) -> Vec<(Channel, Spectrum)> {
        channels
            .iter()
            .map(|&channel| (channel, self.channel_spectrum(table, channel, window)))
            .collect()
    }
}

impl Default for SpectrumEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_frequencies_even() {
        let freqs = fft_frequencies(6, 1.0);
        let expected = [0.0, 1.0 / 6.0, 2.0 / 6.0, -3.0 / 6.0, -2.0 / 6.0, -1.0 / 6.0];
        for (f, e) in freqs.iter().zip(expected) {
            assert_relative_eq!(*f, e);
        }
    }

    #[test]
    fn test_fft_frequencies_odd() {
        let freqs = fft_frequencies(5, 0.1);
        let expected = [0.0, 2.0, 4.0, -4.0, -2.0];
        for (f, e) in freqs.iter().zip(expected) {
            assert_relative_eq!(*f, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_fft_shift() {
        assert_eq!(fft_shift(&[0, 1, 2, -3, -2, -1]), vec![-3, -2, -1, 0, 1, 2]);
        assert_eq!(fft_shift(&[0, 1, 2, -2, -1]), vec![-2, -1, 0, 1, 2]);
        assert_eq!(fft_shift(&[7]), vec![7]);
        assert!(fft_shift::<i32>(&[]).is_empty());
    }

    #[test]
    fn test_single_sample() {
        let mut estimator = SpectrumEstimator::new();
        let spectrum = estimator.compute(&[-2.5], 0.01);
        assert_eq!(spectrum.frequencies_hz, vec![0.0]);
        assert_relative_eq!(spectrum.magnitudes[0], 2.5);
    }

    #[test]
    fn test_empty_input() {
        let mut estimator = SpectrumEstimator::new();
        assert!(estimator.compute(&[], 0.01).is_empty());
    }

    #[test]
    fn test_dc_signal() {
        let mut estimator = SpectrumEstimator::new();
        let spectrum = estimator.compute(&[3.0; 8], 0.5);
        let (freq, mag) = spectrum.peak().unwrap();
        assert_eq!(freq, 0.0);
        assert_relative_eq!(mag, 3.0, epsilon = 1e-12);
        assert_relative_eq!(spectrum.resolution_hz().unwrap(), 0.25);
    }

    #[test]
    fn test_sinusoid_peak_amplitude() {
        // 5 Hz at 100 Hz over 200 samples: exactly 10 cycles, on-bin
        let period = 0.01;
        let values: Vec<f64> = (0..200)
            .map(|k| (2.0 * PI * 5.0 * k as f64 * period).sin())
            .collect();
        let mut estimator = SpectrumEstimator::new();
        let spectrum = estimator.compute(&values, period);

        let (freq, mag) = spectrum.positive_peak().unwrap();
        assert_relative_eq!(freq, 5.0, epsilon = 1e-9);
        // A unit sinusoid splits its energy into two half-amplitude bins
        assert_relative_eq!(mag, 0.5, epsilon = 1e-9);
    }
}
