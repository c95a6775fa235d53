//! Spectra tied to the signal they were computed from.

use prisma_core::{Result, Signal};
use rustfft::num_complex::Complex64;

use crate::transform::{Transform, TransformKind};

/// Magnitude `|X[k]|` of each bin (empty for an empty spectrum).
pub fn amplitude_spectrum(bins: &[Complex64]) -> Vec<f64> {
    bins.iter().map(|c| c.norm()).collect()
}

/// Phase `atan2(im, re)` of each bin in radians.
pub fn phase_spectrum(bins: &[Complex64]) -> Vec<f64> {
    bins.iter().map(|c| c.im.atan2(c.re)).collect()
}

/// Frequency in Hz of each of `len` bins: `k * sample_rate / len`.
///
/// Bins at and above `len / 2` are the aliased negative-frequency half; the
/// axis is returned unfolded, as the bins are.
pub fn bin_frequencies(len: usize, sample_rate: u32) -> Vec<f64> {
    let rate = f64::from(sample_rate);
    (0..len).map(|k| k as f64 * rate / len as f64).collect()
}

/// Complex spectrum of a signal.
///
/// # Invariants
///
/// - `bins.len()` equals the transformed length: the signal length for a
///   direct transform, the next power of two for a fast one.
/// - `source_len <= bins.len()`
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    bins: Vec<Complex64>,
    sample_rate: u32,
    source_len: usize,
}

impl Spectrum {
    /// Transform `signal` with the selected processor.
    pub fn analyze(signal: &Signal, transform: &impl Transform) -> Self {
        tracing::debug!(
            "spectrum: {} transform of {} samples at {} Hz",
            transform.name(),
            signal.len(),
            signal.sample_rate()
        );
        Self {
            bins: transform.forward(signal.samples()),
            sample_rate: signal.sample_rate(),
            source_len: signal.len(),
        }
    }

    /// Wrap bins computed elsewhere.
    pub fn from_bins(bins: Vec<Complex64>, sample_rate: u32) -> Self {
        let source_len = bins.len();
        Self {
            bins,
            sample_rate,
            source_len,
        }
    }

    /// Complex bins.
    pub fn bins(&self) -> &[Complex64] {
        &self.bins
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Whether the spectrum is empty.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Sample rate of the source signal.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Length of the source signal before any zero padding.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Whether the transform padded the source.
    pub fn is_padded(&self) -> bool {
        self.bins.len() != self.source_len
    }

    /// Magnitude of each bin.
    pub fn amplitude(&self) -> Vec<f64> {
        amplitude_spectrum(&self.bins)
    }

    /// Phase of each bin in radians.
    pub fn phase(&self) -> Vec<f64> {
        phase_spectrum(&self.bins)
    }

    /// Frequency axis in Hz, one entry per bin.
    pub fn frequencies(&self) -> Vec<f64> {
        bin_frequencies(self.bins.len(), self.sample_rate)
    }

    /// Frequency of bin `k` in Hz.
    pub fn bin_frequency(&self, k: usize) -> f64 {
        if self.bins.is_empty() {
            return 0.0;
        }
        k as f64 * f64::from(self.sample_rate) / self.bins.len() as f64
    }

    /// Index of the largest-magnitude bin below Nyquist, if any.
    pub fn peak_bin(&self) -> Option<usize> {
        let half = (self.bins.len() / 2).max(1).min(self.bins.len());
        self.bins[..half]
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm().total_cmp(&b.norm()))
            .map(|(k, _)| k)
    }

    /// Inverse transform over every bin (including zero padding).
    pub fn to_signal(&self, transform: &impl Transform) -> Result<Signal> {
        Signal::new(transform.inverse(&self.bins), self.sample_rate)
    }

    /// Inverse transform trimmed back to the source length.
    pub fn restore(&self, transform: &impl Transform) -> Result<Signal> {
        let mut samples = transform.inverse(&self.bins);
        samples.truncate(self.source_len);
        Signal::new(samples, self.sample_rate)
    }
}

impl TransformKind {
    /// Forward transform of a whole signal.
    pub fn analyze(self, signal: &Signal) -> Spectrum {
        Spectrum::analyze(signal, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn amplitude_and_phase_of_known_bins() {
        let bins = [
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 2.0),
            Complex64::new(-3.0, 0.0),
            Complex64::new(3.0, -4.0),
        ];
        assert_eq!(amplitude_spectrum(&bins), vec![1.0, 2.0, 3.0, 5.0]);
        let phase = phase_spectrum(&bins);
        assert_eq!(phase[0], 0.0);
        assert!((phase[1] - PI / 2.0).abs() < 1e-12);
        assert!((phase[2] - PI).abs() < 1e-12);
    }

    #[test]
    fn empty_spectrum_accessors_are_empty() {
        let s = Spectrum::from_bins(Vec::new(), 44100);
        assert!(s.amplitude().is_empty());
        assert!(s.phase().is_empty());
        assert!(s.frequencies().is_empty());
        assert_eq!(s.peak_bin(), None);
        assert_eq!(s.bin_frequency(3), 0.0);
    }

    #[test]
    fn frequency_axis() {
        assert_eq!(bin_frequencies(4, 8), vec![0.0, 2.0, 4.0, 6.0]);
    }

    #[test]
    fn padded_spectrum_restores_source_length() {
        let signal = Signal::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], 10).unwrap();
        let spectrum = TransformKind::Fast.analyze(&signal);
        assert_eq!(spectrum.len(), 8);
        assert!(spectrum.is_padded());
        assert_eq!(spectrum.to_signal(&TransformKind::Fast).unwrap().len(), 8);

        let restored = spectrum.restore(&TransformKind::Fast).unwrap();
        assert_eq!(restored.len(), 5);
        for (a, b) in signal.samples().iter().zip(restored.samples()) {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
