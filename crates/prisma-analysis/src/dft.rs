//! Direct (O(N²)) discrete Fourier transform.
//!
//! ```text
//! X[k] = Σ_n x[n] · (cos(2πkn/N) - i·sin(2πkn/N))
//! x[n] = (1/N) · Re Σ_k X[k] · (cos(2πkn/N) + i·sin(2πkn/N))
//! ```
//!
//! The inverse keeps only the real part; a spectrum that is not
//! conjugate-symmetric silently loses its imaginary component.

use std::f64::consts::TAU;

use rustfft::num_complex::Complex64;

use crate::transform::Transform;

/// Direct DFT processor.
///
/// Stateless: every call takes its input explicitly and returns a new
/// buffer, so one instance can be shared freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dft;

impl Dft {
    /// Create a direct transform.
    pub fn new() -> Self {
        Self
    }

    /// Forward transform of real samples; the output has the input's length.
    pub fn forward(&self, samples: &[f64]) -> Vec<Complex64> {
        let n = samples.len();
        let mut spectrum = Vec::with_capacity(n);
        for k in 0..n {
            let mut re = 0.0;
            let mut im = 0.0;
            for (i, &x) in samples.iter().enumerate() {
                let angle = TAU * ((k * i) % n) as f64 / n as f64;
                re += x * angle.cos();
                im -= x * angle.sin();
            }
            spectrum.push(Complex64::new(re, im));
        }
        spectrum
    }

    /// Inverse transform, returning the real part of each sample.
    pub fn inverse(&self, spectrum: &[Complex64]) -> Vec<f64> {
        let n = spectrum.len();
        let mut signal = Vec::with_capacity(n);
        for i in 0..n {
            let mut re = 0.0;
            for (k, bin) in spectrum.iter().enumerate() {
                let angle = TAU * ((k * i) % n) as f64 / n as f64;
                re += bin.re * angle.cos() - bin.im * angle.sin();
            }
            signal.push(re / n as f64);
        }
        signal
    }
}

impl Transform for Dft {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn forward(&self, samples: &[f64]) -> Vec<Complex64> {
        Dft::forward(self, samples)
    }

    fn inverse(&self, spectrum: &[Complex64]) -> Vec<f64> {
        Dft::inverse(self, spectrum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_has_flat_spectrum() {
        let spectrum = Dft::new().forward(&[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(spectrum.len(), 4);
        for bin in &spectrum {
            assert!((bin.re - 1.0).abs() < 1e-12);
            assert!(bin.im.abs() < 1e-12);
        }
    }

    #[test]
    fn empty_in_empty_out() {
        let dft = Dft::new();
        assert!(dft.forward(&[]).is_empty());
        assert!(dft.inverse(&[]).is_empty());
    }

    #[test]
    fn dc_lands_in_bin_zero() {
        let spectrum = Dft::new().forward(&[2.0; 8]);
        assert!((spectrum[0].re - 16.0).abs() < 1e-12);
        for bin in &spectrum[1..] {
            assert!(bin.norm() < 1e-12);
        }
    }

    #[test]
    fn roundtrip_odd_length() {
        let x = [0.3, -1.2, 0.8, 0.0, 2.5];
        let dft = Dft::new();
        let restored = dft.inverse(&dft.forward(&x));
        for (a, b) in x.iter().zip(restored.iter()) {
            assert!((a - b).abs() < 1e-12, "{a} vs {b}");
        }
    }

    #[test]
    fn inverse_discards_imaginary_part() {
        // A lone imaginary DC bin has no real contribution.
        let restored = Dft::new().inverse(&[Complex64::new(0.0, 4.0), Complex64::new(0.0, 0.0)]);
        assert!(restored.iter().all(|x| x.abs() < 1e-12));
    }
}
