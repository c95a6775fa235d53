//! Radix-2 Cooley–Tukey fast Fourier transform.
//!
//! Decimation in time, computed iteratively: the input is permuted into
//! bit-reversed order and then combined stage by stage with
//!
//! ```text
//! combined[k]       = even[k] + W(k, N) · odd[k]
//! combined[k + N/2] = even[k] - W(k, N) · odd[k]
//! W(k, N)           = exp(-2πi·k/N)
//! ```
//!
//! which yields exactly the values of the textbook even/odd recursion without
//! its call depth. Real input whose length is not a power of two is
//! right-padded with zeros, so the spectrum can be longer than the signal.
//!
//! The inverse reuses the forward butterflies through conjugation:
//! `ifft(X) = conj(fft(conj(X))) / N`.

use std::f64::consts::TAU;

use prisma_core::{Error, Result, is_power_of_two, next_power_of_two};
use rustfft::num_complex::Complex64;

use crate::dft::Dft;
use crate::transform::Transform;

/// Fast (radix-2) transform processor.
///
/// # Example
///
/// ```rust
/// use prisma_analysis::Fft;
///
/// let fft = Fft::new();
/// let spectrum = fft.forward(&[1.0, 2.0, 3.0]); // padded to 4
/// assert_eq!(spectrum.len(), 4);
/// let restored = fft.inverse(&spectrum);
/// assert!((restored[2] - 3.0).abs() < 1e-12);
/// assert!(restored[3].abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Fft;

impl Fft {
    /// Create a fast transform.
    pub fn new() -> Self {
        Self
    }

    /// Length the forward transform will produce for `len` input samples.
    pub fn padded_len(len: usize) -> usize {
        if len == 0 { 0 } else { next_power_of_two(len) }
    }

    /// Forward transform of real samples, zero-padded to a power of two.
    pub fn forward(&self, samples: &[f64]) -> Vec<Complex64> {
        let padded = Self::padded_len(samples.len());
        if padded != samples.len() {
            tracing::debug!("fft: padding {} samples to {padded}", samples.len());
        }
        let mut buffer: Vec<Complex64> = samples.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        buffer.resize(padded, Complex64::new(0.0, 0.0));
        butterflies(&mut buffer);
        buffer
    }

    /// In-place forward transform of a complex buffer.
    ///
    /// The buffer length must be zero or a power of two.
    pub fn forward_complex(&self, buffer: &mut [Complex64]) -> Result<()> {
        if !buffer.is_empty() && !is_power_of_two(buffer.len()) {
            return Err(Error::invalid(
                "buffer",
                format!("length {} is not a power of two", buffer.len()),
            ));
        }
        butterflies(buffer);
        Ok(())
    }

    /// Inverse transform, returning the real part of each sample.
    ///
    /// A spectrum whose length is not a power of two cannot be produced by
    /// [`forward`](Self::forward); it is inverted with the direct transform
    /// rather than padded, since padding a spectrum changes its meaning.
    pub fn inverse(&self, spectrum: &[Complex64]) -> Vec<f64> {
        let n = spectrum.len();
        if n == 0 {
            return Vec::new();
        }
        if !is_power_of_two(n) {
            tracing::warn!("fft: inverse of non power-of-two length {n}, using direct transform");
            return Dft::new().inverse(spectrum);
        }

        let mut buffer: Vec<Complex64> = spectrum.iter().map(|c| c.conj()).collect();
        butterflies(&mut buffer);
        let scale = 1.0 / n as f64;
        buffer.iter().map(|c| c.conj().re * scale).collect()
    }
}

impl Transform for Fft {
    fn name(&self) -> &'static str {
        "fast"
    }

    fn forward(&self, samples: &[f64]) -> Vec<Complex64> {
        Fft::forward(self, samples)
    }

    fn inverse(&self, spectrum: &[Complex64]) -> Vec<f64> {
        Fft::inverse(self, spectrum)
    }
}

/// Bit-reversal permutation followed by log2(N) butterfly stages.
fn butterflies(buffer: &mut [Complex64]) {
    let n = buffer.len();
    if n <= 1 {
        return;
    }
    debug_assert!(is_power_of_two(n));

    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if j > i {
            buffer.swap(i, j);
        }
    }

    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let twiddles: Vec<Complex64> = (0..half)
            .map(|k| Complex64::from_polar(1.0, -TAU * k as f64 / len as f64))
            .collect();

        for block in buffer.chunks_exact_mut(len) {
            let (even, odd) = block.split_at_mut(half);
            for k in 0..half {
                let t = twiddles[k] * odd[k];
                let e = even[k];
                even[k] = e + t;
                odd[k] = e - t;
            }
        }
        len <<= 1;
    }
}
