//! Transform capability shared by the direct and fast processors.

use core::fmt;
use core::str::FromStr;

use prisma_core::Error;
use rustfft::num_complex::Complex64;

use crate::dft::Dft;
use crate::fft::Fft;

/// Forward/inverse frequency transform over real samples.
///
/// Implementations are stateless. The forward output of a [`Fft`] may be
/// longer than its input (zero padding); a [`Dft`] output always matches the
/// input length.
pub trait Transform {
    /// Short identifier used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Real samples to complex spectrum.
    fn forward(&self, samples: &[f64]) -> Vec<Complex64>;

    /// Complex spectrum back to real samples (imaginary part discarded).
    fn inverse(&self, spectrum: &[Complex64]) -> Vec<f64>;
}

/// Transform selected at the call site.
///
/// # Example
///
/// ```rust
/// use prisma_analysis::{Transform, TransformKind};
///
/// let kind: TransformKind = "fft".parse().unwrap();
/// let spectrum = kind.forward(&[0.0, 1.0, 0.0, -1.0]);
/// assert_eq!(spectrum.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// O(N²) direct transform, exact length.
    Direct,
    /// O(N log N) radix-2 transform, padded to a power of two.
    #[default]
    Fast,
}

impl TransformKind {
    /// Length of the spectrum produced for `len` input samples.
    pub fn output_len(self, len: usize) -> usize {
        match self {
            TransformKind::Direct => len,
            TransformKind::Fast => Fft::padded_len(len),
        }
    }
}

impl Transform for TransformKind {
    fn name(&self) -> &'static str {
        match self {
            TransformKind::Direct => Dft.name(),
            TransformKind::Fast => Fft.name(),
        }
    }

    fn forward(&self, samples: &[f64]) -> Vec<Complex64> {
        match self {
            TransformKind::Direct => Dft.forward(samples),
            TransformKind::Fast => Fft.forward(samples),
        }
    }

    fn inverse(&self, spectrum: &[Complex64]) -> Vec<f64> {
        match self {
            TransformKind::Direct => Dft.inverse(spectrum),
            TransformKind::Fast => Fft.inverse(spectrum),
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "dft" => Ok(TransformKind::Direct),
            "fast" | "fft" => Ok(TransformKind::Fast),
            _ => Err(Error::unknown("transform", s)),
        }
    }
}
