//! Prisma Analysis - Fourier transforms and spectra
//!
//! This crate turns signals into spectra and back:
//!
//! - [`dft`] - direct O(N²) transform, exact length
//! - [`fft`] - radix-2 O(N log N) transform, zero-padded to a power of two
//! - [`transform`] - the [`Transform`] capability and [`TransformKind`] selector
//! - [`spectrum`] - [`Spectrum`] plus amplitude/phase/frequency helpers
//! - [`segment`] - leading-segment analysis bundling plot-ready results
//!
//! Processors keep no "last spectrum": every forward call returns a value,
//! and amplitude/phase are derived from the spectrum the caller passes back.
//!
//! ## Example
//!
//! ```rust
//! use prisma_analysis::{Spectrum, TransformKind};
//! use prisma_core::Signal;
//!
//! let signal = Signal::new(vec![1.0, 0.0, 0.0, 0.0], 4).unwrap();
//! let spectrum = Spectrum::analyze(&signal, &TransformKind::Direct);
//! assert!(spectrum.amplitude().iter().all(|&m| (m - 1.0).abs() < 1e-12));
//!
//! let restored = spectrum.restore(&TransformKind::Direct).unwrap();
//! assert!((restored.samples()[0] - 1.0).abs() < 1e-12);
//! ```

pub mod dft;
pub mod fft;
pub mod segment;
pub mod spectrum;
pub mod transform;

pub use dft::Dft;
pub use fft::Fft;
pub use rustfft::num_complex::Complex64;
pub use segment::{DEFAULT_SEGMENT_LEN, SegmentAnalysis};
pub use spectrum::{Spectrum, amplitude_spectrum, bin_frequencies, phase_spectrum};
pub use transform::{Transform, TransformKind};
