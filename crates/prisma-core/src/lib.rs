//! Prisma Core - signal types and time-domain primitives
//!
//! This crate holds the pieces every other prisma crate builds on:
//!
//! - [`Signal`] - mono `f64` samples with a sample rate and nominal duration
//! - [`Tone`] / [`Waveform`] - the description a synthesized signal came from
//! - [`Error`] - the shared error taxonomy
//! - [`rc_filter`] - single-pole RC low-pass, high-pass and band-pass filters
//! - [`math`] - peak normalization and small numeric helpers
//!
//! # Example
//!
//! ```rust
//! use prisma_core::{FilterMode, Signal};
//!
//! let signal = Signal::new(vec![10.0, 10.0, 10.0, 10.0], 44100).unwrap();
//! let held = FilterMode::LowPass { cutoff: -1.0 }.apply(&signal).unwrap();
//! assert_eq!(held.samples(), signal.samples());
//! ```
//!
//! # Tracing
//!
//! Enable the `tracing` feature to get `debug`/`trace` events from filter
//! construction and normalization.

pub mod error;
pub mod math;
pub mod rc_filter;
pub mod signal;
pub mod tone;

pub use error::{Error, Result};
pub use math::{
    is_power_of_two, linspace, next_power_of_two, normalize_to_unit_peak, peak, peak_normalize,
    to_u8,
};
pub use rc_filter::{
    FilterKind, FilterMode, FilterState, RcFilter, RcResponse, band_pass, high_pass,
    highpass_alpha, low_pass, lowpass_alpha,
};
pub use signal::Signal;
pub use tone::{Tone, Waveform};
