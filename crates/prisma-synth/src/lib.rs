//! Prisma Synth - waveform generation and modulation
//!
//! - [`synthesizer`] - [`Synthesizer`] renders a [`Tone`](prisma_core::Tone)
//!   into a [`Signal`](prisma_core::Signal), with seedable noise
//! - [`mix`] - [`sum`] and [`sum_all`] for polyphonic mixes
//! - [`modulation`] - AM and FM via [`modulate`]
//! - [`melody`] - [`MelodyRenderer`] for enveloped note sequences
//!
//! ## Example
//!
//! ```rust
//! use prisma_core::{Tone, Waveform};
//! use prisma_synth::{Modulation, Synthesizer, modulate, sum};
//!
//! let mut synth = Synthesizer::with_seed(1).with_sample_rate(8000).with_duration(0.5);
//! let carrier = synth.generate(&Tone::new(Waveform::Sine, 440.0)).unwrap();
//! let lfo = synth.generate(&Tone::new(Waveform::Triangle, 4.0)).unwrap();
//!
//! let chord = sum(&carrier, &lfo).unwrap();
//! assert!(chord.peak() <= 1.0);
//!
//! let vibrato = modulate(&carrier, &lfo, Modulation::Fm, 20.0).unwrap();
//! assert_eq!(vibrato.len(), 4000);
//! ```

pub mod melody;
pub mod mix;
pub mod modulation;
pub mod synthesizer;

pub use melody::{MelodyEvent, MelodyRenderer, note_frequency};
pub use mix::{sum, sum_all};
pub use modulation::{AM_DEPTH, Modulation, modulate};
pub use synthesizer::{
    DEFAULT_DURATION, DEFAULT_SAMPLE_RATE, Synthesizer, periodic_sample, render_tone,
};
