//! Waveform generation.
//!
//! Every periodic shape is evaluated from the number of elapsed cycles
//! `f·t`. The sine uses it directly; the other shapes use its fractional
//! part `p = (f·t) mod 1`:
//!
//! | Waveform | Value |
//! |----------|-------|
//! | sine     | `sin(2π·f·t)` |
//! | square   | `+1` if `p < duty`, else `-1` |
//! | triangle | `1 - 2·|1 - 2p|` |
//! | sawtooth | `2p - 1` |
//! | noise    | uniform in `[-1, 1]` |
//!
//! The result is scaled by the tone amplitude.

use std::f64::consts::TAU;

use prisma_core::{Error, Result, Signal, Tone, Waveform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sample rate used when none is given.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Duration in seconds used when none is given.
pub const DEFAULT_DURATION: f64 = 2.0;

/// Unit-amplitude value of a periodic waveform after `cycles` periods.
///
/// Noise has no phase; it evaluates as a sine here.
#[inline]
pub fn periodic_sample(waveform: Waveform, cycles: f64, duty: f64) -> f64 {
    let p = cycles.rem_euclid(1.0);
    match waveform {
        Waveform::Sine | Waveform::Noise => (TAU * cycles).sin(),
        Waveform::Square => {
            if p < duty {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Triangle => 1.0 - 2.0 * (1.0 - 2.0 * p).abs(),
        Waveform::Sawtooth => 2.0 * p - 1.0,
    }
}

/// Render `tone` for `duration` seconds at `sample_rate`.
///
/// Produces `round(sample_rate · duration)` samples at `t_i = i / sample_rate`
/// and attaches the tone to the returned signal. Noise draws from `rng`.
pub fn render_tone<R: Rng>(
    tone: &Tone,
    duration: f64,
    sample_rate: u32,
    rng: &mut R,
) -> Result<Signal> {
    tone.validate()?;
    if sample_rate == 0 {
        return Err(Error::invalid("sample_rate", "must be positive"));
    }
    if !(duration.is_finite() && duration >= 0.0) {
        return Err(Error::invalid(
            "duration",
            format!("{duration} must be finite and non-negative"),
        ));
    }

    let len = Signal::sample_count(sample_rate, duration);
    let rate = f64::from(sample_rate);
    tracing::debug!(
        "render_tone: {} {:.2} Hz x{:.3}, {len} samples at {sample_rate} Hz",
        tone.waveform,
        tone.frequency,
        tone.amplitude
    );

    let samples: Vec<f64> = match tone.waveform {
        Waveform::Noise => (0..len)
            .map(|_| tone.amplitude * rng.random_range(-1.0..=1.0))
            .collect(),
        shape => (0..len)
            .map(|i| {
                let t = i as f64 / rate;
                tone.amplitude * periodic_sample(shape, tone.frequency * t, tone.duty)
            })
            .collect(),
    };

    Ok(Signal::with_duration(samples, sample_rate, duration)?.with_tone(*tone))
}

/// Tone generator with default timing and a seedable noise source.
///
/// Two synthesizers built with the same seed produce identical noise.
///
/// # Example
///
/// ```rust
/// use prisma_core::{Tone, Waveform};
/// use prisma_synth::Synthesizer;
///
/// let mut synth = Synthesizer::with_seed(7).with_sample_rate(4).with_duration(1.0);
/// let sine = synth.generate(&Tone::new(Waveform::Sine, 1.0)).unwrap();
/// assert_eq!(sine.len(), 4);
/// assert!((sine.samples()[1] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Synthesizer {
    rng: StdRng,
    sample_rate: u32,
    duration: f64,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Synthesizer {
    /// Synthesizer seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Synthesizer with a fixed noise seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration: DEFAULT_DURATION,
        }
    }

    /// Set the default sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the default duration in seconds.
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Default sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Default duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Render `tone` with the default duration and sample rate.
    pub fn generate(&mut self, tone: &Tone) -> Result<Signal> {
        render_tone(tone, self.duration, self.sample_rate, &mut self.rng)
    }

    /// Render `tone` with explicit timing.
    pub fn generate_with(&mut self, tone: &Tone, duration: f64, sample_rate: u32) -> Result<Signal> {
        render_tone(tone, duration, sample_rate, &mut self.rng)
    }
}
