//! Mono sample sequences.

use core::ops::Range;

use crate::error::{Error, Result};
use crate::math;
use crate::tone::Tone;

/// Ordered real-valued samples with an associated sample rate.
///
/// # Invariants
///
/// - `sample_rate > 0`
/// - A freshly generated signal has `len() == round(sample_rate * duration)`.
///   After slicing or mixing the sample count is authoritative and
///   [`duration`](Self::duration) is only the nominal value.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: u32,
    duration: f64,
    tone: Option<Tone>,
}

impl Signal {
    /// Wrap samples recorded at `sample_rate`.
    ///
    /// The nominal duration is derived from the sample count.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        check_sample_rate(sample_rate)?;
        let duration = samples.len() as f64 / f64::from(sample_rate);
        Ok(Self {
            samples,
            sample_rate,
            duration,
            tone: None,
        })
    }

    /// Wrap samples with an explicit nominal duration.
    pub fn with_duration(samples: Vec<f64>, sample_rate: u32, duration: f64) -> Result<Self> {
        check_sample_rate(sample_rate)?;
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(Error::invalid(
                "duration",
                format!("{duration} must be finite and non-negative"),
            ));
        }
        Ok(Self {
            samples,
            sample_rate,
            duration,
            tone: None,
        })
    }

    /// Attach the tone this signal was generated from.
    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    /// Number of samples produced for `duration` seconds at `sample_rate`.
    pub fn sample_count(sample_rate: u32, duration: f64) -> usize {
        (f64::from(sample_rate) * duration).round().max(0.0) as usize
    }

    /// Sample data.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Mutable sample data.
    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    /// Consume the signal, returning its samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Nominal duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Tone the signal was generated from, if any.
    pub fn tone(&self) -> Option<&Tone> {
        self.tone.as_ref()
    }

    /// Time of each sample, `i / sample_rate`.
    pub fn times(&self) -> Vec<f64> {
        let rate = f64::from(self.sample_rate);
        (0..self.samples.len()).map(|i| i as f64 / rate).collect()
    }

    /// Largest absolute sample value (0 for an empty signal).
    pub fn peak(&self) -> f64 {
        math::peak(&self.samples)
    }

    /// Copy of the first `len` samples (or all of them if shorter).
    ///
    /// The tone is kept: truncation does not change how the signal was made.
    pub fn truncated(&self, len: usize) -> Signal {
        let len = len.min(self.samples.len());
        Signal {
            samples: self.samples[..len].to_vec(),
            sample_rate: self.sample_rate,
            duration: self.duration,
            tone: self.tone,
        }
    }

    /// Copy of the samples in `range`, clamped to the signal bounds.
    ///
    /// The result is a plain signal with no tone and a duration matching
    /// its length.
    pub fn slice(&self, range: Range<usize>) -> Signal {
        let end = range.end.min(self.samples.len());
        let start = range.start.min(end);
        let samples = self.samples[start..end].to_vec();
        let duration = samples.len() as f64 / f64::from(self.sample_rate);
        Signal {
            samples,
            sample_rate: self.sample_rate,
            duration,
            tone: None,
        }
    }

    /// New signal with the same rate and duration but different samples.
    ///
    /// Used by processors whose output no longer matches the source tone.
    pub fn derive(&self, samples: Vec<f64>) -> Signal {
        Signal {
            samples,
            sample_rate: self.sample_rate,
            duration: self.duration,
            tone: None,
        }
    }

    /// Fail with [`Error::SampleRateMismatch`] unless both rates agree.
    pub fn ensure_same_rate(&self, other: &Signal) -> Result<()> {
        if self.sample_rate == other.sample_rate {
            Ok(())
        } else {
            Err(Error::SampleRateMismatch {
                left: self.sample_rate,
                right: other.sample_rate,
            })
        }
    }
}

fn check_sample_rate(sample_rate: u32) -> Result<()> {
    if sample_rate == 0 {
        Err(Error::invalid("sample_rate", "must be greater than zero"))
    } else {
        Ok(())
    }
}
