//! Amplitude and frequency modulation.
//!
//! Both kinds truncate the inputs to the shorter length and rescale the
//! modulator to a unit peak first (an all-zero modulator is left alone), so
//! `index` and the AM depth act on a normalized control signal.
//!
//! - AM: `y = c · (1 + 0.5·m)`
//! - FM: instantaneous frequency `f_c + index·m`, integrated into a phase
//!   that drives the carrier's own waveform at the carrier's amplitude.
//!
//! The output is peak-normalized so it never exceeds 1.

use core::fmt;
use core::str::FromStr;

use prisma_core::{Error, Result, Signal, Waveform, normalize_to_unit_peak, peak_normalize};

use crate::synthesizer::periodic_sample;

/// Depth applied to the normalized modulator in amplitude modulation.
pub const AM_DEPTH: f64 = 0.5;

/// Modulation kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Modulation {
    /// Amplitude modulation.
    #[default]
    Am,
    /// Frequency modulation.
    Fm,
}

impl Modulation {
    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Modulation::Am => "AM",
            Modulation::Fm => "FM",
        }
    }
}

impl fmt::Display for Modulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Modulation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "am" | "amplitude" => Ok(Modulation::Am),
            "fm" | "frequency" => Ok(Modulation::Fm),
            _ => Err(Error::unknown("modulation", s)),
        }
    }
}

/// Shape, frequency, amplitude and duty used to re-render an FM carrier.
///
/// Carriers without a tone (mixes, filtered signals) become a 0 Hz sine;
/// noise carriers become a sine at their nominal frequency. Both use unit
/// amplitude.
fn carrier_voice(carrier: &Signal) -> (Waveform, f64, f64, f64) {
    match carrier.tone() {
        Some(t) if t.waveform.is_periodic() => (t.waveform, t.frequency, t.amplitude, t.duty),
        Some(t) => {
            tracing::warn!("fm: noise carrier replaced by a {:.2} Hz sine", t.frequency);
            (Waveform::Sine, t.frequency, 1.0, 0.5)
        }
        None => {
            tracing::warn!("fm: carrier has no tone, using a 0 Hz sine");
            (Waveform::Sine, 0.0, 1.0, 0.5)
        }
    }
}

/// Modulate `carrier` by `modulator`.
///
/// `index` is the FM frequency deviation in Hz per unit of modulator and is
/// ignored for AM. Fails with [`Error::SampleRateMismatch`] when the rates
/// differ.
pub fn modulate(carrier: &Signal, modulator: &Signal, kind: Modulation, index: f64) -> Result<Signal> {
    carrier.ensure_same_rate(modulator)?;
    if !index.is_finite() {
        return Err(Error::invalid("index", "must be finite"));
    }

    let len = carrier.len().min(modulator.len());
    let c = &carrier.samples()[..len];
    let mut m = modulator.samples()[..len].to_vec();
    normalize_to_unit_peak(&mut m);

    let mut out: Vec<f64> = match kind {
        Modulation::Am => c
            .iter()
            .zip(&m)
            .map(|(c, m)| c * (1.0 + AM_DEPTH * m))
            .collect(),
        Modulation::Fm => {
            let (waveform, freq, amplitude, duty) = carrier_voice(carrier);
            let rate = f64::from(carrier.sample_rate());
            let mut cycles = 0.0_f64;
            m.iter()
                .map(|m| {
                    cycles = (cycles + (freq + index * m) / rate).rem_euclid(1.0);
                    amplitude * periodic_sample(waveform, cycles, duty)
                })
                .collect()
        }
    };
    let divisor = peak_normalize(&mut out);
    tracing::debug!("{kind}: {len} samples, index {index}, normalized by {divisor:.4}");

    Signal::new(out, carrier.sample_rate())
}
