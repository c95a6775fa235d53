//! Periodic tone descriptions.
//!
//! A [`Tone`] records everything needed to regenerate a synthesized signal:
//! its [`Waveform`], peak amplitude, fundamental frequency and square-wave
//! duty cycle. Generated [`Signal`](crate::Signal)s keep their tone so that
//! frequency modulation can re-evaluate the carrier's shape at a new phase.

use core::fmt;
use core::str::FromStr;

use crate::error::Error;

/// Waveform shapes produced by the synthesizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// `sin(2πft)`.
    #[default]
    Sine,
    /// `+1` while the phase fraction is below the duty cycle, else `-1`.
    Square,
    /// `1 - 2|1 - 2p|`, rising from -1 to 1 over the first half period.
    Triangle,
    /// `2p - 1`, a ramp from -1 to 1 over each period.
    Sawtooth,
    /// Independent uniform samples in [-1, 1].
    Noise,
}

impl Waveform {
    /// All waveforms, in display order.
    pub const ALL: [Waveform; 5] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Sawtooth,
        Waveform::Noise,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Noise => "noise",
        }
    }

    /// Whether the waveform is periodic (everything except noise).
    pub fn is_periodic(self) -> bool {
        !matches!(self, Waveform::Noise)
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" | "sin" => Ok(Waveform::Sine),
            "square" | "pulse" => Ok(Waveform::Square),
            "triangle" | "tri" => Ok(Waveform::Triangle),
            "sawtooth" | "saw" => Ok(Waveform::Sawtooth),
            "noise" | "white" => Ok(Waveform::Noise),
            _ => Err(Error::unknown("waveform", s)),
        }
    }
}

/// Parameters of a synthesized tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Waveform shape.
    pub waveform: Waveform,
    /// Peak amplitude the unit waveform is scaled by.
    pub amplitude: f64,
    /// Fundamental frequency in Hz.
    pub frequency: f64,
    /// Square-wave duty cycle in [0, 1]. Ignored by other shapes.
    pub duty: f64,
}

impl Tone {
    /// Default square-wave duty cycle.
    pub const DEFAULT_DUTY: f64 = 0.5;

    /// Create a unit-amplitude tone with a 50% duty cycle.
    pub fn new(waveform: Waveform, frequency: f64) -> Self {
        Self {
            waveform,
            amplitude: 1.0,
            frequency,
            duty: Self::DEFAULT_DUTY,
        }
    }

    /// Set the peak amplitude.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Set the square-wave duty cycle.
    pub fn with_duty(mut self, duty: f64) -> Self {
        self.duty = duty;
        self
    }

    /// Check that the tone can be rendered.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.amplitude.is_finite() {
            return Err(Error::invalid("amplitude", "must be finite"));
        }
        if !self.frequency.is_finite() {
            return Err(Error::invalid("frequency", "must be finite"));
        }
        if !(0.0..=1.0).contains(&self.duty) {
            return Err(Error::invalid(
                "duty",
                format!("{} is outside [0, 1]", self.duty),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("sine".parse::<Waveform>().unwrap(), Waveform::Sine);
        assert_eq!("Square".parse::<Waveform>().unwrap(), Waveform::Square);
        assert_eq!(" saw ".parse::<Waveform>().unwrap(), Waveform::Sawtooth);
        assert_eq!("TRI".parse::<Waveform>().unwrap(), Waveform::Triangle);
        assert_eq!("noise".parse::<Waveform>().unwrap(), Waveform::Noise);
    }

    #[test]
    fn unknown_waveform_is_an_error() {
        let err = "mixed".parse::<Waveform>().unwrap_err();
        assert!(matches!(err, Error::UnknownIdentifier { kind: "waveform", .. }));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for w in Waveform::ALL {
            assert_eq!(w.to_string().parse::<Waveform>().unwrap(), w);
        }
    }

    #[test]
    fn duty_outside_unit_range_rejected() {
        let tone = Tone::new(Waveform::Square, 440.0).with_duty(1.5);
        assert!(tone.validate().is_err());
        assert!(Tone::new(Waveform::Square, 440.0).with_duty(0.0).validate().is_ok());
    }
}
