//! Melody rendering.
//!
//! A melody is a list of [`MelodyEvent`]s, each a note or a rest with a
//! length in seconds. Notes are a fundamental plus a half-level second
//! harmonic, shaped by a linear attack/release envelope:
//!
//! ```text
//!  1 |   ______________
//!    |  /              \
//!  0 |_/                \__ gap
//!     attack          release
//! ```
//!
//! Every event is followed by a short silent gap, and the finished melody is
//! scaled to a unit peak.

use std::f64::consts::TAU;

use prisma_core::{Error, Result, Signal, linspace, normalize_to_unit_peak};

/// Attack ramp length in seconds.
pub const ATTACK_SECONDS: f64 = 0.05;
/// Release ramp length in seconds.
pub const RELEASE_SECONDS: f64 = 0.3;
/// Silence after every event in seconds.
pub const GAP_SECONDS: f64 = 0.05;
/// Gain applied to each enveloped note.
pub const NOTE_GAIN: f64 = 0.5;
/// Level of the second harmonic relative to the fundamental.
pub const HARMONIC_LEVEL: f64 = 0.5;

/// Equal-tempered frequency of a note name such as `"A4"`, `"F#4"` or `"Eb3"`.
///
/// A4 is 440 Hz. The octave may be negative (`"C-1"`).
///
/// # Example
///
/// ```rust
/// use prisma_synth::note_frequency;
///
/// assert!((note_frequency("A4").unwrap() - 440.0).abs() < 1e-9);
/// assert!((note_frequency("A5").unwrap() - 880.0).abs() < 1e-9);
/// assert!((note_frequency("F#4").unwrap() - 369.994).abs() < 1e-3);
/// ```
pub fn note_frequency(name: &str) -> Result<f64> {
    let trimmed = name.trim();
    let mut chars = trimmed.chars();
    let semitone = match chars.next().map(|c| c.to_ascii_uppercase()) {
        Some('C') => 0,
        Some('D') => 2,
        Some('E') => 4,
        Some('F') => 5,
        Some('G') => 7,
        Some('A') => 9,
        Some('B') => 11,
        _ => return Err(Error::unknown("note", name)),
    };

    let rest = chars.as_str();
    let (accidental, octave) = match rest.chars().next() {
        Some('#') => (1, &rest[1..]),
        Some('b') => (-1, &rest[1..]),
        _ => (0, rest),
    };
    let octave: i32 = octave.parse().map_err(|_| Error::unknown("note", name))?;

    let midi = (octave + 1) * 12 + semitone + accidental;
    Ok(440.0 * 2.0_f64.powf(f64::from(midi - 69) / 12.0))
}

/// One step of a melody.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MelodyEvent {
    /// A pitched note.
    Note {
        /// Fundamental in Hz.
        frequency: f64,
        /// Length in seconds.
        seconds: f64,
    },
    /// Silence.
    Rest {
        /// Length in seconds.
        seconds: f64,
    },
}

impl MelodyEvent {
    /// Parse a note name, or `"rest"`/`"r"`/`"-"` for silence.
    pub fn parse(name: &str, seconds: f64) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rest" | "r" | "-" => Ok(Self::Rest { seconds }),
            _ => Ok(Self::Note {
                frequency: note_frequency(name)?,
                seconds,
            }),
        }
    }

    /// Length in seconds.
    pub fn seconds(&self) -> f64 {
        match *self {
            Self::Note { seconds, .. } | Self::Rest { seconds } => seconds,
        }
    }
}

/// Renders melodies at a fixed sample rate, optionally transposed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MelodyRenderer {
    sample_rate: u32,
    octave_shift: i32,
}

impl MelodyRenderer {
    /// Renderer at `sample_rate` with no transposition.
    pub fn new(sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::invalid("sample_rate", "must be positive"));
        }
        Ok(Self {
            sample_rate,
            octave_shift: 0,
        })
    }

    /// Transpose every note by `octaves` (positive is up).
    pub fn with_octave_shift(mut self, octaves: i32) -> Self {
        self.octave_shift = octaves;
        self
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Octave transposition.
    pub fn octave_shift(&self) -> i32 {
        self.octave_shift
    }

    /// Whole samples in `seconds`, truncated.
    fn frames(&self, seconds: f64) -> usize {
        (f64::from(self.sample_rate) * seconds) as usize
    }

    /// Linear envelope for a note of `len` samples.
    ///
    /// Notes no longer than the release are a single 1→0 ramp.
    fn envelope(&self, len: usize) -> Vec<f64> {
        let attack = self.frames(ATTACK_SECONDS);
        let release = self.frames(RELEASE_SECONDS);
        if len <= release {
            return linspace(1.0, 0.0, len);
        }
        let mut env = vec![1.0; len];
        if len > attack {
            env[..attack].copy_from_slice(&linspace(0.0, 1.0, attack));
        }
        env[len - release..].copy_from_slice(&linspace(1.0, 0.0, release));
        env
    }

    fn note(&self, frequency: f64, len: usize) -> Vec<f64> {
        let f = frequency * 2.0_f64.powi(self.octave_shift);
        let rate = f64::from(self.sample_rate);
        self.envelope(len)
            .into_iter()
            .enumerate()
            .map(|(i, env)| {
                let t = i as f64 / rate;
                let wave = (TAU * f * t).sin() + HARMONIC_LEVEL * (TAU * 2.0 * f * t).sin();
                wave * env * NOTE_GAIN
            })
            .collect()
    }

    /// Render `events` into one signal with a unit peak (unless silent).
    pub fn render(&self, events: &[MelodyEvent]) -> Result<Signal> {
        let gap = self.frames(GAP_SECONDS);
        let mut out = Vec::new();
        for event in events {
            let seconds = event.seconds();
            if !(seconds.is_finite() && seconds >= 0.0) {
                return Err(Error::invalid(
                    "seconds",
                    format!("{seconds} must be finite and non-negative"),
                ));
            }
            let len = self.frames(seconds);
            match *event {
                MelodyEvent::Note { frequency, .. } => out.extend(self.note(frequency, len)),
                MelodyEvent::Rest { .. } => out.resize(out.len() + len, 0.0),
            }
            out.resize(out.len() + gap, 0.0);
        }
        normalize_to_unit_peak(&mut out);
        tracing::debug!(
            "melody: {} events, {} samples at {} Hz",
            events.len(),
            out.len(),
            self.sample_rate
        );
        Signal::new(out, self.sample_rate)
    }

    /// Parse `(name, seconds)` pairs and render them.
    pub fn render_names(&self, notes: &[(&str, f64)]) -> Result<Signal> {
        let events = notes
            .iter()
            .map(|&(name, seconds)| MelodyEvent::parse(name, seconds))
            .collect::<Result<Vec<_>>>()?;
        self.render(&events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_names() {
        assert!((note_frequency("C4").unwrap() - 261.6256).abs() < 1e-3);
        assert!((note_frequency("Eb3").unwrap() - note_frequency("D#3").unwrap()).abs() < 1e-12);
        assert!((note_frequency("b3").unwrap() - 246.9417).abs() < 1e-3);
        assert!((note_frequency("A-1").unwrap() - 13.75).abs() < 1e-9);
        assert!(note_frequency("H2").is_err());
        assert!(note_frequency("A").is_err());
        assert!(note_frequency("").is_err());
    }

    #[test]
    fn events_parse() {
        assert_eq!(MelodyEvent::parse("rest", 0.5).unwrap(), MelodyEvent::Rest { seconds: 0.5 });
        match MelodyEvent::parse("A4", 1.0).unwrap() {
            MelodyEvent::Note { frequency, seconds } => {
                assert!((frequency - 440.0).abs() < 1e-9);
                assert_eq!(seconds, 1.0);
            }
            MelodyEvent::Rest { .. } => panic!("expected a note"),
        }
    }

    #[test]
    fn layout_and_normalization() {
        let r = MelodyRenderer::new(1000).unwrap();
        let song = r.render_names(&[("A4", 0.5), ("rest", 0.25), ("E4", 0.2)]).unwrap();
        // 500 + 50 + 250 + 50 + 200 + 50
        assert_eq!(song.len(), 1100);
        assert!((song.peak() - 1.0).abs() < 1e-12);
        // Rest and gaps are silent.
        assert!(song.samples()[500..800].iter().all(|&x| x == 0.0));
        assert!(song.samples()[1050..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn envelope_shapes() {
        let r = MelodyRenderer::new(100).unwrap();
        // Long note: 5-sample attack, 30-sample release.
        let env = r.envelope(100);
        assert_eq!(env[0], 0.0);
        assert_eq!(env[4], 1.0);
        assert_eq!(env[50], 1.0);
        assert_eq!(env[70], 1.0);
        assert_eq!(env[99], 0.0);
        // Short note is one falling ramp.
        let short = r.envelope(20);
        assert_eq!(short[0], 1.0);
        assert_eq!(short[19], 0.0);
        assert!(short.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn octave_shift_doubles_frequency() {
        let r = MelodyRenderer::new(8000).unwrap().with_octave_shift(1);
        let shifted = r.note(220.0, 400);
        let plain = MelodyRenderer::new(8000).unwrap().note(440.0, 400);
        for (a, b) in shifted.iter().zip(&plain) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn silent_melody_stays_silent() {
        let r = MelodyRenderer::new(100).unwrap();
        let song = r.render(&[MelodyEvent::Rest { seconds: 1.0 }]).unwrap();
        assert_eq!(song.len(), 105);
        assert_eq!(song.peak(), 0.0);
        assert!(r.render(&[MelodyEvent::Rest { seconds: -1.0 }]).is_err());
        assert!(MelodyRenderer::new(0).is_err());
    }
}
