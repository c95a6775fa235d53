//! Single-pole RC filters (discrete low-pass, high-pass and band-pass).
//!
//! These are the classic discrete RC circuit recurrences:
//!
//! ```text
//! dt = 1 / sample_rate
//! RC = 1 / (2π · cutoff)
//!
//! low-pass:   α = dt / (RC + dt)    y[0] = x[0]    y[n] = y[n-1] + α·(x[n] - y[n-1])
//! high-pass:  α = RC / (RC + dt)    y[0] = 0       y[n] = α·(y[n-1] + x[n] - x[n-1])
//! ```
//!
//! The two recurrences seed their state differently: the low-pass starts at
//! the first input sample, the high-pass starts at rest with the previous
//! input equal to the first sample. Both conventions are kept as-is.
//!
//! A non-positive cutoff is not an error. The low-pass falls back to `α = 0`
//! (the output holds the first sample) and the high-pass to `α = 1` (a pure
//! first-difference operator).
//!
//! # Usage
//!
//! ```rust
//! use prisma_core::rc_filter::{low_pass, RcFilter};
//!
//! let smoothed = low_pass(&[0.0, 1.0, 1.0, 1.0], 1000.0, 44100.0).unwrap();
//! assert_eq!(smoothed[0], 0.0);
//!
//! // Streaming form: the (previous output, previous input) pair lives in the filter.
//! let mut hp = RcFilter::high_pass(200.0, 44100.0).unwrap();
//! assert_eq!(hp.process(0.7), 0.0);
//! ```

use core::f64::consts::TAU;
use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};
use crate::signal::Signal;

/// Low-pass smoothing factor `dt / (RC + dt)`; 0 when `cutoff <= 0`.
pub fn lowpass_alpha(cutoff: f64, sample_rate: f64) -> f64 {
    if cutoff <= 0.0 {
        return 0.0;
    }
    let dt = 1.0 / sample_rate;
    let rc = 1.0 / (TAU * cutoff);
    dt / (rc + dt)
}

/// High-pass smoothing factor `RC / (RC + dt)`; 1 when `cutoff <= 0`.
pub fn highpass_alpha(cutoff: f64, sample_rate: f64) -> f64 {
    if cutoff <= 0.0 {
        return 1.0;
    }
    let dt = 1.0 / sample_rate;
    let rc = 1.0 / (TAU * cutoff);
    rc / (rc + dt)
}

/// Recurrence state threaded through one filter application.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterState {
    /// Previous output sample `y[n-1]`.
    pub prev_output: f64,
    /// Previous input sample `x[n-1]`.
    pub prev_input: f64,
}

/// Which RC recurrence a [`RcFilter`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RcResponse {
    /// Smoothing (integrating) response.
    LowPass,
    /// Differencing response.
    HighPass,
}

/// Streaming single-pole RC filter.
///
/// # Invariants
///
/// - `alpha` is in [0, 1] for any positive sample rate.
/// - `state` is `None` until the first sample seeds it.
#[derive(Debug, Clone)]
pub struct RcFilter {
    response: RcResponse,
    alpha: f64,
    state: Option<FilterState>,
}

impl RcFilter {
    /// Create a low-pass filter.
    pub fn low_pass(cutoff: f64, sample_rate: f64) -> Result<Self> {
        check_params(cutoff, sample_rate)?;
        let alpha = lowpass_alpha(cutoff, sample_rate);
        #[cfg(feature = "tracing")]
        if cutoff <= 0.0 {
            tracing::debug!("low_pass: cutoff {cutoff} <= 0, holding first sample");
        }
        Ok(Self {
            response: RcResponse::LowPass,
            alpha,
            state: None,
        })
    }

    /// Create a high-pass filter.
    pub fn high_pass(cutoff: f64, sample_rate: f64) -> Result<Self> {
        check_params(cutoff, sample_rate)?;
        let alpha = highpass_alpha(cutoff, sample_rate);
        #[cfg(feature = "tracing")]
        if cutoff <= 0.0 {
            tracing::debug!("high_pass: cutoff {cutoff} <= 0, acting as first difference");
        }
        Ok(Self {
            response: RcResponse::HighPass,
            alpha,
            state: None,
        })
    }

    /// Smoothing factor in use.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Response type.
    pub fn response(&self) -> RcResponse {
        self.response
    }

    /// Current recurrence state (`None` before the first sample).
    pub fn state(&self) -> Option<FilterState> {
        self.state
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let state = self.state.unwrap_or(match self.response {
            RcResponse::LowPass => FilterState {
                prev_output: input,
                prev_input: input,
            },
            RcResponse::HighPass => FilterState {
                prev_output: 0.0,
                prev_input: input,
            },
        });

        let output = match self.response {
            RcResponse::LowPass => state.prev_output + self.alpha * (input - state.prev_output),
            RcResponse::HighPass => {
                self.alpha * (state.prev_output + input - state.prev_input)
            }
        };

        self.state = Some(FilterState {
            prev_output: output,
            prev_input: input,
        });
        output
    }

    /// Filter a whole block, continuing from the current state.
    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process(x)).collect()
    }

    /// Forget the state so the next sample seeds it again.
    pub fn reset(&mut self) {
        self.state = None;
    }
}

fn check_params(cutoff: f64, sample_rate: f64) -> Result<()> {
    if cutoff.is_nan() {
        return Err(Error::invalid("cutoff", "must not be NaN"));
    }
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(Error::invalid(
            "sample_rate",
            format!("{sample_rate} must be finite and positive"),
        ));
    }
    Ok(())
}

/// Low-pass filter a complete signal.
pub fn low_pass(samples: &[f64], cutoff: f64, sample_rate: f64) -> Result<Vec<f64>> {
    if samples.is_empty() {
        return Err(Error::EmptyInput("low_pass"));
    }
    Ok(RcFilter::low_pass(cutoff, sample_rate)?.process_block(samples))
}

/// High-pass filter a complete signal.
pub fn high_pass(samples: &[f64], cutoff: f64, sample_rate: f64) -> Result<Vec<f64>> {
    if samples.is_empty() {
        return Err(Error::EmptyInput("high_pass"));
    }
    Ok(RcFilter::high_pass(cutoff, sample_rate)?.process_block(samples))
}

/// Band-pass a complete signal: high-pass at `low_cutoff`, then low-pass at
/// `high_cutoff`.
///
/// An inverted band (`low_cutoff >= high_cutoff`) is rejected.
pub fn band_pass(
    samples: &[f64],
    low_cutoff: f64,
    high_cutoff: f64,
    sample_rate: f64,
) -> Result<Vec<f64>> {
    if low_cutoff >= high_cutoff {
        return Err(Error::invalid(
            "low_cutoff",
            format!("{low_cutoff} Hz must be below high_cutoff {high_cutoff} Hz"),
        ));
    }
    if samples.is_empty() {
        return Err(Error::EmptyInput("band_pass"));
    }
    let stage = high_pass(samples, low_cutoff, sample_rate)?;
    low_pass(&stage, high_cutoff, sample_rate)
}

/// Filter family identifier, parsed from user-facing names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Low-pass.
    LowPass,
    /// High-pass.
    HighPass,
    /// Band-pass (high-pass then low-pass).
    BandPass,
}

impl FilterKind {
    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::LowPass => "low_pass",
            FilterKind::HighPass => "high_pass",
            FilterKind::BandPass => "band_pass",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = Error;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "low_pass" | "lowpass" | "lp" => Ok(FilterKind::LowPass),
            "high_pass" | "highpass" | "hp" => Ok(FilterKind::HighPass),
            "band_pass" | "bandpass" | "bp" => Ok(FilterKind::BandPass),
            _ => Err(Error::unknown("filter", s)),
        }
    }
}

/// A fully parameterized RC filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterMode {
    /// Low-pass at `cutoff` Hz.
    LowPass {
        /// Cutoff frequency in Hz.
        cutoff: f64,
    },
    /// High-pass at `cutoff` Hz.
    HighPass {
        /// Cutoff frequency in Hz.
        cutoff: f64,
    },
    /// High-pass at `low_cutoff` then low-pass at `high_cutoff`.
    BandPass {
        /// Lower band edge in Hz.
        low_cutoff: f64,
        /// Upper band edge in Hz.
        high_cutoff: f64,
    },
}

impl FilterMode {
    /// Family of this filter.
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterMode::LowPass { .. } => FilterKind::LowPass,
            FilterMode::HighPass { .. } => FilterKind::HighPass,
            FilterMode::BandPass { .. } => FilterKind::BandPass,
        }
    }

    /// Filter raw samples recorded at `sample_rate`.
    pub fn apply_samples(&self, samples: &[f64], sample_rate: f64) -> Result<Vec<f64>> {
        match *self {
            FilterMode::LowPass { cutoff } => low_pass(samples, cutoff, sample_rate),
            FilterMode::HighPass { cutoff } => high_pass(samples, cutoff, sample_rate),
            FilterMode::BandPass {
                low_cutoff,
                high_cutoff,
            } => band_pass(samples, low_cutoff, high_cutoff, sample_rate),
        }
    }

    /// Filter a signal at its own sample rate.
    pub fn apply(&self, signal: &Signal) -> Result<Signal> {
        let out = self.apply_samples(signal.samples(), f64::from(signal.sample_rate()))?;
        Ok(signal.derive(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f64 = 44100.0;

    #[test]
    fn low_pass_seeds_with_first_sample() {
        let out = low_pass(&[3.0, 3.0, 3.0], 100.0, SR).unwrap();
        assert_eq!(out, vec![3.0, 3.0, 3.0]);
    }

    #[test]
    fn high_pass_starts_at_rest() {
        let out = high_pass(&[5.0, 5.0, 5.0], 100.0, SR).unwrap();
        assert_eq!(out, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn negative_cutoff_holds_first_sample() {
        let out = low_pass(&[1.0, 4.0, -2.0], -1.0, SR).unwrap();
        assert_eq!(out, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn zero_cutoff_high_pass_is_first_difference() {
        let x = [1.0, 3.0, 2.0, 7.0];
        let out = high_pass(&x, 0.0, SR).unwrap();
        // y[i] = y[i-1] + x[i] - x[i-1] telescopes to x[i] - x[0]
        assert_eq!(out, vec![0.0, 2.0, 1.0, 6.0]);
    }

    #[test]
    fn alpha_matches_rc_formula() {
        let dt = 1.0 / SR;
        let rc = 1.0 / (TAU * 1000.0);
        assert!((lowpass_alpha(1000.0, SR) - dt / (rc + dt)).abs() < 1e-15);
        assert!((highpass_alpha(1000.0, SR) - rc / (rc + dt)).abs() < 1e-15);
        assert!((lowpass_alpha(1000.0, SR) + highpass_alpha(1000.0, SR) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_rejected() {
        assert_eq!(low_pass(&[], 100.0, SR), Err(Error::EmptyInput("low_pass")));
        assert_eq!(high_pass(&[], 100.0, SR), Err(Error::EmptyInput("high_pass")));
        assert_eq!(
            band_pass(&[], 100.0, 200.0, SR),
            Err(Error::EmptyInput("band_pass"))
        );
    }

    #[test]
    fn invalid_sample_rate_rejected() {
        assert!(low_pass(&[1.0], 100.0, 0.0).is_err());
        assert!(high_pass(&[1.0], 100.0, f64::NAN).is_err());
    }

    #[test]
    fn inverted_band_rejected() {
        let err = band_pass(&[1.0, 2.0], 3000.0, 300.0, SR).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { name: "low_cutoff", .. }));
        assert!(band_pass(&[1.0, 2.0], 300.0, 300.0, SR).is_err());
    }

    #[test]
    fn band_pass_is_high_then_low() {
        let x: Vec<f64> = (0..64).map(|i| (i as f64 * 0.3).sin()).collect();
        let expected = low_pass(&high_pass(&x, 200.0, SR).unwrap(), 5000.0, SR).unwrap();
        assert_eq!(band_pass(&x, 200.0, 5000.0, SR).unwrap(), expected);
    }

    #[test]
    fn streaming_matches_block() {
        let x = [0.1, 0.5, -0.3, 0.9, 0.0];
        let block = low_pass(&x, 800.0, SR).unwrap();
        let mut f = RcFilter::low_pass(800.0, SR).unwrap();
        let streamed: Vec<f64> = x.iter().map(|&s| f.process(s)).collect();
        assert_eq!(block, streamed);
    }

    #[test]
    fn reset_reseeds_state() {
        let mut f = RcFilter::high_pass(100.0, SR).unwrap();
        f.process(1.0);
        f.process(2.0);
        assert!(f.state().is_some());
        f.reset();
        assert!(f.state().is_none());
        assert_eq!(f.process(9.0), 0.0);
    }

    #[test]
    fn filter_kind_names() {
        assert_eq!("lowpass".parse::<FilterKind>().unwrap(), FilterKind::LowPass);
        assert_eq!("High-Pass".parse::<FilterKind>().unwrap(), FilterKind::HighPass);
        assert_eq!("bp".parse::<FilterKind>().unwrap(), FilterKind::BandPass);
        assert!("notch".parse::<FilterKind>().is_err());
    }

    #[test]
    fn filter_mode_apply_uses_signal_rate() {
        let signal = Signal::new(vec![10.0, 10.0, 10.0, 10.0], 44100).unwrap();
        let out = FilterMode::LowPass { cutoff: -1.0 }.apply(&signal).unwrap();
        assert_eq!(out.samples(), &[10.0, 10.0, 10.0, 10.0]);
        assert_eq!(out.sample_rate(), 44100);
    }
}
