//! Leading-segment analysis: everything needed to plot a transform.
//!
//! A long recording is analyzed through its first [`DEFAULT_SEGMENT_LEN`]
//! samples. The result bundles the segment itself, its spectrum, amplitude
//! and phase spectra, the inverse-transformed reconstruction and both plot
//! axes, so a visualization layer never has to re-derive them.

use prisma_core::{Result, Signal};

use crate::spectrum::Spectrum;
use crate::transform::TransformKind;

/// Default number of leading samples analyzed.
pub const DEFAULT_SEGMENT_LEN: usize = 512;

/// Transform results for the leading segment of a signal.
#[derive(Debug, Clone)]
pub struct SegmentAnalysis {
    /// Processor used.
    pub kind: TransformKind,
    /// The analyzed samples (at most `max_len` of them).
    pub segment: Signal,
    /// Complex spectrum of the segment.
    pub spectrum: Spectrum,
    /// Magnitude per bin.
    pub amplitude: Vec<f64>,
    /// Phase per bin in radians.
    pub phase: Vec<f64>,
    /// Inverse transform trimmed to the segment length.
    pub restored: Signal,
    /// Frequency of each bin in Hz.
    pub frequencies: Vec<f64>,
    /// Time of each segment sample in seconds.
    pub times: Vec<f64>,
}

impl SegmentAnalysis {
    /// Analyze the first `min(signal.len(), max_len)` samples.
    pub fn compute(signal: &Signal, kind: TransformKind, max_len: usize) -> Result<Self> {
        let segment = signal.slice(0..max_len);
        tracing::debug!(
            "segment: {} of {} samples through the {kind} transform",
            segment.len(),
            signal.len()
        );

        let spectrum = kind.analyze(&segment);
        let restored = spectrum.restore(&kind)?;

        Ok(Self {
            kind,
            amplitude: spectrum.amplitude(),
            phase: spectrum.phase(),
            frequencies: spectrum.frequencies(),
            times: segment.times(),
            restored,
            spectrum,
            segment,
        })
    }

    /// Analyze with [`DEFAULT_SEGMENT_LEN`].
    pub fn with_default_len(signal: &Signal, kind: TransformKind) -> Result<Self> {
        Self::compute(signal, kind, DEFAULT_SEGMENT_LEN)
    }

    /// Largest absolute difference between the segment and its reconstruction.
    pub fn reconstruction_error(&self) -> f64 {
        self.segment
            .samples()
            .iter()
            .zip(self.restored.samples())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}
