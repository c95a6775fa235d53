//! Configuration sections and the processors they build.

use prisma_analysis::TransformKind;
use prisma_core::{FilterMode, Result, Tone, Waveform};
use prisma_image::{DEFAULT_FILTER_SIZE, ImageFilter};
use prisma_synth::{DEFAULT_DURATION, DEFAULT_SAMPLE_RATE, Modulation, Synthesizer};
use serde::{Deserialize, Serialize};

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

fn default_waveform() -> String {
    Waveform::Sine.name().to_string()
}

fn default_frequency() -> f64 {
    440.0
}

fn default_amplitude() -> f64 {
    1.0
}

fn default_duty() -> f64 {
    Tone::DEFAULT_DUTY
}

fn default_transform() -> String {
    TransformKind::Fast.to_string()
}

fn default_segment_len() -> usize {
    prisma_analysis::DEFAULT_SEGMENT_LEN
}

fn default_filter_size() -> usize {
    DEFAULT_FILTER_SIZE
}

fn default_modulation() -> String {
    Modulation::Am.name().to_string()
}

/// `[generator]`: timing, noise seed and the tones to render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    /// Sample rate in Hz (defaults to 44100).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Duration of each tone in seconds (defaults to 2.0).
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Noise seed. Without one, noise differs on every run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Tones to render, mixed together unless a modulation is configured.
    #[serde(default)]
    pub tones: Vec<ToneConfig>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            duration: default_duration(),
            seed: None,
            tones: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Synthesizer with this section's timing and seed.
    pub fn synthesizer(&self) -> Synthesizer {
        let synth = match self.seed {
            Some(seed) => Synthesizer::with_seed(seed),
            None => Synthesizer::new(),
        };
        synth
            .with_sample_rate(self.sample_rate)
            .with_duration(self.duration)
    }
}

/// `[[generator.tones]]`: one waveform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToneConfig {
    /// Waveform name (`sine`, `square`, `triangle`, `sawtooth`, `noise`).
    #[serde(default = "default_waveform")]
    pub waveform: String,

    /// Frequency in Hz.
    #[serde(default = "default_frequency")]
    pub frequency: f64,

    /// Peak amplitude.
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,

    /// Square-wave duty cycle in [0, 1].
    #[serde(default = "default_duty")]
    pub duty: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            waveform: default_waveform(),
            frequency: default_frequency(),
            amplitude: default_amplitude(),
            duty: default_duty(),
        }
    }
}

impl ToneConfig {
    /// Tone config for `waveform` at `frequency` with default amplitude and duty.
    pub fn new(waveform: impl Into<String>, frequency: f64) -> Self {
        Self {
            waveform: waveform.into(),
            frequency,
            ..Self::default()
        }
    }

    /// Parsed and validated tone.
    pub fn tone(&self) -> Result<Tone> {
        let tone = Tone::new(self.waveform.parse()?, self.frequency)
            .with_amplitude(self.amplitude)
            .with_duty(self.duty);
        tone.validate()?;
        Ok(tone)
    }
}

/// `[analysis]`: which transform to run and how much of the signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// `fast` or `direct`.
    #[serde(default = "default_transform")]
    pub transform: String,

    /// Leading samples analyzed (defaults to 512).
    #[serde(default = "default_segment_len")]
    pub segment_len: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            transform: default_transform(),
            segment_len: default_segment_len(),
        }
    }
}

impl AnalysisConfig {
    /// Parsed transform selector.
    pub fn transform_kind(&self) -> Result<TransformKind> {
        self.transform.parse()
    }
}

/// `[[filters]]`: one RC filter stage, tagged by `type`.
///
/// ```toml
/// [[filters]]
/// type = "band_pass"
/// low_cutoff = 200.0
/// high_cutoff = 2000.0
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterConfig {
    /// Single-pole low-pass.
    LowPass {
        /// Cutoff in Hz.
        cutoff: f64,
    },
    /// Single-pole high-pass.
    HighPass {
        /// Cutoff in Hz.
        cutoff: f64,
    },
    /// High-pass at `low_cutoff` followed by low-pass at `high_cutoff`.
    BandPass {
        /// Lower edge in Hz.
        low_cutoff: f64,
        /// Upper edge in Hz.
        high_cutoff: f64,
    },
}

impl FilterConfig {
    /// Filter mode for this stage.
    pub fn mode(&self) -> FilterMode {
        match *self {
            FilterConfig::LowPass { cutoff } => FilterMode::LowPass { cutoff },
            FilterConfig::HighPass { cutoff } => FilterMode::HighPass { cutoff },
            FilterConfig::BandPass {
                low_cutoff,
                high_cutoff,
            } => FilterMode::BandPass {
                low_cutoff,
                high_cutoff,
            },
        }
    }
}

/// `[image]`: the image filter to apply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageFilterConfig {
    /// Filter name (`box_blur`, `gaussian_blur`, `median_filter`, `sobel`,
    /// `color_sobel`).
    pub filter: String,

    /// Window side for the size-driven filters (defaults to 3).
    #[serde(default = "default_filter_size")]
    pub size: usize,

    /// Gaussian standard deviation; defaults to a third of the size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma: Option<f64>,
}

impl ImageFilterConfig {
    /// Config for `filter` with the default size.
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            size: default_filter_size(),
            sigma: None,
        }
    }

    /// Parsed filter with its parameters.
    pub fn filter(&self) -> Result<ImageFilter> {
        let filter = ImageFilter::from_name(&self.filter, self.size)?;
        Ok(match filter {
            ImageFilter::GaussianBlur { size, .. } => ImageFilter::GaussianBlur {
                size,
                sigma: self.sigma,
            },
            other => other,
        })
    }
}

/// `[modulation]`: modulate one configured tone by another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModulationConfig {
    /// `AM` or `FM`.
    #[serde(default = "default_modulation")]
    pub kind: String,

    /// FM deviation in Hz per unit of modulator.
    #[serde(default)]
    pub index: f64,

    /// Position of the carrier in `generator.tones`.
    pub carrier: usize,

    /// Position of the modulator in `generator.tones`.
    pub modulator: usize,
}

impl ModulationConfig {
    /// Parsed modulation kind.
    pub fn modulation(&self) -> Result<Modulation> {
        self.kind.parse()
    }
}
