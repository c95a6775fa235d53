//! Top-level configuration file.

use std::path::Path;

use prisma_analysis::SegmentAnalysis;
use prisma_core::Signal;
use prisma_image::Image;
use prisma_synth::{modulate, sum_all};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sections::{
    AnalysisConfig, FilterConfig, GeneratorConfig, ImageFilterConfig, ModulationConfig,
};
use crate::validation::validate_config;

/// Complete prisma configuration.
///
/// Every section is optional in the file; missing sections take their
/// defaults.
///
/// # TOML Format
///
/// ```toml
/// [generator]
/// sample_rate = 44100
/// duration = 2.0
/// seed = 7
///
/// [[generator.tones]]
/// waveform = "sine"
/// frequency = 440.0
///
/// [[generator.tones]]
/// waveform = "square"
/// frequency = 5.0
/// amplitude = 0.5
///
/// [modulation]
/// kind = "FM"
/// index = 30.0
/// carrier = 0
/// modulator = 1
///
/// [analysis]
/// transform = "fast"
/// segment_len = 512
///
/// [[filters]]
/// type = "low_pass"
/// cutoff = 2000.0
///
/// [image]
/// filter = "gaussian_blur"
/// size = 5
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PrismaConfig {
    /// Signal generation.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Optional modulation of one configured tone by another.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modulation: Option<ModulationConfig>,

    /// Spectral analysis.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Filter stages applied in order.
    #[serde(default)]
    pub filters: Vec<FilterConfig>,

    /// Image filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageFilterConfig>,
}

impl PrismaConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            "loaded {}: {} tones, {} filters",
            path.display(),
            config.generator.tones.len(),
            config.filters.len()
        );
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(validate_config(self)?)
    }

    /// Render the configured tones, combine them and run the filter chain.
    ///
    /// Tones are modulated when a `[modulation]` section is present and
    /// mixed otherwise. The combined signal peaks at or below 1, but the
    /// filter chain is not renormalized, so a high-pass transient can
    /// overshoot.
    pub fn render_signal(&self) -> Result<Signal, ConfigError> {
        self.validate()?;

        let mut synth = self.generator.synthesizer();
        let signals = self
            .generator
            .tones
            .iter()
            .map(|t| Ok(synth.generate(&t.tone()?)?))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let mut signal = match &self.modulation {
            Some(m) => modulate(
                &signals[m.carrier],
                &signals[m.modulator],
                m.modulation()?,
                m.index,
            )?,
            None => sum_all(&signals)?,
        };
        for stage in &self.filters {
            signal = stage.mode().apply(&signal)?;
        }
        Ok(signal)
    }

    /// Transform the leading segment of `signal` as configured.
    pub fn analyze(&self, signal: &Signal) -> Result<SegmentAnalysis, ConfigError> {
        let kind = self.analysis.transform_kind()?;
        Ok(SegmentAnalysis::compute(
            signal,
            kind,
            self.analysis.segment_len,
        )?)
    }

    /// Apply the `[image]` filter, or return the image unchanged without one.
    pub fn filter_image(&self, image: &Image) -> Result<Image, ConfigError> {
        match &self.image {
            Some(cfg) => {
                crate::validation::validate_image(cfg)?;
                Ok(cfg.filter()?.apply(image)?)
            }
            None => Ok(image.clone()),
        }
    }
}
