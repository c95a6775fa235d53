//! Configuration validation.
//!
//! [`validate_config`] checks every section and reports all problems at
//! once: a single problem is returned as-is, several are wrapped in
//! [`ValidationError::Multiple`].
//!
//! # Example
//!
//! ```rust
//! use prisma_config::{PrismaConfig, validate_config};
//!
//! let config = PrismaConfig::from_toml_str("[analysis]\ntransform = \"fast\"").unwrap();
//! validate_config(&config).expect("defaults are valid");
//! ```

use thiserror::Error;

use crate::config::PrismaConfig;
use crate::sections::{FilterConfig, ImageFilterConfig, ModulationConfig, ToneConfig};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A name that no processor recognizes.
    #[error("unknown {kind}: '{name}'")]
    Unknown {
        /// What was being named (waveform, filter, ...).
        kind: String,
        /// The unrecognized name.
        name: String,
    },

    /// Numeric value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// Value rejected for another reason.
    #[error("invalid value for '{param}': {reason}")]
    Invalid {
        /// Name of the parameter.
        param: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

impl From<prisma_core::Error> for ValidationError {
    fn from(err: prisma_core::Error) -> Self {
        match err {
            prisma_core::Error::UnknownIdentifier { kind, name } => ValidationError::Unknown {
                kind: kind.to_string(),
                name,
            },
            prisma_core::Error::InvalidArgument { name, reason } => ValidationError::Invalid {
                param: name.to_string(),
                reason,
            },
            other => ValidationError::Invalid {
                param: "config".to_string(),
                reason: other.to_string(),
            },
        }
    }
}

fn invalid(param: impl Into<String>, reason: impl Into<String>) -> ValidationError {
    ValidationError::Invalid {
        param: param.into(),
        reason: reason.into(),
    }
}

fn check_range(errors: &mut Vec<ValidationError>, param: &str, value: f64, min: f64, max: f64) {
    if !(min..=max).contains(&value) {
        errors.push(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            min,
            max,
        });
    }
}

fn check_cutoff(errors: &mut Vec<ValidationError>, param: &str, cutoff: f64) {
    if cutoff.is_nan() {
        errors.push(invalid(param, "must not be NaN"));
    }
}

/// Validate one tone.
pub fn validate_tone(tone: &ToneConfig) -> ValidationResult<()> {
    tone.tone().map(|_| ()).map_err(ValidationError::from)
}

/// Validate one filter stage.
pub fn validate_filter(filter: &FilterConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();
    match *filter {
        FilterConfig::LowPass { cutoff } | FilterConfig::HighPass { cutoff } => {
            check_cutoff(&mut errors, "cutoff", cutoff);
        }
        FilterConfig::BandPass {
            low_cutoff,
            high_cutoff,
        } => {
            check_cutoff(&mut errors, "low_cutoff", low_cutoff);
            check_cutoff(&mut errors, "high_cutoff", high_cutoff);
            if low_cutoff >= high_cutoff {
                errors.push(invalid(
                    "low_cutoff",
                    format!("{low_cutoff} must be below high_cutoff {high_cutoff}"),
                ));
            }
        }
    }
    collapse(errors)
}

/// Validate the image section.
pub fn validate_image(image: &ImageFilterConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();
    if let Err(e) = image.filter() {
        errors.push(e.into());
    }
    if let Some(sigma) = image.sigma
        && !(sigma.is_finite() && sigma > 0.0)
    {
        errors.push(invalid("sigma", "must be positive"));
    }
    collapse(errors)
}

fn validate_modulation(
    errors: &mut Vec<ValidationError>,
    modulation: &ModulationConfig,
    tone_count: usize,
) {
    if let Err(e) = modulation.modulation() {
        errors.push(e.into());
    }
    if !modulation.index.is_finite() {
        errors.push(invalid("index", "must be finite"));
    }
    for (param, position) in [
        ("carrier", modulation.carrier),
        ("modulator", modulation.modulator),
    ] {
        if position >= tone_count {
            errors.push(invalid(
                param,
                format!("tone {position} does not exist ({tone_count} configured)"),
            ));
        }
    }
}

/// Validate a whole configuration, collecting every problem.
pub fn validate_config(config: &PrismaConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();

    let generator = &config.generator;
    if generator.sample_rate == 0 {
        errors.push(invalid("sample_rate", "must be positive"));
    }
    if !(generator.duration.is_finite() && generator.duration >= 0.0) {
        errors.push(invalid("duration", "must be finite and non-negative"));
    }
    for tone in &generator.tones {
        check_range(&mut errors, "duty", tone.duty, 0.0, 1.0);
        if let Err(e) = validate_tone(tone) {
            // Duty is already reported with its range above.
            if !matches!(&e, ValidationError::Invalid { param, .. } if param == "duty") {
                errors.push(e);
            }
        }
    }

    if let Err(e) = config.analysis.transform_kind() {
        errors.push(e.into());
    }
    if config.analysis.segment_len == 0 {
        errors.push(invalid("segment_len", "must be at least 1"));
    }

    for filter in &config.filters {
        push_all(&mut errors, validate_filter(filter));
    }
    if let Some(image) = &config.image {
        push_all(&mut errors, validate_image(image));
    }
    if let Some(modulation) = &config.modulation {
        validate_modulation(&mut errors, modulation, generator.tones.len());
    }

    collapse(errors)
}

fn push_all(errors: &mut Vec<ValidationError>, result: ValidationResult<()>) {
    match result {
        Ok(()) => {}
        Err(ValidationError::Multiple(inner)) => errors.extend(inner),
        Err(e) => errors.push(e),
    }
}

fn collapse(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_waveform_is_reported() {
        let err = validate_tone(&ToneConfig::new("wobble", 1.0)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Unknown {
                kind: "waveform".to_string(),
                name: "wobble".to_string()
            }
        );
    }

    #[test]
    fn inverted_band_is_rejected() {
        let err = validate_filter(&FilterConfig::BandPass {
            low_cutoff: 500.0,
            high_cutoff: 100.0,
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::Invalid { ref param, .. } if param == "low_cutoff"));
        assert!(validate_filter(&FilterConfig::LowPass { cutoff: -1.0 }).is_ok());
        assert!(validate_filter(&FilterConfig::HighPass { cutoff: f64::NAN }).is_err());
    }

    #[test]
    fn image_sigma_must_be_positive() {
        let mut cfg = ImageFilterConfig::new("gaussian_blur");
        cfg.sigma = Some(0.0);
        assert!(validate_image(&cfg).is_err());
        cfg.sigma = None;
        assert!(validate_image(&cfg).is_ok());
    }

    #[test]
    fn problems_are_collected() {
        let mut config = PrismaConfig::default();
        config.generator.sample_rate = 0;
        config.generator.tones.push(ToneConfig {
            duty: 2.0,
            ..ToneConfig::default()
        });
        config.analysis.transform = "wavelet".to_string();
        config.modulation = Some(ModulationConfig {
            kind: "FM".to_string(),
            index: 1.0,
            carrier: 0,
            modulator: 3,
        });

        match validate_config(&config).unwrap_err() {
            ValidationError::Multiple(errors) => {
                assert_eq!(errors.len(), 4, "{errors:?}");
                assert!(errors.iter().any(|e| matches!(e, ValidationError::OutOfRange { .. })));
                let msg = ValidationError::Multiple(errors).to_string();
                assert!(msg.contains("unknown transform: 'wavelet'"), "{msg}");
                assert!(msg.contains("tone 3 does not exist"), "{msg}");
            }
            other => panic!("expected multiple errors, got {other:?}"),
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&PrismaConfig::default()), Ok(()));
    }
}
