//! Configuration for the prisma processors.
//!
//! A single TOML document describes what to generate, how to analyze it,
//! which filters to run and how to process images. Sections build the
//! matching processor values, so callers never parse names themselves.
//!
//! # Features
//!
//! - **Config file**: [`PrismaConfig`] with `[generator]`, `[modulation]`,
//!   `[analysis]`, `[[filters]]` and `[image]` sections
//! - **Builders**: sections turn into a `Synthesizer`, `TransformKind`,
//!   `FilterMode` or `ImageFilter`
//! - **Validation**: every problem in a file reported at once
//!
//! # Example
//!
//! ```rust
//! use prisma_config::PrismaConfig;
//!
//! let config = PrismaConfig::from_toml_str(r#"
//!     [generator]
//!     sample_rate = 8000
//!     duration = 0.1
//!
//!     [[generator.tones]]
//!     waveform = "sine"
//!     frequency = 440.0
//!
//!     [[filters]]
//!     type = "low_pass"
//!     cutoff = 1000.0
//! "#).unwrap();
//!
//! let signal = config.render_signal().unwrap();
//! assert_eq!(signal.len(), 800);
//! ```

mod config;
mod error;
mod sections;

/// Configuration validation.
pub mod validation;

pub use config::PrismaConfig;
pub use error::ConfigError;
pub use sections::{
    AnalysisConfig, FilterConfig, GeneratorConfig, ImageFilterConfig, ModulationConfig,
    ToneConfig,
};
pub use validation::{
    ValidationError, ValidationResult, validate_config, validate_filter, validate_image,
    validate_tone,
};
