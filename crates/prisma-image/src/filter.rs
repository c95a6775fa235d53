//! Named image filters.
//!
//! [`ImageFilter`] bundles one operation with its parameters so a caller can
//! pick a filter by name (from a menu, a config file) and apply it later.

use std::fmt;

use prisma_core::{Error, Result};

use crate::convolve::{box_blur, gaussian_blur};
use crate::edge::{color_sobel, sobel};
use crate::image::Image;
use crate::kernel::odd_size;
use crate::median::median_filter;

/// Default window for the size-driven filters.
pub const DEFAULT_FILTER_SIZE: usize = 3;

/// An image operation with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageFilter {
    /// Mean over a `size × size` window.
    BoxBlur {
        /// Window side (rounded up to odd).
        size: usize,
    },
    /// Normalized Gaussian kernel.
    GaussianBlur {
        /// Kernel side (rounded up to odd).
        size: usize,
        /// Standard deviation in pixels; `None` means `size / 3`.
        sigma: Option<f64>,
    },
    /// Per-channel median.
    Median {
        /// Window side (rounded up to odd).
        size: usize,
    },
    /// Grayscale gradient magnitude.
    Sobel,
    /// Colours masked by gradient magnitude.
    ColorSobel,
}

impl ImageFilter {
    /// Build a filter from its name and a window size.
    ///
    /// Names are case-insensitive; `-` and spaces are treated as `_`.
    /// Accepted: `box_blur`/`box`/`blur`, `gaussian_blur`/`gaussian`,
    /// `median_filter`/`median`, `sobel`/`edges`, `color_sobel`/`colour_sobel`.
    pub fn from_name(name: &str, size: usize) -> Result<Self> {
        let key = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "box_blur" | "box" | "blur" => Ok(Self::BoxBlur { size }),
            "gaussian_blur" | "gaussian" => Ok(Self::GaussianBlur { size, sigma: None }),
            "median_filter" | "median" => Ok(Self::Median { size }),
            "sobel" | "edges" => Ok(Self::Sobel),
            "color_sobel" | "colour_sobel" => Ok(Self::ColorSobel),
            _ => Err(Error::unknown("image filter", name)),
        }
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BoxBlur { .. } => "box_blur",
            Self::GaussianBlur { .. } => "gaussian_blur",
            Self::Median { .. } => "median_filter",
            Self::Sobel => "sobel",
            Self::ColorSobel => "color_sobel",
        }
    }

    /// Sigma actually used by a Gaussian blur: the explicit value, or one
    /// third of the (odd) kernel side.
    pub fn effective_sigma(size: usize, sigma: Option<f64>) -> f64 {
        sigma.unwrap_or_else(|| odd_size(size.max(1)) as f64 / 3.0)
    }

    /// Run the filter.
    pub fn apply(&self, image: &Image) -> Result<Image> {
        tracing::debug!("image filter: {self}");
        match *self {
            Self::BoxBlur { size } => box_blur(image, size),
            Self::GaussianBlur { size, sigma } => {
                gaussian_blur(image, size, Self::effective_sigma(size, sigma))
            }
            Self::Median { size } => median_filter(image, size),
            Self::Sobel => sobel(image),
            Self::ColorSobel => color_sobel(image),
        }
    }
}

impl fmt::Display for ImageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoxBlur { size } | Self::Median { size } => {
                write!(f, "{} ({size}x{size})", self.name())
            }
            Self::GaussianBlur { size, sigma } => write!(
                f,
                "{} ({size}x{size}, sigma {:.3})",
                self.name(),
                Self::effective_sigma(*size, *sigma)
            ),
            Self::Sobel | Self::ColorSobel => f.write_str(self.name()),
        }
    }
}

impl std::str::FromStr for ImageFilter {
    type Err = Error;

    /// Parse a name with [`DEFAULT_FILTER_SIZE`].
    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s, DEFAULT_FILTER_SIZE)
    }
}
