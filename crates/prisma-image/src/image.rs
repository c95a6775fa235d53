//! 8-bit pixel grids and their floating-point channel planes.
//!
//! An [`Image`] stores interleaved row-major bytes. Filters never work on the
//! bytes directly: they split the image into [`Plane`]s (one `f64` grid per
//! channel), accumulate in floating point, and only round back to `u8` when
//! the final image is assembled.

use prisma_core::{Error, Result, to_u8};

/// Channel layout of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// One luminance channel.
    #[default]
    Gray,
    /// Three interleaved channels, red first.
    Rgb,
}

impl PixelFormat {
    /// Number of interleaved channels per pixel.
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Gray => 1,
            PixelFormat::Rgb => 3,
        }
    }
}

/// An 8-bit image of `height` rows by `width` columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl Image {
    /// Wrap an interleaved row-major buffer.
    ///
    /// Fails with [`Error::InvalidArgument`] when `data.len()` is not
    /// `width * height * channels`.
    pub fn new(width: usize, height: usize, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(format.channels()))
            .ok_or_else(|| {
                Error::invalid("data", format!("{width}x{height} {format:?} image is too large"))
            })?;
        if data.len() != expected {
            return Err(Error::invalid(
                "data",
                format!(
                    "{width}x{height} {format:?} image needs {expected} bytes, got {}",
                    data.len()
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Grayscale image from one byte per pixel.
    pub fn gray(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, PixelFormat::Gray, data)
    }

    /// RGB image from three interleaved bytes per pixel.
    pub fn rgb(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, PixelFormat::Rgb, data)
    }

    /// Image with every channel of every pixel set to `value`.
    pub fn filled(width: usize, height: usize, format: PixelFormat, value: u8) -> Self {
        Self {
            width,
            height,
            format,
            data: vec![value; width * height * format.channels()],
        }
    }

    /// Columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Channel layout.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Channels per pixel.
    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// Interleaved row-major bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image, returning its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// True when the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Channel values of the pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let c = self.channels();
        let start = (y * self.width + x) * c;
        &self.data[start..start + c]
    }

    /// Channel `channel` as a floating-point plane.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= self.channels()`.
    pub fn plane(&self, channel: usize) -> Plane {
        let c = self.channels();
        assert!(channel < c, "channel {channel} out of range for {c} channels");
        let data = self
            .data
            .iter()
            .skip(channel)
            .step_by(c)
            .map(|&v| f64::from(v))
            .collect();
        Plane {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// All channels as planes, in interleave order.
    pub fn planes(&self) -> Vec<Plane> {
        (0..self.channels()).map(|c| self.plane(c)).collect()
    }

    /// Interleave planes back into bytes, rounding and clamping each value.
    ///
    /// Every plane must have the same dimensions and there must be one per
    /// channel of `format`.
    pub fn from_planes(format: PixelFormat, planes: &[Plane]) -> Result<Self> {
        if planes.len() != format.channels() {
            return Err(Error::invalid(
                "planes",
                format!("{format:?} needs {} planes, got {}", format.channels(), planes.len()),
            ));
        }
        let (width, height) = planes
            .first()
            .map_or((0, 0), |p| (p.width, p.height));
        if planes.iter().any(|p| p.width != width || p.height != height) {
            return Err(Error::invalid("planes", "plane dimensions differ"));
        }

        let len = width * height;
        let mut data = Vec::with_capacity(len * planes.len());
        for i in 0..len {
            data.extend(planes.iter().map(|p| to_u8(p.data[i])));
        }
        Self::new(width, height, format, data)
    }

    /// Luminance plane: the single channel for gray images, otherwise
    /// `0.299 R + 0.587 G + 0.114 B`.
    pub fn luminance(&self) -> Plane {
        match self.format {
            PixelFormat::Gray => self.plane(0),
            PixelFormat::Rgb => Plane {
                width: self.width,
                height: self.height,
                data: self
                    .data
                    .chunks_exact(3)
                    .map(|px| {
                        0.299 * f64::from(px[0]) + 0.587 * f64::from(px[1]) + 0.114 * f64::from(px[2])
                    })
                    .collect(),
            },
        }
    }

    /// Same pixels as RGB; gray values are copied into all three channels.
    pub fn to_rgb(&self) -> Image {
        match self.format {
            PixelFormat::Rgb => self.clone(),
            PixelFormat::Gray => Image {
                width: self.width,
                height: self.height,
                format: PixelFormat::Rgb,
                data: self.data.iter().flat_map(|&v| [v, v, v]).collect(),
            },
        }
    }
}

/// A single channel of floating-point values, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Plane {
    /// Wrap a row-major buffer of `width * height` values.
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Result<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            Error::invalid("data", format!("{width}x{height} plane is too large"))
        })?;
        if data.len() != expected {
            return Err(Error::invalid(
                "data",
                format!("{width}x{height} plane needs {expected} values, got {}", data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Plane of zeros.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major values.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable row-major values.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// True when the plane has no values.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Value at `(x, y)` with coordinates clamped into the grid, which is
    /// how edge replication is expressed.
    ///
    /// Must not be called on an empty plane.
    #[inline]
    pub fn clamped(&self, x: isize, y: isize) -> f64 {
        let x = clamp_index(x, self.width);
        let y = clamp_index(y, self.height);
        self.data[y * self.width + x]
    }

    /// Largest value (0 for an empty plane).
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }

    /// Combine two planes of equal dimensions value by value.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn zip_map(&self, other: &Plane, f: impl Fn(f64, f64) -> f64) -> Plane {
        assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "plane dimensions differ"
        );
        Plane {
            width: self.width,
            height: self.height,
            data: self.data.iter().zip(&other.data).map(|(&a, &b)| f(a, b)).collect(),
        }
    }

    /// Multiply every value by `gain`.
    pub fn scale(&mut self, gain: f64) {
        for v in &mut self.data {
            *v *= gain;
        }
    }
}

#[inline]
pub(crate) fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}
