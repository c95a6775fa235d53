//! Prisma Image - 2D convolution and edge filters
//!
//! Operates on 8-bit [`Image`]s (gray or RGB). Every filter splits the image
//! into floating-point [`Plane`]s, works in `f64` and rounds back to `u8`
//! once at the end.
//!
//! - [`kernel`] - odd square [`Kernel`]s: box, Gaussian, Sobel, explicit
//! - [`convolve`] - correlation with edge replication, box and Gaussian blur
//! - [`median`] - per-channel median filter
//! - [`edge`] - Sobel magnitude and colour-masked Sobel
//! - [`filter`] - [`ImageFilter`], a named filter with its parameters
//!
//! ## Example
//!
//! ```rust
//! use prisma_image::{Image, ImageFilter, box_blur};
//!
//! let img = Image::gray(2, 2, vec![0, 255, 255, 0]).unwrap();
//! assert_eq!(box_blur(&img, 1).unwrap(), img);
//!
//! let edges = "sobel".parse::<ImageFilter>().unwrap().apply(&img).unwrap();
//! assert_eq!(edges.width(), 2);
//! ```

pub mod convolve;
pub mod edge;
pub mod filter;
pub mod image;
pub mod kernel;
pub mod median;

pub use convolve::{box_blur, convolve, correlate_plane, gaussian_blur};
pub use edge::{color_sobel, gradient_magnitude, sobel, sobel_gradients};
pub use filter::{DEFAULT_FILTER_SIZE, ImageFilter};
pub use image::{Image, PixelFormat, Plane};
pub use kernel::{Kernel, odd_size};
pub use median::median_filter;
