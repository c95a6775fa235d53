//! 2D correlation with edge replication.
//!
//! The kernel is applied without flipping. Out-of-range reads are clamped to
//! the nearest edge pixel, sums are kept in `f64`, and rounding to `u8`
//! happens once when the output image is assembled. Rows are independent,
//! so each plane is filled in parallel.

use prisma_core::Result;
use rayon::prelude::*;

use crate::image::{Image, Plane};
use crate::kernel::Kernel;

/// Correlate a single plane with `kernel`.
pub fn correlate_plane(plane: &Plane, kernel: &Kernel) -> Plane {
    let (width, height) = (plane.width(), plane.height());
    let mut out = Plane::zeros(width, height);
    if plane.is_empty() {
        return out;
    }

    let size = kernel.size();
    let r = kernel.radius() as isize;
    out.data_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as isize;
            for (x, cell) in row.iter_mut().enumerate() {
                let x = x as isize;
                let mut acc = 0.0;
                for ky in 0..size {
                    let sy = y + ky as isize - r;
                    for kx in 0..size {
                        let sx = x + kx as isize - r;
                        acc += kernel.get(ky, kx) * plane.clamped(sx, sy);
                    }
                }
                *cell = acc;
            }
        });
    out
}

/// Correlate every channel of `image` with `kernel`.
pub fn convolve(image: &Image, kernel: &Kernel) -> Result<Image> {
    tracing::debug!(
        "convolve: {}x{} {:?} with {}x{} kernel",
        image.width(),
        image.height(),
        image.format(),
        kernel.size(),
        kernel.size()
    );
    let planes: Vec<Plane> = image
        .planes()
        .iter()
        .map(|p| correlate_plane(p, kernel))
        .collect();
    Image::from_planes(image.format(), &planes)
}

/// Mean filter over a `size × size` window. `size < 1` returns the input
/// unchanged; an even size is rounded up to odd.
pub fn box_blur(image: &Image, size: usize) -> Result<Image> {
    if size < 1 {
        return Ok(image.clone());
    }
    convolve(image, &Kernel::box_blur(size))
}

/// Gaussian blur with a normalized `size × size` kernel.
pub fn gaussian_blur(image: &Image, size: usize, sigma: f64) -> Result<Image> {
    convolve(image, &Kernel::gaussian(size, sigma)?)
}
