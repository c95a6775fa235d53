//! Sobel edge detection.
//!
//! [`sobel`] produces a grayscale magnitude map stretched so the strongest
//! edge is 255. [`color_sobel`] uses the same magnitude, scaled into [0, 1],
//! as a mask over the original colours and then stretches the result.

use prisma_core::Result;
use rayon::prelude::*;

use crate::image::{Image, PixelFormat, Plane};

/// Sobel derivatives `(gx, gy)` of a plane with edge replication.
///
/// Equivalent to correlating with [`Kernel::sobel_x`](crate::Kernel::sobel_x)
/// and [`Kernel::sobel_y`](crate::Kernel::sobel_y), but each term is a
/// difference of two samples, so a flat region yields exactly zero.
pub fn sobel_gradients(plane: &Plane) -> (Plane, Plane) {
    let (width, height) = (plane.width(), plane.height());
    let mut gx = Plane::zeros(width, height);
    let mut gy = Plane::zeros(width, height);
    if plane.is_empty() {
        return (gx, gy);
    }

    gx.data_mut()
        .par_chunks_mut(width)
        .zip(gy.data_mut().par_chunks_mut(width))
        .enumerate()
        .for_each(|(y, (row_x, row_y))| {
            let y = y as isize;
            for (x, (cx, cy)) in row_x.iter_mut().zip(row_y.iter_mut()).enumerate() {
                let x = x as isize;
                let p = |dx: isize, dy: isize| plane.clamped(x + dx, y + dy);
                *cx = (p(1, -1) - p(-1, -1))
                    + 2.0 * (p(1, 0) - p(-1, 0))
                    + (p(1, 1) - p(-1, 1));
                *cy = (p(-1, 1) - p(-1, -1))
                    + 2.0 * (p(0, 1) - p(0, -1))
                    + (p(1, 1) - p(1, -1));
            }
        });
    (gx, gy)
}

/// Unscaled gradient magnitude `sqrt(gx² + gy²)` of the image luminance.
pub fn gradient_magnitude(image: &Image) -> Plane {
    let (gx, gy) = sobel_gradients(&image.luminance());
    gx.zip_map(&gy, f64::hypot)
}

/// Scale `plane` so its maximum becomes `target`. A plane whose maximum is
/// zero is left as zeros.
fn stretch(plane: &mut Plane, target: f64) {
    let max = plane.max();
    if max > 0.0 {
        plane.scale(target / max);
    } else {
        tracing::debug!("stretch: flat input, leaving all zeros");
        plane.scale(0.0);
    }
}

/// Grayscale Sobel edge map.
pub fn sobel(image: &Image) -> Result<Image> {
    tracing::debug!("sobel: {}x{} {:?}", image.width(), image.height(), image.format());
    let mut magnitude = gradient_magnitude(image);
    stretch(&mut magnitude, 255.0);
    Image::from_planes(PixelFormat::Gray, &[magnitude])
}

/// Edge-masked colour image.
///
/// Each channel is multiplied by `2 × mask`, where the mask is the Sobel
/// magnitude normalized to [0, 1]; the three channels are then rescaled
/// together so the largest value is 255. Gray input is treated as RGB with
/// three equal channels.
pub fn color_sobel(image: &Image) -> Result<Image> {
    let rgb = image.to_rgb();
    tracing::debug!("color_sobel: {}x{}", rgb.width(), rgb.height());

    let mut mask = gradient_magnitude(&rgb);
    stretch(&mut mask, 1.0);

    let mut planes = rgb.planes();
    for plane in &mut planes {
        for (v, m) in plane.data_mut().iter_mut().zip(mask.data()) {
            *v *= 2.0 * m;
        }
    }

    let global = planes.iter().map(Plane::max).fold(0.0, f64::max);
    let gain = if global > 0.0 { 255.0 / global } else { 0.0 };
    for plane in &mut planes {
        plane.scale(gain);
    }
    Image::from_planes(PixelFormat::Rgb, &planes)
}
