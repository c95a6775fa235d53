//! Median filter.

use prisma_core::Result;
use rayon::prelude::*;

use crate::image::{Image, Plane};
use crate::kernel::odd_size;

/// Median of one plane over an edge-replicated `size × size` window.
///
/// `size` must already be odd.
fn median_plane(plane: &Plane, size: usize) -> Plane {
    let (width, height) = (plane.width(), plane.height());
    let mut out = Plane::zeros(width, height);
    if plane.is_empty() {
        return out;
    }

    let r = (size / 2) as isize;
    let mid = size * size / 2;
    out.data_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as isize;
            let mut window = Vec::with_capacity(size * size);
            for (x, cell) in row.iter_mut().enumerate() {
                let x = x as isize;
                window.clear();
                for dy in -r..=r {
                    for dx in -r..=r {
                        window.push(plane.clamped(x + dx, y + dy));
                    }
                }
                window.sort_unstable_by(f64::total_cmp);
                *cell = window[mid];
            }
        });
    out
}

/// Per-channel median of the `size × size` neighbourhood.
///
/// `size < 1` returns the input unchanged; an even size is rounded up to odd.
pub fn median_filter(image: &Image, size: usize) -> Result<Image> {
    if size < 1 {
        return Ok(image.clone());
    }
    let size = odd_size(size);
    tracing::debug!(
        "median_filter: {}x{} {:?}, window {size}",
        image.width(),
        image.height(),
        image.format()
    );
    let planes: Vec<Plane> = image
        .planes()
        .iter()
        .map(|p| median_plane(p, size))
        .collect();
    Image::from_planes(image.format(), &planes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_salt_noise() {
        let mut data = vec![50u8; 25];
        data[12] = 255;
        let img = Image::gray(5, 5, data).unwrap();
        let out = median_filter(&img, 3).unwrap();
        assert!(out.data().iter().all(|&v| v == 50));
    }

    #[test]
    fn channels_are_independent() {
        // A single off pixel in the red channel only.
        let mut data = Vec::new();
        for i in 0..9 {
            data.extend_from_slice(&[if i == 4 { 200 } else { 10 }, 100, 30]);
        }
        let img = Image::rgb(3, 3, data).unwrap();
        let out = median_filter(&img, 3).unwrap();
        for px in out.data().chunks_exact(3) {
            assert_eq!(px, &[10, 100, 30]);
        }
    }

    #[test]
    fn size_one_and_zero_are_identity() {
        let img = Image::gray(3, 1, vec![1, 200, 3]).unwrap();
        assert_eq!(median_filter(&img, 1).unwrap(), img);
        assert_eq!(median_filter(&img, 0).unwrap(), img);
    }

    #[test]
    fn even_size_is_rounded_up() {
        let img = Image::gray(3, 1, vec![0, 0, 255]).unwrap();
        // size 2 behaves as 3: every window holds at most three 255s of nine.
        assert_eq!(median_filter(&img, 2).unwrap(), median_filter(&img, 3).unwrap());
    }
}
