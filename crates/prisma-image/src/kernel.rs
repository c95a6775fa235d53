//! Square convolution kernels.
//!
//! Kernels always have an odd side so the anchor sits on the centre cell.
//! The size-driven builders ([`Kernel::box_blur`], [`Kernel::gaussian`])
//! round an even size up with [`odd_size`]; [`Kernel::from_weights`] rejects
//! an even side outright, since explicit weights cannot be re-centred.

use prisma_core::{Error, Result};

/// Round an even `size` up to the next odd value.
#[inline]
pub fn odd_size(size: usize) -> usize {
    if size % 2 == 0 { size + 1 } else { size }
}

/// A `size × size` grid of weights, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Kernel from explicit row-major weights.
    ///
    /// `size` must be odd and `weights` must hold `size²` finite values.
    pub fn from_weights(size: usize, weights: Vec<f64>) -> Result<Self> {
        if size % 2 == 0 {
            return Err(Error::invalid("size", format!("kernel side must be odd, got {size}")));
        }
        if weights.len() != size * size {
            return Err(Error::invalid(
                "weights",
                format!("{size}x{size} kernel needs {} weights, got {}", size * size, weights.len()),
            ));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(Error::invalid("weights", "must be finite"));
        }
        Ok(Self { size, weights })
    }

    /// The 1×1 unit kernel.
    pub fn identity() -> Self {
        Self {
            size: 1,
            weights: vec![1.0],
        }
    }

    /// Equal weights summing to 1. An even `size` is rounded up to odd;
    /// `size == 0` yields the identity.
    pub fn box_blur(size: usize) -> Self {
        let size = odd_size(size.max(1));
        let n = size * size;
        Self {
            size,
            weights: vec![1.0 / n as f64; n],
        }
    }

    /// Gaussian weights `exp(-(x²+y²)/(2σ²))` around the centre,
    /// normalized to sum 1. The usual `1/(2πσ²)` factor cancels out.
    ///
    /// An even `size` is rounded up to odd. `sigma` must be positive and
    /// finite, and `2σ²` must neither underflow nor overflow.
    pub fn gaussian(size: usize, sigma: f64) -> Result<Self> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(Error::invalid("sigma", "must be positive"));
        }
        let two_sigma_sq = 2.0 * sigma * sigma;
        if !(two_sigma_sq.is_finite() && two_sigma_sq > 0.0) {
            return Err(Error::invalid("sigma", format!("{sigma} is out of range")));
        }
        let size = odd_size(size.max(1));
        let r = (size / 2) as isize;

        let mut weights = Vec::with_capacity(size * size);
        for y in -r..=r {
            for x in -r..=r {
                let d = (x * x + y * y) as f64;
                weights.push((-d / two_sigma_sq).exp());
            }
        }
        let sum: f64 = weights.iter().sum();
        if !(sum.is_finite() && sum > 0.0) {
            return Err(Error::invalid("sigma", format!("{sigma} gives no usable weights")));
        }
        for w in &mut weights {
            *w /= sum;
        }
        Ok(Self { size, weights })
    }

    /// Horizontal Sobel derivative.
    pub fn sobel_x() -> Self {
        Self {
            size: 3,
            weights: vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
        }
    }

    /// Vertical Sobel derivative.
    pub fn sobel_y() -> Self {
        Self {
            size: 3,
            weights: vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the centre to an edge.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Row-major weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight at `row`, `col`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.weights[row * self.size + col]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_explicit_kernel_is_rejected() {
        let err = Kernel::from_weights(2, vec![0.25; 4]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { name: "size", .. }));
        assert!(Kernel::from_weights(3, vec![1.0; 8]).is_err());
        assert!(Kernel::from_weights(1, vec![f64::NAN]).is_err());
    }

    #[test]
    fn box_sizes_are_forced_odd() {
        assert_eq!(Kernel::box_blur(0).size(), 1);
        assert_eq!(Kernel::box_blur(4).size(), 5);
        let k = Kernel::box_blur(3);
        assert!((k.sum() - 1.0).abs() < 1e-12);
        assert!((k.get(1, 1) - 1.0 / 9.0).abs() < 1e-15);
    }

    #[test]
    fn gaussian_is_normalized_and_peaked() {
        let k = Kernel::gaussian(5, 1.0).unwrap();
        assert!((k.sum() - 1.0).abs() < 1e-12);
        assert!(k.get(2, 2) > k.get(2, 3));
        assert!(k.get(2, 3) > k.get(2, 4));
        assert!((k.get(0, 0) - k.get(4, 4)).abs() < 1e-15);
        assert_eq!(Kernel::gaussian(6, 2.0).unwrap().size(), 7);
    }

    #[test]
    fn gaussian_rejects_bad_sigma() {
        assert!(Kernel::gaussian(3, 0.0).is_err());
        assert!(Kernel::gaussian(3, -1.0).is_err());
        assert!(Kernel::gaussian(3, f64::NAN).is_err());
    }

    #[test]
    fn gaussian_extreme_sigma_never_yields_nan() {
        // 2σ² underflows to zero or overflows to infinity.
        for sigma in [1e-200, 1e200] {
            let err = Kernel::gaussian(3, sigma).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument { name: "sigma", .. }), "{sigma}");
        }
        // Tiny but representable: all weight on the centre.
        let sharp = Kernel::gaussian(3, 1e-160).unwrap();
        assert_eq!(sharp.get(1, 1), 1.0);
        assert_eq!(sharp.sum(), 1.0);
        // Huge but representable: flat like a box.
        let flat = Kernel::gaussian(3, 1e150).unwrap();
        assert!(flat.weights().iter().all(|w| (w - 1.0 / 9.0).abs() < 1e-15));
    }

    #[test]
    fn sobel_kernels_sum_to_zero() {
        assert_eq!(Kernel::sobel_x().sum(), 0.0);
        assert_eq!(Kernel::sobel_y().sum(), 0.0);
        assert_eq!(Kernel::sobel_y().get(2, 1), 2.0);
    }
}
