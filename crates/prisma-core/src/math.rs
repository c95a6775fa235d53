//! Numeric helpers shared by the processing crates.
//!
//! # Normalization
//!
//! Two flavours of peak scaling are used across the workspace:
//!
//! | Function | Divides when | Used by |
//! |----------|--------------|---------|
//! | [`peak_normalize`] | peak > 1 | mixing, modulation output |
//! | [`normalize_to_unit_peak`] | peak > 0 | modulator preparation, melody rendering |
//!
//! Both leave an all-zero buffer untouched, so there is never a division by
//! zero.

/// Largest absolute value in `samples` (0 for an empty slice).
#[inline]
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0_f64, |acc, &x| acc.max(x.abs()))
}

/// Scale `samples` by `1 / peak` only when the peak exceeds 1.
///
/// Returns the divisor that was applied (1.0 when nothing changed).
///
/// # Example
/// ```rust
/// use prisma_core::peak_normalize;
///
/// let mut quiet = vec![0.25, -0.5];
/// assert_eq!(peak_normalize(&mut quiet), 1.0);
/// assert_eq!(quiet, vec![0.25, -0.5]);
///
/// let mut loud = vec![1.0, -2.0];
/// assert_eq!(peak_normalize(&mut loud), 2.0);
/// assert_eq!(loud, vec![0.5, -1.0]);
/// ```
pub fn peak_normalize(samples: &mut [f64]) -> f64 {
    let max = peak(samples);
    if max > 1.0 {
        scale(samples, 1.0 / max);
        #[cfg(feature = "tracing")]
        tracing::trace!("peak_normalize: divided by {max:.4}");
        max
    } else {
        1.0
    }
}

/// Scale `samples` so the peak is exactly 1, unless they are all zero.
///
/// Returns the divisor that was applied (1.0 for an all-zero buffer).
pub fn normalize_to_unit_peak(samples: &mut [f64]) -> f64 {
    let max = peak(samples);
    if max > 0.0 {
        scale(samples, 1.0 / max);
        max
    } else {
        #[cfg(feature = "tracing")]
        tracing::debug!("normalize_to_unit_peak: all-zero input left unchanged");
        1.0
    }
}

#[inline]
fn scale(samples: &mut [f64], gain: f64) {
    for s in samples.iter_mut() {
        *s *= gain;
    }
}

/// Whether `n` is a non-zero power of two.
#[inline]
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && n & (n - 1) == 0
}

/// Smallest power of two `>= n` (1 for `n == 0`).
#[inline]
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// `count` evenly spaced values from `start` to `end`, both inclusive.
///
/// A single value yields `[start]`; zero values yield an empty vector. The
/// last value is exactly `end`.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = count - 1;
            let step = (end - start) / last as f64;
            (0..count)
                .map(|i| if i == last { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Round and clamp a floating value to an 8-bit channel.
#[inline]
pub fn to_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_of_empty_is_zero() {
        assert_eq!(peak(&[]), 0.0);
        assert_eq!(peak(&[-3.0, 2.0]), 3.0);
    }

    #[test]
    fn peak_normalize_leaves_unit_signal() {
        let mut s = vec![0.5, -1.0, 0.25];
        assert_eq!(peak_normalize(&mut s), 1.0);
        assert_eq!(s, vec![0.5, -1.0, 0.25]);
    }

    #[test]
    fn normalize_to_unit_peak_skips_zeros() {
        let mut z = vec![0.0; 8];
        assert_eq!(normalize_to_unit_peak(&mut z), 1.0);
        assert!(z.iter().all(|&x| x == 0.0));

        let mut s = vec![0.25, -0.5];
        normalize_to_unit_peak(&mut s);
        assert_eq!(s, vec![0.5, -1.0]);
    }

    #[test]
    fn power_of_two_helpers() {
        assert!(!is_power_of_two(0));
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(512));
        assert!(!is_power_of_two(6));
        assert_eq!(next_power_of_two(0), 1);
        assert_eq!(next_power_of_two(5), 8);
        assert_eq!(next_power_of_two(8), 8);
    }

    #[test]
    fn linspace_is_inclusive() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(1.0, 0.0, 1), vec![1.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn to_u8_rounds_and_clamps() {
        assert_eq!(to_u8(-4.0), 0);
        assert_eq!(to_u8(254.6), 255);
        assert_eq!(to_u8(300.0), 255);
        assert_eq!(to_u8(127.4), 127);
        assert_eq!(to_u8(f64::NAN), 0);
    }
}
