//! Polyphonic mixing.

use prisma_core::{Error, Result, Signal, peak_normalize};

/// Add two signals sample by sample.
///
/// Both must share a sample rate. The result has the shorter length and is
/// peak-normalized when its peak exceeds 1.
pub fn sum(a: &Signal, b: &Signal) -> Result<Signal> {
    mix(&[a, b])
}

/// Add any number of signals with the same rules as [`sum`].
///
/// Fails with [`Error::EmptyInput`] for an empty slice.
pub fn sum_all(signals: &[Signal]) -> Result<Signal> {
    mix(&signals.iter().collect::<Vec<_>>())
}

fn mix(signals: &[&Signal]) -> Result<Signal> {
    let first = signals.first().ok_or(Error::EmptyInput("sum_all"))?;
    for other in &signals[1..] {
        first.ensure_same_rate(other)?;
    }

    let len = signals.iter().map(|s| s.len()).min().unwrap_or(0);
    let mut mixed = vec![0.0; len];
    for signal in signals {
        for (acc, x) in mixed.iter_mut().zip(signal.samples()) {
            *acc += x;
        }
    }
    let divisor = peak_normalize(&mut mixed);
    tracing::debug!(
        "mix: {} signals, {len} samples, normalized by {divisor:.4}",
        signals.len()
    );

    Signal::new(mixed, first.sample_rate())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(samples: &[f64], rate: u32) -> Signal {
        Signal::new(samples.to_vec(), rate).unwrap()
    }

    #[test]
    fn in_phase_halves_sum_to_unit_peak() {
        let half = signal(&[0.0, 0.5, 0.0, -0.5], 4);
        let mixed = sum(&half, &half).unwrap();
        assert_eq!(mixed.samples(), &[0.0, 1.0, 0.0, -1.0]);
        assert!(mixed.tone().is_none());
    }

    #[test]
    fn loud_mix_is_normalized() {
        let a = signal(&[1.0, 1.0], 8);
        let b = signal(&[1.0, -0.5], 8);
        assert_eq!(sum(&a, &b).unwrap().samples(), &[1.0, 0.25]);
    }

    #[test]
    fn shorter_length_wins() {
        let a = signal(&[0.1, 0.2, 0.3], 8);
        let b = signal(&[0.1], 8);
        let mixed = sum(&a, &b).unwrap();
        assert_eq!(mixed.len(), 1);
        assert!((mixed.samples()[0] - 0.2).abs() < 1e-15);
    }

    #[test]
    fn rate_mismatch_is_rejected() {
        let err = sum(&signal(&[0.0], 8), &signal(&[0.0], 16)).unwrap_err();
        assert_eq!(err, Error::SampleRateMismatch { left: 8, right: 16 });
    }

    #[test]
    fn sum_all_of_three() {
        let s = signal(&[0.5, -0.5], 8);
        let mixed = sum_all(&[s.clone(), s.clone(), s]).unwrap();
        assert_eq!(mixed.samples(), &[1.0, -1.0]);
        assert!(matches!(sum_all(&[]), Err(Error::EmptyInput(_))));
    }
}
