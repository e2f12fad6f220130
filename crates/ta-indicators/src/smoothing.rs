//! Smoothing primitives shared by the indicator calculators.
//!
//! Every function takes a sequence with optional gaps and returns a
//! sequence of the same length. `None` marks an undefined point.

/// Simple rolling mean over the trailing `window` values.
///
/// Undefined until `window` samples are available, and wherever the window
/// holds a missing sample.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return result;
    }

    let window_f64 = window as f64;
    for (i, samples) in values.windows(window).enumerate() {
        let sum: Option<f64> = samples.iter().copied().sum();
        result[i + window - 1] = sum.map(|s| s / window_f64);
    }

    result
}

/// Sample (ddof = 1) rolling standard deviation over the trailing `window` values.
///
/// Needs at least two samples per window.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if window < 2 || values.len() < window {
        return result;
    }

    let window_f64 = window as f64;
    for (i, samples) in values.windows(window).enumerate() {
        let Some(samples) = samples.iter().copied().collect::<Option<Vec<f64>>>() else {
            continue;
        };
        let mean = samples.iter().sum::<f64>() / window_f64;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (window_f64 - 1.0);
        result[i + window - 1] = Some(variance.sqrt());
    }

    result
}

/// Exponential smoothing with factor `2 / (window + 1)`.
///
/// The first defined input seeds the average, so there is no warm-up gap
/// beyond the input's own. A missing input yields a missing output and
/// leaves the running average untouched.
pub fn ema(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let alpha = 2.0 / (window as f64 + 1.0);
    let one_minus_alpha = 1.0 - alpha;
    let mut current: Option<f64> = None;

    values
        .iter()
        .map(|value| {
            let x = (*value)?;
            let next = match current {
                Some(prev) => alpha * x + one_minus_alpha * prev,
                None => x,
            };
            current = Some(next);
            current
        })
        .collect()
}

/// Wilder's recursive smoothing.
///
/// The seed is the sum of the first `window` samples after the input's
/// leading undefined run, placed on the last of those samples. From there
/// `S[t] = (S[t-1] * (window - 1) + x[t]) / window`. A missing sample,
/// inside the seed window or later, leaves the rest of the output undefined.
pub fn wilder(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if window == 0 {
        return result;
    }

    let Some(first) = values.iter().position(Option::is_some) else {
        return result;
    };
    let seed_end = first + window;
    if seed_end > values.len() {
        return result;
    }

    let mut smoothed = 0.0;
    for value in &values[first..seed_end] {
        match value {
            Some(v) => smoothed += v,
            None => return result,
        }
    }
    result[seed_end - 1] = Some(smoothed);

    let window_f64 = window as f64;
    for (i, value) in values.iter().enumerate().skip(seed_end) {
        let Some(x) = value else {
            break;
        };
        smoothed = (smoothed * (window_f64 - 1.0) + x) / window_f64;
        result[i] = Some(smoothed);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defined(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().map(|&v| Some(v)).collect()
    }

    fn assert_close(actual: &[Option<f64>], expected: &[Option<f64>]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            match (a, e) {
                (Some(a), Some(e)) => assert!((a - e).abs() < 1e-10, "{a} != {e}"),
                (None, None) => {}
                _ => panic!("{actual:?} != {expected:?}"),
            }
        }
    }

    #[test]
    fn test_rolling_mean() {
        let data = defined(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_close(
            &rolling_mean(&data, 3),
            &[None, None, Some(2.0), Some(3.0), Some(4.0)],
        );
    }

    #[test]
    fn test_rolling_mean_gap() {
        let data = vec![Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(6.0)];
        assert_close(
            &rolling_mean(&data, 2),
            &[None, Some(1.5), None, None, Some(4.5), Some(5.5)],
        );
    }

    #[test]
    fn test_rolling_mean_after_large_value() {
        let data = defined(&[1e16, 1.0, 1.0, 1.0]);
        assert_eq!(
            rolling_mean(&data, 1),
            vec![Some(1e16), Some(1.0), Some(1.0), Some(1.0)]
        );
        assert_eq!(rolling_mean(&data, 2)[3], Some(1.0));
    }

    #[test]
    fn test_rolling_mean_insufficient_data() {
        assert_eq!(rolling_mean(&defined(&[1.0, 2.0]), 5), vec![None, None]);
        assert!(rolling_mean(&[], 3).is_empty());
    }

    #[test]
    fn test_rolling_std_sample() {
        let data = defined(&[2.0, 4.0, 6.0, 8.0, 10.0]);
        // Window [2, 4, 6]: mean 4, squared deviations 8, sample variance 8/2 = 4
        assert_close(
            &rolling_std(&data, 3),
            &[None, None, Some(2.0), Some(2.0), Some(2.0)],
        );
        assert_eq!(rolling_std(&data, 1), vec![None; 5]);
    }

    #[test]
    fn test_ema_seeded_at_first_value() {
        let data = defined(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let result = ema(&data, 3);

        // alpha = 2 / (3 + 1) = 0.5
        assert_close(
            &result,
            &[Some(1.0), Some(1.5), Some(2.25), Some(3.125), Some(4.0625)],
        );
    }

    #[test]
    fn test_ema_gaps() {
        let data = vec![None, Some(2.0), None, Some(4.0)];
        assert_close(&ema(&data, 3), &[None, Some(2.0), None, Some(3.0)]);
    }

    #[test]
    fn test_wilder_seed_is_sum() {
        let data = defined(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        // Seed 1 + 2 + 3 = 6, then (6 * 2 + 4) / 3 and (16/3 * 2 + 5) / 3
        assert_close(
            &wilder(&data, 3),
            &[None, None, Some(6.0), Some(16.0 / 3.0), Some(47.0 / 9.0)],
        );
    }

    #[test]
    fn test_wilder_skips_leading_gap() {
        let data = vec![None, Some(1.0), Some(1.0), Some(4.0)];
        assert_close(&wilder(&data, 2), &[None, None, Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_wilder_gap_propagates_forever() {
        let data = vec![Some(1.0), Some(1.0), Some(1.0), None, Some(1.0), Some(1.0)];
        assert_close(
            &wilder(&data, 2),
            &[None, Some(2.0), Some(1.5), None, None, None],
        );
    }

    #[test]
    fn test_wilder_gap_in_seed_window() {
        let data = vec![Some(1.0), None, Some(1.0), Some(1.0)];
        assert_eq!(wilder(&data, 2), vec![None; 4]);
    }
}
