//! SIMD-optimized building blocks.
//!
//! These use the `wide` crate for portable SIMD operations and are only
//! taken for gap-free inputs; their output matches the scalar path.

use wide::f64x4;

/// Split consecutive price changes into gains and losses.
///
/// For `n` prices returns two vectors of `n - 1` entries: the positive part
/// of each change and the magnitude of its negative part.
pub fn split_changes(data: &[f64]) -> (Vec<f64>, Vec<f64>) {
    if data.len() < 2 {
        return (vec![], vec![]);
    }

    let count = data.len() - 1;
    let mut gains = Vec::with_capacity(count);
    let mut losses = Vec::with_capacity(count);

    let chunks = count / 4;
    let zero = f64x4::splat(0.0);

    for i in 0..chunks {
        let idx = i * 4;
        let prev = f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        let curr = f64x4::new([
            data[idx + 1],
            data[idx + 2],
            data[idx + 3],
            data[idx + 4],
        ]);

        let diff = curr - prev;
        gains.extend(diff.max(zero).to_array());
        losses.extend((zero - diff).max(zero).to_array());
    }

    // Handle remaining elements
    for i in (chunks * 4)..count {
        let (gain, loss) = split_change(data[i + 1] - data[i]);
        gains.push(gain);
        losses.push(loss);
    }

    (gains, losses)
}

/// Scalar gain/loss split of one change.
#[inline]
pub fn split_change(change: f64) -> (f64, f64) {
    if change > 0.0 {
        (change, 0.0)
    } else if change < 0.0 {
        (0.0, -change)
    } else {
        (0.0, 0.0)
    }
}
