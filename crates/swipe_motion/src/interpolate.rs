//! Piecewise-linear range mapping.
//!
//! `interpolate` narrows the input range to the segment containing the value,
//! maps it linearly onto the matching output segment, and resolves values past
//! the segment edges with an [`Extrapolation`]. Edge handling happens in output
//! space, so descending input ranges such as `[0, -120]` behave the same as
//! ascending ones.

use serde::{Deserialize, Serialize};

/// Behaviour past the edges of the input range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolation {
    /// Pin to the nearest output edge.
    #[default]
    Clamp,
    /// Keep extending the edge segment linearly.
    Extend,
    /// Return the input value unchanged.
    Identity,
}

/// Map `value` from `input` to `output`.
///
/// Ranges are matched element-wise up to the shorter length. An empty range
/// returns `value`; a single-point range returns its output.
///
/// ```
/// use swipe_motion::{interpolate, Extrapolation};
///
/// let x = interpolate(-60.0, &[-120.0, 0.0, 120.0], &[1.0, 0.0, 1.0], Extrapolation::Clamp);
/// assert_eq!(x, 0.5);
///
/// let past = interpolate(500.0, &[-120.0, 0.0, 120.0], &[1.0, 0.0, 1.0], Extrapolation::Clamp);
/// assert_eq!(past, 1.0);
/// ```
pub fn interpolate(value: f64, input: &[f64], output: &[f64], extrapolation: Extrapolation) -> f64 {
    let len = input.len().min(output.len());
    match len {
        0 => return value,
        1 => return output[0],
        _ => {}
    }

    let seg = narrow(value, &input[..len]);
    let (left_in, right_in) = (input[seg], input[seg + 1]);
    let (left_out, right_out) = (output[seg], output[seg + 1]);

    if right_in - left_in == 0.0 {
        return left_out;
    }

    let progress = (value - left_in) / (right_in - left_in);
    let mapped = left_out + progress * (right_out - left_out);
    let coef = if right_out >= left_out { 1.0 } else { -1.0 };

    if coef * mapped < coef * left_out {
        extrapolate(extrapolation, value, mapped, left_out)
    } else if coef * mapped > coef * right_out {
        extrapolate(extrapolation, value, mapped, right_out)
    } else {
        mapped
    }
}

/// True when `value` has no fractional part.
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Index of the left edge of the segment that `value` falls into.
fn narrow(value: f64, input: &[f64]) -> usize {
    let len = input.len();
    if len == 2 || value > input[len - 1] {
        return len - 2;
    }
    (1..len)
        .find(|&i| value <= input[i])
        .map(|i| i - 1)
        .unwrap_or(len - 2)
}

fn extrapolate(mode: Extrapolation, value: f64, mapped: f64, edge: f64) -> f64 {
    match mode {
        Extrapolation::Clamp => edge,
        Extrapolation::Extend => mapped,
        Extrapolation::Identity => value,
    }
}
