//! Minimal `[f64; 3]` arithmetic.
//!
//! Positions, velocities and angular rates are plain arrays in this crate;
//! these helpers keep the component-wise loops out of the algorithms.

/// Component-wise `a - b`.
#[must_use]
pub fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Component-wise `v / d`.
#[must_use]
pub fn div(v: [f64; 3], d: f64) -> [f64; 3] {
    [v[0] / d, v[1] / d, v[2] / d]
}

/// Euclidean length.
#[must_use]
pub fn norm(v: [f64; 3]) -> f64 {
    let [x, y, z] = v;
    x.hypot(y).hypot(z)
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    norm(sub(a, b))
}

/// Applies `f` to each component.
#[must_use]
pub fn map(v: [f64; 3], f: impl Fn(f64) -> f64) -> [f64; 3] {
    [f(v[0]), f(v[1]), f(v[2])]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        assert_eq!(sub([3.0, 2.0, 1.0], [1.0, 1.0, 1.0]), [2.0, 1.0, 0.0]);
        assert_eq!(div([2.0, 4.0, 6.0], 2.0), [1.0, 2.0, 3.0]);
        assert_eq!(map([1.0, 4.0, 9.0], f64::sqrt), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn norm_and_distance() {
        assert!((norm([3.0, 4.0, 0.0]) - 5.0).abs() < 1e-12);
        assert!((distance([1.0, 1.0, 1.0], [1.0, 1.0, 3.0]) - 2.0).abs() < 1e-12);
    }
}
