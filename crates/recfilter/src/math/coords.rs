//! Coordinate arithmetic for coefficient alignment.
//!
//! ## Purpose
//!
//! Helpers for deriving cell-boundary points from cell-centre points and for
//! comparing coordinate sequences within a floating tolerance.
//!
//! ## Key concepts
//!
//! * **Midpoints**: `(p[i] + p[i + 1]) / 2` for each adjacent pair.
//! * **Closeness**: `|a - b| <= atol + rtol * |b|`, elementwise, with
//!   `rtol = 1e-5` and `atol = 1e-8`.
//!
//! ## Non-goals
//!
//! * This module does not handle circular (wrapping) coordinates.

// External dependencies
use num_traits::Float;

/// Relative tolerance used when comparing coordinate points.
pub const RELATIVE_TOLERANCE: f64 = 1e-5;

/// Absolute tolerance used when comparing coordinate points.
pub const ABSOLUTE_TOLERANCE: f64 = 1e-8;

/// Arithmetic midpoints of consecutive points.
///
/// Returns an empty vector for fewer than two points.
pub fn midpoints<T: Float>(points: &[T]) -> Vec<T> {
    let two = T::one() + T::one();
    points.windows(2).map(|w| (w[0] + w[1]) / two).collect()
}

/// Whether two point sequences have the same length and are elementwise close.
pub fn all_close<T: Float>(a: &[T], b: &[T]) -> bool {
    let rtol = T::from(RELATIVE_TOLERANCE).unwrap_or_else(T::epsilon);
    let atol = T::from(ABSOLUTE_TOLERANCE).unwrap_or_else(T::epsilon);
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(&p, &q)| (p - q).abs() <= atol + rtol * q.abs())
}
