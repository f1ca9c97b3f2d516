//! First-order recursive (IIR) filter passes.
//!
//! ## Purpose
//!
//! This module implements the one-sided recurrences that make up the recursive
//! filter and the iteration loop that combines them into a separable,
//! approximately symmetric low-pass filter on a 2-D grid.
//!
//! ## Design notes
//!
//! * **In place**: Each pass overwrites the grid and immediately reads its own
//!   update, so every step blends in the already-smoothed neighbour.
//! * **Line parallel**: A pass runs independently along every line of the
//!   recursion axis; only the recursion axis itself is sequential.
//! * **Coefficient indexing**: Coefficient `c[k]` sits between grid cells `k`
//!   and `k + 1` along the recursion axis.
//!
//! ## Key concepts
//!
//! Forward, for `i = 1 .. n - 1`:
//!
//! ```text
//! B[i] = (1 - c[i - 1]) * A[i] + c[i - 1] * B[i - 1]
//! ```
//!
//! Backward, for `i = n - 2 .. 0`:
//!
//! ```text
//! B[i] = (1 - c[i]) * A[i] + c[i] * B[i + 1]
//! ```
//!
//! One iteration is forward-x, backward-x, forward-y, backward-y.
//!
//! ## Invariants
//!
//! * A constant grid is a fixed point of every pass.
//! * With coefficients in [0, 0.5] every update is a convex combination.
//!
//! ## Non-goals
//!
//! * This module does not pad, mask, or validate coefficient ranges.

// External dependencies
use ndarray::{Array2, ArrayView2, Axis, Zip};
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::FilterError;

/// Grid axis of the x dimension in a (y, x) slice.
pub const X_AXIS: Axis = Axis(1);

/// Grid axis of the y dimension in a (y, x) slice.
pub const Y_AXIS: Axis = Axis(0);

// ============================================================================
// Single Passes
// ============================================================================

/// Run the recurrence in ascending index order along `axis`.
pub fn recurse_forward<T: Float>(
    grid: &mut Array2<T>,
    coefficients: ArrayView2<'_, T>,
    axis: Axis,
) -> Result<(), FilterError> {
    check_coefficient_shape(grid, &coefficients, axis)?;
    let one = T::one();

    Zip::from(grid.lanes_mut(axis))
        .and(coefficients.lanes(axis))
        .for_each(|mut line, c| {
            for i in 1..line.len() {
                let w = c[i - 1];
                line[i] = (one - w) * line[i] + w * line[i - 1];
            }
        });
    Ok(())
}

/// Run the recurrence in descending index order along `axis`.
pub fn recurse_backward<T: Float>(
    grid: &mut Array2<T>,
    coefficients: ArrayView2<'_, T>,
    axis: Axis,
) -> Result<(), FilterError> {
    check_coefficient_shape(grid, &coefficients, axis)?;
    let one = T::one();

    Zip::from(grid.lanes_mut(axis))
        .and(coefficients.lanes(axis))
        .for_each(|mut line, c| {
            for i in (0..line.len().saturating_sub(1)).rev() {
                let w = c[i];
                line[i] = (one - w) * line[i] + w * line[i + 1];
            }
        });
    Ok(())
}

// ============================================================================
// Iteration Loop
// ============================================================================

/// Apply `iterations` full forward/backward sweeps along x then y.
///
/// `coefficients_x` and `coefficients_y` are reused unchanged across iterations.
pub fn run_recursion<T: Float>(
    grid: &mut Array2<T>,
    coefficients_x: ArrayView2<'_, T>,
    coefficients_y: ArrayView2<'_, T>,
    iterations: usize,
) -> Result<(), FilterError> {
    for _ in 0..iterations {
        recurse_forward(grid, coefficients_x, X_AXIS)?;
        recurse_backward(grid, coefficients_x, X_AXIS)?;
        recurse_forward(grid, coefficients_y, Y_AXIS)?;
        recurse_backward(grid, coefficients_y, Y_AXIS)?;
    }
    Ok(())
}

/// Coefficients need one value per gap along `axis` and must match the other axis.
fn check_coefficient_shape<T>(
    grid: &Array2<T>,
    coefficients: &ArrayView2<'_, T>,
    axis: Axis,
) -> Result<(), FilterError> {
    let other = Axis(1 - axis.index());
    let gaps = grid.len_of(axis).saturating_sub(1);

    if coefficients.len_of(axis) != gaps || coefficients.len_of(other) != grid.len_of(other) {
        let expected = if axis == Y_AXIS {
            (gaps, grid.len_of(other))
        } else {
            (grid.len_of(other), gaps)
        };
        return Err(FilterError::ShapeMismatch {
            expected,
            got: coefficients.dim(),
        });
    }
    Ok(())
}
