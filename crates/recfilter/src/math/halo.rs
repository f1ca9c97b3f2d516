//! Halo padding for 2-D grids.
//!
//! ## Purpose
//!
//! This module extends a 2-D grid by a margin on every side before recursive
//! filtering and crops that margin back off afterwards. Giving the recurrence
//! room to run past the real data keeps the one-sided start-up transient of each
//! pass out of the region that is kept.
//!
//! ## Design notes
//!
//! * **Symmetric extension**: Edge values are mirrored including the edge sample
//!   (`c b a | a b c | c b a`).
//! * **Periodic fallback**: Margins wider than the axis keep reflecting, so the
//!   padded axis repeats with period `2n`.
//! * **Allocation**: Padding always allocates a new owned array.
//!
//! ## Invariants
//!
//! * `crop_halo(pad_symmetric(a, my, mx), my, mx) == a`.
//! * The centre of a padded grid is a copy of the input.
//!
//! ## Non-goals
//!
//! * This module does not extend coordinate points.
//! * This module does not pad in place.

// External dependencies
use ndarray::{s, Array2, ArrayView2};
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::FilterError;

// ============================================================================
// Padding Functions
// ============================================================================

/// Pad a grid symmetrically by `margin_y` rows and `margin_x` columns on each side.
pub fn pad_symmetric<T: Float>(
    grid: ArrayView2<'_, T>,
    margin_y: usize,
    margin_x: usize,
) -> Result<Array2<T>, FilterError> {
    let (ny, nx) = grid.dim();
    if ny == 0 || nx == 0 {
        return Err(FilterError::EmptyInput);
    }

    let padded = Array2::from_shape_fn((ny + 2 * margin_y, nx + 2 * margin_x), |(i, j)| {
        grid[[reflect(i, margin_y, ny), reflect(j, margin_x, nx)]]
    });
    Ok(padded)
}

/// Remove `margin_y` rows and `margin_x` columns from each side of a grid.
pub fn crop_halo<T: Float>(
    grid: ArrayView2<'_, T>,
    margin_y: usize,
    margin_x: usize,
) -> Result<Array2<T>, FilterError> {
    let (ny, nx) = grid.dim();
    if ny <= 2 * margin_y || nx <= 2 * margin_x {
        return Err(FilterError::InvalidInput(format!(
            "cannot remove a {margin_y}x{margin_x} halo from a {ny}x{nx} grid"
        )));
    }
    Ok(grid
        .slice(s![margin_y..ny - margin_y, margin_x..nx - margin_x])
        .to_owned())
}

/// Source index for padded position `i` on an axis of length `n` padded by `margin`.
#[inline]
fn reflect(i: usize, margin: usize, n: usize) -> usize {
    let period = 2 * n;
    // Shift by a whole number of periods so the offset stays non-negative.
    let shift = margin.div_ceil(period) * period;
    let m = (i + shift - margin) % period;
    if m < n {
        m
    } else {
        period - 1 - m
    }
}

// ============================================================================
// Padded Grid
// ============================================================================

/// A grid extended by a halo, owned by a single filtering pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedGrid<T> {
    data: Array2<T>,
    margin_y: usize,
    margin_x: usize,
}

impl<T: Float> PaddedGrid<T> {
    /// Pad `grid` symmetrically by the given margins.
    pub fn symmetric(
        grid: ArrayView2<'_, T>,
        margin_y: usize,
        margin_x: usize,
    ) -> Result<Self, FilterError> {
        Ok(Self {
            data: pad_symmetric(grid, margin_y, margin_x)?,
            margin_y,
            margin_x,
        })
    }

    /// The padded values.
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Mutable access to the padded values.
    pub fn data_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    /// Margins as `(margin_y, margin_x)`.
    pub fn margins(&self) -> (usize, usize) {
        (self.margin_y, self.margin_x)
    }

    /// Remove the halo, returning the centre of the grid.
    pub fn crop(self) -> Result<Array2<T>, FilterError> {
        crop_halo(self.data.view(), self.margin_y, self.margin_x)
    }
}
