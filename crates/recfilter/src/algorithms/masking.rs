//! Slice preparation and re-masking.
//!
//! ## Purpose
//!
//! Before filtering, every slice is normalised so that the recurrence only ever
//! sees finite numbers: missing, externally masked, and NaN cells are recorded
//! and zero-filled. After filtering, the recorded validity can optionally be
//! re-applied so smoothed values do not leak into originally invalid regions.
//!
//! ## Key concepts
//!
//! * **Validity mask**: `true` where a cell holds real data. Built from the
//!   external mask (if any), the slice's own missing mask, and NaN positions.
//! * **Missing mask**: `true` where a cell is missing, i.e. the negation of validity.
//!
//! ## Invariants
//!
//! * A prepared slice contains no NaN.
//! * Every invalid cell of a prepared slice is exactly zero.
//!
//! ## Non-goals
//!
//! * This module does not pad or filter.

// External dependencies
use ndarray::{Array2, ArrayView2, Zip};
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::FilterError;
use crate::primitives::grid::GridSlice;

/// A slice ready for the recurrence, plus what is needed to undo the zero-fill.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSlice<T> {
    /// Slice values with invalid cells set to zero.
    pub data: Array2<T>,

    /// Validity mask, `true` where the data is real.
    pub mask: Array2<bool>,

    /// Cells that were NaN in the input.
    pub was_nan: Array2<bool>,
}

/// Normalise a slice for filtering.
///
/// `external_mask` marks valid cells with `true`; when absent every cell starts valid.
pub fn prepare_slice<T: Float>(
    slice: &GridSlice<T>,
    external_mask: Option<ArrayView2<'_, bool>>,
) -> Result<PreparedSlice<T>, FilterError> {
    let shape = slice.shape();
    if shape.0 == 0 || shape.1 == 0 {
        return Err(FilterError::EmptyInput);
    }

    let mut mask = match external_mask {
        Some(m) => {
            if m.dim() != shape {
                return Err(FilterError::ShapeMismatch {
                    expected: shape,
                    got: m.dim(),
                });
            }
            m.to_owned()
        }
        None => Array2::from_elem(shape, true),
    };

    if let Some(missing) = &slice.missing {
        Zip::from(&mut mask).and(missing).for_each(|valid, &miss| {
            if miss {
                *valid = false;
            }
        });
    }

    let mut data = slice.data.clone();
    let was_nan = data.mapv(|v| v.is_nan());

    Zip::from(&mut data)
        .and(&mut mask)
        .and(&was_nan)
        .for_each(|value, valid, &nan| {
            if nan {
                *valid = false;
            }
            if !*valid {
                *value = T::zero();
            }
        });

    Ok(PreparedSlice {
        data,
        mask,
        was_nan,
    })
}

/// Restore NaN where the input was NaN and return the missing mask to attach.
///
/// The returned mask is `true` wherever the pre-filter validity mask was `false`.
pub fn remask<T: Float>(
    filtered: &mut Array2<T>,
    mask: &Array2<bool>,
    was_nan: &Array2<bool>,
) -> Result<Array2<bool>, FilterError> {
    for other in [mask.dim(), was_nan.dim()] {
        if other != filtered.dim() {
            return Err(FilterError::ShapeMismatch {
                expected: filtered.dim(),
                got: other,
            });
        }
    }

    Zip::from(filtered.view_mut())
        .and(was_nan)
        .for_each(|value, &nan| {
            if nan {
                *value = T::nan();
            }
        });

    Ok(mask.mapv(|valid| !valid))
}
