//! Input abstractions for recursive filtering.
//!
//! ## Purpose
//!
//! This module lets the parallel batch filter accept plain ndarray arrays as
//! well as labelled [`Field`]s through a single interface.
//!
//! ## Design notes
//!
//! * **Zero-copy where possible**: A [`Field`] is borrowed as is.
//! * **Generated coordinates**: Bare arrays get index coordinates `0, 1, 2, ...`.
//! * **Axis convention**: The last two dimensions of an array are (y, x).
//!
//! ## Invariants
//!
//! * A converted array keeps its shape and element order.
//! * Arrays need at least two dimensions.
//!
//! ## Non-goals
//!
//! * This module does not carry units or scalar coordinates for bare arrays.

// External dependencies
use ndarray::{ArrayBase, Data, Ix2, IxDyn};
use num_traits::Float;
use std::borrow::Cow;

// Export dependencies from recfilter crate
use recfilter::internals::primitives::errors::FilterError;
use recfilter::internals::primitives::grid::{DimCoord, Field};

/// Name given to fields built from bare arrays.
pub const ARRAY_FIELD_NAME: &str = "unknown";

/// Trait for types that can be used as input for recursive filtering.
pub trait FieldInput<T: Float> {
    /// View the input as a labelled field.
    fn as_field(&self) -> Result<Cow<'_, Field<T>>, FilterError>;
}

impl<T: Float> FieldInput<T> for Field<T> {
    fn as_field(&self) -> Result<Cow<'_, Field<T>>, FilterError> {
        Ok(Cow::Borrowed(self))
    }
}

impl<T: Float, S> FieldInput<T> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
{
    fn as_field(&self) -> Result<Cow<'_, Field<T>>, FilterError> {
        let (ny, nx) = self.dim();
        Field::from_grid(
            ARRAY_FIELD_NAME,
            self.to_owned(),
            index_points(ny),
            index_points(nx),
        )
        .map(Cow::Owned)
    }
}

impl<T: Float, S> FieldInput<T> for ArrayBase<S, IxDyn>
where
    S: Data<Elem = T>,
{
    fn as_field(&self) -> Result<Cow<'_, Field<T>>, FilterError> {
        let ndim = self.ndim();
        if ndim < 2 {
            return Err(FilterError::InvalidInput(format!(
                "array input needs at least 2 dimensions, got {ndim}"
            )));
        }

        let dim_coords = self
            .shape()
            .iter()
            .enumerate()
            .map(|(d, &len)| {
                let points = index_points(len);
                if d == ndim - 2 {
                    DimCoord::y("projection_y_coordinate", points)
                } else if d == ndim - 1 {
                    DimCoord::x("projection_x_coordinate", points)
                } else {
                    DimCoord::new(format!("dim_{d}"), points)
                }
            })
            .collect();

        Field::new(ARRAY_FIELD_NAME, self.to_owned(), dim_coords).map(Cow::Owned)
    }
}

fn index_points<T: Float>(n: usize) -> Vec<T> {
    (0..n).map(|i| T::from(i).unwrap_or_else(T::nan)).collect()
}
