//! Smoothing-coefficient fields.
//!
//! ## Purpose
//!
//! A smoothing-coefficient field holds the per-location weights used by the
//! recurrence along one spatial axis. The x field is defined at the midpoints
//! between adjacent x columns (length `nx - 1`) and at every y row; the y field
//! is the transpose of that arrangement.
//!
//! ## Design notes
//!
//! * **Identity by name**: A field is identified as the x or y field by its name,
//!   `smoothing_coefficient_x` or `smoothing_coefficient_y`.
//! * **Fixed layout**: Data is always stored as (y, x), like grid slices.
//!
//! ## Invariants
//!
//! * `data.dim() == (y_points.len(), x_points.len())`.
//!
//! ## Non-goals
//!
//! * This module does not derive coefficients from orography or any other ancillary.
//! * This module does not validate alignment against a target grid (see `validator`).

// External dependencies
use ndarray::Array2;
use num_traits::Float;

// Internal dependencies
use crate::math::coords::midpoints;
use crate::primitives::errors::FilterError;
use crate::primitives::grid::AxisRole;

/// Name identifying the x-axis coefficient field.
pub const X_COEFFICIENT_NAME: &str = "smoothing_coefficient_x";

/// Name identifying the y-axis coefficient field.
pub const Y_COEFFICIENT_NAME: &str = "smoothing_coefficient_y";

/// Per-location smoothing weights for one spatial axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingCoefficients<T> {
    /// Field name, which determines the smoothing axis.
    pub name: String,

    /// Coefficient values, shape `(y_points.len(), x_points.len())`.
    pub data: Array2<T>,

    /// Coordinate points along y.
    pub y_points: Vec<T>,

    /// Coordinate points along x.
    pub x_points: Vec<T>,
}

impl<T: Float> SmoothingCoefficients<T> {
    /// Create a coefficient field, checking the data shape against the points.
    pub fn new(
        name: impl Into<String>,
        data: Array2<T>,
        y_points: Vec<T>,
        x_points: Vec<T>,
    ) -> Result<Self, FilterError> {
        if data.dim() != (y_points.len(), x_points.len()) {
            return Err(FilterError::ShapeMismatch {
                expected: (y_points.len(), x_points.len()),
                got: data.dim(),
            });
        }
        Ok(Self {
            name: name.into(),
            data,
            y_points,
            x_points,
        })
    }

    /// Build a constant coefficient field for smoothing along `role` on a grid
    /// with the given y and x points.
    ///
    /// The points along the smoothing axis are the midpoints of the grid points.
    pub fn uniform(role: AxisRole, value: T, y_points: &[T], x_points: &[T]) -> Self {
        let (name, y_points, x_points) = match role {
            AxisRole::X => (X_COEFFICIENT_NAME, y_points.to_vec(), midpoints(x_points)),
            AxisRole::Y => (Y_COEFFICIENT_NAME, midpoints(y_points), x_points.to_vec()),
        };
        Self {
            name: name.into(),
            data: Array2::from_elem((y_points.len(), x_points.len()), value),
            y_points,
            x_points,
        }
    }

    /// The axis this field smooths along, if its name identifies one.
    pub fn role(&self) -> Option<AxisRole> {
        match self.name.as_str() {
            X_COEFFICIENT_NAME => Some(AxisRole::X),
            Y_COEFFICIENT_NAME => Some(AxisRole::Y),
            _ => None,
        }
    }

    /// Coordinate points along the given axis.
    pub fn points(&self, role: AxisRole) -> &[T] {
        match role {
            AxisRole::X => &self.x_points,
            AxisRole::Y => &self.y_points,
        }
    }
}
