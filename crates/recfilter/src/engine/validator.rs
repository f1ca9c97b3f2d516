//! Validation for filter configuration, coefficient fields, and masks.
//!
//! ## Purpose
//!
//! This module provides the checks run before any slice is filtered:
//! configuration bounds at build time, and coefficient range, identity, and
//! alignment at process time.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Range**: Coefficients must lie in [0, 0.5]; larger values break the
//!   convex-combination property the recurrence relies on.
//! * **Identity**: A coefficient field's name must match the axis it is used for.
//! * **Alignment**: Coefficient points along the smoothing axis are the midpoints
//!   of the grid points; along the other axis they are the grid points.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not pad or transform coefficients.
//! * This module does not provide automatic correction of invalid inputs.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::coords::{all_close, midpoints};
use crate::primitives::coefficients::SmoothingCoefficients;
use crate::primitives::errors::{FilterError, FilterWarning};
use crate::primitives::grid::{AxisRole, DimCoord, GridSlice};

/// Largest allowed smoothing coefficient.
pub const MAX_SMOOTHING_COEFFICIENT: f64 = 0.5;

/// Iteration count above which probability conservation degrades.
pub const MAX_CONSERVATIVE_ITERATIONS: usize = 2;

/// Largest halo half-width; padding adds `4 * edge_width` cells per axis.
pub const MAX_EDGE_WIDTH: usize = usize::MAX / 4;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for filter configuration and inputs.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Configuration Validation
    // ========================================================================

    /// Validate the iteration count. `None` defers to the default.
    pub fn validate_iterations(iterations: Option<usize>) -> Result<(), FilterError> {
        match iterations {
            Some(n) if n < 1 => Err(FilterError::InvalidIterations(n)),
            _ => Ok(()),
        }
    }

    /// Warnings implied by the iteration count.
    pub fn iteration_warnings(iterations: Option<usize>) -> Option<FilterWarning> {
        iterations
            .filter(|&n| n > MAX_CONSERVATIVE_ITERATIONS)
            .map(FilterWarning::ExcessIterations)
    }

    /// Validate the halo half-width.
    pub fn validate_edge_width(edge_width: usize) -> Result<(), FilterError> {
        if edge_width < 1 || edge_width > MAX_EDGE_WIDTH {
            return Err(FilterError::InvalidEdgeWidth(edge_width));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), FilterError> {
        if let Some(param) = duplicate_param {
            return Err(FilterError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }

    // ========================================================================
    // Coefficient Validation
    // ========================================================================

    /// Validate that every coefficient is finite and within [0, 0.5].
    pub fn validate_coefficient_range<T: Float>(
        coefficients: &SmoothingCoefficients<T>,
    ) -> Result<(), FilterError> {
        let max = T::from(MAX_SMOOTHING_COEFFICIENT).unwrap_or_else(T::one);
        if let Some(&bad) = coefficients
            .data
            .iter()
            .find(|&&c| !c.is_finite() || c < T::zero() || c > max)
        {
            return Err(FilterError::CoefficientOutOfRange {
                name: coefficients.name.clone(),
                value: bad.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    /// Validate that a coefficient field is named for the `expected` axis.
    pub fn validate_coefficient_role<T: Float>(
        coefficients: &SmoothingCoefficients<T>,
        expected: AxisRole,
    ) -> Result<(), FilterError> {
        if coefficients.role() != Some(expected) {
            return Err(FilterError::UnidentifiedCoefficients {
                name: coefficients.name.clone(),
                expected,
            });
        }
        Ok(())
    }

    /// Validate that a coefficient field lines up with a template slice.
    pub fn validate_coefficient_alignment<T: Float>(
        template: &GridSlice<T>,
        coefficients: &SmoothingCoefficients<T>,
        smoothing_axis: AxisRole,
    ) -> Result<(), FilterError> {
        let expected_shape = (coefficients.y_points.len(), coefficients.x_points.len());
        if coefficients.data.dim() != expected_shape {
            return Err(FilterError::ShapeMismatch {
                expected: expected_shape,
                got: coefficients.data.dim(),
            });
        }

        let mean_points = midpoints(&template.coord(smoothing_axis).points);
        if !all_close(coefficients.points(smoothing_axis), &mean_points) {
            return Err(FilterError::MisalignedCoefficients {
                smoothing_axis,
                mismatched_axis: smoothing_axis,
            });
        }

        let other = smoothing_axis.other();
        if !all_close(coefficients.points(other), &template.coord(other).points) {
            return Err(FilterError::MisalignedCoefficients {
                smoothing_axis,
                mismatched_axis: other,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Grid Validation
    // ========================================================================

    /// Validate that a slice is large enough to filter.
    pub fn validate_grid_shape(shape: (usize, usize)) -> Result<(), FilterError> {
        if shape.0 == 0 || shape.1 == 0 {
            return Err(FilterError::EmptyInput);
        }
        if shape.0 < 2 || shape.1 < 2 {
            return Err(FilterError::InvalidInput(format!(
                "recursive filtering needs at least 2 points along each spatial axis, got {}x{}",
                shape.0, shape.1
            )));
        }
        Ok(())
    }

    /// Validate that a mask has the same shape as the grid it applies to.
    pub fn validate_mask_shape(
        got: (usize, usize),
        expected: (usize, usize),
    ) -> Result<(), FilterError> {
        if got != expected {
            return Err(FilterError::ShapeMismatch { expected, got });
        }
        Ok(())
    }

    /// Validate that a slice shares the spatial layout of the template it was bound to.
    pub fn validate_slice_layout<T: Float>(
        slice: &GridSlice<T>,
        y: &DimCoord<T>,
        x: &DimCoord<T>,
    ) -> Result<(), FilterError> {
        let expected = (y.len(), x.len());
        if slice.shape() != expected {
            return Err(FilterError::ShapeMismatch {
                expected,
                got: slice.shape(),
            });
        }
        if !all_close(&slice.y.points, &y.points) || !all_close(&slice.x.points, &x.points) {
            return Err(FilterError::InvalidInput(
                "slice coordinates differ from the bound template".into(),
            ));
        }
        Ok(())
    }
}
