//! Error and warning types for recursive filtering.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while configuring
//! the filter, validating smoothing coefficients, and slicing or reassembling
//! labelled grids. It also defines the non-fatal warnings raised at build time.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include the offending values (e.g., coefficient name and value).
//! * **Deferred**: Builder errors are stored and surfaced from `build()`.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`.
//!
//! ## Key concepts
//!
//! 1. **Configuration errors**: Invalid iteration count, edge width, duplicate parameters.
//! 2. **Coefficient errors**: Out-of-range values, unidentifiable fields, misaligned points.
//! 3. **Grid errors**: Missing or ambiguous spatial axes, shape mismatches, unmergeable slices.
//!
//! ## Invariants
//!
//! * Every failure is reported before any slice is filtered.
//! * Error messages are consistent in tone and formatting.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// External dependencies
use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// Internal dependencies
use crate::primitives::grid::AxisRole;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for recursive filter operations.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A grid or slice has a zero-length spatial axis.
    EmptyInput,

    /// Generic invalid input error with a descriptive message.
    InvalidInput(String),

    /// The filter requires at least one iteration.
    InvalidIterations(usize),

    /// The halo half-width must be at least 1 and small enough to pad without overflow.
    InvalidEdgeWidth(usize),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// The field has no dimension carrying the requested spatial role.
    MissingAxis(AxisRole),

    /// More than one dimension of the field carries the same spatial role.
    AmbiguousAxis(AxisRole),

    /// A smoothing coefficient lies outside [0, 0.5] or is not finite.
    CoefficientOutOfRange {
        /// Name of the coefficient field.
        name: String,
        /// The first offending value.
        value: f64,
    },

    /// A coefficient field is not named for the axis it is supplied for.
    UnidentifiedCoefficients {
        /// Name carried by the coefficient field.
        name: String,
        /// Axis the field was supplied for.
        expected: AxisRole,
    },

    /// Coefficient points do not line up with the target grid.
    MisalignedCoefficients {
        /// Axis the coefficients smooth along.
        smoothing_axis: AxisRole,
        /// Axis whose points failed to match.
        mismatched_axis: AxisRole,
    },

    /// Two 2-D arrays that must share a shape do not.
    ShapeMismatch {
        /// Expected (y, x) shape.
        expected: (usize, usize),
        /// Actual (y, x) shape.
        got: (usize, usize),
    },

    /// Filtered slices cannot be merged back into a single field.
    IncompatibleSlices(String),
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input grid has an empty spatial axis"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid number of iterations: must be >= 1: {iter}")
            }
            Self::InvalidEdgeWidth(width) => {
                write!(f, "Invalid edge_width: {width} (must be between 1 and usize::MAX / 4)")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
            Self::MissingAxis(role) => write!(f, "Field has no {role} axis"),
            Self::AmbiguousAxis(role) => {
                write!(f, "Field has more than one dimension marked as the {role} axis")
            }
            Self::CoefficientOutOfRange { name, value } => {
                write!(
                    f,
                    "All smoothing_coefficient values must be between 0 and 0.5. \
                     {name} contains {value}; a large smoothing_coefficient value \
                     leads to poor conservation of probabilities"
                )
            }
            Self::UnidentifiedCoefficients { name, expected } => {
                write!(
                    f,
                    "The smoothing coefficients for the {expected} axis must be named \
                     smoothing_coefficient_{expected}. The smoothing coefficients are named: {name}"
                )
            }
            Self::MisalignedCoefficients {
                smoothing_axis,
                mismatched_axis,
            } => {
                if smoothing_axis == mismatched_axis {
                    write!(
                        f,
                        "The points of the {mismatched_axis} spatial dimension of the smoothing \
                         coefficients must be equal to the mean of each pair of points along the \
                         {mismatched_axis} dimension of the input field"
                    )
                } else {
                    write!(
                        f,
                        "The points of the {mismatched_axis} spatial dimension of the smoothing \
                         coefficients must be equal to the points along the {mismatched_axis} \
                         dimension of the input field"
                    )
                }
            }
            Self::ShapeMismatch { expected, got } => {
                write!(
                    f,
                    "Shape mismatch: expected {}x{}, got {}x{}",
                    expected.0, expected.1, got.0, got.1
                )
            }
            Self::IncompatibleSlices(msg) => write!(f, "Cannot merge slices: {msg}"),
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for FilterError {}

// ============================================================================
// Warning Type
// ============================================================================

/// Non-fatal conditions detected while building a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterWarning {
    /// More than two iterations were requested.
    ExcessIterations(usize),
}

impl Display for FilterWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::ExcessIterations(iter) => write!(
                f,
                "{iter} iterations requested: more than two iterations degrades the \
                 conservation of probability assumption"
            ),
        }
    }
}
