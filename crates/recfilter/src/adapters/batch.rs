//! Batch adapter for recursive filtering of whole fields.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter. It takes a complete
//! N-dimensional field, filters every spatial slice, and returns a field with
//! the same structure.
//!
//! ## Design notes
//!
//! * **Processing**: Processes every slice of a field in one call.
//! * **Reusable**: A built filter is immutable and can process any number of fields.
//! * **Delegation**: Delegates computation to the execution engine.
//! * **Generics**: Generic over `Float` types and over any [`SpatialField`].
//!
//! ## Key concepts
//!
//! * **Builder Pattern**: Fluent API for configuration with sensible defaults.
//! * **Warnings**: Non-fatal conditions found at build time are logged and kept
//!   on the built filter.
//!
//! ## Invariants
//!
//! * Output slices are in the same order as the input slices.
//! * Every validation failure is reported before any slice is filtered.
//!
//! ## Non-goals
//!
//! * This adapter does not filter slices one at a time (use streaming adapter).

// External dependencies
use num_traits::Float;
use std::fmt::{Display, Formatter, Result as FmtResult};

// Internal dependencies
use crate::engine::executor::{FilterConfig, FilterExecutor, SlicePassFn};
use crate::engine::executor::{DEFAULT_EDGE_WIDTH, DEFAULT_ITERATIONS};
use crate::engine::validator::Validator;
use crate::primitives::coefficients::SmoothingCoefficients;
use crate::primitives::errors::{FilterError, FilterWarning};
use crate::primitives::grid::SpatialField;

// ============================================================================
// Batch Recursive Filter Builder
// ============================================================================

/// Builder for the batch recursive filter.
#[derive(Debug, Clone)]
pub struct BatchRecursiveFilterBuilder<T: Float> {
    /// Number of filter iterations (unset resolves to 1)
    pub iterations: Option<usize>,

    /// Halo half-width in grid cells
    pub edge_width: usize,

    /// Whether to re-apply the input mask after filtering
    pub re_mask: bool,

    /// Deferred error from adapter conversion
    pub deferred_error: Option<FilterError>,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom slice pass function.
    #[doc(hidden)]
    pub custom_slice_pass: Option<SlicePassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for BatchRecursiveFilterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> BatchRecursiveFilterBuilder<T> {
    /// Create a new batch builder with default parameters.
    fn new() -> Self {
        Self {
            iterations: None,
            edge_width: DEFAULT_EDGE_WIDTH,
            re_mask: false,
            deferred_error: None,
            custom_slice_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the number of filter iterations.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Set the halo half-width.
    pub fn edge_width(mut self, edge_width: usize) -> Self {
        self.edge_width = edge_width;
        self
    }

    /// Re-apply the input mask and NaN positions after filtering.
    pub fn re_mask(mut self, enabled: bool) -> Self {
        self.re_mask = enabled;
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set parallel execution hint.
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Set a custom slice pass function.
    #[doc(hidden)]
    pub fn custom_slice_pass(mut self, pass: SlicePassFn<T>) -> Self {
        self.custom_slice_pass = Some(pass);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch filter.
    pub fn build(self) -> Result<BatchRecursiveFilter<T>, FilterError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Validator::validate_iterations(self.iterations)?;
        Validator::validate_edge_width(self.edge_width)?;

        let warnings: Vec<FilterWarning> = Validator::iteration_warnings(self.iterations)
            .into_iter()
            .collect();
        for warning in &warnings {
            log::warn!("{warning}");
        }

        Ok(BatchRecursiveFilter {
            config: self,
            warnings,
        })
    }
}

// ============================================================================
// Batch Recursive Filter
// ============================================================================

/// Batch recursive filter.
#[derive(Debug, Clone)]
pub struct BatchRecursiveFilter<T: Float> {
    config: BatchRecursiveFilterBuilder<T>,
    warnings: Vec<FilterWarning>,
}

impl<T: Float> BatchRecursiveFilter<T> {
    /// Filter every spatial slice of `field`.
    ///
    /// `mask`, if given, marks valid cells with non-zero values and must reduce
    /// to a single spatial slice shaped like the field's slices.
    pub fn process<F: SpatialField<T>>(
        &self,
        field: &F,
        coefficients_x: &SmoothingCoefficients<T>,
        coefficients_y: &SmoothingCoefficients<T>,
        mask: Option<&F>,
    ) -> Result<F, FilterError> {
        let config = self.filter_config();
        FilterExecutor::run(field, coefficients_x, coefficients_y, mask, &config)
    }

    /// Iteration count as configured (`None` when left at the default).
    pub fn iterations(&self) -> Option<usize> {
        self.config.iterations
    }

    /// Halo half-width.
    pub fn edge_width(&self) -> usize {
        self.config.edge_width
    }

    /// Whether the input mask is re-applied after filtering.
    pub fn re_mask(&self) -> bool {
        self.config.re_mask
    }

    /// Non-fatal conditions found when the filter was built.
    pub fn warnings(&self) -> &[FilterWarning] {
        &self.warnings
    }

    fn filter_config(&self) -> FilterConfig<T> {
        FilterConfig {
            iterations: self.config.iterations.unwrap_or(DEFAULT_ITERATIONS),
            edge_width: self.config.edge_width,
            re_mask: self.config.re_mask,
            // ++++++++++++++++++++++++++++++++++++++
            // +               DEV                  +
            // ++++++++++++++++++++++++++++++++++++++
            custom_slice_pass: self.config.custom_slice_pass,
        }
    }
}

impl<T: Float> Display for BatchRecursiveFilter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.config.iterations {
            Some(n) => write!(f, "<RecursiveFilter: iterations: {n}, ")?,
            None => write!(f, "<RecursiveFilter: iterations: None, ")?,
        }
        write!(f, "edge_width: {}>", self.config.edge_width)
    }
}
