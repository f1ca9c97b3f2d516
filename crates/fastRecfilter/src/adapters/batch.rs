//! Batch adapter for recursive filtering with parallel slice processing.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter of the extension crate.
//! It wraps the `recfilter` batch builder and, when parallel execution is on,
//! injects a rayon slice pass so that the slices of a field are filtered
//! concurrently.
//!
//! ## Design notes
//!
//! * **Delegation**: Validation and execution are delegated to `recfilter`.
//! * **Parallelism**: Adds parallel execution via `rayon` (fastRecfilter extension).
//! * **Inputs**: Accepts anything implementing [`FieldInput`].
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Results match the sequential `recfilter` batch adapter exactly.
//! * Output slices are in input order.
//!
//! ## Non-goals
//!
//! * This adapter does not filter slices one at a time (use streaming adapter).

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::engine::executor::process_slices_parallel;

// External dependencies
use num_traits::Float;
use std::fmt::{Display, Formatter, Result as FmtResult};

// Export dependencies from recfilter crate
use recfilter::internals::adapters::batch::{BatchRecursiveFilter, BatchRecursiveFilterBuilder};
use recfilter::internals::primitives::coefficients::SmoothingCoefficients;
use recfilter::internals::primitives::errors::{FilterError, FilterWarning};
use recfilter::internals::primitives::grid::Field;

// Internal dependencies
use crate::input::FieldInput;

// ============================================================================
// Extended Batch Recursive Filter Builder
// ============================================================================

/// Builder for the batch recursive filter with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelBatchRecursiveFilterBuilder<T: Float> {
    /// Base builder from the recfilter crate
    pub base: BatchRecursiveFilterBuilder<T>,
}

impl<T: Float> Default for ParallelBatchRecursiveFilterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ParallelBatchRecursiveFilterBuilder<T> {
    /// Create a new builder with default parameters and parallel execution on.
    fn new() -> Self {
        Self {
            base: BatchRecursiveFilterBuilder::default().parallel(true),
        }
    }

    /// Set the number of filter iterations.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.base = self.base.iterations(iterations);
        self
    }

    /// Set the halo half-width.
    pub fn edge_width(mut self, edge_width: usize) -> Self {
        self.base = self.base.edge_width(edge_width);
        self
    }

    /// Re-apply the input mask and NaN positions after filtering.
    pub fn re_mask(mut self, enabled: bool) -> Self {
        self.base = self.base.re_mask(enabled);
        self
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.base = self.base.parallel(parallel);
        self
    }
}

impl<T: Float + Send + Sync> ParallelBatchRecursiveFilterBuilder<T> {
    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch filter.
    pub fn build(self) -> Result<ParallelBatchRecursiveFilter<T>, FilterError> {
        // Check for deferred errors from adapter conversion
        if let Some(ref err) = self.base.deferred_error {
            return Err(err.clone());
        }

        let mut builder = self.base;

        #[cfg(feature = "cpu")]
        {
            if builder.parallel.unwrap_or(true) {
                builder = builder.custom_slice_pass(process_slices_parallel);
            } else {
                builder.custom_slice_pass = None;
            }
        }
        #[cfg(not(feature = "cpu"))]
        {
            // Fallback to sequential if cpu feature is disabled
            builder.custom_slice_pass = None;
        }

        // Validation is centralized in the recfilter crate
        let inner = builder.build()?;

        Ok(ParallelBatchRecursiveFilter { inner })
    }
}

// ============================================================================
// Extended Batch Recursive Filter
// ============================================================================

/// Batch recursive filter with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelBatchRecursiveFilter<T: Float> {
    inner: BatchRecursiveFilter<T>,
}

impl<T: Float + Send + Sync> ParallelBatchRecursiveFilter<T> {
    /// Filter every spatial slice of `input`.
    ///
    /// `mask`, if given, marks valid cells with non-zero values and must reduce
    /// to a single spatial slice shaped like the input's slices.
    pub fn process<I>(
        &self,
        input: &I,
        coefficients_x: &SmoothingCoefficients<T>,
        coefficients_y: &SmoothingCoefficients<T>,
        mask: Option<&I>,
    ) -> Result<Field<T>, FilterError>
    where
        I: FieldInput<T> + ?Sized,
    {
        let field = input.as_field()?;
        let mask = match mask {
            Some(m) => Some(m.as_field()?),
            None => None,
        };

        self.inner
            .process(&*field, coefficients_x, coefficients_y, mask.as_deref())
    }

    /// Iteration count as configured (`None` when left at the default).
    pub fn iterations(&self) -> Option<usize> {
        self.inner.iterations()
    }

    /// Halo half-width.
    pub fn edge_width(&self) -> usize {
        self.inner.edge_width()
    }

    /// Whether the input mask is re-applied after filtering.
    pub fn re_mask(&self) -> bool {
        self.inner.re_mask()
    }

    /// Non-fatal conditions found when the filter was built.
    pub fn warnings(&self) -> &[FilterWarning] {
        self.inner.warnings()
    }
}

impl<T: Float> Display for ParallelBatchRecursiveFilter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.inner, f)
    }
}
