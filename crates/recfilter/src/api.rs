//! High-level API for recursive filtering.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for the recursive
//! filter. It implements a fluent builder for the three filter parameters and
//! the choice of execution adapter (Batch or Streaming).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called on the adapter.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`RecursiveFilterBuilder`] via `RecursiveFilter::new()`.
//! 2. Chain configuration methods (`.iterations()`, `.edge_width()`, `.re_mask()`).
//! 3. Select an adapter via `.adapter(Adapter::Batch)` to get an execution builder.
//! 4. Call `.build()` to validate and obtain a filter.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::BatchRecursiveFilterBuilder;
use crate::adapters::streaming::StreamingRecursiveFilterBuilder;
use crate::engine::executor::SlicePassFn;

// Publicly re-exported types
pub use crate::adapters::batch::BatchRecursiveFilter;
pub use crate::adapters::streaming::{SliceStream, StreamingRecursiveFilter};
pub use crate::primitives::coefficients::{
    SmoothingCoefficients, X_COEFFICIENT_NAME, Y_COEFFICIENT_NAME,
};
pub use crate::primitives::errors::{FilterError, FilterWarning};
pub use crate::primitives::grid::{AxisRole, DimCoord, Field, GridSlice, ScalarCoord, SpatialField};

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Batch, Streaming};
}

/// Fluent builder for configuring the recursive filter and its execution mode.
#[derive(Debug, Clone)]
pub struct RecursiveFilterBuilder<T> {
    /// Number of forward/backward sweeps.
    pub iterations: Option<usize>,

    /// Halo half-width in grid cells.
    pub edge_width: Option<usize>,

    /// Re-apply the input mask after filtering.
    pub re_mask: Option<bool>,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom slice pass function.
    #[doc(hidden)]
    pub custom_slice_pass: Option<SlicePassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for RecursiveFilterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> RecursiveFilterBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: RecursiveFilterAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            iterations: None,
            edge_width: None,
            re_mask: None,
            custom_slice_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the number of filter iterations.
    ///
    /// More than two iterations is allowed but raises a warning, since each
    /// extra iteration further erodes conservation of the field's total.
    pub fn iterations(mut self, iterations: usize) -> Self {
        if self.iterations.is_some() {
            self.duplicate_param = Some("iterations");
        }
        self.iterations = Some(iterations);
        self
    }

    /// Set the halo half-width. Slices are padded by twice this on each side.
    pub fn edge_width(mut self, edge_width: usize) -> Self {
        if self.edge_width.is_some() {
            self.duplicate_param = Some("edge_width");
        }
        self.edge_width = Some(edge_width);
        self
    }

    /// Re-apply the input mask and NaN positions to the filtered output.
    pub fn re_mask(mut self, enabled: bool) -> Self {
        if self.re_mask.is_some() {
            self.duplicate_param = Some("re_mask");
        }
        self.re_mask = Some(enabled);
        self
    }

    // ==========================
    // Development Options
    // ==========================

    /// Set a custom slice pass function for execution (only for dev)
    #[doc(hidden)]
    pub fn custom_slice_pass(mut self, pass: SlicePassFn<T>) -> Self {
        self.custom_slice_pass = Some(pass);
        self
    }

    /// Set parallel execution hint (only for dev)
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }
}

/// Trait for transitioning from a generic builder to an execution builder.
pub trait RecursiveFilterAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`RecursiveFilterBuilder`] into a specialized execution builder.
    fn convert(builder: RecursiveFilterBuilder<T>) -> Self::Output;
}

/// Marker for whole-field processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> RecursiveFilterAdapter<T> for Batch {
    type Output = BatchRecursiveFilterBuilder<T>;

    fn convert(builder: RecursiveFilterBuilder<T>) -> Self::Output {
        let mut result = BatchRecursiveFilterBuilder::default();

        result.iterations = builder.iterations;
        if let Some(edge_width) = builder.edge_width {
            result.edge_width = edge_width;
        }
        if let Some(re_mask) = builder.re_mask {
            result.re_mask = re_mask;
        }

        // ======================================
        // DEV
        // ======================================
        if let Some(sp) = builder.custom_slice_pass {
            result.custom_slice_pass = Some(sp);
        }
        if let Some(p) = builder.parallel {
            result.parallel = Some(p);
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for slice-at-a-time processing.
#[derive(Debug, Clone, Copy)]
pub struct Streaming;

impl<T: Float> RecursiveFilterAdapter<T> for Streaming {
    type Output = StreamingRecursiveFilterBuilder<T>;

    fn convert(builder: RecursiveFilterBuilder<T>) -> Self::Output {
        let mut result = StreamingRecursiveFilterBuilder::default();

        result.iterations = builder.iterations;
        if let Some(edge_width) = builder.edge_width {
            result.edge_width = edge_width;
        }
        if let Some(re_mask) = builder.re_mask {
            result.re_mask = re_mask;
        }

        if builder.custom_slice_pass.is_some() {
            result.deferred_error = Some(FilterError::InvalidInput(
                "custom slice passes are not supported by the streaming adapter".into(),
            ));
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}
