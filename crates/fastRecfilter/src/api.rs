//! High-level API for recursive filtering with parallel execution support.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry point of the extension crate.
//! It reuses the `recfilter` builder and swaps in a batch adapter that filters
//! the slices of a field on all available CPU cores.
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `recfilter` builder pattern.
//! * **Parallel-First**: The batch adapter defaults to parallel execution.
//! * **Transparent**: Marker types select the parallel builders.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`RecursiveFilterBuilder`] via `RecursiveFilter::new()`.
//! 2. Chain configuration methods (`.iterations()`, `.edge_width()`, `.re_mask()`).
//! 3. Select an adapter via `.adapter(Batch)` to get a parallel execution builder.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::ParallelBatchRecursiveFilterBuilder;

// Import base marker types for delegation
use recfilter::internals::api::Batch as BaseBatch;

// Publicly re-exported types
pub use crate::adapters::batch::ParallelBatchRecursiveFilter;
pub use crate::input::FieldInput;
pub use recfilter::internals::api::{
    AxisRole, DimCoord, Field, FilterError, FilterWarning, GridSlice, RecursiveFilterAdapter,
    RecursiveFilterBuilder, ScalarCoord, SliceStream, SmoothingCoefficients, SpatialField,
    Streaming, StreamingRecursiveFilter,
};

// ============================================================================
// Adapter Module
// ============================================================================

/// Adapter selection namespace.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Batch, Streaming};
}

// ============================================================================
// Adapter Marker Types
// ============================================================================

/// Marker for parallel whole-field processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> RecursiveFilterAdapter<T> for Batch {
    type Output = ParallelBatchRecursiveFilterBuilder<T>;

    fn convert(builder: RecursiveFilterBuilder<T>) -> Self::Output {
        // Determine parallel mode: user choice OR default to true for fastRecfilter Batch
        let parallel = builder.parallel.unwrap_or(true);

        // Delegate to base implementation to create base builder
        let mut base = <BaseBatch as RecursiveFilterAdapter<T>>::convert(builder);
        base = base.parallel(parallel);

        // Wrap with extension fields
        ParallelBatchRecursiveFilterBuilder { base }
    }
}
