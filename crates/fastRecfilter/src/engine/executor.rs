//! Parallel execution engine for recursive filtering.
//!
//! ## Purpose
//!
//! This module provides the parallel slice pass that is injected into the
//! `recfilter` crate's execution engine. Slices of a field are independent,
//! so each one is filtered on its own rayon task.
//!
//! ## Design notes
//!
//! * **Implementation**: Drop-in replacement for the sequential slice pass.
//! * **Parallelism**: Uses `rayon` for data-parallel execution across CPU cores.
//! * **Ordering**: Results are collected in input order.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Integration**: Plugs into the `recfilter` executor via the `SlicePassFn` hook.
//!
//! ## Invariants
//!
//! * Output is identical to the sequential pass for the same inputs.
//!
//! ## Non-goals
//!
//! * This module does not parallelise within a slice; each recurrence stays sequential.
//! * This module does not validate coefficients (handled by `recfilter::validator`).

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use ndarray::Array2;
use num_traits::Float;

// Export dependencies from recfilter crate
use recfilter::internals::engine::executor::{FilterConfig, FilterExecutor, PreparedCoefficients};
use recfilter::internals::primitives::errors::FilterError;
use recfilter::internals::primitives::grid::GridSlice;

// ============================================================================
// Parallel Slice Pass
// ============================================================================

/// Filter all slices in parallel, returning them in input order.
#[cfg(feature = "cpu")]
pub fn process_slices_parallel<T>(
    slices: Vec<GridSlice<T>>,
    coefficients: &PreparedCoefficients<T>,
    mask: Option<&Array2<bool>>,
    config: &FilterConfig<T>,
) -> Result<Vec<GridSlice<T>>, FilterError>
where
    T: Float + Send + Sync,
{
    log::debug!(
        "filtering {} slices on {} threads",
        slices.len(),
        rayon::current_num_threads()
    );

    slices
        .into_par_iter()
        .map(|slice| FilterExecutor::filter_slice(slice, coefficients, mask, config))
        .collect()
}
