//! # fastRecfilter: Parallel Recursive Smoothing of Meteorological Grids
//!
//! Extension of [`recfilter`](https://docs.rs/recfilter) that filters the
//! spatial slices of a field concurrently with [rayon](https://docs.rs/rayon).
//! The numerical result is identical to the sequential filter; only slices
//! are distributed, each recurrence stays sequential.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastRecfilter::prelude::*;
//! use ndarray::{Array, IxDyn};
//!
//! // 4 realizations of a 6x6 grid; the last two dimensions are (y, x)
//! let data = Array::from_shape_fn(IxDyn(&[4, 6, 6]), |ix| (ix[0] + ix[1] * ix[2]) as f64);
//! let points: Vec<f64> = (0..6).map(|i| i as f64).collect();
//!
//! let cx = SmoothingCoefficients::uniform(AxisRole::X, 0.3, &points, &points);
//! let cy = SmoothingCoefficients::uniform(AxisRole::Y, 0.3, &points, &points);
//!
//! let filter = RecursiveFilter::new()
//!     .edge_width(1)
//!     .adapter(Batch)   // parallel by default
//!     .build()?;
//!
//! let smoothed = filter.process(&data, &cx, &cy, None)?;
//! assert_eq!(smoothed.data.shape(), &[4, 6, 6]);
//! # Result::<(), FilterError>::Ok(())
//! ```
//!
//! ## Inputs
//!
//! [`process`](prelude::ParallelBatchRecursiveFilter::process) accepts a
//! `Field`, an `Array2`, or an `ArrayD`. Bare arrays get index coordinates and
//! their last two dimensions are taken as (y, x).
//!
//! ## Features
//!
//! * `cpu` (default): rayon-backed parallel slice processing. Without it the
//!   batch adapter runs sequentially.

#![allow(non_snake_case)]

// Layer 4: Engine - parallel slice processing.
mod engine;

// Layer 5: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API for recursive filtering.
mod api;

// Input data handling.
mod input;

// Standard fastRecfilter prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{Batch, Streaming},
        AxisRole, DimCoord, Field, FieldInput, FilterError, FilterWarning, GridSlice,
        ParallelBatchRecursiveFilter, RecursiveFilterBuilder as RecursiveFilter, ScalarCoord,
        SliceStream, SmoothingCoefficients, SpatialField, StreamingRecursiveFilter,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
}
