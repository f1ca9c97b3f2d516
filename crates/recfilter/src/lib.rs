//! # recfilter: Recursive Smoothing of Meteorological Grids
//!
//! A separable first-order recursive (IIR) filter for 2-D spatial grids, with
//! per-location smoothing coefficients along each axis, mask and NaN handling,
//! and symmetric halo padding to keep edge transients out of the result.
//!
//! ## What is a recursive filter?
//!
//! Each pass walks one axis of the grid and blends every cell with its
//! already-smoothed neighbour:
//!
//! ```text
//! forward:  B[i] = (1 - c[i - 1]) * A[i] + c[i - 1] * B[i - 1]
//! backward: B[i] = (1 - c[i])     * A[i] + c[i]     * B[i + 1]
//! ```
//!
//! Running forward then backward along x and then y approximates a symmetric
//! low-pass filter without phase lag. With coefficients in [0, 0.5] every step
//! is a convex combination, so probability fields stay in range and their
//! total is approximately conserved.
//!
//! ## Quick Start
//!
//! ```rust
//! use recfilter::prelude::*;
//! use ndarray::Array2;
//!
//! let points: Vec<f64> = (0..9).map(|i| i as f64 * 2000.0).collect();
//! let mut data = Array2::<f64>::zeros((9, 9));
//! data[[4, 4]] = 1.0;
//!
//! let field = Field::from_grid("probability_of_precipitation", data, points.clone(), points.clone())?;
//!
//! // Uniform coefficients on the midpoint grids
//! let cx = SmoothingCoefficients::uniform(AxisRole::X, 0.25, &points, &points);
//! let cy = SmoothingCoefficients::uniform(AxisRole::Y, 0.25, &points, &points);
//!
//! let filter = RecursiveFilter::new()
//!     .iterations(1)
//!     .edge_width(2)
//!     .adapter(Batch)
//!     .build()?;
//!
//! let smoothed = filter.process(&field, &cx, &cy, None)?;
//! assert!(smoothed.data[[4, 4]] < 1.0);
//! assert!(smoothed.data[[4, 5]] > 0.0);
//! # Result::<(), FilterError>::Ok(())
//! ```
//!
//! ## Parameters
//!
//! | Parameter      | Default | Range | Description                                   |
//! |----------------|---------|-------|-----------------------------------------------|
//! | **iterations** | 1       | ≥ 1   | Forward/backward sweeps (warning above 2)     |
//! | **edge_width** | 15      | ≥ 1   | Halo half-width; slices are padded by 2×      |
//! | **re_mask**    | false   | bool  | Re-apply the input mask and NaN after filtering |
//!
//! ## Execution Modes
//!
//! * **Batch**: filter a whole [`Field`](prelude::Field) and get one back.
//! * **Streaming**: bind to a grid once, then filter slices one at a time.
//!
//! ## Masks and Missing Data
//!
//! Cells that are NaN, flagged missing on the input, or zero in an optional
//! external mask are zero-filled before filtering. With `re_mask(true)` the
//! output carries a missing mask over exactly those cells and NaN is restored
//! where the input was NaN. Without it, smoothed values are left in place.
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: build-time
//! warnings at `warn`, run summaries at `debug`, and per-slice progress at `trace`.

// Layer 1: Primitives - data structures and error types.
mod primitives;

// Layer 2: Math - halo padding and coordinate arithmetic.
mod math;

// Layer 3: Algorithms - recursive passes and masking.
mod algorithms;

// Layer 4: Engine - orchestration and validation.
mod engine;

// Layer 5: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API for recursive filtering.
mod api;

// Standard recursive filter prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{Batch, Streaming},
        AxisRole, BatchRecursiveFilter, DimCoord, Field, FilterError, FilterWarning, GridSlice,
        RecursiveFilterBuilder as RecursiveFilter, ScalarCoord, SliceStream,
        SmoothingCoefficients, SpatialField, StreamingRecursiveFilter,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
