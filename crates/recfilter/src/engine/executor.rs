//! Execution engine for recursive filtering.
//!
//! ## Purpose
//!
//! This module orchestrates a full filtering run over a labelled field: it
//! validates and pads the smoothing coefficients once, then walks the field's
//! spatial slices, normalising, padding, filtering, cropping, and optionally
//! re-masking each one before reassembling the result.
//!
//! ## Design notes
//!
//! * **Validate once**: Coefficient checks run against the first slice only;
//!   every slice of a field shares its spatial grid.
//! * **Shared halo**: Data and coefficients are both padded by `2 * edge_width`
//!   so that coefficient `k` stays between padded cells `k` and `k + 1`.
//! * **Pluggable pass**: A custom slice pass (e.g. a parallel one) can replace
//!   the sequential walk.
//! * **Slice independence**: No state is shared between slices.
//!
//! ## Invariants
//!
//! * No slice is filtered before every configuration and coefficient check has passed.
//! * Output slices come back in input order.
//! * The output grid has exactly the input's shape and coordinates.
//!
//! ## Non-goals
//!
//! * This module does not validate builder parameters (handled by `validator`
//!   at build time).
//! * This module does not run slices in parallel itself (handled by extension crates).

// External dependencies
use ndarray::Array2;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::masking::{prepare_slice, remask};
use crate::algorithms::recursion::run_recursion;
use crate::engine::validator::Validator;
use crate::math::halo::{pad_symmetric, PaddedGrid};
use crate::primitives::coefficients::SmoothingCoefficients;
use crate::primitives::errors::FilterError;
use crate::primitives::grid::{AxisRole, GridSlice, SpatialField};

/// Default number of filter iterations.
pub const DEFAULT_ITERATIONS: usize = 1;

/// Default halo half-width, in grid cells.
pub const DEFAULT_EDGE_WIDTH: usize = 15;

// ============================================================================
// Type Definitions
// ============================================================================

/// Signature for a custom slice pass (enables parallel execution).
#[doc(hidden)]
pub type SlicePassFn<T> = fn(
    Vec<GridSlice<T>>,          // slices in field order
    &PreparedCoefficients<T>,   // padded x and y coefficients
    Option<&Array2<bool>>,      // external validity mask
    &FilterConfig<T>,           // full configuration
) -> Result<Vec<GridSlice<T>>, FilterError>;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for a filtering run.
#[derive(Debug, Clone)]
pub struct FilterConfig<T> {
    /// Number of forward/backward sweeps along both axes.
    pub iterations: usize,

    /// Halo half-width in grid cells.
    pub edge_width: usize,

    /// Restore NaN and attach a missing mask after filtering.
    pub re_mask: bool,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom slice pass function.
    #[doc(hidden)]
    pub custom_slice_pass: Option<SlicePassFn<T>>,
}

impl<T> Default for FilterConfig<T> {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            edge_width: DEFAULT_EDGE_WIDTH,
            re_mask: false,
            custom_slice_pass: None,
        }
    }
}

impl<T> FilterConfig<T> {
    /// Width of the halo added to each side of every slice.
    pub fn halo(&self) -> usize {
        2 * self.edge_width
    }
}

/// Smoothing coefficients padded to match a padded slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCoefficients<T> {
    /// Padded x coefficients, shape `(ny + 2h, nx - 1 + 2h)`.
    pub x: Array2<T>,

    /// Padded y coefficients, shape `(ny - 1 + 2h, nx + 2h)`.
    pub y: Array2<T>,

    /// Shape `(ny, nx)` of the unpadded slices these coefficients serve.
    pub grid_shape: (usize, usize),
}

// ============================================================================
// Executor
// ============================================================================

/// Unified executor for recursive filtering.
pub struct FilterExecutor;

impl FilterExecutor {
    // ========================================================================
    // Preparation
    // ========================================================================

    /// Validate both coefficient fields against a template slice and pad them.
    pub fn prepare_coefficients<T: Float>(
        template: &GridSlice<T>,
        coefficients_x: &SmoothingCoefficients<T>,
        coefficients_y: &SmoothingCoefficients<T>,
        halo: usize,
    ) -> Result<PreparedCoefficients<T>, FilterError> {
        Validator::validate_grid_shape(template.shape())?;

        for (coefficients, role) in [(coefficients_x, AxisRole::X), (coefficients_y, AxisRole::Y)] {
            Validator::validate_coefficient_role(coefficients, role)?;
            Validator::validate_coefficient_alignment(template, coefficients, role)?;
        }

        Ok(PreparedCoefficients {
            x: pad_symmetric(coefficients_x.data.view(), halo, halo)?,
            y: pad_symmetric(coefficients_y.data.view(), halo, halo)?,
            grid_shape: template.shape(),
        })
    }

    /// Reduce an external mask field to a single (y, x) validity mask.
    ///
    /// Non-zero, non-missing values are valid.
    pub fn external_mask<T: Float, F: SpatialField<T>>(
        mask: &F,
        expected: (usize, usize),
    ) -> Result<Array2<bool>, FilterError> {
        let mut slices = mask.spatial_slices()?;
        let slice = slices.next().ok_or(FilterError::EmptyInput)?;
        if slices.next().is_some() {
            return Err(FilterError::InvalidInput(
                "external mask must reduce to a single spatial slice".into(),
            ));
        }
        Validator::validate_mask_shape(slice.shape(), expected)?;

        let mut valid = slice.data.mapv(|v| v != T::zero() && !v.is_nan());
        if let Some(missing) = &slice.missing {
            valid.zip_mut_with(missing, |v, &m| *v = *v && !m);
        }
        Ok(valid)
    }

    // ========================================================================
    // Slice Processing
    // ========================================================================

    /// Filter one slice.
    pub fn filter_slice<T: Float>(
        slice: GridSlice<T>,
        coefficients: &PreparedCoefficients<T>,
        mask: Option<&Array2<bool>>,
        config: &FilterConfig<T>,
    ) -> Result<GridSlice<T>, FilterError> {
        Validator::validate_mask_shape(slice.shape(), coefficients.grid_shape)?;

        let prepared = prepare_slice(&slice, mask.map(|m| m.view()))?;
        let halo = config.halo();

        let mut padded = PaddedGrid::symmetric(prepared.data.view(), halo, halo)?;
        run_recursion(
            padded.data_mut(),
            coefficients.x.view(),
            coefficients.y.view(),
            config.iterations,
        )?;
        let mut data = padded.crop()?;

        let missing = if config.re_mask {
            Some(remask(&mut data, &prepared.mask, &prepared.was_nan)?)
        } else {
            None
        };

        Ok(GridSlice {
            data,
            missing,
            ..slice
        })
    }

    /// Filter slices one after another.
    pub fn sequential_pass<T: Float>(
        slices: Vec<GridSlice<T>>,
        coefficients: &PreparedCoefficients<T>,
        mask: Option<&Array2<bool>>,
        config: &FilterConfig<T>,
    ) -> Result<Vec<GridSlice<T>>, FilterError> {
        Self::filter_sequential(slices.into_iter(), coefficients, mask, config)
    }

    /// Filter slices from an iterator, stopping at the first failure.
    pub fn filter_sequential<T: Float, I: Iterator<Item = GridSlice<T>>>(
        slices: I,
        coefficients: &PreparedCoefficients<T>,
        mask: Option<&Array2<bool>>,
        config: &FilterConfig<T>,
    ) -> Result<Vec<GridSlice<T>>, FilterError> {
        slices
            .enumerate()
            .map(|(k, slice)| {
                log::trace!("filtering slice {k} of {}", slice.name);
                Self::filter_slice(slice, coefficients, mask, config)
            })
            .collect()
    }

    // ========================================================================
    // Main Entry Point
    // ========================================================================

    /// Filter every spatial slice of `field` and reassemble the result.
    pub fn run<T: Float, F: SpatialField<T>>(
        field: &F,
        coefficients_x: &SmoothingCoefficients<T>,
        coefficients_y: &SmoothingCoefficients<T>,
        mask: Option<&F>,
        config: &FilterConfig<T>,
    ) -> Result<F, FilterError> {
        Validator::validate_coefficient_range(coefficients_x)?;
        Validator::validate_coefficient_range(coefficients_y)?;

        let mut slices = field.spatial_slices()?.peekable();
        let (coefficients, mask) = {
            let template = slices.peek().ok_or(FilterError::EmptyInput)?;
            let coefficients =
                Self::prepare_coefficients(template, coefficients_x, coefficients_y, config.halo())?;
            let mask = match mask {
                Some(m) => Some(Self::external_mask(m, template.shape())?),
                None => None,
            };
            (coefficients, mask)
        };

        log::debug!(
            "recursive filter: grid {:?}, iterations {}, halo {}, re_mask {}, external mask {}",
            coefficients.grid_shape,
            config.iterations,
            config.halo(),
            config.re_mask,
            mask.is_some()
        );

        let filtered = match config.custom_slice_pass {
            Some(pass) => pass(slices.collect(), &coefficients, mask.as_ref(), config)?,
            None => Self::filter_sequential(slices, &coefficients, mask.as_ref(), config)?,
        };

        field.reassemble(filtered)
    }
}
