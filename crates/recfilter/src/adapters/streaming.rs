//! Streaming adapter for slice-at-a-time recursive filtering.
//!
//! ## Purpose
//!
//! This module provides the streaming execution adapter for fields that are
//! never held in memory as a whole. The filter is bound once to a template
//! slice and a pair of coefficient fields, then fed spatial slices one at a
//! time or through any iterator.
//!
//! ## Design notes
//!
//! * **Bind once**: Coefficients are validated and padded a single time in `bind`.
//! * **Lazy**: `process_iter` filters each slice only when the caller pulls it.
//! * **Layout check**: Every slice must share the template's spatial coordinates.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Template**: Any slice with the spatial grid of the stream; its data is not used.
//! * **Stream**: A [`SliceStream`] owns the padded coefficients and the optional mask.
//!
//! ## Invariants
//!
//! * Every slice is filtered exactly as the batch adapter would filter it.
//! * No state carries over from one slice to the next.
//!
//! ## Non-goals
//!
//! * This adapter does not reassemble slices into a field.
//! * This adapter does not reorder slices.

// External dependencies
use ndarray::Array2;
use num_traits::Float;
use std::fmt::{Display, Formatter, Result as FmtResult};

// Internal dependencies
use crate::engine::executor::{FilterConfig, FilterExecutor, PreparedCoefficients};
use crate::engine::executor::{DEFAULT_EDGE_WIDTH, DEFAULT_ITERATIONS};
use crate::engine::validator::Validator;
use crate::primitives::coefficients::SmoothingCoefficients;
use crate::primitives::errors::{FilterError, FilterWarning};
use crate::primitives::grid::{DimCoord, GridSlice};

// ============================================================================
// Streaming Recursive Filter Builder
// ============================================================================

/// Builder for the streaming recursive filter.
#[derive(Debug, Clone)]
pub struct StreamingRecursiveFilterBuilder<T: Float> {
    /// Number of filter iterations (unset resolves to 1)
    pub iterations: Option<usize>,

    /// Halo half-width in grid cells
    pub edge_width: usize,

    /// Whether to re-apply the input mask after filtering
    pub re_mask: bool,

    /// Deferred error from adapter conversion
    pub deferred_error: Option<FilterError>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,

    _marker: std::marker::PhantomData<T>,
}

impl<T: Float> Default for StreamingRecursiveFilterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> StreamingRecursiveFilterBuilder<T> {
    /// Create a new streaming builder with default parameters.
    fn new() -> Self {
        Self {
            iterations: None,
            edge_width: DEFAULT_EDGE_WIDTH,
            re_mask: false,
            deferred_error: None,
            duplicate_param: None,
            _marker: std::marker::PhantomData,
        }
    }

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

    /// Build the streaming filter.
    pub fn build(self) -> Result<StreamingRecursiveFilter<T>, FilterError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        Validator::validate_no_duplicates(self.duplicate_param)?;
        Validator::validate_iterations(self.iterations)?;
        Validator::validate_edge_width(self.edge_width)?;

        let warnings: Vec<FilterWarning> = Validator::iteration_warnings(self.iterations)
            .into_iter()
            .collect();
        for warning in &warnings {
            log::warn!("{warning}");
        }

        Ok(StreamingRecursiveFilter {
            config: self,
            warnings,
        })
    }
}

// ============================================================================
// Streaming Recursive Filter
// ============================================================================

/// Streaming recursive filter, ready to be bound to a spatial grid.
#[derive(Debug, Clone)]
pub struct StreamingRecursiveFilter<T: Float> {
    config: StreamingRecursiveFilterBuilder<T>,
    warnings: Vec<FilterWarning>,
}

impl<T: Float> StreamingRecursiveFilter<T> {
    /// Validate the coefficients against `template` and open a stream for its grid.
    ///
    /// `mask` marks valid cells with `true` and must match the template's shape.
    pub fn bind(
        &self,
        template: &GridSlice<T>,
        coefficients_x: &SmoothingCoefficients<T>,
        coefficients_y: &SmoothingCoefficients<T>,
        mask: Option<&Array2<bool>>,
    ) -> Result<SliceStream<T>, FilterError> {
        Validator::validate_coefficient_range(coefficients_x)?;
        Validator::validate_coefficient_range(coefficients_y)?;

        let config = FilterConfig {
            iterations: self.config.iterations.unwrap_or(DEFAULT_ITERATIONS),
            edge_width: self.config.edge_width,
            re_mask: self.config.re_mask,
            ..FilterConfig::default()
        };

        let coefficients = FilterExecutor::prepare_coefficients(
            template,
            coefficients_x,
            coefficients_y,
            config.halo(),
        )?;
        if let Some(m) = mask {
            Validator::validate_mask_shape(m.dim(), template.shape())?;
        }

        log::debug!(
            "streaming recursive filter bound to {:?} grid of {}",
            template.shape(),
            template.name
        );

        Ok(SliceStream {
            coefficients,
            mask: mask.cloned(),
            config,
            y: template.y.clone(),
            x: template.x.clone(),
            processed: 0,
        })
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
}

impl<T: Float> Display for StreamingRecursiveFilter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.config.iterations {
            Some(n) => write!(f, "<RecursiveFilter: iterations: {n}, ")?,
            None => write!(f, "<RecursiveFilter: iterations: None, ")?,
        }
        write!(f, "edge_width: {}>", self.config.edge_width)
    }
}

// ============================================================================
// Slice Stream
// ============================================================================

/// A recursive filter bound to one spatial grid.
#[derive(Debug, Clone)]
pub struct SliceStream<T> {
    coefficients: PreparedCoefficients<T>,
    mask: Option<Array2<bool>>,
    config: FilterConfig<T>,
    y: DimCoord<T>,
    x: DimCoord<T>,
    processed: usize,
}

impl<T: Float> SliceStream<T> {
    /// Filter a single slice.
    pub fn process_slice(&mut self, slice: GridSlice<T>) -> Result<GridSlice<T>, FilterError> {
        Validator::validate_slice_layout(&slice, &self.y, &self.x)?;
        log::trace!("filtering streamed slice {}", self.processed);

        let filtered =
            FilterExecutor::filter_slice(slice, &self.coefficients, self.mask.as_ref(), &self.config)?;
        self.processed += 1;
        Ok(filtered)
    }

    /// Lazily filter every slice produced by `slices`.
    pub fn process_iter<'a, I>(
        &'a mut self,
        slices: I,
    ) -> impl Iterator<Item = Result<GridSlice<T>, FilterError>> + 'a
    where
        I: IntoIterator<Item = GridSlice<T>>,
        I::IntoIter: 'a,
    {
        slices
            .into_iter()
            .map(move |slice| self.process_slice(slice))
    }

    /// Number of slices filtered so far.
    pub fn slices_processed(&self) -> usize {
        self.processed
    }

    /// Shape `(ny, nx)` of the bound grid.
    pub fn grid_shape(&self) -> (usize, usize) {
        self.coefficients.grid_shape
    }
}
