//! Labelled grids and their spatial-slice capability.
//!
//! ## Purpose
//!
//! This module provides the minimal labelled-array model the filter works on:
//! an N-dimensional field with one coordinate per dimension, two of which are
//! marked as the spatial `x` and `y` axes. The filter itself only needs three
//! capabilities from a field, expressed by the [`SpatialField`] trait: find an
//! axis by role, iterate 2-D spatial slices, and reassemble filtered slices.
//!
//! ## Design notes
//!
//! * **Slices are (y, x)**: Every slice is laid out with `y` as the first axis,
//!   whatever the dimension order of the parent field.
//! * **Lazy iteration**: The iterator holds a permuted view of the field and
//!   copies out one slice at a time as it advances.
//! * **Stable order**: Slices follow C order over the non-spatial dimensions.
//! * **Round trip**: Reassembly restores the parent's dimension order, coordinates,
//!   units and scalar coordinates.
//!
//! ## Key concepts
//!
//! * **DimCoord**: A named coordinate attached to one dimension, optionally with an axis role.
//! * **ScalarCoord**: A named single value (e.g., a forecast time, or the fixed
//!   realization of a slice).
//! * **Missing mask**: `true` marks a missing value, matching the masked-array convention.
//!
//! ## Invariants
//!
//! * Exactly one dimension has role `X` and exactly one has role `Y`.
//! * Every coordinate has as many points as its dimension has elements.
//! * A missing mask, when present, has the same shape as the data.
//!
//! ## Non-goals
//!
//! * This module does not read or write any file format.
//! * This module does not interpolate or regrid.

// External dependencies
use ndarray::{Array2, Array3, ArrayD, ArrayViewD, Axis, IxDyn};
use num_traits::Float;
use std::fmt::{Display, Formatter, Result as FmtResult};

// Internal dependencies
use crate::primitives::errors::FilterError;

// ============================================================================
// Axis Roles and Coordinates
// ============================================================================

/// Spatial role of a field dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisRole {
    /// The east-west (column) axis.
    X,

    /// The north-south (row) axis.
    Y,
}

impl AxisRole {
    /// The other spatial axis.
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Lower-case axis name.
    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

impl Display for AxisRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Coordinate attached to one dimension of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct DimCoord<T> {
    /// Coordinate name (e.g. `projection_x_coordinate`, `realization`).
    pub name: String,

    /// Spatial role, if this is one of the two spatial axes.
    pub role: Option<AxisRole>,

    /// Coordinate values, one per element along the dimension.
    pub points: Vec<T>,
}

impl<T> DimCoord<T> {
    /// Create a non-spatial coordinate.
    pub fn new(name: impl Into<String>, points: Vec<T>) -> Self {
        Self {
            name: name.into(),
            role: None,
            points,
        }
    }

    /// Create a coordinate for the `x` axis.
    pub fn x(name: impl Into<String>, points: Vec<T>) -> Self {
        Self {
            role: Some(AxisRole::X),
            ..Self::new(name, points)
        }
    }

    /// Create a coordinate for the `y` axis.
    pub fn y(name: impl Into<String>, points: Vec<T>) -> Self {
        Self {
            role: Some(AxisRole::Y),
            ..Self::new(name, points)
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the coordinate has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A named scalar coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarCoord<T> {
    /// Coordinate name.
    pub name: String,

    /// Coordinate value.
    pub value: T,
}

impl<T> ScalarCoord<T> {
    /// Create a scalar coordinate.
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

// ============================================================================
// Grid Slice
// ============================================================================

/// A 2-D (y, x) cross-section of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSlice<T> {
    /// Name of the parent field.
    pub name: String,

    /// Slice values, shape `(ny, nx)`.
    pub data: Array2<T>,

    /// Missing-value mask, `true` where missing.
    pub missing: Option<Array2<bool>>,

    /// Coordinate of the first (row) axis.
    pub y: DimCoord<T>,

    /// Coordinate of the second (column) axis.
    pub x: DimCoord<T>,

    /// Scalar coordinates, including the fixed non-spatial coordinates of the slice.
    pub scalar_coords: Vec<ScalarCoord<T>>,
}

impl<T: Float> GridSlice<T> {
    /// Create a slice, checking that the coordinates match the data shape.
    pub fn new(
        name: impl Into<String>,
        data: Array2<T>,
        y: DimCoord<T>,
        x: DimCoord<T>,
    ) -> Result<Self, FilterError> {
        let (ny, nx) = data.dim();
        if y.len() != ny || x.len() != nx {
            return Err(FilterError::ShapeMismatch {
                expected: (ny, nx),
                got: (y.len(), x.len()),
            });
        }
        Ok(Self {
            name: name.into(),
            data,
            missing: None,
            y: DimCoord {
                role: Some(AxisRole::Y),
                ..y
            },
            x: DimCoord {
                role: Some(AxisRole::X),
                ..x
            },
            scalar_coords: Vec::new(),
        })
    }

    /// Attach a missing-value mask.
    pub fn with_missing(mut self, missing: Array2<bool>) -> Result<Self, FilterError> {
        if missing.dim() != self.data.dim() {
            return Err(FilterError::ShapeMismatch {
                expected: self.data.dim(),
                got: missing.dim(),
            });
        }
        self.missing = Some(missing);
        Ok(self)
    }

    /// Attach a scalar coordinate.
    pub fn with_scalar_coord(mut self, name: impl Into<String>, value: T) -> Self {
        self.scalar_coords.push(ScalarCoord::new(name, value));
        self
    }

    /// Shape as `(ny, nx)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Coordinate for the given spatial role.
    pub fn coord(&self, role: AxisRole) -> &DimCoord<T> {
        match role {
            AxisRole::X => &self.x,
            AxisRole::Y => &self.y,
        }
    }

    /// Look up a scalar coordinate value by name.
    pub fn scalar_coord(&self, name: &str) -> Option<T> {
        self.scalar_coords
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
    }
}

// ============================================================================
// Spatial Field Capability
// ============================================================================

/// Capabilities the filter needs from a gridded field.
pub trait SpatialField<T: Float>: Sized {
    /// Lazy iterator over the field's spatial slices.
    type Slices<'a>: Iterator<Item = GridSlice<T>>
    where
        Self: 'a;

    /// Index of the dimension carrying the given spatial role.
    fn axis_index(&self, role: AxisRole) -> Result<usize, FilterError>;

    /// Iterate the (y, x) slices of the field in stable order.
    fn spatial_slices(&self) -> Result<Self::Slices<'_>, FilterError>;

    /// Rebuild a field with this field's structure from slices in iteration order.
    fn reassemble(&self, slices: Vec<GridSlice<T>>) -> Result<Self, FilterError>;
}

// ============================================================================
// Field
// ============================================================================

/// An N-dimensional labelled field with two spatial axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<T> {
    /// Field name (e.g. `probability_of_precipitation`).
    pub name: String,

    /// Units of the data, carried through unchanged.
    pub units: Option<String>,

    /// Field values.
    pub data: ArrayD<T>,

    /// Missing-value mask, `true` where missing.
    pub missing: Option<ArrayD<bool>>,

    /// One coordinate per dimension, in dimension order.
    pub dim_coords: Vec<DimCoord<T>>,

    /// Scalar coordinates of the whole field.
    pub scalar_coords: Vec<ScalarCoord<T>>,
}

impl<T: Float> Field<T> {
    /// Create a field, validating coordinates against the data shape.
    pub fn new(
        name: impl Into<String>,
        data: ArrayD<T>,
        dim_coords: Vec<DimCoord<T>>,
    ) -> Result<Self, FilterError> {
        if dim_coords.len() != data.ndim() {
            return Err(FilterError::InvalidInput(format!(
                "field has {} dimensions but {} dimension coordinates",
                data.ndim(),
                dim_coords.len()
            )));
        }
        for (d, coord) in dim_coords.iter().enumerate() {
            if coord.len() != data.len_of(Axis(d)) {
                return Err(FilterError::InvalidInput(format!(
                    "coordinate '{}' has {} points but dimension {} has length {}",
                    coord.name,
                    coord.len(),
                    d,
                    data.len_of(Axis(d))
                )));
            }
        }
        locate_axis(&dim_coords, AxisRole::X)?;
        locate_axis(&dim_coords, AxisRole::Y)?;

        Ok(Self {
            name: name.into(),
            units: None,
            data,
            missing: None,
            dim_coords,
            scalar_coords: Vec::new(),
        })
    }

    /// Create a 2-D field on projection coordinates.
    pub fn from_grid(
        name: impl Into<String>,
        data: Array2<T>,
        y_points: Vec<T>,
        x_points: Vec<T>,
    ) -> Result<Self, FilterError> {
        Self::new(
            name,
            data.into_dyn(),
            vec![
                DimCoord::y("projection_y_coordinate", y_points),
                DimCoord::x("projection_x_coordinate", x_points),
            ],
        )
    }

    /// Set the units.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Attach a missing-value mask.
    pub fn with_missing(mut self, missing: ArrayD<bool>) -> Result<Self, FilterError> {
        if missing.shape() != self.data.shape() {
            return Err(FilterError::InvalidInput(format!(
                "missing mask shape {:?} does not match data shape {:?}",
                missing.shape(),
                self.data.shape()
            )));
        }
        self.missing = Some(missing);
        Ok(self)
    }

    /// Attach a scalar coordinate.
    pub fn with_scalar_coord(mut self, name: impl Into<String>, value: T) -> Self {
        self.scalar_coords.push(ScalarCoord::new(name, value));
        self
    }

    /// Coordinate for the given spatial role.
    pub fn coord(&self, role: AxisRole) -> Result<&DimCoord<T>, FilterError> {
        Ok(&self.dim_coords[locate_axis(&self.dim_coords, role)?])
    }

    /// Number of spatial slices.
    pub fn n_slices(&self) -> usize {
        self.layout()
            .map(|layout| layout.n_slices(&self.data))
            .unwrap_or(0)
    }

    fn layout(&self) -> Result<SliceLayout, FilterError> {
        let y_dim = locate_axis(&self.dim_coords, AxisRole::Y)?;
        let x_dim = locate_axis(&self.dim_coords, AxisRole::X)?;
        let other_dims: Vec<usize> = (0..self.data.ndim())
            .filter(|&d| d != y_dim && d != x_dim)
            .collect();
        Ok(SliceLayout {
            y_dim,
            x_dim,
            other_dims,
        })
    }
}

impl<T: Float> SpatialField<T> for Field<T> {
    type Slices<'a>
        = SliceIter<'a, T>
    where
        Self: 'a;

    fn axis_index(&self, role: AxisRole) -> Result<usize, FilterError> {
        locate_axis(&self.dim_coords, role)
    }

    fn spatial_slices(&self) -> Result<SliceIter<'_, T>, FilterError> {
        let layout = self.layout()?;
        let order = layout.order();

        Ok(SliceIter {
            field: self,
            other_lens: layout.other_lens(&self.data),
            remaining: layout.n_slices(&self.data),
            data: self.data.view().permuted_axes(order.clone()),
            missing: self
                .missing
                .as_ref()
                .map(|m| m.view().permuted_axes(order)),
            layout,
            next: 0,
        })
    }

    fn reassemble(&self, slices: Vec<GridSlice<T>>) -> Result<Self, FilterError> {
        let layout = self.layout()?;
        let (n, ny, nx) = layout.stacked_shape(&self.data);
        let other_lens = layout.other_lens(&self.data);

        if slices.len() != n {
            return Err(FilterError::IncompatibleSlices(format!(
                "expected {n} slices, got {}",
                slices.len()
            )));
        }

        let y_coord = &self.dim_coords[layout.y_dim];
        let x_coord = &self.dim_coords[layout.x_dim];

        let mut stack = Array3::<T>::zeros((n, ny, nx));
        let mut missing = if slices.iter().any(|s| s.missing.is_some()) {
            Some(Array3::from_elem((n, ny, nx), false))
        } else {
            None
        };

        for (k, slice) in slices.into_iter().enumerate() {
            if slice.shape() != (ny, nx) {
                return Err(FilterError::IncompatibleSlices(format!(
                    "slice {k} has shape {:?}, expected {:?}",
                    slice.shape(),
                    (ny, nx)
                )));
            }
            if slice.y.points != y_coord.points || slice.x.points != x_coord.points {
                return Err(FilterError::IncompatibleSlices(format!(
                    "spatial coordinates of slice {k} differ from the field"
                )));
            }
            for (&d, idx) in layout.other_dims.iter().zip(unravel(k, &other_lens)) {
                let coord = &self.dim_coords[d];
                let expected = coord.points[idx];
                if slice.scalar_coord(&coord.name) != Some(expected) {
                    return Err(FilterError::IncompatibleSlices(format!(
                        "slice {k} does not carry {} = {}",
                        coord.name,
                        expected.to_f64().unwrap_or(f64::NAN)
                    )));
                }
            }

            stack.index_axis_mut(Axis(0), k).assign(&slice.data);
            if let (Some(m), Some(sm)) = (missing.as_mut(), slice.missing.as_ref()) {
                m.index_axis_mut(Axis(0), k).assign(sm);
            }
        }

        let permuted_shape = layout.permuted_shape(&self.data);
        let data = unstack_spatial(stack, &layout.order(), &permuted_shape)?;
        let missing = match missing {
            Some(m) => Some(unstack_spatial(m, &layout.order(), &permuted_shape)?),
            None => None,
        };

        Ok(Self {
            name: self.name.clone(),
            units: self.units.clone(),
            data,
            missing,
            dim_coords: self.dim_coords.clone(),
            scalar_coords: self.scalar_coords.clone(),
        })
    }
}

// ============================================================================
// Slice Iterator
// ============================================================================

/// Lazy iterator over the (y, x) slices of a [`Field`].
///
/// Holds a permuted view of the field with the spatial axes last and copies
/// out one slice per call to `next`.
#[derive(Debug)]
pub struct SliceIter<'a, T> {
    field: &'a Field<T>,
    layout: SliceLayout,
    other_lens: Vec<usize>,
    data: ArrayViewD<'a, T>,
    missing: Option<ArrayViewD<'a, bool>>,
    next: usize,
    remaining: usize,
}

impl<T: Float> Iterator for SliceIter<'_, T> {
    type Item = GridSlice<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let k = self.next;
        self.next += 1;
        self.remaining -= 1;

        let field = self.field;
        let idx = unravel(k, &self.other_lens);
        let mut scalar_coords = field.scalar_coords.clone();
        for (&d, &i) in self.layout.other_dims.iter().zip(&idx) {
            let coord = &field.dim_coords[d];
            scalar_coords.push(ScalarCoord::new(coord.name.clone(), coord.points[i]));
        }

        Some(GridSlice {
            name: field.name.clone(),
            data: spatial_slice_at(&self.data, &idx),
            missing: self.missing.as_ref().map(|m| spatial_slice_at(m, &idx)),
            y: field.dim_coords[self.layout.y_dim].clone(),
            x: field.dim_coords[self.layout.x_dim].clone(),
            scalar_coords,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Float> ExactSizeIterator for SliceIter<'_, T> {}

// ============================================================================
// Layout Helpers
// ============================================================================

/// Position of the spatial and non-spatial dimensions within a field.
#[derive(Debug, Clone)]
struct SliceLayout {
    y_dim: usize,
    x_dim: usize,
    other_dims: Vec<usize>,
}

impl SliceLayout {
    /// Axis permutation that moves the spatial axes to the end as (y, x).
    fn order(&self) -> Vec<usize> {
        let mut order = self.other_dims.clone();
        order.push(self.y_dim);
        order.push(self.x_dim);
        order
    }

    fn other_lens<A>(&self, data: &ArrayD<A>) -> Vec<usize> {
        self.other_dims.iter().map(|&d| data.len_of(Axis(d))).collect()
    }

    fn n_slices<A>(&self, data: &ArrayD<A>) -> usize {
        self.other_lens(data).iter().product()
    }

    fn stacked_shape<A>(&self, data: &ArrayD<A>) -> (usize, usize, usize) {
        (
            self.n_slices(data),
            data.len_of(Axis(self.y_dim)),
            data.len_of(Axis(self.x_dim)),
        )
    }

    fn permuted_shape<A>(&self, data: &ArrayD<A>) -> Vec<usize> {
        self.order().iter().map(|&d| data.len_of(Axis(d))).collect()
    }
}

/// Find the unique dimension carrying `role`.
fn locate_axis<T>(coords: &[DimCoord<T>], role: AxisRole) -> Result<usize, FilterError> {
    let mut found = coords
        .iter()
        .enumerate()
        .filter(|(_, c)| c.role == Some(role))
        .map(|(d, _)| d);
    match (found.next(), found.next()) {
        (Some(d), None) => Ok(d),
        (None, _) => Err(FilterError::MissingAxis(role)),
        (Some(_), Some(_)) => Err(FilterError::AmbiguousAxis(role)),
    }
}

/// C-order multi-index of flat position `k` over dimensions of length `lens`.
fn unravel(mut k: usize, lens: &[usize]) -> Vec<usize> {
    let mut idx = vec![0; lens.len()];
    for (slot, &len) in idx.iter_mut().zip(lens).rev() {
        *slot = k % len;
        k /= len;
    }
    idx
}

/// Copy out the trailing (y, x) plane at leading multi-index `idx`.
fn spatial_slice_at<A: Clone>(view: &ArrayViewD<'_, A>, idx: &[usize]) -> Array2<A> {
    let mut plane = view.view();
    for &i in idx {
        plane = plane.index_axis_move(Axis(0), i);
    }
    let (ny, nx) = (plane.len_of(Axis(0)), plane.len_of(Axis(1)));
    Array2::from_shape_fn((ny, nx), |(i, j)| plane[IxDyn(&[i, j])].clone())
}

/// Restore the parent dimension order from a stack of (y, x) slices.
fn unstack_spatial<A: Clone>(
    stack: Array3<A>,
    order: &[usize],
    permuted_shape: &[usize],
) -> Result<ArrayD<A>, FilterError> {
    let mut inverse = vec![0; order.len()];
    for (i, &d) in order.iter().enumerate() {
        inverse[d] = i;
    }
    let shaped = stack
        .into_shape_with_order(IxDyn(permuted_shape))
        .map_err(|e| FilterError::InvalidInput(e.to_string()))?;
    let restored = shaped.permuted_axes(inverse).as_standard_layout().into_owned();
    Ok(restored)
}
