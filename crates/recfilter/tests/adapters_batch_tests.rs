#![cfg(feature = "dev")]
//! Tests for the Batch adapter.
//!
//! The Batch adapter filters every spatial slice of a labelled field in one
//! call and returns a field with the same structure. These tests cover:
//! - Build-time validation and warnings
//! - Coefficient validation at process time
//! - Mask handling with and without re-masking
//! - Multi-dimensional fields
//!
//! ## Test Organization
//!
//! 1. **Basic Functionality** - Constant fields, smoothing a spike
//! 2. **Configuration** - Defaults, iterations, edge width, warnings
//! 3. **Coefficient Validation** - Range, names, alignment
//! 4. **Masking** - External masks, NaN, re-masking
//! 5. **Multi-dimensional Fields** - Realizations and dimension order

use approx::assert_abs_diff_eq;
use ndarray::{Array, Array2, ArrayD, IxDyn};
use recfilter::prelude::*;

use recfilter::internals::adapters::batch::BatchRecursiveFilterBuilder;

// ============================================================================
// Helper Functions
// ============================================================================

fn points(n: usize) -> Vec<f64> {
    (0..n).map(|i| 2000.0 * i as f64).collect()
}

fn coefficients(
    ny: usize,
    nx: usize,
    value: f64,
) -> (SmoothingCoefficients<f64>, SmoothingCoefficients<f64>) {
    (
        SmoothingCoefficients::uniform(AxisRole::X, value, &points(ny), &points(nx)),
        SmoothingCoefficients::uniform(AxisRole::Y, value, &points(ny), &points(nx)),
    )
}

fn field(data: Array2<f64>) -> Field<f64> {
    let (ny, nx) = data.dim();
    Field::from_grid("probability_of_precipitation", data, points(ny), points(nx)).unwrap()
}

fn spike(n: usize) -> Array2<f64> {
    let mut data = Array2::zeros((n, n));
    data[[n / 2, n / 2]] = 1.0;
    data
}

fn filter(edge_width: usize, re_mask: bool) -> BatchRecursiveFilter<f64> {
    RecursiveFilter::new()
        .iterations(1)
        .edge_width(edge_width)
        .re_mask(re_mask)
        .adapter(Batch)
        .build()
        .unwrap()
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

/// Test that a uniform field comes back unchanged.
///
/// Every pass is a convex combination of equal values, and symmetric padding
/// of a constant grid is constant.
#[test]
fn test_batch_uniform_field_unchanged() {
    let input = field(Array2::ones((9, 9)));
    let (cx, cy) = coefficients(9, 9, 0.1);

    let out = filter(2, false).process(&input, &cx, &cy, None).unwrap();
    assert_eq!(out.data.shape(), &[9, 9]);
    for &v in out.data.iter() {
        assert_abs_diff_eq!(v, 1.0, epsilon = 1e-12);
    }
}

/// Test smoothing a single spike.
///
/// Verifies the peak drops, neighbours gain, and the total is nearly kept.
#[test]
fn test_batch_smooths_spike() {
    let input = field(spike(5));
    let (cx, cy) = coefficients(5, 5, 0.1);

    let out = filter(1, false).process(&input, &cx, &cy, None).unwrap();
    assert_abs_diff_eq!(out.data[[2, 2]], 0.66942148894214881, epsilon = 1e-12);
    assert!(out.data[[2, 1]] > 0.0);
    assert!(out.data[[1, 2]] > 0.0);
    assert_abs_diff_eq!(out.data.sum(), 0.9963671236345572, epsilon = 1e-12);
}

/// Test that coordinates, name, and units are carried through.
#[test]
fn test_batch_preserves_metadata() {
    let input = field(spike(5))
        .with_units("1")
        .with_scalar_coord("forecast_period", 3600.0);
    let (cx, cy) = coefficients(5, 5, 0.1);

    let out = filter(1, false).process(&input, &cx, &cy, None).unwrap();
    assert_eq!(out.name, input.name);
    assert_eq!(out.units, input.units);
    assert_eq!(out.dim_coords, input.dim_coords);
    assert_eq!(out.scalar_coords, input.scalar_coords);
}

/// Test that zero coefficients leave the field untouched.
#[test]
fn test_batch_zero_coefficients() {
    let data = Array2::from_shape_fn((4, 6), |(i, j)| (i * 6 + j) as f64 / 24.0);
    let input = field(data.clone());
    let (cx, cy) = coefficients(4, 6, 0.0);

    let out = filter(3, false).process(&input, &cx, &cy, None).unwrap();
    assert_eq!(out.data, data.into_dyn());
}

// ============================================================================
// Configuration Tests
// ============================================================================

/// Test the defaults of a freshly built filter.
#[test]
fn test_batch_defaults() {
    let filter = RecursiveFilter::<f64>::new().adapter(Batch).build().unwrap();
    assert_eq!(filter.iterations(), None);
    assert_eq!(filter.edge_width(), 15);
    assert!(!filter.re_mask());
    assert!(filter.warnings().is_empty());
}

/// Test that an unset iteration count filters once.
#[test]
fn test_batch_unset_iterations_means_one() {
    let input = field(spike(5));
    let (cx, cy) = coefficients(5, 5, 0.1);
    let default = RecursiveFilter::new()
        .edge_width(1)
        .adapter(Batch)
        .build()
        .unwrap();

    let out = default.process(&input, &cx, &cy, None).unwrap();
    let once = filter(1, false).process(&input, &cx, &cy, None).unwrap();
    assert_eq!(out.data, once.data);
}

/// Test that zero iterations are rejected at build time.
#[test]
fn test_batch_zero_iterations() {
    let res = RecursiveFilter::<f64>::new()
        .iterations(0)
        .adapter(Batch)
        .build();
    assert_eq!(res.unwrap_err(), FilterError::InvalidIterations(0));
}

/// Test that a zero edge width is rejected at build time.
#[test]
fn test_batch_zero_edge_width() {
    let res = RecursiveFilter::<f64>::new()
        .edge_width(0)
        .adapter(Batch)
        .build();
    assert_eq!(res.unwrap_err(), FilterError::InvalidEdgeWidth(0));
}

/// Test that an edge width whose halo would overflow is rejected at build time.
#[test]
fn test_batch_huge_edge_width() {
    let res = RecursiveFilter::<f64>::new()
        .edge_width(usize::MAX / 2 + 1)
        .adapter(Batch)
        .build();
    assert_eq!(
        res.unwrap_err(),
        FilterError::InvalidEdgeWidth(usize::MAX / 2 + 1)
    );
}

/// Test that more than two iterations warns but still filters.
#[test]
fn test_batch_excess_iterations_warns() {
    let filter = RecursiveFilter::new()
        .iterations(3)
        .edge_width(1)
        .adapter(Batch)
        .build()
        .unwrap();
    assert_eq!(filter.warnings(), &[FilterWarning::ExcessIterations(3)]);

    let input = field(spike(5));
    let (cx, cy) = coefficients(5, 5, 0.1);
    let out = filter.process(&input, &cx, &cy, None).unwrap();
    assert!(out.data[[2, 2]] < 0.46641409348439272);
}

/// Test the display form.
#[test]
fn test_batch_display() {
    let filter = RecursiveFilter::<f64>::new()
        .iterations(2)
        .edge_width(4)
        .adapter(Batch)
        .build()
        .unwrap();
    assert_eq!(
        filter.to_string(),
        "<RecursiveFilter: iterations: 2, edge_width: 4>"
    );

    let unset = RecursiveFilter::<f64>::new().adapter(Batch).build().unwrap();
    assert_eq!(
        unset.to_string(),
        "<RecursiveFilter: iterations: None, edge_width: 15>"
    );
}

/// Test the execution builder directly.
#[test]
fn test_batch_builder_direct() {
    let filter = BatchRecursiveFilterBuilder::<f64>::default()
        .iterations(2)
        .re_mask(true)
        .build()
        .unwrap();
    assert_eq!(filter.iterations(), Some(2));
    assert!(filter.re_mask());
}

// ============================================================================
// Coefficient Validation Tests
// ============================================================================

/// Test that a coefficient above 0.5 fails the run.
#[test]
fn test_batch_coefficient_out_of_range() {
    let input = field(spike(5));
    let (mut cx, cy) = coefficients(5, 5, 0.1);
    cx.data[[3, 1]] = 0.55;

    let res = filter(1, false).process(&input, &cx, &cy, None);
    match res {
        Err(FilterError::CoefficientOutOfRange { name, value }) => {
            assert_eq!(name, "smoothing_coefficient_x");
            assert_abs_diff_eq!(value, 0.55);
        }
        other => panic!("expected CoefficientOutOfRange, got {other:?}"),
    }
}

/// Test that wrongly named coefficient fields are rejected.
#[test]
fn test_batch_unidentified_coefficients() {
    let input = field(spike(5));
    let (cx, mut cy) = coefficients(5, 5, 0.1);
    cy.name = "smoothing_coefficient_z".into();

    let res = filter(1, false).process(&input, &cx, &cy, None);
    assert!(matches!(
        res,
        Err(FilterError::UnidentifiedCoefficients {
            expected: AxisRole::Y,
            ..
        })
    ));
}

/// Test that coefficients for a shifted grid are rejected.
#[test]
fn test_batch_misaligned_coefficients() {
    let input = field(spike(5));
    let (_, cy) = coefficients(5, 5, 0.1);
    let shifted: Vec<f64> = points(5).iter().map(|p| p + 100.0).collect();
    let cx = SmoothingCoefficients::uniform(AxisRole::X, 0.1, &points(5), &shifted);

    let err = filter(1, false).process(&input, &cx, &cy, None).unwrap_err();
    assert_eq!(
        err,
        FilterError::MisalignedCoefficients {
            smoothing_axis: AxisRole::X,
            mismatched_axis: AxisRole::X
        }
    );
    assert!(err.to_string().contains("mean of each pair of points"));
}

// ============================================================================
// Masking Tests
// ============================================================================

fn centre_mask() -> Field<f64> {
    let mut values = Array2::ones((5, 5));
    values[[2, 2]] = 0.0;
    field(values)
}

/// Test that a masked cell is filled by its neighbours when not re-masked.
#[test]
fn test_batch_external_mask_without_re_mask() {
    let input = field(Array2::ones((5, 5)));
    let (cx, cy) = coefficients(5, 5, 0.1);

    let out = filter(1, false)
        .process(&input, &cx, &cy, Some(&centre_mask()))
        .unwrap();
    assert_abs_diff_eq!(out.data[[2, 2]], 0.3305785110578513, epsilon = 1e-12);
    assert!(out.missing.is_none());
}

/// Test that re-masking reports the masked cell as missing.
#[test]
fn test_batch_external_mask_with_re_mask() {
    let input = field(Array2::ones((5, 5)));
    let (cx, cy) = coefficients(5, 5, 0.1);

    let out = filter(1, true)
        .process(&input, &cx, &cy, Some(&centre_mask()))
        .unwrap();
    let missing = out.missing.as_ref().unwrap();
    assert!(missing[[2, 2]]);
    assert_eq!(missing.iter().filter(|&&m| m).count(), 1);
    assert_abs_diff_eq!(out.data[[2, 3]], 0.93305784447851248, epsilon = 1e-12);
}

/// Test that NaN inputs never leak into valid output cells.
#[test]
fn test_batch_nan_input() {
    let mut data = Array2::ones((5, 5));
    data[[2, 2]] = f64::NAN;
    let input = field(data);
    let (cx, cy) = coefficients(5, 5, 0.1);

    let plain = filter(1, false).process(&input, &cx, &cy, None).unwrap();
    assert!(plain.data.iter().all(|v| v.is_finite()));
    assert_abs_diff_eq!(plain.data[[2, 2]], 0.3305785110578513, epsilon = 1e-12);

    let masked = filter(1, true).process(&input, &cx, &cy, None).unwrap();
    let missing = masked.missing.as_ref().unwrap();
    assert!(masked.data[[2, 2]].is_nan());
    for (v, m) in masked.data.iter().zip(missing.iter()) {
        assert!(*m || v.is_finite());
    }
}

/// Test that intrinsically missing cells are treated as invalid.
#[test]
fn test_batch_intrinsic_missing() {
    let mut missing = ArrayD::from_elem(IxDyn(&[5, 5]), false);
    missing[[2, 2]] = true;
    let input = field(Array2::ones((5, 5))).with_missing(missing).unwrap();
    let (cx, cy) = coefficients(5, 5, 0.1);

    let out = filter(1, true).process(&input, &cx, &cy, None).unwrap();
    assert_abs_diff_eq!(out.data[[2, 2]], 0.3305785110578513, epsilon = 1e-12);
    assert!(out.missing.as_ref().unwrap()[[2, 2]]);
}

/// Test that a mask of the wrong shape fails before filtering.
#[test]
fn test_batch_mask_shape_mismatch() {
    let input = field(Array2::ones((5, 5)));
    let (cx, cy) = coefficients(5, 5, 0.1);
    let mask = field(Array2::ones((4, 5)));

    let res = filter(1, false).process(&input, &cx, &cy, Some(&mask));
    assert!(matches!(res, Err(FilterError::ShapeMismatch { .. })));
}

// ============================================================================
// Multi-dimensional Field Tests
// ============================================================================

/// Test that one mask applies to every realization.
#[test]
fn test_batch_mask_shared_by_all_slices() {
    let input = Field::new(
        "probability_of_precipitation",
        Array::from_elem(IxDyn(&[3, 5, 5]), 1.0),
        vec![
            DimCoord::new("realization", vec![0.0, 1.0, 2.0]),
            DimCoord::y("projection_y_coordinate", points(5)),
            DimCoord::x("projection_x_coordinate", points(5)),
        ],
    )
    .unwrap();
    let (cx, cy) = coefficients(5, 5, 0.1);

    let out = filter(1, false)
        .process(&input, &cx, &cy, Some(&centre_mask()))
        .unwrap();
    for r in 0..3 {
        assert_abs_diff_eq!(out.data[[r, 2, 2]], 0.3305785110578513, epsilon = 1e-12);
    }
}

/// Test a field whose spatial axes are not the trailing dimensions.
#[test]
fn test_batch_interleaved_dimensions() {
    // (x, realization, y)
    let data = Array::from_shape_fn(IxDyn(&[5, 2, 5]), |ix| {
        if ix[0] == 2 && ix[2] == 2 {
            1.0 + ix[1] as f64
        } else {
            0.0
        }
    });
    let input = Field::new(
        "probability_of_precipitation",
        data,
        vec![
            DimCoord::x("projection_x_coordinate", points(5)),
            DimCoord::new("realization", vec![0.0, 1.0]),
            DimCoord::y("projection_y_coordinate", points(5)),
        ],
    )
    .unwrap();
    let (cx, cy) = coefficients(5, 5, 0.1);

    let out = filter(1, false).process(&input, &cx, &cy, None).unwrap();
    assert_eq!(out.data.shape(), &[5, 2, 5]);
    assert_eq!(out.dim_coords, input.dim_coords);
    assert_abs_diff_eq!(out.data[[2, 0, 2]], 0.66942148894214881, epsilon = 1e-12);
    assert_abs_diff_eq!(out.data[[2, 1, 2]], 2.0 * 0.66942148894214881, epsilon = 1e-12);
}

/// Test filtering in single precision.
#[test]
fn test_batch_f32() {
    let pts: Vec<f32> = (0..5).map(|i| 2000.0 * i as f32).collect();
    let mut data = Array2::<f32>::zeros((5, 5));
    data[[2, 2]] = 1.0;
    let input = Field::from_grid("p", data, pts.clone(), pts.clone()).unwrap();
    let cx = SmoothingCoefficients::uniform(AxisRole::X, 0.1f32, &pts, &pts);
    let cy = SmoothingCoefficients::uniform(AxisRole::Y, 0.1f32, &pts, &pts);

    let filter = RecursiveFilter::<f32>::new()
        .edge_width(1)
        .adapter(Batch)
        .build()
        .unwrap();
    let out = filter.process(&input, &cx, &cy, None).unwrap();
    assert_abs_diff_eq!(out.data[[2, 2]], 0.669_421_5, epsilon = 1e-5);
}
