#![cfg(feature = "dev")]
//! Tests for configuration and coefficient validation.
//!
//! These tests verify the checks run before any slice is filtered:
//! - Iteration count and edge width bounds, iteration warnings
//! - Coefficient range, identity, and alignment
//! - Grid and mask shapes
//!
//! ## Test Organization
//!
//! 1. **Configuration** - Iterations, edge width, duplicates
//! 2. **Coefficient Range** - Upper and lower bounds, non-finite values
//! 3. **Coefficient Identity and Alignment** - Names and points
//! 4. **Shapes** - Grid size, masks, streamed slices

use ndarray::Array2;

use recfilter::internals::engine::validator::{Validator, MAX_EDGE_WIDTH};
use recfilter::internals::primitives::coefficients::SmoothingCoefficients;
use recfilter::internals::primitives::errors::{FilterError, FilterWarning};
use recfilter::internals::primitives::grid::{AxisRole, DimCoord, GridSlice};

// ============================================================================
// Helper Functions
// ============================================================================

fn y_points() -> Vec<f64> {
    vec![0.0, 2000.0, 4000.0, 6000.0]
}

fn x_points() -> Vec<f64> {
    vec![0.0, 1000.0, 2000.0]
}

fn template() -> GridSlice<f64> {
    GridSlice::new(
        "probability_of_precipitation",
        Array2::zeros((4, 3)),
        DimCoord::new("projection_y_coordinate", y_points()),
        DimCoord::new("projection_x_coordinate", x_points()),
    )
    .unwrap()
}

// ============================================================================
// Configuration Tests
// ============================================================================

/// Test iteration count validation.
#[test]
fn test_validate_iterations() {
    assert!(Validator::validate_iterations(None).is_ok());
    assert!(Validator::validate_iterations(Some(1)).is_ok());
    assert!(Validator::validate_iterations(Some(5)).is_ok());
    assert_eq!(
        Validator::validate_iterations(Some(0)).unwrap_err(),
        FilterError::InvalidIterations(0)
    );
}

/// Test that more than two iterations produces a warning.
#[test]
fn test_iteration_warnings() {
    assert_eq!(Validator::iteration_warnings(None), None);
    assert_eq!(Validator::iteration_warnings(Some(2)), None);
    assert_eq!(
        Validator::iteration_warnings(Some(3)),
        Some(FilterWarning::ExcessIterations(3))
    );
}

/// Test edge width validation.
#[test]
fn test_validate_edge_width() {
    assert!(Validator::validate_edge_width(1).is_ok());
    assert_eq!(
        Validator::validate_edge_width(0).unwrap_err(),
        FilterError::InvalidEdgeWidth(0)
    );
}

/// Test that edge widths too large to pad are rejected.
#[test]
fn test_validate_edge_width_upper_bound() {
    assert!(Validator::validate_edge_width(MAX_EDGE_WIDTH).is_ok());
    assert_eq!(
        Validator::validate_edge_width(MAX_EDGE_WIDTH + 1).unwrap_err(),
        FilterError::InvalidEdgeWidth(MAX_EDGE_WIDTH + 1)
    );
    assert_eq!(
        Validator::validate_edge_width(usize::MAX).unwrap_err(),
        FilterError::InvalidEdgeWidth(usize::MAX)
    );
}

/// Test duplicate parameter detection.
#[test]
fn test_validate_no_duplicates() {
    assert!(Validator::validate_no_duplicates(None).is_ok());
    assert_eq!(
        Validator::validate_no_duplicates(Some("iterations")).unwrap_err(),
        FilterError::DuplicateParameter {
            parameter: "iterations"
        }
    );
}

// ============================================================================
// Coefficient Range Tests
// ============================================================================

/// Test that coefficients up to and including 0.5 are accepted.
#[test]
fn test_coefficient_range_accepts_bounds() {
    for value in [0.0, 0.1, 0.5] {
        let c = SmoothingCoefficients::uniform(AxisRole::X, value, &y_points(), &x_points());
        assert!(Validator::validate_coefficient_range(&c).is_ok(), "{value}");
    }
}

/// Test that a single value above 0.5 is rejected.
#[test]
fn test_coefficient_range_rejects_large_value() {
    let mut c = SmoothingCoefficients::uniform(AxisRole::Y, 0.1, &y_points(), &x_points());
    c.data[[1, 2]] = 0.51;
    match Validator::validate_coefficient_range(&c) {
        Err(FilterError::CoefficientOutOfRange { name, value }) => {
            assert_eq!(name, "smoothing_coefficient_y");
            assert_eq!(value, 0.51);
        }
        other => panic!("expected CoefficientOutOfRange, got {other:?}"),
    }
}

/// Test that negative and non-finite values are rejected.
#[test]
fn test_coefficient_range_rejects_negative_and_nan() {
    for bad in [-0.1, f64::NAN, f64::INFINITY] {
        let mut c = SmoothingCoefficients::uniform(AxisRole::X, 0.1, &y_points(), &x_points());
        c.data[[0, 0]] = bad;
        assert!(matches!(
            Validator::validate_coefficient_range(&c),
            Err(FilterError::CoefficientOutOfRange { .. })
        ));
    }
}

// ============================================================================
// Coefficient Identity and Alignment Tests
// ============================================================================

/// Test that coefficient fields must carry the name of their axis.
#[test]
fn test_coefficient_role() {
    let cx = SmoothingCoefficients::uniform(AxisRole::X, 0.1, &y_points(), &x_points());
    assert!(Validator::validate_coefficient_role(&cx, AxisRole::X).is_ok());
    assert!(matches!(
        Validator::validate_coefficient_role(&cx, AxisRole::Y),
        Err(FilterError::UnidentifiedCoefficients {
            expected: AxisRole::Y,
            ..
        })
    ));

    let mut unnamed = cx.clone();
    unnamed.name = "smoothing_coefficient".into();
    assert!(matches!(
        Validator::validate_coefficient_role(&unnamed, AxisRole::X),
        Err(FilterError::UnidentifiedCoefficients { .. })
    ));
}

/// Test that correctly built coefficients align with their grid.
#[test]
fn test_coefficient_alignment_ok() {
    let t = template();
    let cx = SmoothingCoefficients::uniform(AxisRole::X, 0.1, &y_points(), &x_points());
    let cy = SmoothingCoefficients::uniform(AxisRole::Y, 0.1, &y_points(), &x_points());
    assert_eq!(cx.data.dim(), (4, 2));
    assert_eq!(cy.data.dim(), (3, 3));
    assert!(Validator::validate_coefficient_alignment(&t, &cx, AxisRole::X).is_ok());
    assert!(Validator::validate_coefficient_alignment(&t, &cy, AxisRole::Y).is_ok());
}

/// Test that coefficients on grid points rather than midpoints are rejected.
#[test]
fn test_coefficient_alignment_rejects_non_midpoints() {
    let t = template();
    let cx = SmoothingCoefficients::new(
        "smoothing_coefficient_x",
        Array2::from_elem((4, 2), 0.1),
        y_points(),
        vec![0.0, 1000.0],
    )
    .unwrap();
    assert_eq!(
        Validator::validate_coefficient_alignment(&t, &cx, AxisRole::X).unwrap_err(),
        FilterError::MisalignedCoefficients {
            smoothing_axis: AxisRole::X,
            mismatched_axis: AxisRole::X
        }
    );
}

/// Test that the other axis must match the grid points exactly.
#[test]
fn test_coefficient_alignment_rejects_other_axis() {
    let t = template();
    let shifted: Vec<f64> = x_points().iter().map(|p| p + 500.0).collect();
    let cy = SmoothingCoefficients::uniform(AxisRole::Y, 0.1, &y_points(), &shifted);
    assert_eq!(
        Validator::validate_coefficient_alignment(&t, &cy, AxisRole::Y).unwrap_err(),
        FilterError::MisalignedCoefficients {
            smoothing_axis: AxisRole::Y,
            mismatched_axis: AxisRole::X
        }
    );
}

/// Test that a coefficient field built for a smaller grid is rejected.
#[test]
fn test_coefficient_alignment_rejects_wrong_length() {
    let t = template();
    let cx = SmoothingCoefficients::uniform(AxisRole::X, 0.1, &y_points()[..3], &x_points());
    assert!(matches!(
        Validator::validate_coefficient_alignment(&t, &cx, AxisRole::X),
        Err(FilterError::MisalignedCoefficients { .. })
    ));
}

// ============================================================================
// Shape Tests
// ============================================================================

/// Test grid size requirements.
#[test]
fn test_validate_grid_shape() {
    assert!(Validator::validate_grid_shape((2, 2)).is_ok());
    assert_eq!(
        Validator::validate_grid_shape((0, 4)).unwrap_err(),
        FilterError::EmptyInput
    );
    assert!(matches!(
        Validator::validate_grid_shape((1, 4)),
        Err(FilterError::InvalidInput(_))
    ));
}

/// Test mask shape validation.
#[test]
fn test_validate_mask_shape() {
    assert!(Validator::validate_mask_shape((4, 3), (4, 3)).is_ok());
    assert_eq!(
        Validator::validate_mask_shape((3, 4), (4, 3)).unwrap_err(),
        FilterError::ShapeMismatch {
            expected: (4, 3),
            got: (3, 4)
        }
    );
}

/// Test that streamed slices must share the bound grid.
#[test]
fn test_validate_slice_layout() {
    let t = template();
    assert!(Validator::validate_slice_layout(&t, &t.y, &t.x).is_ok());

    let mut moved = template();
    moved.x.points[1] = 1500.0;
    assert!(matches!(
        Validator::validate_slice_layout(&moved, &t.y, &t.x),
        Err(FilterError::InvalidInput(_))
    ));

    let small = GridSlice::new(
        "probability_of_precipitation",
        Array2::zeros((2, 3)),
        DimCoord::new("projection_y_coordinate", vec![0.0, 2000.0]),
        DimCoord::new("projection_x_coordinate", x_points()),
    )
    .unwrap();
    assert!(matches!(
        Validator::validate_slice_layout(&small, &t.y, &t.x),
        Err(FilterError::ShapeMismatch { .. })
    ));
}
