use ndarray::Array2;

use speckletrack_core::subpixel::sub_pix_min;

#[test]
fn test_recovers_paraboloid_center() {
    // Upward paraboloid with its minimum at (4.3, 2.6), including a cross
    // term; the quadratic fit over the 3x3 box is exact.
    let surface = Array2::from_shape_fn((9, 9), |(r, c)| {
        let dr = r as f64 - 4.3;
        let dc = c as f64 - 2.6;
        0.5 + 2.0 * dr * dr + 1.5 * dc * dc + 0.3 * dr * dc
    });

    let m = sub_pix_min(&surface, 1);
    assert!(m.refined);
    assert!((m.row - 4.3).abs() < 1e-6, "row={}", m.row);
    assert!((m.col - 2.6).abs() < 1e-6, "col={}", m.col);
}

#[test]
fn test_wider_fit_box() {
    let surface = Array2::from_shape_fn((11, 11), |(r, c)| {
        let dr = r as f64 - 5.4;
        let dc = c as f64 - 4.8;
        dr * dr + 2.5 * dc * dc
    });

    let m = sub_pix_min(&surface, 2);
    assert!(m.refined);
    assert!((m.row - 5.4).abs() < 1e-6, "row={}", m.row);
    assert!((m.col - 4.8).abs() < 1e-6, "col={}", m.col);
}

#[test]
fn test_positive_curvature_rejected() {
    // Curves toward a minimum along rows but away along columns; the
    // negated fit has positive curvature on the second axis.
    let surface = Array2::from_shape_fn((7, 7), |(r, c)| {
        let dr = r as f64 - 3.0;
        let dc = c as f64 - 3.0;
        dr * dr - dc * dc
    });

    let m = sub_pix_min(&surface, 1);
    assert!(!m.refined);
    assert_eq!((m.row, m.col), (3.0, 0.0));
}

#[test]
fn test_saddle_rejected() {
    // Pure cross term: zero diagonal curvature, negative determinant.
    let surface = Array2::from_shape_fn((7, 7), |(r, c)| {
        let dr = r as f64 - 3.0;
        let dc = c as f64 - 3.0;
        -2.0 * dr * dc
    });

    let m = sub_pix_min(&surface, 1);
    assert!(!m.refined);
}

#[test]
fn test_flat_ramp_falls_back_to_integer_minimum() {
    // Linear data has a singular quadratic fit; the integer minimum at the
    // corner is kept and stays inside the surface.
    let surface = Array2::from_shape_fn((5, 5), |(r, c)| (r + c) as f64);

    let m = sub_pix_min(&surface, 1);
    assert!(!m.refined);
    assert_eq!((m.row, m.col), (0.0, 0.0));
}

#[test]
fn test_surface_smaller_than_fit_box() {
    let mut surface = Array2::<f64>::zeros((1, 1));
    surface[[0, 0]] = 0.3;

    let m = sub_pix_min(&surface, 1);
    assert!(!m.refined);
    assert_eq!((m.row, m.col), (0.0, 0.0));
}
