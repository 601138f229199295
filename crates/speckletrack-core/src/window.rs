use ndarray::{Array1, Array2};

use crate::consts::{HAMMING_ALPHA, HAMMING_BETA};

/// Separable 2D Hamming window, normalized so its weights sum to 1.
///
/// Applied before every correlation to suppress noise and define the
/// locality of the fit.
#[derive(Clone, Debug)]
pub struct Window {
    /// Weights, shape (2*half_width + 1, 2*half_width + 1).
    pub weights: Array2<f64>,
    pub half_width: usize,
}

impl Window {
    /// Build the window for the given half-width: the outer product of two
    /// 1D Hamming tapers, scaled to unit sum.
    pub fn new(half_width: usize) -> Self {
        let taper = hamming(2 * half_width + 1);
        let mut weights = Array2::<f64>::zeros((taper.len(), taper.len()));
        for (r, &wy) in taper.iter().enumerate() {
            for (c, &wx) in taper.iter().enumerate() {
                weights[[r, c]] = wy * wx;
            }
        }
        let total = weights.sum();
        weights /= total;
        Self { weights, half_width }
    }

    /// Full width in pixels (2*half_width + 1).
    pub fn size(&self) -> usize {
        2 * self.half_width + 1
    }
}

/// 1D Hamming taper of length n. A single-point taper is [1.0].
fn hamming(n: usize) -> Array1<f64> {
    if n == 1 {
        return Array1::from_elem(1, 1.0);
    }
    Array1::from_shape_fn(n, |i| {
        HAMMING_ALPHA - HAMMING_BETA * (std::f64::consts::TAU * i as f64 / (n - 1) as f64).cos()
    })
}
