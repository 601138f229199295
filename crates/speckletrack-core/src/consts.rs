/// Hamming taper coefficient: w(n) = ALPHA - BETA * cos(2*pi*n / (N-1)).
pub const HAMMING_ALPHA: f64 = 0.54;

/// Hamming taper coefficient, see [`HAMMING_ALPHA`].
pub const HAMMING_BETA: f64 = 0.46;

/// Threshold below which the affine normal-equation denominator is treated
/// as singular; the affected cell gets the NaN sentinel in all output maps.
pub const DENOM_EPSILON: f64 = 1e-12;

/// Threshold below which an elimination pivot or a 2x2 determinant is
/// treated as singular during the sub-pixel paraboloid fit.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Default half-width of the box used for the sub-pixel paraboloid fit.
pub const DEFAULT_FIT_HALF_WIDTH: usize = 1;

/// Default correlation window half-width (window is 2*half + 1 pixels wide).
pub const DEFAULT_WINDOW_HALF_WIDTH: usize = 5;

/// Default search half-width: candidate shifts span [-max_shift, max_shift].
pub const DEFAULT_MAX_SHIFT: usize = 4;
