mod cost;
mod sweep;

pub use cost::{evaluate_cell, CellResult};
pub use sweep::{grid_positions, match_speckles, match_speckles_with_progress};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FIT_HALF_WIDTH, DEFAULT_MAX_SHIFT, DEFAULT_WINDOW_HALF_WIDTH};

/// Configuration for a speckle-matching run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Correlation window half-width; the window is 2*half + 1 pixels wide
    /// (default: 5).
    pub window_half_width: usize,
    /// Output grid stride in pixels, >= 1 (default: 1).
    pub step: usize,
    /// Search half-width: candidate shifts span [-max_shift, max_shift]
    /// (default: 4).
    pub max_shift: usize,
    /// Estimate the dark-field ratio alongside transmission (default: true).
    pub dark_field: bool,
    /// Half-width of the sub-pixel paraboloid fit box (default: 1).
    pub fit_half_width: usize,
    /// Emit a progress log line per completed output row (default: false).
    #[serde(default)]
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            window_half_width: DEFAULT_WINDOW_HALF_WIDTH,
            step: 1,
            max_shift: DEFAULT_MAX_SHIFT,
            dark_field: true,
            fit_half_width: DEFAULT_FIT_HALF_WIDTH,
            verbose: false,
        }
    }
}

/// The five result maps of a matching run, indexed by output grid
/// coordinates.
#[derive(Clone, Debug)]
pub struct MatchMaps {
    /// Transmission-like scale factor.
    pub transmission: Array2<f64>,
    /// Sub-pixel column displacement.
    pub dx: Array2<f64>,
    /// Sub-pixel row displacement.
    pub dy: Array2<f64>,
    /// Dark-field ratio.
    pub dark_field: Array2<f64>,
    /// Least-squares residual at the chosen shift.
    pub residual: Array2<f64>,
}
