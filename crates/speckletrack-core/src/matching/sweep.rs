use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use ndarray::Array2;
use rayon::prelude::*;
use tracing::info;

use crate::error::{Result, SpeckleError};
use crate::matching::cost::{evaluate_cell, CellResult};
use crate::matching::{MatchConfig, MatchMaps};
use crate::moments::build_moment_maps;
use crate::stack::{validate_pair, ImageStack};
use crate::window::Window;

/// Match a sample stack against a reference stack over the full output grid.
pub fn match_speckles(
    sample: &ImageStack,
    reference: &ImageStack,
    config: &MatchConfig,
) -> Result<MatchMaps> {
    match_speckles_with_progress(sample, reference, config, |_| {}, &AtomicBool::new(false))
}

/// [`match_speckles`] with per-row progress reporting and cooperative
/// cancellation.
///
/// `on_progress(rows_done)` is called as each output row completes. Setting
/// `cancel` stops the sweep between rows: rows not yet processed are filled
/// with the NaN sentinel, rows already written are returned untouched.
pub fn match_speckles_with_progress(
    sample: &ImageStack,
    reference: &ImageStack,
    config: &MatchConfig,
    on_progress: impl Fn(usize) + Send + Sync,
    cancel: &AtomicBool,
) -> Result<MatchMaps> {
    validate_pair(sample, reference)?;

    let (h, w) = sample.frame_shape();
    let margin = config.max_shift + config.window_half_width;
    let step = config.step.max(1);

    let rows = grid_positions(h, margin, step);
    let cols = grid_positions(w, margin, step);
    if rows.is_empty() || cols.is_empty() {
        return Err(SpeckleError::DegenerateGrid {
            height: h,
            width: w,
            margin,
        });
    }

    // One-time global precomputation; shared read-only by every worker.
    let window = Window::new(config.window_half_width);
    let moments = build_moment_maps(sample, reference, &window, config.dark_field);

    info!(
        rows = rows.len(),
        cols = cols.len(),
        exposures = sample.len(),
        dark_field = config.dark_field,
        "Matching speckle stacks"
    );

    let total_rows = rows.len();
    let done = AtomicUsize::new(0);
    let cells: Vec<Vec<CellResult>> = rows
        .par_iter()
        .map(|&y| {
            if cancel.load(Ordering::Relaxed) {
                return vec![CellResult::sentinel(); cols.len()];
            }
            let row: Vec<CellResult> = cols
                .iter()
                .map(|&x| {
                    evaluate_cell(
                        sample,
                        reference,
                        &moments,
                        &window,
                        y,
                        x,
                        config.max_shift,
                        config.fit_half_width,
                    )
                })
                .collect();
            let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
            if config.verbose {
                info!(completed, total = total_rows, "Output row matched");
            }
            on_progress(completed);
            row
        })
        .collect();

    Ok(assemble_maps(&cells, rows.len(), cols.len()))
}

/// Output grid positions along one axis: every `step`-th pixel from
/// `margin` up to (excluding) `len - margin - 1`.
pub fn grid_positions(len: usize, margin: usize, step: usize) -> Vec<usize> {
    let upper = len as i64 - margin as i64 - 1;
    if upper <= margin as i64 {
        return Vec::new();
    }
    (margin..upper as usize).step_by(step.max(1)).collect()
}

/// Gather per-cell results into the five output maps.
fn assemble_maps(cells: &[Vec<CellResult>], rows: usize, cols: usize) -> MatchMaps {
    let mut maps = MatchMaps {
        transmission: Array2::zeros((rows, cols)),
        dx: Array2::zeros((rows, cols)),
        dy: Array2::zeros((rows, cols)),
        dark_field: Array2::zeros((rows, cols)),
        residual: Array2::zeros((rows, cols)),
    };
    for (r, row) in cells.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            maps.transmission[[r, c]] = cell.transmission;
            maps.dx[[r, c]] = cell.dx;
            maps.dy[[r, c]] = cell.dy;
            maps.dark_field[[r, c]] = cell.dark_field;
            maps.residual[[r, c]] = cell.residual;
        }
    }
    maps
}
