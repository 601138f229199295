use ndarray::{s, Array2};

use crate::consts::DENOM_EPSILON;
use crate::correlate::{cross_correlate, CorrelationMode};
use crate::moments::MomentMaps;
use crate::stack::ImageStack;
use crate::subpixel::sub_pix_min;
use crate::window::Window;

/// Result of matching a single output grid cell.
#[derive(Clone, Copy, Debug)]
pub struct CellResult {
    /// Sub-pixel row displacement.
    pub dy: f64,
    /// Sub-pixel column displacement.
    pub dx: f64,
    /// Transmission-like scale factor.
    pub transmission: f64,
    /// Dark-field ratio.
    pub dark_field: f64,
    /// Fit residual at the chosen shift.
    pub residual: f64,
}

impl CellResult {
    /// Sentinel for cells whose fit is undefined.
    pub fn sentinel() -> Self {
        Self {
            dy: f64::NAN,
            dx: f64::NAN,
            transmission: f64::NAN,
            dark_field: f64::NAN,
            residual: f64::NAN,
        }
    }
}

/// Match one output grid cell at image coordinates (y, x).
///
/// Pure function of the read-only moment maps, the raw stacks and the
/// window; no call depends on any other cell. The caller guarantees that
/// (y, x) keeps a margin of `max_shift + window.half_width` to every image
/// edge.
pub fn evaluate_cell(
    sample: &ImageStack,
    reference: &ImageStack,
    moments: &MomentMaps,
    window: &Window,
    y: usize,
    x: usize,
    max_shift: usize,
    fit_half_width: usize,
) -> CellResult {
    let ns = max_shift;
    let nw = window.half_width;
    let span = 2 * ns + 1;

    // Shift-independent local terms.
    let sample_energy = moments.sample_energy[[y, x]];
    let ref_energy = moments
        .reference_energy
        .slice(s![y - ns..=y + ns, x - ns..=x + ns]);

    let dark = moments.dark.as_ref();
    let (flux_scale, sample_flux) = match dark {
        Some(d) => (d.flux_scale, d.sample_flux[[y, x]]),
        None => (0.0, 0.0),
    };
    let ref_flux = dark.map(|d| {
        d.reference_flux
            .slice(s![y - ns..=y + ns, x - ns..=x + ns])
    });

    // Shift-dependent cross term: one valid-mode correlation per exposure
    // of the extended reference patch against the windowed sample patch.
    let mut cross = Array2::<f64>::zeros((span, span));
    for (s_frame, r_frame) in sample.frames().iter().zip(reference.frames()) {
        let sample_patch = s_frame.slice(s![y - nw..=y + nw, x - nw..=x + nw]);
        let kernel = &window.weights * &sample_patch;
        let ref_patch = r_frame
            .slice(s![y - nw - ns..=y + nw + ns, x - nw - ns..=x + nw + ns])
            .to_owned();
        cross += &cross_correlate(&ref_patch, &kernel, CorrelationMode::Valid);
    }

    // Two-parameter affine fit (gain, offset) at every candidate shift.
    let mut transmission = Array2::<f64>::zeros((span, span));
    let mut dark_ratio = Array2::<f64>::zeros((span, span));
    let mut surface = Array2::<f64>::zeros((span, span));

    for sr in 0..span {
        for sc in 0..span {
            let r_energy = ref_energy[[sr, sc]];
            let c = cross[[sr, sc]];
            let r_flux = match &ref_flux {
                Some(block) => block[[sr, sc]],
                None => 0.0,
            };

            let denom = match dark {
                Some(_) => flux_scale * r_energy - r_flux * r_flux,
                None => r_energy,
            };
            if denom.abs() < DENOM_EPSILON {
                // Near-constant reference window; the fit is undefined here.
                return CellResult::sentinel();
            }

            let (gain, offset) = match dark {
                Some(_) => (
                    (flux_scale * c - sample_flux * r_flux) / denom,
                    (r_energy * sample_flux - c * r_flux) / denom,
                ),
                None => (c / denom, 0.0),
            };

            let scale = offset + gain;
            transmission[[sr, sc]] = scale;
            dark_ratio[[sr, sc]] = gain / scale;
            surface[[sr, sc]] = sample_energy
                + offset * offset * flux_scale
                + gain * gain * r_energy
                - 2.0 * offset * sample_flux
                - 2.0 * gain * c
                + 2.0 * offset * gain * r_flux;
        }
    }

    let refined = sub_pix_min(&surface, fit_half_width);

    // Round back to an integer index to read off the per-shift quantities.
    let row_idx = (refined.row.round() as i64).clamp(0, 2 * ns as i64) as usize;
    let col_idx = (refined.col.round() as i64).clamp(0, 2 * ns as i64) as usize;

    CellResult {
        dy: refined.row - ns as f64,
        dx: refined.col - ns as f64,
        transmission: transmission[[row_idx, col_idx]],
        dark_field: dark_ratio[[row_idx, col_idx]],
        residual: surface[[row_idx, col_idx]],
    }
}
