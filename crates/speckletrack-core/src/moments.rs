use ndarray::Array2;

use crate::correlate::{cross_correlate, CorrelationMode};
use crate::stack::ImageStack;
use crate::window::Window;

/// Shift-independent windowed statistics, built once per run and shared
/// read-only across the whole output sweep.
#[derive(Clone, Debug)]
pub struct MomentMaps {
    /// Windowed sum over sample exposures of squared intensity.
    pub sample_energy: Array2<f64>,
    /// Windowed sum over reference exposures of squared intensity.
    pub reference_energy: Array2<f64>,
    /// Linear-intensity terms, present when dark-field estimation is on.
    pub dark: Option<DarkFieldMoments>,
}

/// The linear-intensity moments entering the affine offset term of the fit.
#[derive(Clone, Debug)]
pub struct DarkFieldMoments {
    /// Mean reference intensity per exposure, times the exposure count.
    pub flux_scale: f64,
    /// Mean reference intensity times the windowed sample intensity sum.
    pub sample_flux: Array2<f64>,
    /// Mean reference intensity times the windowed reference intensity sum.
    pub reference_flux: Array2<f64>,
}

/// Build the moment maps for a stack pair.
pub fn build_moment_maps(
    sample: &ImageStack,
    reference: &ImageStack,
    window: &Window,
    dark_field: bool,
) -> MomentMaps {
    let (h, w) = sample.frame_shape();
    let exposures = sample.len();

    let mut sample_sq = Array2::<f64>::zeros((h, w));
    for frame in sample.frames() {
        for row in 0..h {
            for col in 0..w {
                let v = frame[[row, col]];
                sample_sq[[row, col]] += v * v;
            }
        }
    }

    let mut reference_sq = Array2::<f64>::zeros((h, w));
    for frame in reference.frames() {
        for row in 0..h {
            for col in 0..w {
                let v = frame[[row, col]];
                reference_sq[[row, col]] += v * v;
            }
        }
    }

    let sample_energy = cross_correlate(&sample_sq, &window.weights, CorrelationMode::Same);
    let reference_energy = cross_correlate(&reference_sq, &window.weights, CorrelationMode::Same);

    let dark = if dark_field {
        let mut sample_lin = Array2::<f64>::zeros((h, w));
        for frame in sample.frames() {
            sample_lin += frame;
        }
        let mut reference_lin = Array2::<f64>::zeros((h, w));
        for frame in reference.frames() {
            reference_lin += frame;
        }

        // Mean reference intensity per exposure.
        let mean_intensity = reference_lin.sum() / ((h * w * exposures) as f64);

        let mut sample_flux = cross_correlate(&sample_lin, &window.weights, CorrelationMode::Same);
        sample_flux *= mean_intensity;
        let mut reference_flux =
            cross_correlate(&reference_lin, &window.weights, CorrelationMode::Same);
        reference_flux *= mean_intensity;

        Some(DarkFieldMoments {
            flux_scale: mean_intensity * exposures as f64,
            sample_flux,
            reference_flux,
        })
    } else {
        None
    };

    MomentMaps {
        sample_energy,
        reference_energy,
        dark,
    }
}
