use ndarray::Array2;
use num_complex::Complex;
use rustfft::FftPlanner;

/// Output sizing of [`cross_correlate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorrelationMode {
    /// Output has the shape of the first input; boundaries see implicit zeros.
    Same,
    /// Output shrinks by the kernel extent; every value comes from
    /// fully-overlapping support.
    Valid,
}

/// Cross-correlate `a` with kernel `b`: slide `b` over `a` and sum the
/// elementwise products at every alignment.
///
/// Computed as a frequency-domain convolution of `a` with the flipped
/// kernel, zero-padded to the full linear-convolution size, then sliced
/// down to the requested mode.
pub fn cross_correlate(a: &Array2<f64>, b: &Array2<f64>, mode: CorrelationMode) -> Array2<f64> {
    let (ah, aw) = a.dim();
    let (bh, bw) = b.dim();
    assert!(
        mode == CorrelationMode::Same || (bh <= ah && bw <= aw),
        "valid-mode kernel {}x{} exceeds image {}x{}",
        bh,
        bw,
        ah,
        aw
    );

    let (ph, pw) = (ah + bh - 1, aw + bw - 1);

    let mut fa = padded_complex(a, ph, pw, false);
    let mut fb = padded_complex(b, ph, pw, true);
    fft2d(&mut fa, false);
    fft2d(&mut fb, false);

    for (va, vb) in fa.iter_mut().zip(fb.iter()) {
        *va *= *vb;
    }
    fft2d(&mut fa, true);

    match mode {
        CorrelationMode::Same => real_slice(&fa, (bh - 1) / 2, (bw - 1) / 2, ah, aw),
        CorrelationMode::Valid => real_slice(&fa, bh - 1, bw - 1, ah - bh + 1, aw - bw + 1),
    }
}

/// Zero-pad into a (ph, pw) complex array, optionally flipping both axes.
fn padded_complex(data: &Array2<f64>, ph: usize, pw: usize, flip: bool) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    let mut out = Array2::<Complex<f64>>::zeros((ph, pw));
    for row in 0..h {
        for col in 0..w {
            let v = if flip {
                data[[h - 1 - row, w - 1 - col]]
            } else {
                data[[row, col]]
            };
            out[[row, col]] = Complex::new(v, 0.0);
        }
    }
    out
}

/// In-place 2D FFT: row-wise pass, then column-wise pass.
/// The inverse pass applies the 1/(h*w) normalization.
fn fft2d(data: &mut Array2<Complex<f64>>, inverse: bool) {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let fft_row = if inverse {
        planner.plan_fft_inverse(w)
    } else {
        planner.plan_fft_forward(w)
    };
    let fft_col = if inverse {
        planner.plan_fft_inverse(h)
    } else {
        planner.plan_fft_forward(h)
    };

    let mut row_buf: Vec<Complex<f64>> = vec![Complex::new(0.0, 0.0); w];
    for row in 0..h {
        for col in 0..w {
            row_buf[col] = data[[row, col]];
        }
        fft_row.process(&mut row_buf);
        for col in 0..w {
            data[[row, col]] = row_buf[col];
        }
    }

    let mut col_buf: Vec<Complex<f64>> = vec![Complex::new(0.0, 0.0); h];
    for col in 0..w {
        for row in 0..h {
            col_buf[row] = data[[row, col]];
        }
        fft_col.process(&mut col_buf);
        for row in 0..h {
            data[[row, col]] = col_buf[row];
        }
    }

    if inverse {
        let scale = 1.0 / (h * w) as f64;
        for v in data.iter_mut() {
            *v *= scale;
        }
    }
}

fn real_slice(
    data: &Array2<Complex<f64>>,
    r0: usize,
    c0: usize,
    h: usize,
    w: usize,
) -> Array2<f64> {
    Array2::from_shape_fn((h, w), |(r, c)| data[[r0 + r, c0 + c]].re)
}
