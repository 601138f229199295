use ndarray::{s, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random speckle texture with a short correlation length: seeded uniform
/// noise smoothed by a 3x3 box filter (wrap-around edges), offset so
/// intensities stay well above zero.
pub fn speckle_pattern(h: usize, w: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Array2::from_shape_fn((h, w), |_| rng.random::<f64>());
    let mut out = Array2::<f64>::zeros((h, w));
    for r in 0..h {
        for c in 0..w {
            let mut sum = 0.0;
            for dr in -1i64..=1 {
                for dc in -1i64..=1 {
                    let rr = (r as i64 + dr).rem_euclid(h as i64) as usize;
                    let cc = (c as i64 + dc).rem_euclid(w as i64) as usize;
                    sum += noise[[rr, cc]];
                }
            }
            out[[r, c]] = sum / 9.0 + 0.5;
        }
    }
    out
}

/// A speckle pattern pair where the second image sees the first displaced
/// by (dy, dx): second(p) = first(p + (dy, dx)). Pure translation cut from
/// one larger pattern, so there is no wrap-around seam.
///
/// Requires |dy| and |dx| <= 8.
pub fn translated_pair(
    h: usize,
    w: usize,
    dy: i64,
    dx: i64,
    seed: u64,
) -> (Array2<f64>, Array2<f64>) {
    let pad = 8i64;
    assert!(dy.abs() <= pad && dx.abs() <= pad);
    let big = speckle_pattern(h + 2 * pad as usize, w + 2 * pad as usize, seed);
    let first = big
        .slice(s![pad as usize..pad as usize + h, pad as usize..pad as usize + w])
        .to_owned();
    let second = big
        .slice(s![
            (pad + dy) as usize..(pad + dy) as usize + h,
            (pad + dx) as usize..(pad + dx) as usize + w
        ])
        .to_owned();
    (first, second)
}
