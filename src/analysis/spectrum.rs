use rustfft::{num_complex::Complex, FftPlanner};

/// Spacing between the first two `x` samples.
///
/// Falls back to 1 when there are fewer than two samples or the difference is
/// zero or not finite, so the frequency axis is always defined.
pub fn sample_spacing(x: &[f64]) -> f64 {
    match x {
        [first, second, ..] => {
            let d = second - first;
            if d.is_finite() && d != 0.0 {
                d
            } else {
                1.0
            }
        }
        _ => 1.0,
    }
}

/// One-sided magnitude spectrum of `y` as `[frequency, magnitude]` points.
///
/// - `N = y.len()`, spacing from [`sample_spacing`]
/// - bins `k < N / 2` are kept (Nyquist truncation)
/// - frequency `k / (N * spacing)`, magnitude `2 / N * |Y[k]|`
///
/// A single sample yields an empty spectrum.
pub fn magnitude_spectrum(x: &[f64], y: &[f64]) -> Vec<[f64; 2]> {
    let n = y.len();
    let half = n / 2;
    if half == 0 {
        return Vec::new();
    }
    let spacing = sample_spacing(x);

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    let mut data: Vec<Complex<f64>> = y.iter().map(|&re| Complex { re, im: 0.0 }).collect();
    fft.process(&mut data);

    let scale = 2.0 / n as f64;
    let df = 1.0 / (n as f64 * spacing);
    data.iter()
        .take(half)
        .enumerate()
        .map(|(k, c)| [k as f64 * df, c.norm() * scale])
        .collect()
}
