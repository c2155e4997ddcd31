//! Least-squares helpers for trend fitting.

/// Result of regressing a value sequence against its indices `0..n-1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient, in [-1, 1].
    pub r: f64,
}

/// Fit a straight line through `values` indexed by `0..n-1`.
///
/// Returns `None` for fewer than two points. A constant sequence has an
/// undefined correlation; it is reported as `r = 0.0` so a flat series
/// reads as the weakest possible fit instead of an error.
pub fn linear_fit(values: &[f64]) -> Option<LinearFit> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let nf = n as f64;
    let mean_x = (nf - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let denom = (sxx * syy).sqrt();
    let r = if denom > 0.0 { (sxy / denom).clamp(-1.0, 1.0) } else { 0.0 };

    Some(LinearFit { slope, intercept, r })
}

/// Population standard deviation (ddof = 0, matching numpy's default).
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
