//! Optimal cluster-count selection over a K-means inertia curve.
//!
//! Runs the full k = 1..=k_max sweep, then locates the knee of the
//! (k, inertia) curve. Falls back to a discrete second-difference
//! heuristic when no knee is detectable.

use rayon::prelude::*;

use vizlab_core::Matrix;

use crate::algorithms::kmeans::KMeansConfig;
use crate::error::AnalyticsError;

/// Knee-detector sensitivity. Larger values demand a sharper bend.
const SENSITIVITY: f64 = 1.0;

/// A selected cluster count together with the curve it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct KSelection {
    /// Chosen cluster count, always within 1..=k_max.
    pub k: usize,
    /// Inertia for each k in ascending order, one entry per candidate.
    pub inertia_curve: Vec<f64>,
}

/// Choose a cluster count balancing fit quality against model complexity.
///
/// Fits seeded K-means for every k in 1..=`k_max` and records the inertia.
/// The sweep always runs to completion: the knee detector needs the entire
/// curve, so no candidate may be skipped even if the curve plateaus early.
///
/// Deterministic for identical input and `k_max` (seed and re-init count
/// are fixed inside [`KMeansConfig::new`]).
pub fn select_k(data: &Matrix, k_max: usize) -> Result<KSelection, AnalyticsError> {
    let n = data.n_rows();
    if k_max == 0 || k_max > n {
        return Err(AnalyticsError::InvalidK { got: k_max, max: n });
    }

    // Each candidate fit is independently seeded, so evaluating them in
    // parallel is bit-identical to a serial sweep.
    let inertia_curve: Vec<f64> = (0..k_max)
        .into_par_iter()
        .map(|i| KMeansConfig::new(i + 1).fit(data).map(|fit| fit.inertia))
        .collect::<Result<Vec<_>, _>>()?;

    let k = match knee_point(&inertia_curve) {
        Some(idx) => idx + 1,
        None => second_difference_fallback(&inertia_curve),
    };

    Ok(KSelection { k, inertia_curve })
}

/// Locate the knee of a convex, decreasing curve.
///
/// Both axes are normalized to [0,1]; the curve is flipped vertically so the
/// difference against the diagonal measures the distance between the curve
/// and the straight line connecting its endpoints. A local maximum of that
/// difference is declared the knee once the difference falls below
/// `max - S * mean_spacing` before the next local maximum.
///
/// Returns the 0-based curve index of the knee, or `None` when the curve is
/// flat, nearly linear, or has fewer than 3 points.
fn knee_point(curve: &[f64]) -> Option<usize> {
    let n = curve.len();
    if n < 3 {
        return None;
    }

    let y_min = curve.iter().copied().fold(f64::MAX, f64::min);
    let y_max = curve.iter().copied().fold(f64::MIN, f64::max);
    let span = y_max - y_min;
    if span <= 0.0 {
        // Flat curve: every k fits equally well, no knee exists.
        return None;
    }

    let step = 1.0 / (n - 1) as f64;
    let diff: Vec<f64> = curve
        .iter()
        .enumerate()
        .map(|(i, &y)| {
            let x = i as f64 * step;
            let y_flipped = 1.0 - (y - y_min) / span;
            y_flipped - x
        })
        .collect();

    // Interior local maxima of the difference curve, in order.
    let maxima: Vec<usize> = (1..n - 1)
        .filter(|&i| diff[i] > diff[i - 1] && diff[i] >= diff[i + 1])
        .collect();
    if maxima.is_empty() {
        return None;
    }

    for (m, &lmx) in maxima.iter().enumerate() {
        let threshold = diff[lmx] - SENSITIVITY * step;
        let stop = maxima.get(m + 1).copied().unwrap_or(n - 1);
        for &d in &diff[lmx + 1..=stop] {
            if d < threshold {
                return Some(lmx);
            }
        }
    }

    None
}

/// Second-difference heuristic for curves without a detectable knee.
///
/// Takes the first occurrence of the maximum second difference and shifts
/// its index back onto the k axis (the second-difference sequence is two
/// entries shorter than the curve and leads it by one position). Curves
/// shorter than 3 points select k = 1.
fn second_difference_fallback(curve: &[f64]) -> usize {
    if curve.len() < 3 {
        return 1;
    }

    let mut best_idx = 0;
    let mut best = f64::NEG_INFINITY;
    for i in 0..curve.len() - 2 {
        let d2 = curve[i + 2] - 2.0 * curve[i + 1] + curve[i];
        if d2 > best {
            best = d2;
            best_idx = i;
        }
    }

    best_idx + 2
}
