//! Piecewise-linear resampling of a candidate curve.
//!
//! The simulation and the experiment sample the skin-friction curve at
//! different Reynolds numbers. Before the two can be compared, the candidate
//! is evaluated at the reference's x values:
//!
//! ```text
//! y(q) = y0 + (y1 - y0) * (q - x0) / (x1 - x0),   x0 < q < x1
//! ```
//!
//! Rules:
//! - a query that hits a sample exactly returns that sample's y unchanged
//! - a query outside `[min(x), max(x)]` is a `Domain` error (no extrapolation)
//! - candidates with fewer than 2 distinct x values are rejected
//! - unsorted candidates are stably sorted by x first

use std::borrow::Cow;

use crate::domain::Series;
use crate::error::EvalError;

/// Resample `candidate` at every point of `query`.
pub fn align(candidate: &Series, query: &[f64]) -> Result<Vec<f64>, EvalError> {
    if candidate.x.len() != candidate.y.len() {
        return Err(EvalError::LengthMismatch {
            left: candidate.x.len(),
            right: candidate.y.len(),
        });
    }

    let (xs, ys) = sorted_by_x(candidate);

    let distinct = count_distinct_sorted(&xs);
    if distinct < 2 {
        return Err(EvalError::Degenerate { distinct });
    }

    let min = xs[0];
    let max = xs[xs.len() - 1];

    query
        .iter()
        .map(|&q| {
            // Written this way round so NaN queries also fail.
            if !(q >= min && q <= max) {
                return Err(EvalError::Domain { x: q, min, max });
            }
            Ok(interpolate_sorted(&xs, &ys, q))
        })
        .collect()
}

fn sorted_by_x(series: &Series) -> (Cow<'_, [f64]>, Cow<'_, [f64]>) {
    let is_sorted = series.x.windows(2).all(|w| w[0] <= w[1]);
    if is_sorted {
        return (Cow::Borrowed(&series.x[..]), Cow::Borrowed(&series.y[..]));
    }

    let mut order: Vec<usize> = (0..series.x.len()).collect();
    order.sort_by(|&a, &b| series.x[a].total_cmp(&series.x[b]));
    let xs: Vec<f64> = order.iter().map(|&i| series.x[i]).collect();
    let ys: Vec<f64> = order.iter().map(|&i| series.y[i]).collect();
    (Cow::Owned(xs), Cow::Owned(ys))
}

fn count_distinct_sorted(xs: &[f64]) -> usize {
    if xs.is_empty() {
        return 0;
    }
    1 + xs.windows(2).filter(|w| w[1] > w[0]).count()
}

/// `q` must lie within `[xs[0], xs[n-1]]`.
fn interpolate_sorted(xs: &[f64], ys: &[f64], q: f64) -> f64 {
    let i = xs.partition_point(|&v| v < q);
    if xs[i] == q {
        return ys[i];
    }

    // xs[i - 1] < q < xs[i]
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    y0 + (y1 - y0) * (q - x0) / (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(x: &[f64], y: &[f64]) -> Series {
        Series::new(x.to_vec(), y.to_vec()).unwrap()
    }

    #[test]
    fn aligning_onto_own_points_is_identity() {
        let s = series(&[0.0, 0.3, 1.7, 2.0, 9.5], &[0.1, 0.7, -3.2, 4.4, 1.0 / 3.0]);
        let aligned = align(&s, &s.x).unwrap();
        assert_eq!(aligned, s.y);
    }

    #[test]
    fn interpolates_between_samples() {
        let s = series(&[0.0, 1.0, 2.0], &[0.0, 0.4, 0.8]);
        let aligned = align(&s, &[0.5, 1.4]).unwrap();
        assert!((aligned[0] - 0.2).abs() < 1e-12);
        assert!((aligned[1] - 0.56).abs() < 1e-12);
    }

    #[test]
    fn unsorted_candidate_is_sorted_first() {
        let s = series(&[2.0, 0.0, 1.0], &[20.0, 0.0, 10.0]);
        let aligned = align(&s, &[0.5, 1.5, 2.0]).unwrap();
        assert!((aligned[0] - 5.0).abs() < 1e-12);
        assert!((aligned[1] - 15.0).abs() < 1e-12);
        assert_eq!(aligned[2], 20.0);
    }

    #[test]
    fn out_of_range_query_is_domain_error() {
        let s = series(&[0.0, 10.0], &[1.0, 1.0]);
        match align(&s, &[5.0, 10.5]) {
            Err(EvalError::Domain { x, min, max }) => {
                assert_eq!(x, 10.5);
                assert_eq!((min, max), (0.0, 10.0));
            }
            other => panic!("expected domain error, got {other:?}"),
        }
        assert!(matches!(
            align(&s, &[f64::NAN]),
            Err(EvalError::Domain { .. })
        ));
    }

    #[test]
    fn needs_two_distinct_points() {
        let s = series(&[1.0, 1.0], &[0.0, 2.0]);
        assert!(matches!(
            align(&s, &[1.0]),
            Err(EvalError::Degenerate { distinct: 1 })
        ));
        assert!(matches!(
            align(&Series::default(), &[]),
            Err(EvalError::Degenerate { distinct: 0 })
        ));
    }

    #[test]
    fn output_length_matches_query() {
        let s = series(&[0.0, 4.0], &[0.0, 8.0]);
        let q = [0.0, 1.0, 2.0, 3.0, 4.0];
        let aligned = align(&s, &q).unwrap();
        assert_eq!(aligned.len(), q.len());
        assert!(align(&s, &[]).unwrap().is_empty());
    }
}
