//! Cubic spline through a tabulated curve.
//!
//! The spline is split into a build step, which solves the tridiagonal
//! system for the second derivative at every knot, and a pure evaluation
//! step that takes the same samples back together with the solved state.
//! Samples are never copied into the state.
//!
//! Boundary conditions are first derivatives imposed at both ends. The
//! resampling helpers pass the secant slope of the edge segments, so a
//! linear input is reproduced exactly, inside and outside the sampled range.

use log::debug;

use crate::error::SplineError;

/// Second derivatives of the spline at each knot, indexed like the samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineState {
    y2: Vec<f64>,
}

impl SplineState {
    pub fn second_derivatives(&self) -> &[f64] {
        &self.y2
    }

    pub fn len(&self) -> usize {
        self.y2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y2.is_empty()
    }
}

/// Slopes of the first and last segments, used as endpoint derivatives.
pub fn secant_slopes(xs: &[f64], ys: &[f64]) -> Result<(f64, f64), SplineError> {
    check_samples(xs, ys)?;
    let n = xs.len();
    let left = (ys[1] - ys[0]) / (xs[1] - xs[0]);
    let right = (ys[n - 1] - ys[n - 2]) / (xs[n - 1] - xs[n - 2]);
    Ok((left, right))
}

/// Solve for the knot second derivatives.
///
/// `yp1` and `ypn` are the first derivatives at `xs[0]` and `xs[n-1]`.
pub fn build(xs: &[f64], ys: &[f64], yp1: f64, ypn: f64) -> Result<SplineState, SplineError> {
    check_samples(xs, ys)?;

    let n = xs.len();
    let mut y2 = vec![0.0; n];
    let mut u = vec![0.0; n];

    // Forward elimination
    y2[0] = -0.5;
    u[0] = (3.0 / (xs[1] - xs[0])) * ((ys[1] - ys[0]) / (xs[1] - xs[0]) - yp1);
    for i in 1..n - 1 {
        let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
        let p = sig * y2[i - 1] + 2.0;
        y2[i] = (sig - 1.0) / p;
        let d = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
            - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
        u[i] = (6.0 * d / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
    }

    let qn = 0.5;
    let hn = xs[n - 1] - xs[n - 2];
    let un = (3.0 / hn) * (ypn - (ys[n - 1] - ys[n - 2]) / hn);
    y2[n - 1] = (un - qn * u[n - 2]) / (qn * y2[n - 2] + 1.0);

    // Back substitution
    for k in (0..n - 1).rev() {
        y2[k] = y2[k] * y2[k + 1] + u[k];
    }

    debug!("spline built over {n} knots [{}, {}]", xs[0], xs[n - 1]);
    Ok(SplineState { y2 })
}

/// Evaluate the spline at `x`.
///
/// Queries outside `[xs[0], xs[n-1]]` use the cubic of the nearest end
/// segment; they are not clamped.
pub fn evaluate(xs: &[f64], ys: &[f64], state: &SplineState, x: f64) -> Result<f64, SplineError> {
    let n = xs.len();
    if ys.len() != n || state.len() != n {
        return Err(SplineError::invalid(format!(
            "xs has {n} values, ys {}, spline state {}",
            ys.len(),
            state.len()
        )));
    }
    if n < 2 {
        return Err(SplineError::invalid(format!("need at least 2 samples, got {n}")));
    }

    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = (hi + lo) / 2;
        if xs[mid] > x {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    let h = xs[hi] - xs[lo];
    if h == 0.0 {
        return Err(SplineError::DegenerateInterval { lo, hi, x });
    }
    let a = (xs[hi] - x) / h;
    let b = (x - xs[lo]) / h;
    let y2 = &state.y2;
    Ok(a * ys[lo]
        + b * ys[hi]
        + ((a * a * a - a) * y2[lo] + (b * b * b - b) * y2[hi]) * h * h / 6.0)
}

/// Build a spline with secant-slope ends and evaluate it at every query.
pub fn resample(xs: &[f64], ys: &[f64], queries: &[f64]) -> Result<Vec<f64>, SplineError> {
    let (yp1, ypn) = secant_slopes(xs, ys)?;
    let state = build(xs, ys, yp1, ypn)?;
    queries.iter().map(|&q| evaluate(xs, ys, &state, q)).collect()
}

fn check_samples(xs: &[f64], ys: &[f64]) -> Result<(), SplineError> {
    if xs.len() != ys.len() {
        return Err(SplineError::invalid(format!(
            "xs has {} values but ys has {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(SplineError::invalid(format!(
            "need at least 2 samples, got {}",
            xs.len()
        )));
    }
    if let Some(i) = (1..xs.len()).find(|&i| !(xs[i] > xs[i - 1])) {
        return Err(SplineError::invalid(format!(
            "xs not strictly increasing at index {i} ({} after {})",
            xs[i],
            xs[i - 1]
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_passes_through_knots() {
        let xs = vec![1.0, 2.0, 3.5, 4.0, 5.0, 7.25];
        let ys = vec![2.0, 3.0, 5.0, 4.0, 1.0, -2.5];
        let (l, r) = secant_slopes(&xs, &ys).unwrap();
        let state = build(&xs, &ys, l, r).unwrap();
        assert_eq!(state.len(), xs.len());

        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let v = evaluate(&xs, &ys, &state, x).unwrap();
            assert!(close(v, y), "spline({x}) = {v}, expected {y}");
        }
    }

    #[test]
    fn test_linear_reproduced_including_extrapolation() {
        let xs: Vec<f64> = vec![0.0, 0.5, 1.7, 2.0, 3.1, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.5 * x - 1.0).collect();
        let (l, r) = secant_slopes(&xs, &ys).unwrap();
        let state = build(&xs, &ys, l, r).unwrap();

        for &q in &[-3.0, -0.1, 0.25, 1.0, 2.9, 4.0, 6.5] {
            let v = evaluate(&xs, &ys, &state, q).unwrap();
            let expected = 2.5 * q - 1.0;
            assert!(close(v, expected), "spline({q}) = {v}, expected {expected}");
        }
    }

    #[test]
    fn test_two_samples_is_linear() {
        let xs = [1.0, 3.0];
        let ys = [2.0, 6.0];
        let out = resample(&xs, &ys, &[0.0, 2.0, 4.0]).unwrap();
        assert!(close(out[0], 0.0));
        assert!(close(out[1], 4.0));
        assert!(close(out[2], 8.0));
    }

    #[test]
    fn test_boundary_derivatives_are_respected() {
        // Cubic data with exact end slopes: the clamped spline reproduces it.
        let f = |x: f64| x * x * x;
        let xs: Vec<f64> = (0..=10).map(|i| i as f64 * 0.3).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();
        let end = *xs.last().unwrap();
        let state = build(&xs, &ys, 0.0, 3.0 * end * end).unwrap();
        for &q in &[0.1, 0.75, 1.6, 2.95] {
            let v = evaluate(&xs, &ys, &state, q).unwrap();
            assert!((v - f(q)).abs() < 1e-9, "spline({q}) = {v}, expected {}", f(q));
        }
    }

    #[test]
    fn test_duplicate_x_rejected_at_build() {
        let err = build(&[0.0, 1.0, 1.0, 2.0], &[0.0, 1.0, 2.0, 3.0], 1.0, 1.0).unwrap_err();
        assert!(matches!(err, SplineError::InvalidInput { .. }));
    }

    #[test]
    fn test_unsorted_and_short_input_rejected() {
        assert!(build(&[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0], 0.0, 0.0).is_err());
        assert!(build(&[0.0], &[0.0], 0.0, 0.0).is_err());
        assert!(build(&[0.0, 1.0], &[0.0], 0.0, 0.0).is_err());
    }

    #[test]
    fn test_degenerate_interval_on_evaluate() {
        let state = build(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0], 1.0, 3.0).unwrap();
        let err = evaluate(&[0.0, 1.0, 1.0], &[0.0, 1.0, 4.0], &state, 1.5).unwrap_err();
        assert_eq!(err, SplineError::DegenerateInterval { lo: 1, hi: 2, x: 1.5 });
    }

    #[test]
    fn test_state_length_mismatch() {
        let state = build(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0], 1.0, 3.0).unwrap();
        assert!(evaluate(&[0.0, 1.0], &[0.0, 1.0], &state, 0.5).is_err());
    }
}
