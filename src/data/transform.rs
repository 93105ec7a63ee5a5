use anyhow::{Context, Result, bail, ensure};

use super::model::Curve;
use crate::spline;

/// Keep every `step`-th sample, starting with the first.
pub fn decimate(curve: &Curve, step: usize) -> Result<Curve> {
    ensure!(step > 0, "decimation step must be positive");
    let (x, y): (Vec<f64>, Vec<f64>) = curve.points().step_by(step).unzip();
    Ok(Curve::new(x, y))
}

/// Largest `y`, floored at zero.
fn positive_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |m, v| if v > m { v } else { m })
}

/// Scale so that the largest value becomes 1.
///
/// A curve without positive values is returned unchanged.
pub fn normalize(curve: &Curve) -> Curve {
    let max = positive_max(curve.y.iter().copied());
    if max == 0.0 {
        return curve.clone();
    }
    scale(curve, 1.0 / max)
}

/// Scale so that the largest value with `lo <= x <= hi` becomes 1.
pub fn normalize_in_window(curve: &Curve, lo: f64, hi: f64) -> Result<Curve> {
    let max = positive_max(
        curve
            .points()
            .filter(|&(x, _)| lo <= x && x <= hi)
            .map(|(_, y)| y),
    );
    if max <= 0.0 {
        bail!("no maxima found in [{lo}, {hi}]");
    }
    Ok(scale(curve, 1.0 / max))
}

pub fn scale(curve: &Curve, factor: f64) -> Curve {
    Curve::new(curve.x.clone(), curve.y.iter().map(|y| y * factor).collect())
}

pub fn shift(curve: &Curve, offset: f64) -> Curve {
    Curve::new(curve.x.iter().map(|x| x + offset).collect(), curve.y.clone())
}

/// Upper bound on the number of points of a resampling grid.
pub const MAX_SAMPLE_POINTS: usize = 10_000_000;

/// Points `start, start + step, ...` up to `end` inclusive.
pub fn sample_points(start: f64, end: f64, step: f64) -> Result<Vec<f64>> {
    ensure!(step > 0.0, "sampling step must be positive, got {step}");
    ensure!(end >= start, "sampling range [{start}, {end}] is empty");
    let span = (end - start) / step;
    ensure!(
        span.is_finite() && span < MAX_SAMPLE_POINTS as f64,
        "sampling [{start}, {end}] with step {step} exceeds {MAX_SAMPLE_POINTS} points"
    );
    let n = span as usize + 1;
    Ok((0..n).map(|i| start + i as f64 * step).collect())
}

/// Spline-resample the curve onto a regular grid.
///
/// Ends of the spline use the secant slope of the first and last segments.
pub fn resample(curve: &Curve, start: f64, end: f64, step: f64) -> Result<Curve> {
    let grid = sample_points(start, end, step)?;
    let y = spline::resample(&curve.x, &curve.y, &grid).context("spline resampling")?;
    Ok(Curve::new(grid, y))
}
