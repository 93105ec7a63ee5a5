//! Job runner: loads each input curve, applies the job's transform and
//! writes the result next to the other outputs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{info, warn};

use crate::config::{Job, JobFile};
use crate::data::loader::load_curve;
use crate::data::model::Curve;
use crate::data::transform;
use crate::data::writer::{PlotSpec, plot_script, write_curve};

/// Files produced by a run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outputs: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub plot_script: Option<PathBuf>,
}

/// Run every job in order.
pub fn run_jobs(file: &JobFile) -> Result<RunReport> {
    std::fs::create_dir_all(&file.output_dir)
        .with_context(|| format!("creating {}", file.output_dir.display()))?;

    let mut report = RunReport::default();
    for job in &file.jobs {
        for input in job.inputs() {
            info!("working on '{}' ({})", input.display(), job.name());
            let out = output_path(&file.output_dir, job.prefix(), input)?;
            if run_one(job, input, &out)? {
                report.outputs.push(out);
            } else {
                report.skipped.push(input.clone());
            }
        }
    }

    if let Some(plot) = &file.plot {
        // The script sits in the output directory; list outputs relative to it.
        let names: Vec<String> = report
            .outputs
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        let spec = PlotSpec {
            image: &plot.image,
            xrange: plot.xrange,
        };
        let script_path = file.output_dir.join(&plot.script);
        std::fs::write(&script_path, plot_script(&spec, &names))
            .with_context(|| format!("writing {}", script_path.display()))?;
        info!("plot script written to {}", script_path.display());
        report.plot_script = Some(script_path);
    }
    Ok(report)
}

/// Returns `false` when the input was skipped.
fn run_one(job: &Job, input: &Path, out: &Path) -> Result<bool> {
    // Scale and shift tolerate missing inputs; the other jobs need all of theirs.
    if !input.exists() && matches!(job, Job::Scale { .. } | Job::Shift { .. }) {
        warn!("skipping '{}': file not found", input.display());
        return Ok(false);
    }

    let curve = load_curve(input)?;
    let result = apply(job, &curve).with_context(|| format!("processing {}", input.display()))?;
    write_curve(out, &result)?;
    Ok(true)
}

fn apply(job: &Job, curve: &Curve) -> Result<Curve> {
    match job {
        Job::Resample {
            decimate, range, ..
        } => {
            let thinned = transform::decimate(curve, *decimate)?;
            transform::resample(&thinned, range.start, range.end, range.step)
        }
        Job::Normalize { window: None, .. } => Ok(transform::normalize(curve)),
        Job::Normalize {
            window: Some([lo, hi]),
            ..
        } => transform::normalize_in_window(curve, *lo, *hi),
        Job::Scale { factor, .. } => Ok(transform::scale(curve, *factor)),
        Job::Shift { offset, .. } => Ok(transform::shift(curve, *offset)),
    }
}

fn output_path(dir: &Path, prefix: &str, input: &Path) -> Result<PathBuf> {
    let Some(name) = input.file_name().and_then(|n| n.to_str()) else {
        bail!("input path '{}' has no file name", input.display());
    };
    Ok(dir.join(format!("{prefix}{name}")))
}
