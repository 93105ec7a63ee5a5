//! JSON job files describing which curves to transform and how.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

/// Top-level job file.
#[derive(Debug, Deserialize)]
pub struct JobFile {
    /// Directory receiving the output files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub plot: Option<PlotConfig>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Resampling grid `start, start + step, ..., end`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RangeConfig {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Job {
    /// Thin out the samples, then spline them onto a regular grid.
    Resample {
        inputs: Vec<PathBuf>,
        #[serde(default = "default_resample_prefix")]
        prefix: String,
        #[serde(default = "default_decimate")]
        decimate: usize,
        range: RangeConfig,
    },
    /// Divide by the maximum, optionally searched only inside `window`.
    Normalize {
        inputs: Vec<PathBuf>,
        #[serde(default = "default_normalize_prefix")]
        prefix: String,
        #[serde(default)]
        window: Option<[f64; 2]>,
    },
    Scale {
        inputs: Vec<PathBuf>,
        #[serde(default = "default_scale_prefix")]
        prefix: String,
        factor: f64,
    },
    Shift {
        inputs: Vec<PathBuf>,
        #[serde(default = "default_shift_prefix")]
        prefix: String,
        offset: f64,
    },
}

fn default_resample_prefix() -> String {
    "clean-".into()
}
fn default_normalize_prefix() -> String {
    "norm_".into()
}
fn default_scale_prefix() -> String {
    "scale_".into()
}
fn default_shift_prefix() -> String {
    "shift-".into()
}
fn default_decimate() -> usize {
    1
}

impl Job {
    pub fn inputs(&self) -> &[PathBuf] {
        match self {
            Job::Resample { inputs, .. }
            | Job::Normalize { inputs, .. }
            | Job::Scale { inputs, .. }
            | Job::Shift { inputs, .. } => inputs,
        }
    }

    pub fn prefix(&self) -> &str {
        match self {
            Job::Resample { prefix, .. }
            | Job::Normalize { prefix, .. }
            | Job::Scale { prefix, .. }
            | Job::Shift { prefix, .. } => prefix,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Job::Resample { .. } => "resample",
            Job::Normalize { .. } => "normalize",
            Job::Scale { .. } => "scale",
            Job::Shift { .. } => "shift",
        }
    }
}

/// Gnuplot script to write next to the outputs. The script is not run.
#[derive(Debug, Deserialize)]
pub struct PlotConfig {
    pub script: PathBuf,
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default)]
    pub xrange: Option<[f64; 2]>,
}

fn default_image() -> String {
    "compare.png".into()
}

/// Read and check a job file.
pub fn load_config(path: &Path) -> Result<JobFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading job file {}", path.display()))?;
    parse_config(&text).with_context(|| format!("in job file {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<JobFile> {
    let file: JobFile = serde_json::from_str(text).context("parsing JSON")?;
    for (i, job) in file.jobs.iter().enumerate() {
        validate(job).with_context(|| format!("job {i} ({})", job.name()))?;
    }
    if let Some(plot) = &file.plot {
        validate_plot(plot).context("plot")?;
    }
    Ok(file)
}

fn validate_plot(plot: &PlotConfig) -> Result<()> {
    let bare = plot.script.file_name().is_some_and(|n| Path::new(n) == plot.script);
    ensure!(
        bare,
        "plot script '{}' must be a file name inside output_dir",
        plot.script.display()
    );
    Ok(())
}

fn validate(job: &Job) -> Result<()> {
    match job {
        Job::Resample { decimate, range, .. } => {
            ensure!(*decimate > 0, "decimate must be at least 1");
            ensure!(range.step > 0.0, "range step must be positive");
            ensure!(range.end >= range.start, "range end is before start");
        }
        Job::Normalize {
            window: Some([lo, hi]),
            ..
        } => ensure!(lo <= hi, "window [{lo}, {hi}] is empty"),
        Job::Normalize { window: None, .. } | Job::Scale { .. } | Job::Shift { .. } => {}
    }
    Ok(())
}
