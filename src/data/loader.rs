use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::debug;

use super::grid::parse_grid;
use super::model::{Curve, Grid2D};
use crate::error::GridError;

// ---------------------------------------------------------------------------
// Grid tables
// ---------------------------------------------------------------------------

/// Load an `x y z` table from disk.
///
/// Blank lines are ignored; every other line must hold exactly three numbers.
pub fn load_grid(path: &Path) -> Result<Grid2D, GridError> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => GridError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => GridError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    debug!("loading grid from {}", path.display());
    parse_grid(&text)
}

// ---------------------------------------------------------------------------
// Two-column curves
// ---------------------------------------------------------------------------

/// Load a two-column curve.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` – comma separated, no header, first two columns are `x`, `y`
/// * anything else – whitespace separated numbers read pairwise as `x y`
pub fn load_curve(path: &Path) -> Result<Curve> {
    if !path.exists() {
        bail!("File {} not found", path.display());
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let curve = match ext.as_str() {
        "csv" => load_csv(path),
        _ => load_columns(path),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    debug!("{}: {} samples", path.display(), curve.len());
    Ok(curve)
}

fn load_columns(path: &Path) -> Result<Curve> {
    let text = std::fs::read_to_string(path).context("reading data file")?;
    parse_columns(&text)
}

/// Read whitespace separated numbers pairwise.  Line breaks carry no meaning,
/// only the token order does.
pub fn parse_columns(text: &str) -> Result<Curve> {
    let values = text
        .split_whitespace()
        .enumerate()
        .map(|(j, tok)| {
            tok.parse::<f64>()
                .with_context(|| format!("token {j}: '{tok}' is not a number"))
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.len() % 2 != 0 {
        bail!("odd number of values ({}): last x has no y", values.len());
    }

    let (x, y) = values.chunks_exact(2).map(|p| (p[0], p[1])).unzip();
    Ok(Curve::new(x, y))
}

fn load_csv(path: &Path) -> Result<Curve> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let mut curve = Curve::default();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let x = parse_field(record.get(0), row_no, "x")?;
        let y = parse_field(record.get(1), row_no, "y")?;
        curve.x.push(x);
        curve.y.push(y);
    }
    Ok(curve)
}

fn parse_field(field: Option<&str>, row: usize, col: &str) -> Result<f64> {
    let s = field.with_context(|| format!("Row {row}: missing '{col}' column"))?;
    s.parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a number"))
}
