use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::Curve;

/// Write one `x y` line per sample.
pub fn write_curve(path: &Path, curve: &Curve) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for (x, y) in curve.points() {
        writer
            .write_record(&[x.to_string(), y.to_string()])
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer.flush().with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

/// Settings for the generated gnuplot script.
#[derive(Debug, Clone)]
pub struct PlotSpec<'a> {
    pub image: &'a str,
    pub xrange: Option<[f64; 2]>,
}

/// Gnuplot script drawing every data file as a smoothed line into a PNG.
pub fn plot_script(spec: &PlotSpec<'_>, files: &[String]) -> String {
    let mut out = String::new();
    out.push_str("set term png enhanced size 1024,768\n");
    let _ = writeln!(out, "set output \"{}\"", spec.image);
    if let Some([lo, hi]) = spec.xrange {
        let _ = writeln!(out, "set xrange[{lo} : {hi}]");
    }
    out.push_str("plot \\\n");
    let entries: Vec<String> = files
        .iter()
        .map(|f| format!("\"{f}\" u 1:2 w l smooth mcsplines"))
        .collect();
    out.push_str(&entries.join(", \\\n"));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_script_layout() {
        let spec = PlotSpec {
            image: "compare.png",
            xrange: Some([450.0, 750.0]),
        };
        let script = plot_script(&spec, &["a.dat".into(), "b.dat".into()]);
        let expected = "set term png enhanced size 1024,768\n\
                        set output \"compare.png\"\n\
                        set xrange[450 : 750]\n\
                        plot \\\n\
                        \"a.dat\" u 1:2 w l smooth mcsplines, \\\n\
                        \"b.dat\" u 1:2 w l smooth mcsplines\n";
        assert_eq!(script, expected);
    }

    #[test]
    fn test_write_curve_space_delimited() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.dat");
        write_curve(&path, &Curve::new(vec![450.0, 451.5], vec![0.25, -1.0])).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "450 0.25\n451.5 -1\n");
    }
}
