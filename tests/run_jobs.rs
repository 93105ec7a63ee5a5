use std::fmt::Write as _;

use specgrid::config::parse_config;
use specgrid::load_curve;
use specgrid::runner::run_jobs;

#[test]
fn resample_normalize_and_plot_script() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("line.dat");
    let mut text = String::new();
    for i in 0..200 {
        let x = 400.0 + i as f64;
        writeln!(text, "{x} {}", 0.5 * x - 100.0).unwrap();
    }
    std::fs::write(&input, text).unwrap();

    let config = format!(
        r#"{{
            "output_dir": {out:?},
            "jobs": [
                {{ "kind": "resample", "inputs": [{inp:?}], "decimate": 10,
                   "range": {{ "start": 450.0, "end": 550.0, "step": 5.0 }} }},
                {{ "kind": "scale", "inputs": [{inp:?}, "nowhere.dat"], "factor": 2.0 }}
            ],
            "plot": {{ "script": "plot.plt", "image": "out.png" }}
        }}"#,
        out = dir.path().display().to_string(),
        inp = input.display().to_string(),
    );
    let job = parse_config(&config).unwrap();
    let report = run_jobs(&job).unwrap();

    assert_eq!(report.outputs.len(), 2);
    assert_eq!(report.skipped.len(), 1);

    let resampled = load_curve(&dir.path().join("clean-line.dat")).unwrap();
    assert_eq!(resampled.len(), 21);
    for (x, y) in resampled.points() {
        assert!((y - (0.5 * x - 100.0)).abs() < 1e-9, "at {x}: {y}");
    }

    let scaled = load_curve(&dir.path().join("scale_line.dat")).unwrap();
    assert_eq!(scaled.y[0], 2.0 * (0.5 * 400.0 - 100.0));

    let script = std::fs::read_to_string(report.plot_script.unwrap()).unwrap();
    assert!(script.contains("set output \"out.png\""));
    assert!(script.contains("\n\"clean-line.dat\" u 1:2 w l smooth mcsplines, \\\n"));
    assert!(script.contains("\n\"scale_line.dat\" u 1:2 w l smooth mcsplines\n"));
    assert!(!script.contains(&dir.path().display().to_string()));
}

#[test]
fn missing_resample_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = format!(
        r#"{{ "output_dir": {out:?}, "jobs": [ {{ "kind": "resample", "inputs": ["gone.dat"],
            "range": {{ "start": 0.0, "end": 1.0, "step": 0.5 }} }} ] }}"#,
        out = dir.path().display().to_string(),
    );
    let job = parse_config(&config).unwrap();
    let err = run_jobs(&job).unwrap_err();
    assert!(format!("{err:#}").contains("gone.dat"));
}
