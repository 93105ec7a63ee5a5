use std::fmt::Write as _;
use std::path::Path;

use specgrid::{Axis, GridError, load_grid};

/// Write z(x, y) over the given axes, one pass of the slow variable per block.
fn write_grid(path: &Path, xs: &[f64], ys: &[f64], z: impl Fn(f64, f64) -> f64, x_fast: bool) {
    let mut text = String::new();
    if x_fast {
        for &y in ys {
            for &x in xs {
                writeln!(text, "{x} {y} {}", z(x, y)).unwrap();
            }
            text.push('\n');
        }
    } else {
        for &x in xs {
            for &y in ys {
                writeln!(text, "{x} {y} {}", z(x, y)).unwrap();
            }
            text.push('\n');
        }
    }
    std::fs::write(path, text).unwrap();
}

#[test]
fn orientation_is_transparent_to_callers() {
    let dir = tempfile::tempdir().unwrap();
    let xs = [400.0, 425.5, 451.0, 476.5, 502.0];
    let ys = [0.1, -0.2, 0.35];
    let z = |x: f64, y: f64| x * 1.5 - y * y + 0.25;

    for x_fast in [false, true] {
        let path = dir.path().join(format!("grid_{x_fast}.dat"));
        write_grid(&path, &xs, &ys, z, x_fast);
        let grid = load_grid(&path).unwrap();

        assert_eq!(grid.is_transposed(), x_fast);
        assert_eq!(grid.grid_shape(), (xs.len(), ys.len()));
        for (i, &x) in xs.iter().enumerate() {
            assert_eq!(grid.axis_value(Axis::X, i).unwrap(), x);
            for (j, &y) in ys.iter().enumerate() {
                assert_eq!(grid.axis_value(Axis::Y, j).unwrap(), y);
                assert_eq!(grid.value_at(i, j).unwrap(), z(x, y), "x_fast={x_fast} at ({i}, {j})");
            }
        }
    }
}

#[test]
fn three_by_four_example_in_both_orders() {
    let dir = tempfile::tempdir().unwrap();
    let xs = [1.0, 2.0, 3.0];
    let ys = [1.0, 2.0, 3.0, 4.0];
    let z = |x: f64, y: f64| 100.0 * x + y;

    for (name, x_fast) in [("data.dat", false), ("dataT.dat", true)] {
        let path = dir.path().join(name);
        write_grid(&path, &xs, &ys, z, x_fast);
        let grid = load_grid(&path).unwrap();
        assert_eq!(grid.axis_len(Axis::X), 3, "{name}");
        assert_eq!(grid.axis_len(Axis::Y), 4, "{name}");
        assert_eq!(grid.value_at(1, 2).unwrap(), 203.0, "{name}");
    }
}

#[test]
fn ragged_file_fails_with_non_square_matrix() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ragged.dat");
    std::fs::write(&path, "1 1 11\n1 2 12\n\n2 1 21\n2 2 22\n\n3 1 31\n").unwrap();
    let err = load_grid(&path).unwrap_err();
    assert_eq!(err.kind(), "NonSquareMatrix", "got {err}");
}

#[test]
fn corrupted_axis_value_is_reported_with_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.dat");
    std::fs::write(&path, "1 1 11\n1 2 12\n1 3 13\n2 1 21\n2 9 22\n2 3 23\n").unwrap();
    match load_grid(&path) {
        Err(GridError::AxisGridCorrupted { axis, line, expected, found, .. }) => {
            assert_eq!(axis, Axis::Y);
            assert_eq!(line, 5);
            assert_eq!(expected, 2.0);
            assert_eq!(found, 9.0);
        }
        other => panic!("expected AxisGridCorrupted, got {other:?}"),
    }
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.dat");
    let err = load_grid(&path).unwrap_err();
    assert_eq!(err.kind(), "FileNotFound");
    assert!(err.to_string().contains("absent.dat"));
}
