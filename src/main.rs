//! specgrid command-line interface.
//!
//! ```sh
//! specgrid grid data.dat     # print a parsed x y z table
//! specgrid run job.json      # run the transforms listed in a job file
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use specgrid::config::load_config;
use specgrid::runner::run_jobs;
use specgrid::{Axis, load_grid};

const USAGE: &str = "usage: specgrid grid <file> | specgrid run <job.json>";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [cmd, path] if cmd == "grid" => print_grid(Path::new(path)),
        [cmd, path] if cmd == "run" => run(&PathBuf::from(path)),
        _ => bail!(USAGE),
    }
}

fn print_grid(path: &Path) -> Result<()> {
    let grid = load_grid(path).map_err(|e| {
        let kind = e.kind();
        anyhow::Error::new(e).context(format!("{kind} in {}", path.display()))
    })?;

    let (nx, ny) = grid.grid_shape();
    println!("\nSizes:\nx: {}; y : {}", grid.axis_len(Axis::X), grid.axis_len(Axis::Y));
    println!("Sizes of matrix: {nx} x {ny}\n");
    for (i, x) in grid.xs().iter().enumerate() {
        println!("  x[{i}] = {x}");
    }
    println!();
    for (j, y) in grid.ys().iter().enumerate() {
        println!("  y[{j}] = {y}");
    }

    println!("\nTable:");
    for (n, (x, y, z)) in grid.triples().enumerate() {
        println!("{x} {y} {z}");
        if (n + 1) % ny == 0 {
            println!();
        }
    }
    Ok(())
}

fn run(config: &Path) -> Result<()> {
    let job = load_config(config)?;
    let report = run_jobs(&job)?;

    println!(
        "{} file(s) written, {} skipped",
        report.outputs.len(),
        report.skipped.len()
    );
    if let Some(script) = &report.plot_script {
        println!("gnuplot script: {}", script.display());
    }
    Ok(())
}
