//! Writes small sample inputs into the current directory:
//! `data.dat` / `dataT.dat` (the same 3x4 grid in both loop orders),
//! `noisy.dat` (a synthetic spectrum) and `job.json` (a resample job for it).

use std::fmt::Write as _;

use anyhow::{Context, Result};
use log::info;
use serde_json::json;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Reproducible measurement noise: splitmix64 uniforms, Box-Muller normals.
struct Noise(u64);

impl Noise {
    fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        ((z ^ (z >> 31)) >> 11) as f64 / (1u64 << 53) as f64
    }

    fn normal(&mut self, std_dev: f64) -> f64 {
        let r = (-2.0 * self.uniform().max(f64::MIN_POSITIVE).ln()).sqrt();
        std_dev * r * (std::f64::consts::TAU * self.uniform()).cos()
    }
}

/// `z = 100*x + y` over x in 1..=3, y in 1..=4, blank line after each pass.
fn grid_text(x_fast: bool) -> String {
    let z = |x: u32, y: u32| 100 * x + y;
    let mut out = String::new();
    if x_fast {
        for y in 1..=4 {
            for x in 1..=3 {
                let _ = writeln!(out, "{x} {y} {}", z(x, y));
            }
            out.push('\n');
        }
    } else {
        for x in 1..=3 {
            for y in 1..=4 {
                let _ = writeln!(out, "{x} {y} {}", z(x, y));
            }
            out.push('\n');
        }
    }
    out
}

fn write(path: &str, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("writing {path}"))?;
    info!("wrote {path}");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    write("data.dat", &grid_text(false))?;
    write("dataT.dat", &grid_text(true))?;

    // Wavelengths: 350 → 850 nm, step 0.25
    let mut noise = Noise(42);
    let peaks = [(520.0, 25.0, 0.8), (610.0, 40.0, 1.0), (700.0, 15.0, 0.3)];
    let mut spectrum = String::new();
    for i in 0..2001 {
        let wl = 350.0 + i as f64 * 0.25;
        let signal: f64 = peaks
            .iter()
            .map(|&(mu, sigma, amp)| gaussian(wl, mu, sigma, amp))
            .sum();
        let _ = writeln!(spectrum, "{wl} {}", signal + noise.normal(0.02));
    }
    write("noisy.dat", &spectrum)?;

    let job = json!({
        "output_dir": ".",
        "jobs": [
            { "kind": "resample", "inputs": ["noisy.dat"], "prefix": "clean-",
              "decimate": 15, "range": { "start": 375.0, "end": 800.0, "step": 2.0 } },
            { "kind": "normalize", "inputs": ["clean-noisy.dat"], "window": [550.0, 700.0] }
        ],
        "plot": { "script": "cleaned.plt", "image": "cleaned.png", "xrange": [375.0, 800.0] }
    });
    let text = serde_json::to_string_pretty(&job).context("serialising job file")?;
    write("job.json", &text)?;

    println!("Wrote data.dat, dataT.dat, noisy.dat and job.json");
    Ok(())
}
