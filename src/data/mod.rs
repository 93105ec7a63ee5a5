/// Data layer: core types, loading, transforms and output.
///
/// Architecture:
/// ```text
///  x y z table            x y curve (.dat / .csv)
///        │                        │
///        ▼                        ▼
///   ┌──────────┐            ┌──────────┐
///   │   grid    │           │  loader   │  parse file → Curve
///   └──────────┘            └──────────┘
///        │                        │
///        ▼                        ▼
///   ┌──────────┐            ┌───────────┐
///   │  Grid2D   │           │ transform  │  decimate / normalize / scale /
///   └──────────┘            └───────────┘  shift / spline resample
///                                 │
///                                 ▼
///                           ┌──────────┐
///                           │  writer   │  "x y" lines, gnuplot script
///                           └──────────┘
/// ```

pub mod grid;
pub mod loader;
pub mod model;
pub mod transform;
pub mod writer;
