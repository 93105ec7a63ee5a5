use std::fmt;

use crate::error::GridError;

// ---------------------------------------------------------------------------
// Axis – one of the two independent variables of a grid
// ---------------------------------------------------------------------------

/// Independent variable of a tabulated function `z(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// First column of the file, index 0.
    X,
    /// Second column of the file, index 1.
    Y,
}

impl Axis {
    /// Map the numeric axis index used by callers (0 or 1).
    pub fn from_index(index: usize) -> Result<Self, GridError> {
        match index {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            _ => Err(GridError::IndexOutOfRange { index, len: 2 }),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

// ---------------------------------------------------------------------------
// Curve – a two-column sample sequence
// ---------------------------------------------------------------------------

/// A single measured curve, e.g. intensity over wavelength.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    /// Abscissa (wavelength, energy, ...).
    pub x: Vec<f64>,
    /// Ordinate – same length as `x`.
    pub y: Vec<f64>,
}

impl Curve {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Curve { x, y }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Grid2D – dense table z[i][j] = z(xs[i], ys[j])
// ---------------------------------------------------------------------------

/// A rectangular table of `z` over two axes, loaded from an `x y z` file.
///
/// The matrix is kept exactly as it was read: one stored row per pass of
/// the slow variable. When `x` was the fast variable the stored rows run
/// along `x`, and every accessor swaps the indices so that callers always
/// see `value_at(i, j) == z(xs[i], ys[j])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D {
    xs: Vec<f64>,
    ys: Vec<f64>,
    rows: Vec<Vec<f64>>,
    transposed: bool,
}

impl Grid2D {
    /// Assemble a grid from parts already checked by the parser.
    pub(crate) fn from_parts(
        xs: Vec<f64>,
        ys: Vec<f64>,
        rows: Vec<Vec<f64>>,
        transposed: bool,
    ) -> Self {
        Grid2D {
            xs,
            ys,
            rows,
            transposed,
        }
    }

    /// Number of samples along `axis`.
    pub fn axis_len(&self, axis: Axis) -> usize {
        self.axis(axis).len()
    }

    /// All samples of `axis`, in order of first appearance in the file.
    pub fn axis(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => &self.xs,
            Axis::Y => &self.ys,
        }
    }

    pub fn axis_value(&self, axis: Axis, index: usize) -> Result<f64, GridError> {
        let values = self.axis(axis);
        values.get(index).copied().ok_or(GridError::IndexOutOfRange {
            index,
            len: values.len(),
        })
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// `(nx, ny)` derived from the stored matrix and the transpose flag.
    pub fn grid_shape(&self) -> (usize, usize) {
        let outer = self.rows.len();
        let inner = self.rows.first().map_or(0, Vec::len);
        if self.transposed {
            (inner, outer)
        } else {
            (outer, inner)
        }
    }

    /// Whether `x` varied fastest in the source file.
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    /// `z` at `(xs[i], ys[j])`.
    pub fn value_at(&self, i: usize, j: usize) -> Result<f64, GridError> {
        let (nx, ny) = self.grid_shape();
        if i >= nx {
            return Err(GridError::IndexOutOfRange { index: i, len: nx });
        }
        if j >= ny {
            return Err(GridError::IndexOutOfRange { index: j, len: ny });
        }
        let (outer, inner) = if self.transposed { (j, i) } else { (i, j) };
        Ok(self.rows[outer][inner])
    }

    /// Iterate `(x, y, z)` with `y` fastest, the layout of a y-fast file.
    pub fn triples(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        let (nx, ny) = self.grid_shape();
        (0..nx).flat_map(move |i| {
            (0..ny).map(move |j| {
                let (outer, inner) = if self.transposed { (j, i) } else { (i, j) };
                (self.xs[i], self.ys[j], self.rows[outer][inner])
            })
        })
    }
}
