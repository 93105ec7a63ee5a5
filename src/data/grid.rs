//! Line-by-line parser for `x y z` grid tables.
//!
//! A grid file lists every `(x, y)` pair once, walking one variable in an
//! inner loop and the other in an outer loop:
//!
//! ```text
//!  y fast          x fast
//!  1 1 101         1 1 101
//!  1 2 102         2 1 102
//!  1 3 103         3 1 103
//!
//!  2 1 201         1 2 201
//!  2 2 202         2 2 202
//!  2 3 203         3 2 203
//! ```
//!
//! Which variable is fast is not declared anywhere; it is inferred from the
//! second data line and then held fixed. Each subsequent line either stays
//! in the current pass (only the fast variable moved) or starts the next
//! pass (both moved, and the fast variable went back to its first value).

use log::debug;

use super::model::{Axis, Grid2D};
use crate::error::GridError;

/// Where the parser stands with respect to the file layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Nothing read yet.
    FirstRow,
    /// One line read; no variable has moved yet.
    FastAxisUnknown,
    /// The given axis changes on every line within a pass.
    FastAxis(Axis),
}

/// Incremental grid builder; feed lines in file order, then [`finish`].
///
/// [`finish`]: GridParser::finish
#[derive(Debug, Clone)]
pub struct GridParser {
    state: ParseState,
    xs: Vec<f64>,
    ys: Vec<f64>,
    rows: Vec<Vec<f64>>,
    current: Vec<f64>,
    ix: usize,
    iy: usize,
}

impl Default for GridParser {
    fn default() -> Self {
        Self::new()
    }
}

impl GridParser {
    pub fn new() -> Self {
        GridParser {
            state: ParseState::FirstRow,
            xs: Vec::new(),
            ys: Vec::new(),
            rows: Vec::new(),
            current: Vec::new(),
            ix: 0,
            iy: 0,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Parse one physical line. Blank lines are skipped.
    pub fn feed_line(&mut self, line_no: usize, line: &str) -> Result<(), GridError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let (x, y, z) = parse_triple(line_no, trimmed)?;
        self.push(line_no, x, y, z)
    }

    /// Advance the state machine by one `(x, y, z)` sample.
    ///
    /// A rejected sample leaves the parser as it was before the call.
    pub fn push(&mut self, line: usize, x: f64, y: f64, z: f64) -> Result<(), GridError> {
        let same_x = match self.state {
            ParseState::FirstRow => {
                self.xs.push(x);
                self.ys.push(y);
                self.current.push(z);
                self.state = ParseState::FastAxisUnknown;
                return Ok(());
            }
            _ => self.xs[self.ix] == x,
        };
        let same_y = self.ys[self.iy] == y;

        match self.state {
            ParseState::FastAxis(Axis::Y) if same_x => self.step_y(line, y)?,
            // Next x row starts.
            ParseState::FastAxis(Axis::Y) if self.ys[0] == y => {
                append_new(&mut self.xs, x, Axis::X, line)?;
                self.flush();
                self.ix = self.xs.len() - 1;
                self.iy = 0;
            }
            ParseState::FastAxis(Axis::X) if same_y => self.step_x(line, x)?,
            // Next y column starts.
            ParseState::FastAxis(Axis::X) if self.xs[0] == x => {
                append_new(&mut self.ys, y, Axis::Y, line)?;
                self.flush();
                self.iy = self.ys.len() - 1;
                self.ix = 0;
            }
            ParseState::FastAxisUnknown if same_x => {
                self.step_y(line, y)?;
                self.settle(Axis::Y, line);
            }
            ParseState::FastAxisUnknown if same_y => {
                self.step_x(line, x)?;
                self.settle(Axis::X, line);
            }
            _ => return Err(GridError::IrregularGrid { line, x, y }),
        }
        self.current.push(z);
        Ok(())
    }

    /// Same x: y walks one step through the current row.
    fn step_y(&mut self, line: usize, y: f64) -> Result<(), GridError> {
        let next = self.iy + 1;
        advance_axis(&mut self.ys, next, y, Axis::Y, line)?;
        self.iy = next;
        Ok(())
    }

    /// Same y: x walks one step through the current column.
    fn step_x(&mut self, line: usize, x: f64) -> Result<(), GridError> {
        let next = self.ix + 1;
        advance_axis(&mut self.xs, next, x, Axis::X, line)?;
        self.ix = next;
        Ok(())
    }

    /// Close the last pass, check the matrix shape and build the grid.
    pub fn finish(mut self) -> Result<Grid2D, GridError> {
        let fast = match self.state {
            ParseState::FastAxis(axis) => axis,
            ParseState::FirstRow | ParseState::FastAxisUnknown => {
                return Err(GridError::NoOrderDetected);
            }
        };
        self.flush();

        let expected = self.rows[0].len();
        let ragged = self
            .rows
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, r)| r.len() != expected);
        if let Some((row, r)) = ragged {
            return Err(GridError::NonSquareMatrix {
                row,
                len: r.len(),
                expected,
            });
        }

        let transposed = fast == Axis::X;
        let grid = Grid2D::from_parts(self.xs, self.ys, self.rows, transposed);
        debug_assert_eq!(
            grid.grid_shape(),
            (grid.axis_len(Axis::X), grid.axis_len(Axis::Y))
        );
        debug!(
            "grid {}x{} parsed, {} varies fastest",
            grid.axis_len(Axis::X),
            grid.axis_len(Axis::Y),
            fast
        );
        Ok(grid)
    }

    fn settle(&mut self, fast: Axis, line: usize) {
        debug!("line {line}: {fast} is the fast variable");
        self.state = ParseState::FastAxis(fast);
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.rows.push(std::mem::take(&mut self.current));
        }
    }
}

/// Parse a whole grid file held in memory.
pub fn parse_grid(text: &str) -> Result<Grid2D, GridError> {
    let mut parser = GridParser::new();
    for (i, line) in text.lines().enumerate() {
        parser.feed_line(i + 1, line)?;
    }
    parser.finish()
}

/// Step along an axis during a pass: either record a value seen for the
/// first time at `index`, or check it against the one recorded earlier.
fn advance_axis(
    values: &mut Vec<f64>,
    index: usize,
    value: f64,
    axis: Axis,
    line: usize,
) -> Result<(), GridError> {
    match values.get(index) {
        None => append_new(values, value, axis, line),
        Some(&expected) if expected != value => Err(GridError::AxisGridCorrupted {
            axis,
            line,
            index,
            expected,
            found: value,
        }),
        Some(_) => Ok(()),
    }
}

fn append_new(values: &mut Vec<f64>, value: f64, axis: Axis, line: usize) -> Result<(), GridError> {
    if values.contains(&value) {
        return Err(GridError::DuplicateAxisValue { axis, line, value });
    }
    values.push(value);
    Ok(())
}

fn parse_triple(line: usize, content: &str) -> Result<(f64, f64, f64), GridError> {
    let malformed = |reason: String| GridError::MalformedLine {
        line,
        content: content.to_string(),
        reason,
    };

    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(malformed(format!("expected 3 columns, found {}", tokens.len())));
    }
    let mut values = [0.0; 3];
    for (slot, tok) in values.iter_mut().zip(&tokens) {
        *slot = tok
            .parse::<f64>()
            .map_err(|_| malformed(format!("'{tok}' is not a number")))?;
    }
    Ok((values[0], values[1], values[2]))
}
