//! Rectangular letter grids.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A width x height grid of letters, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Grid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Letter at (x, y), or None outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }
}

impl FromStr for Grid {
    type Err = Error;

    /// Parse newline-separated rows. Rows must all have the same width;
    /// an empty line ends the grid.
    fn from_str(s: &str) -> Result<Self> {
        let mut width = 0;
        let mut height = 0;
        let mut cells = Vec::new();

        for line in s.lines() {
            if line.is_empty() {
                break;
            }

            let row: Vec<char> = line.chars().collect();
            if width == 0 {
                width = row.len();
            } else if row.len() != width {
                return Err(Error::grid(format!(
                    "row {} has {} cells, expected {}",
                    height + 1,
                    row.len(),
                    width
                )));
            }

            cells.extend(row);
            height += 1;
        }

        Ok(Grid {
            width,
            height,
            cells,
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for &cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
