//! Private working copy of the caller's distance matrix.
//!
//! The matrix is conceptually symmetric and the lower triangle is
//! authoritative: reads and writes normalise their indices to the cell
//! `(max(i, j), min(i, j))`, so a caller-supplied matrix whose upper
//! triangle disagrees with the lower one is still read consistently.

use crate::error::{ClusterError, Result};

/// Flat row-major square matrix used as the engine's mutable working state.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SquareMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl SquareMatrix {
    /// Copies the caller's rows after validating shape and values.
    ///
    /// Every row must be `rows.len()` wide and every entry must be a
    /// non-negative finite number. Validation happens before the copy is
    /// handed to any mutable state, so a failure has no side effects.
    pub(crate) fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let size = rows.len();
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(ClusterError::NonSquareMatrix {
                    row: row_index,
                    len: row.len(),
                    size,
                });
            }
            for (col_index, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(ClusterError::InvalidDistance {
                        row: row_index,
                        col: col_index,
                        value,
                    });
                }
            }
        }

        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            cells.extend_from_slice(row);
        }
        Ok(Self { size, cells })
    }

    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    /// Reads the authoritative (lower-triangle) cell for `(i, j)`.
    pub(crate) fn get(&self, i: usize, j: usize) -> f64 {
        let (hi, lo) = if i >= j { (i, j) } else { (j, i) };
        self.cells[hi * self.size + lo]
    }

    /// Writes the authoritative (lower-triangle) cell for `(i, j)`.
    pub(crate) fn set(&mut self, i: usize, j: usize, value: f64) {
        let (hi, lo) = if i >= j { (i, j) } else { (j, i) };
        self.cells[hi * self.size + lo] = value;
    }
}
