//! Rectangular 0/1 incidence relation between candidate rows and items

use crate::dlx::DlxError;
use std::fmt;

/// A validated R×W relation of 0/1 values.
///
/// Every row has exactly `width` entries and `width >= 1`. A relation with
/// no rows can be created with [`Relation::new`] and filled row by row, but
/// [`Relation::from_rows`] and [`Relation::from_bits`] reject empty input
/// since the width cannot be inferred from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Relation {
    /// Create a relation over `width` items with no rows yet
    pub fn new(width: usize) -> Result<Self, DlxError> {
        if width == 0 {
            return Err(DlxError::invalid_shape("relation width must be at least 1"));
        }
        Ok(Self {
            width,
            height: 0,
            cells: Vec::new(),
        })
    }

    /// Create a relation from boolean rows
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, DlxError> {
        let Some(first) = rows.first() else {
            return Err(DlxError::invalid_shape("relation has no rows"));
        };
        let mut relation = Self::new(first.len())?;
        for row in &rows {
            relation.push_row(row)?;
        }
        Ok(relation)
    }

    /// Create a relation from rows of 0/1 integers
    pub fn from_bits<const W: usize>(rows: &[[u8; W]]) -> Result<Self, DlxError> {
        if rows.is_empty() {
            return Err(DlxError::invalid_shape("relation has no rows"));
        }
        let mut relation = Self::new(W)?;
        for (row_idx, row) in rows.iter().enumerate() {
            let mut bools = Vec::with_capacity(W);
            for (col_idx, &bit) in row.iter().enumerate() {
                match bit {
                    0 => bools.push(false),
                    1 => bools.push(true),
                    other => {
                        return Err(DlxError::invalid_shape(format!(
                            "value {} at ({}, {}) is not 0 or 1",
                            other, row_idx, col_idx
                        )))
                    }
                }
            }
            relation.push_row(&bools)?;
        }
        Ok(relation)
    }

    /// Append a dense row, returning its index
    pub fn push_row(&mut self, row: &[bool]) -> Result<usize, DlxError> {
        if row.len() != self.width {
            return Err(DlxError::invalid_shape(format!(
                "row {} has width {}, expected {}",
                self.height,
                row.len(),
                self.width
            )));
        }
        self.cells.extend_from_slice(row);
        self.height += 1;
        Ok(self.height - 1)
    }

    /// Append a row given by the items it contains, returning its index
    pub fn push_items(&mut self, items: &[usize]) -> Result<usize, DlxError> {
        let mut row = vec![false; self.width];
        for &item in items {
            if item >= self.width {
                return Err(DlxError::invalid_shape(format!(
                    "item {} is outside a relation of width {}",
                    item, self.width
                )));
            }
            row[item] = true;
        }
        self.push_row(&row)
    }

    /// Number of items (columns)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of candidate rows
    pub fn row_count(&self) -> usize {
        self.height
    }

    /// Whether row `row` contains item `col`
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col]
        } else {
            false
        }
    }

    /// The dense contents of a row, `None` when out of range
    pub fn row(&self, row: usize) -> Option<&[bool]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Iterate over all rows in input order
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Item ids contained in a row, ascending; empty when out of range
    pub fn items(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(row)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(col, &set)| set.then_some(col))
    }

    /// Number of set entries over the whole relation
    pub fn set_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Items no row contains
    pub fn uncoverable_items(&self) -> Vec<usize> {
        (0..self.width)
            .filter(|&col| (0..self.height).all(|row| !self.get(row, col)))
            .collect()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &cell in row {
                write!(f, "{}", if cell { '1' } else { '0' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
