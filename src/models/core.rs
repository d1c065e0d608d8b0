//! Core types used across models.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{PixiconError, Result};

/// Largest supported grid dimension on either axis.
pub const MAX_GRID_DIM: usize = 64;

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Check the supported `1..=64` bound on both axes.
    pub fn validate(self) -> Result<Self> {
        if self.rows < 1 || self.cols < 1 || self.rows > MAX_GRID_DIM || self.cols > MAX_GRID_DIM {
            return Err(PixiconError::InvalidGridSize { rows: self.rows, cols: self.cols });
        }
        Ok(self)
    }

    /// Whether the coordinate lies inside `[0,rows) x [0,cols)`.
    pub fn contains(&self, id: CellId) -> bool {
        id.row < self.rows && id.col < self.cols
    }

    /// All cell ids of the grid in row-major order.
    pub fn cell_ids(self) -> impl Iterator<Item = CellId> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| CellId::new(row, col)))
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self { rows: 8, cols: 8 }
    }
}

/// Address of one grid cell, written `"<row>-<col>"` on the wire.
///
/// Ordering is row-major, so maps keyed by `CellId` iterate in grid order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    pub row: usize,
    pub col: usize,
}

impl CellId {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Error for a string that is not a `"<row>-<col>"` cell id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCellIdError(pub String);

impl fmt::Display for ParseCellIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cell id \"{}\" (expected \"<row>-<col>\")", self.0)
    }
}

impl std::error::Error for ParseCellIdError {}

impl FromStr for CellId {
    type Err = ParseCellIdError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let err = || ParseCellIdError(s.to_string());
        let (row, col) = s.split_once('-').ok_or_else(err)?;
        let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(row) || !is_digits(col) {
            return Err(err());
        }
        Ok(CellId {
            row: row.parse().map_err(|_| err())?,
            col: col.parse().map_err(|_| err())?,
        })
    }
}

impl Serialize for CellId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A `{from, to}` pair animated between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub from: f64,
    pub to: f64,
}

impl Range {
    pub const fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }
}
