use serde::{Deserialize, Serialize};

use super::point::Vai;

/// One voxel of a transect in the canonical `xbin, zbin, vai` schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransectCell {
    pub xbin: f64,
    pub zbin: f64,
    pub vai: Vai,
}

impl TransectCell {
    pub fn new(xbin: f64, zbin: f64, vai: Vai) -> Self {
        Self { xbin, zbin, vai }
    }
}

/// A single vertical slice of the point cloud. Every cell was taken from
/// a point whose scan-line index equals `slice`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transect {
    pub slice: i64,
    pub cells: Vec<TransectCell>,
}

impl Transect {
    pub fn new(slice: i64, cells: Vec<TransectCell>) -> Self {
        Self { slice, cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Inclusive range of the distance bins, `None` for an empty transect.
    pub fn xbin_range(&self) -> Option<(f64, f64)> {
        self.cells.iter().fold(None, |acc, cell| match acc {
            None => Some((cell.xbin, cell.xbin)),
            Some((lo, hi)) => Some((lo.min(cell.xbin), hi.max(cell.xbin))),
        })
    }
}
