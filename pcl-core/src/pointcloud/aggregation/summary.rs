use std::collections::HashMap;

use itertools::Itertools as _;
use serde::{Deserialize, Serialize};

use crate::pointcloud::{
    point::Vai,
    transect::{Transect, TransectCell},
};

pub trait TransectAggregator {
    fn aggregate(&self, transect: &Transect) -> TransectSummary;
}

/// Row of the summary matrix, one per `(xbin, zbin)` cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub xbin: f64,
    pub zbin: f64,
    pub vai: Vai,
    pub vai_z: Option<f64>,
    pub sum_vai: f64,
    pub height_bin: Option<f64>,
}

/// Statistics of one vertical column (all cells sharing an `xbin`).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub xbin: f64,
    pub sum_vai: f64,
    /// Mean leaf height, `None` when the column holds no vegetation.
    pub height_bin: Option<f64>,
    pub std_bin: Option<f64>,
    /// Top of the highest cell with vai > 0, 0 for an empty column.
    pub max_ht: f64,
    pub filled: usize,
    pub empty: usize,
    pub missing: usize,
    pub canopy_cells: usize,
    pub canopy_gaps: usize,
}

impl ColumnSummary {
    pub fn cells(&self) -> usize {
        self.filled + self.empty + self.missing
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransectSummary {
    pub rows: Vec<SummaryRow>,
    pub columns: Vec<ColumnSummary>,
}

impl TransectSummary {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total VAI per height layer, ascending by `zbin`. Sky hits are skipped.
    pub fn height_profile(&self) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .sorted_by(|a, b| a.zbin.total_cmp(&b.zbin))
            .chunk_by(|row| row.zbin)
            .into_iter()
            .map(|(zbin, rows)| (zbin, rows.filter_map(|r| r.vai).sum::<f64>()))
            .collect()
    }

    pub fn missing_cells(&self) -> usize {
        self.columns.iter().map(|c| c.missing).sum()
    }
}

/// Mid-point height of a bin, the height a hit in that bin is credited with.
pub fn bin_height(zbin: f64) -> f64 {
    zbin + 0.5
}

// -0.0 and 0.0 land in the same column
fn column_key(xbin: f64) -> u64 {
    (xbin + 0.0).to_bits()
}

/// Weights every cell's VAI by its bin height to derive the mean leaf
/// height of each column.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanLeafHeightAggregator;

impl TransectAggregator for MeanLeafHeightAggregator {
    fn aggregate(&self, transect: &Transect) -> TransectSummary {
        let columns: Vec<ColumnSummary> = transect
            .cells
            .iter()
            .sorted_by(|a, b| a.xbin.total_cmp(&b.xbin))
            .chunk_by(|cell| cell.xbin)
            .into_iter()
            .map(|(xbin, cells)| self.summarize_column(xbin, cells.collect()))
            .collect();

        log::debug!(
            "aggregated {} cells into {} columns",
            transect.len(),
            columns.len()
        );

        let index: HashMap<u64, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (column_key(c.xbin), i))
            .collect();

        let rows = transect
            .cells
            .iter()
            .map(|cell| {
                let column = &columns[index[&column_key(cell.xbin)]];
                SummaryRow {
                    xbin: cell.xbin,
                    zbin: cell.zbin,
                    vai: cell.vai,
                    vai_z: cell.vai.map(|v| v * bin_height(cell.zbin)),
                    sum_vai: column.sum_vai,
                    height_bin: column.height_bin,
                }
            })
            .collect();

        TransectSummary { rows, columns }
    }
}

impl MeanLeafHeightAggregator {
    fn summarize_column(&self, xbin: f64, cells: Vec<&TransectCell>) -> ColumnSummary {
        let measured: Vec<(f64, f64)> = cells
            .iter()
            .filter_map(|c| c.vai.map(|v| (c.zbin, v)))
            .collect();

        let sum_vai: f64 = measured.iter().map(|(_, v)| v).sum();
        let vai_z_sum: f64 = measured.iter().map(|(z, v)| v * bin_height(*z)).sum();

        let height_bin = (sum_vai > 0.0).then(|| vai_z_sum / sum_vai);
        let std_bin = height_bin.map(|mean| {
            let spread: f64 = measured
                .iter()
                .map(|(z, v)| v * (bin_height(*z) - mean).powi(2))
                .sum();
            (spread / sum_vai).sqrt()
        });

        let max_ht = measured
            .iter()
            .filter(|(_, v)| *v > 0.0)
            .map(|(z, _)| z + 1.0)
            .fold(0.0, f64::max);

        let filled = measured.iter().filter(|(_, v)| *v > 0.0).count();
        let missing = cells.len() - measured.len();
        let empty = measured.len() - filled;

        let below_top: Vec<&&TransectCell> = cells.iter().filter(|c| c.zbin < max_ht).collect();
        let canopy_gaps = below_top
            .iter()
            .filter(|c| c.vai.map_or(true, |v| v <= 0.0))
            .count();

        ColumnSummary {
            xbin,
            sum_vai,
            height_bin,
            std_bin,
            max_ht,
            filled,
            empty,
            missing,
            canopy_cells: below_top.len(),
            canopy_gaps,
        }
    }
}
