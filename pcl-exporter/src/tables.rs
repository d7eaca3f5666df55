//! CSV artifacts of a processed transect.
//!
//! Every table starts with a header row. A missing VAI is written as an
//! empty field and read back as `None`.

use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use serde::{de::DeserializeOwned, Serialize};

use pcl_core::pointcloud::{
    aggregation::{CscVariables, SummaryRow},
    transect::TransectCell,
};

use crate::error::{ExportError, Result};

const HIT_MATRIX_HEADER: [&str; 3] = ["xbin", "zbin", "vai"];

const SUMMARY_MATRIX_HEADER: [&str; 6] =
    ["xbin", "zbin", "vai", "vai_z", "sum_vai", "height_bin"];

const VARIABLES_HEADER: [&str; 22] = [
    "name",
    "slice",
    "transect_length",
    "mean_height",
    "height_2",
    "mean_height_var",
    "mean_height_rms",
    "mode_el",
    "mean_max_ht",
    "max_ht",
    "mean_vai",
    "max_vai",
    "deep_gaps",
    "deep_gap_fraction",
    "porosity",
    "std_std",
    "mean_std",
    "rugosity",
    "top_rugosity",
    "rumple",
    "sky_fraction",
    "cover_fraction",
];

fn write_rows<'a, T, I>(path: &Path, header: &[&str], rows: I) -> Result<()>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let csv_error = |source: csv::Error| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    // the header is written by hand so that empty tables still carry one
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error)?;
    writer.write_record(header).map_err(csv_error)?;

    let mut count = 0;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
        count += 1;
    }
    writer.flush().map_err(|e| csv_error(e.into()))?;

    log::debug!("wrote {} rows to {:?}", count, path);
    Ok(())
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let csv_error = |source: csv::Error| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(csv_error)?;

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(csv_error)
}

pub fn write_variables(path: &Path, variables: &CscVariables) -> Result<()> {
    write_rows(path, &VARIABLES_HEADER, [variables])
}

pub fn read_variables(path: &Path) -> Result<Vec<CscVariables>> {
    read_rows(path)
}

pub fn write_summary_matrix(path: &Path, rows: &[SummaryRow]) -> Result<()> {
    write_rows(path, &SUMMARY_MATRIX_HEADER, rows)
}

pub fn read_summary_matrix(path: &Path) -> Result<Vec<SummaryRow>> {
    read_rows(path)
}

pub fn write_hit_matrix(path: &Path, cells: &[TransectCell]) -> Result<()> {
    write_rows(path, &HIT_MATRIX_HEADER, cells)
}

pub fn read_hit_matrix(path: &Path) -> Result<Vec<TransectCell>> {
    read_rows(path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pcl_core::pointcloud::{
        aggregation::{MeanLeafHeightAggregator, TransectAggregator as _},
        transect::Transect,
    };

    use super::*;

    fn transect() -> Transect {
        Transect::new(
            1,
            vec![
                TransectCell::new(0.0, 0.0, Some(2.0)),
                TransectCell::new(0.0, 1.0, Some(0.0)),
                TransectCell::new(1.0, 0.0, None),
                TransectCell::new(2.5, 3.0, Some(0.123456789)),
            ],
        )
    }

    #[test]
    fn hit_matrix_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hit_matrix.csv");
        let t = transect();

        write_hit_matrix(&path, &t.cells).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("xbin,zbin,vai\n"));
        assert!(contents.contains("1.0,0.0,\n"));

        let back = read_hit_matrix(&path).unwrap();
        assert_eq!(back.len(), t.cells.len());
        for (a, b) in back.iter().zip(&t.cells) {
            assert_eq!(a.xbin, b.xbin);
            assert_eq!(a.zbin, b.zbin);
            match (a.vai, b.vai) {
                (Some(x), Some(y)) => assert!((x - y).abs() < 1e-9),
                (None, None) => {}
                other => panic!("vai mismatch: {:?}", other),
            }
        }
    }

    #[test]
    fn summary_matrix_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary_matrix.csv");
        let summary = MeanLeafHeightAggregator.aggregate(&transect());

        write_summary_matrix(&path, &summary.rows).unwrap();
        let back = read_summary_matrix(&path).unwrap();

        assert_eq!(back.len(), summary.rows.len());
        for (a, b) in back.iter().zip(&summary.rows) {
            assert_eq!((a.xbin, a.zbin), (b.xbin, b.zbin));
            assert_eq!(a.vai.is_none(), b.vai.is_none());
            assert_eq!(a.vai_z.is_none(), b.vai_z.is_none());
            assert_eq!(a.height_bin.is_none(), b.height_bin.is_none());
            assert!((a.sum_vai - b.sum_vai).abs() < 1e-9);
            if let (Some(x), Some(y)) = (a.height_bin, b.height_bin) {
                assert!((x - y).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn empty_tables_keep_their_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_summary_matrix(&path, &[]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "xbin,zbin,vai,vai_z,sum_vai,height_bin\n"
        );
        assert!(read_summary_matrix(&path).unwrap().is_empty());
    }

    #[test]
    fn variables_table_has_one_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vars.csv");
        let summary = MeanLeafHeightAggregator.aggregate(&transect());
        let vars = CscVariables::from_summary("plot", 1, &summary);

        write_variables(&path, &vars).unwrap();
        let back = read_variables(&path).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].name, "plot");
        assert_eq!(back[0].transect_length, 3);
        assert_eq!(back[0].deep_gaps, vars.deep_gaps);
        assert!((back[0].sky_fraction - vars.sky_fraction).abs() < 1e-12);
    }
}
