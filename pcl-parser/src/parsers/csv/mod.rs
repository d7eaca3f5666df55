use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord, Trim};

use pcl_core::pointcloud::point::{parse_vai, Point, PointCloud};

use super::{ParseError, Parser, ParserProvider};

const FIELDS: [&str; 4] = ["x", "y", "z", "vai"];

pub struct CsvParserProvider {
    pub filename: PathBuf,
}

impl ParserProvider for CsvParserProvider {
    fn get_parser(&self) -> Box<dyn Parser> {
        Box::new(CsvParser {
            filename: self.filename.clone(),
        })
    }
}

/// Reads a headerless `x, y, z, vai` table.
pub struct CsvParser {
    pub filename: PathBuf,
}

impl Parser for CsvParser {
    fn parse(&self) -> Result<PointCloud, ParseError> {
        let csv_error = |source| ParseError::Csv {
            path: self.filename.clone(),
            source,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_path(&self.filename)
            .map_err(csv_error)?;

        let mut points = Vec::new();
        let mut record = StringRecord::new();
        while reader.read_record(&mut record).map_err(csv_error)? {
            let line = record.position().map_or(0, |p| p.line());
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            points.push(self.parse_point(&record, line)?);
        }

        log::debug!("parsed {} points from {:?}", points.len(), self.filename);

        Ok(PointCloud::new(points))
    }
}

impl CsvParser {
    fn parse_point(&self, record: &StringRecord, line: u64) -> Result<Point, ParseError> {
        if record.len() != FIELDS.len() {
            return Err(ParseError::ColumnCount {
                path: self.filename.clone(),
                line,
                found: record.len(),
            });
        }

        let field_error = |index: usize| ParseError::Field {
            path: self.filename.clone(),
            line,
            field: FIELDS[index],
            value: record[index].to_string(),
        };

        // `str::parse` accepts inf and NaN, neither is a coordinate
        let coord = |index: usize| -> Result<f64, ParseError> {
            record[index]
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| field_error(index))
        };

        let x = coord(0)?;
        let y = coord(1)?;
        let z = coord(2)?;
        let vai = match parse_vai(&record[3]) {
            Ok(Some(v)) if v.is_infinite() => return Err(field_error(3)),
            Ok(vai) => vai,
            Err(_) => return Err(field_error(3)),
        };

        Ok(Point { x, y, z, vai })
    }
}
