use std::path::{Path, PathBuf};

use thiserror::Error;

use pcl_core::pointcloud::point::{Point, PointCloud};

pub mod csv;

use self::csv::CsvParserProvider;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid input kind for '{path}': {reason}")]
    InvalidInputKind { path: PathBuf, reason: String },

    #[error("failed to read '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: ::csv::Error,
    },

    #[error("{path}:{line}: expected 4 columns (x, y, z, vai), found {found}")]
    ColumnCount {
        path: PathBuf,
        line: u64,
        found: usize,
    },

    #[error("{path}:{line}: failed to parse '{field}' from {value:?}")]
    Field {
        path: PathBuf,
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("table '{name}', row {row}: '{field}' is not finite ({value})")]
    NonFinite {
        name: String,
        row: usize,
        field: &'static str,
        value: f64,
    },
}

pub trait ParserProvider {
    fn get_parser(&self) -> Box<dyn Parser>;
}

pub trait Parser {
    fn parse(&self) -> Result<PointCloud, ParseError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    Csv,
    Txt,
}

pub fn get_extension(path: &Path) -> Result<Extension, ParseError> {
    let invalid = |reason: String| ParseError::InvalidInputKind {
        path: path.to_path_buf(),
        reason,
    };

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| invalid("file extension is not found".to_string()))?;

    match extension.to_ascii_lowercase().as_str() {
        "csv" => Ok(Extension::Csv),
        "txt" => Ok(Extension::Txt),
        other => Err(invalid(format!("unsupported extension '{}'", other))),
    }
}

/// Where the raw `x, y, z, vai` table comes from.
#[derive(Debug, Clone)]
pub enum PointSource {
    Path(PathBuf),
    Table { name: String, cloud: PointCloud },
}

impl PointSource {
    /// Name used to prefix every output artifact of this source.
    pub fn name(&self) -> String {
        match self {
            PointSource::Path(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            PointSource::Table { name, .. } => name.clone(),
        }
    }
}

impl From<PathBuf> for PointSource {
    fn from(path: PathBuf) -> Self {
        PointSource::Path(path)
    }
}

#[derive(Debug, Clone)]
pub struct SourceData {
    pub name: String,
    pub cloud: PointCloud,
}

pub fn load(source: PointSource) -> Result<SourceData, ParseError> {
    let name = source.name();
    let cloud = match source {
        PointSource::Path(path) => {
            if !path.is_file() {
                return Err(ParseError::InvalidInputKind {
                    reason: "not a regular file".to_string(),
                    path,
                });
            }
            let provider = match get_extension(&path)? {
                Extension::Csv | Extension::Txt => CsvParserProvider { filename: path },
            };
            provider.get_parser().parse()?
        }
        PointSource::Table { cloud, .. } => check_table(&name, cloud)?,
    };

    log::info!(
        "loaded '{}': {} points ({} sky hits)",
        name,
        cloud.metadata.point_count,
        cloud.metadata.sky_hits
    );

    Ok(SourceData { name, cloud })
}

/// Holds in-memory tables to the rules the CSV parser enforces: finite
/// coordinates, and a NaN VAI is the `None` sentinel rather than a value.
fn check_table(name: &str, cloud: PointCloud) -> Result<PointCloud, ParseError> {
    let points = cloud
        .points
        .into_iter()
        .enumerate()
        .map(|(row, point)| {
            let non_finite = |field: &'static str, value: f64| ParseError::NonFinite {
                name: name.to_string(),
                row,
                field,
                value,
            };
            for (field, value) in [("x", point.x), ("y", point.y), ("z", point.z)] {
                if !value.is_finite() {
                    return Err(non_finite(field, value));
                }
            }
            let vai = match point.vai {
                Some(v) if v.is_nan() => None,
                Some(v) if v.is_infinite() => return Err(non_finite("vai", v)),
                vai => vai,
            };
            Ok(Point { vai, ..point })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PointCloud::new(points))
}
