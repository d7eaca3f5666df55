use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{ExportError, Result};

/// Paths of every artifact written for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifacts {
    pub variables: PathBuf,
    pub summary_matrix: PathBuf,
    pub hit_matrix: PathBuf,
    pub hit_grid: PathBuf,
    pub pavd: Option<PathBuf>,
}

impl OutputArtifacts {
    pub fn new(dir: &Path, name: &str, pavd: bool) -> Self {
        Self {
            variables: dir.join(format!("{}_output.csv", name)),
            summary_matrix: dir.join(format!("{}_summary_matrix.csv", name)),
            hit_matrix: dir.join(format!("{}_hit_matrix.csv", name)),
            hit_grid: dir.join(format!("{}_hit_grid.png", name)),
            pavd: pavd.then(|| dir.join(format!("{}_pavd.png", name))),
        }
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        [
            Some(&self.variables),
            Some(&self.summary_matrix),
            Some(&self.hit_matrix),
            Some(&self.hit_grid),
            self.pavd.as_ref(),
        ]
        .into_iter()
        .flatten()
        .map(PathBuf::as_path)
    }
}

/// Creates `dir` and its parents; an existing directory is fine.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })
}
