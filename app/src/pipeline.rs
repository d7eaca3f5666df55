//! Single-slice TLS/PCL processing: load, slice, reshape, aggregate and,
//! when asked to, render and write the artifacts.

use std::path::PathBuf;

use thiserror::Error;

use pcl_core::pointcloud::{
    aggregation::{
        ColumnSummary, CscVariables, MeanLeafHeightAggregator, TransectAggregator as _,
        TransectSummary,
    },
    transect::Transect,
};
use pcl_exporter::{
    output::ensure_output_dir,
    plot::{plot_hit_grid, plot_pavd, RenderOptions},
    tables::{write_hit_matrix, write_summary_matrix, write_variables},
    ExportError, OutputArtifacts,
};
use pcl_parser::{load, ParseError, PointSource};
use pcl_transformer::{runner::TransectExtractor, Transformer as _};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub slice: i64,
    pub pavd: bool,
    pub hist: bool,
    pub save_output: bool,
    pub output_dir: PathBuf,
    pub render: RenderOptions,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            slice: 0,
            pavd: false,
            hist: false,
            save_output: true,
            output_dir: PathBuf::from("output"),
            render: RenderOptions::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TlsOutput {
    pub name: String,
    pub transect: Transect,
    pub summary: TransectSummary,
    pub variables: CscVariables,
    /// Written files, `None` unless `save_output` was set.
    pub artifacts: Option<OutputArtifacts>,
}

impl TlsOutput {
    pub fn columns(&self) -> &[ColumnSummary] {
        &self.summary.columns
    }
}

pub fn process_tls(
    source: PointSource,
    options: &ProcessOptions,
) -> Result<TlsOutput, PipelineError> {
    let start = std::time::Instant::now();

    let data = load(source)?;
    let name = data.name;

    let transect = TransectExtractor::new(options.slice).execute(data.cloud);
    log::info!(
        "'{}' slice {}: {} cells",
        name,
        options.slice,
        transect.len()
    );

    let summary = MeanLeafHeightAggregator.aggregate(&transect);
    let variables = CscVariables::from_summary(&name, options.slice, &summary);

    let artifacts = if options.save_output {
        let artifacts = OutputArtifacts::new(&options.output_dir, &name, options.pavd);
        write_artifacts(&artifacts, &transect, &summary, &variables, options)?;
        Some(artifacts)
    } else {
        None
    };

    log::info!("finished '{}' in {:?}", name, start.elapsed());

    Ok(TlsOutput {
        name,
        transect,
        summary,
        variables,
        artifacts,
    })
}

fn write_artifacts(
    artifacts: &OutputArtifacts,
    transect: &Transect,
    summary: &TransectSummary,
    variables: &CscVariables,
    options: &ProcessOptions,
) -> Result<(), ExportError> {
    ensure_output_dir(&options.output_dir)?;

    write_variables(&artifacts.variables, variables)?;
    write_summary_matrix(&artifacts.summary_matrix, &summary.rows)?;
    write_hit_matrix(&artifacts.hit_matrix, &transect.cells)?;

    plot_hit_grid(&artifacts.hit_grid, transect, &options.render)?;
    if let Some(pavd_path) = &artifacts.pavd {
        plot_pavd(pavd_path, summary, options.hist, &options.render)?;
    }

    log::info!("wrote outputs to {:?}", options.output_dir);
    Ok(())
}
