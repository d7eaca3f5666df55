use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use env_logger::Builder;
use glob::glob;
use log::LevelFilter;

use pcl_exporter::plot::{RenderOptions, DEFAULT_MAX_HEIGHT};
use pcl_parser::PointSource;
use pcl_transect::{process_tls, ProcessOptions};

#[derive(Parser, Debug)]
#[command(
    name = "PCL Transect",
    about = "Canopy structural complexity and VAI hit grids from TLS/PCL transect slices",
    version = "0.0.1"
)]
struct Cli {
    #[arg(short, long, required = true, num_args = 1.., value_name = "FILE")]
    input: Vec<String>,

    /// Scan-line index (x) of the transect to extract
    #[arg(short, long, allow_negative_numbers = true)]
    slice: i64,

    #[arg(short, long, default_value = "output", value_name = "DIR")]
    output: String,

    /// Also plot the plant area density profile
    #[arg(long)]
    pavd: bool,

    /// Draw the PAVD profile with histogram bars
    #[arg(long)]
    hist: bool,

    /// Compute and log the variables without writing any file
    #[arg(long)]
    no_save: bool,

    #[arg(long, default_value_t = DEFAULT_MAX_HEIGHT)]
    max_height: f64,

    /// Skip captions and axis labels (for hosts without fonts)
    #[arg(long)]
    no_labels: bool,
}

/// Expands shell-style patterns, returning the paths found and the number of
/// patterns that failed. A pattern that matches nothing counts as failed.
fn expand_globs(input_patterns: Vec<String>) -> (Vec<PathBuf>, usize) {
    let mut paths = Vec::new();
    let mut errors = 0;
    for pattern in input_patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let entries = match glob(&pattern) {
                Ok(entries) => entries,
                Err(e) => {
                    log::error!("invalid glob pattern {:?}: {}", pattern, e);
                    errors += 1;
                    continue;
                }
            };
            let before = paths.len();
            for entry in entries {
                match entry {
                    Ok(path) => paths.push(path),
                    Err(e) => {
                        log::error!("{}", e);
                        errors += 1;
                    }
                }
            }
            if paths.len() == before {
                log::warn!("pattern {:?} matched no files", pattern);
                errors += 1;
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }
    (paths, errors)
}

fn main() -> ExitCode {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .init();

    let args = Cli::parse();

    log::info!("input files: {:?}", args.input);
    log::info!("output folder: {}", args.output);
    log::info!("slice: {}", args.slice);

    let options = ProcessOptions {
        slice: args.slice,
        pavd: args.pavd,
        hist: args.hist,
        save_output: !args.no_save,
        output_dir: PathBuf::from(&args.output),
        render: RenderOptions {
            max_height: args.max_height,
            labels: !args.no_labels,
            ..Default::default()
        },
    };

    let start = std::time::Instant::now();
    let (input_files, mut failed) = expand_globs(args.input);
    log::info!("expanded input files: {:?}", input_files);
    if input_files.is_empty() {
        log::error!("no input files to process");
        return ExitCode::FAILURE;
    }

    for path in input_files {
        match process_tls(PointSource::Path(path.clone()), &options) {
            Ok(output) => {
                let v = &output.variables;
                log::info!(
                    "{}: length {} | mean height {:.3} | rugosity {:.3} | porosity {:.3} | sky fraction {:.3}",
                    v.name,
                    v.transect_length,
                    v.mean_height,
                    v.rugosity,
                    v.porosity,
                    v.sky_fraction
                );
            }
            Err(e) => {
                log::error!("failed to process {:?}: {}", path, e);
                failed += 1;
            }
        }
    }

    log::info!("Elapsed: {:?}", start.elapsed());

    if failed > 0 {
        log::error!("{} input(s) failed", failed);
        ExitCode::FAILURE
    } else {
        log::info!("Finish processing");
        ExitCode::SUCCESS
    }
}
