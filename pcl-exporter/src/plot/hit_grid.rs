use std::path::Path;

use plotters::{coord::Shift, prelude::*};

use pcl_core::pointcloud::transect::Transect;

use super::{vai_color, RenderOptions, NO_DATA_COLOR};
use crate::error::{ExportError, Result};

/// Draws the VAI of every cell over distance (x) and height (y).
///
/// Sky hits are not painted and keep the white background. An empty
/// transect gives an empty unit-wide grid.
pub fn draw_hit_grid<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    transect: &Transect,
    options: &RenderOptions,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let max_height = options.max_height;
    let (x_min, x_max) = transect
        .xbin_range()
        .map_or((0.0, 1.0), |(lo, hi)| (lo, hi + 1.0));

    root.fill(&NO_DATA_COLOR)?;

    let mut builder = ChartBuilder::on(root);
    if options.labels {
        builder
            .caption(format!("Transect {}", transect.slice), ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50);
    }
    let mut chart = builder.build_cartesian_2d(x_min..x_max, 0.0..max_height)?;

    if options.labels {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Distance along transect")
            .y_desc("Height above ground")
            .draw()?;
    }

    chart.draw_series(
        transect
            .cells
            .iter()
            .filter(|cell| cell.zbin >= 0.0 && cell.zbin < max_height)
            .filter_map(|cell| cell.vai.map(|vai| (cell, vai)))
            .map(|(cell, vai)| {
                let top = (cell.zbin + 1.0).min(max_height);
                Rectangle::new(
                    [(cell.xbin, cell.zbin), (cell.xbin + 1.0, top)],
                    vai_color(vai).filled(),
                )
            }),
    )?;

    root.present()?;
    Ok(())
}

pub fn plot_hit_grid(path: &Path, transect: &Transect, options: &RenderOptions) -> Result<()> {
    let root = BitMapBackend::new(path, options.size).into_drawing_area();
    draw_hit_grid(&root, transect, options).map_err(|e| ExportError::Plot {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    log::info!("wrote hit grid: {:?}", path);
    Ok(())
}
