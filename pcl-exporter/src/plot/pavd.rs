use std::path::Path;

use plotters::{coord::Shift, prelude::*};

use pcl_core::pointcloud::aggregation::{summary::bin_height, TransectSummary};

use super::{RenderOptions, NO_DATA_COLOR};
use crate::error::{ExportError, Result};

const PROFILE_COLOR: RGBColor = RGBColor(33, 145, 140);

/// Share of the transect's plant area found in each height layer, as
/// `(zbin, pavd)` ascending by height. Empty when there is no vegetation.
pub fn pavd_profile(summary: &TransectSummary) -> Vec<(f64, f64)> {
    let layers = summary.height_profile();
    let total: f64 = layers.iter().map(|(_, vai)| vai).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    layers
        .into_iter()
        .map(|(zbin, vai)| (zbin, vai / total))
        .collect()
}

/// Plant area density over height: density on x, height on y. With `hist`
/// each layer is also drawn as a bar.
pub fn draw_pavd<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    profile: &[(f64, f64)],
    hist: bool,
    options: &RenderOptions,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let max_height = options.max_height;
    let visible: Vec<(f64, f64)> = profile
        .iter()
        .copied()
        .filter(|(zbin, _)| *zbin >= 0.0 && *zbin < max_height)
        .collect();
    let peak = visible.iter().map(|(_, pavd)| *pavd).fold(0.0, f64::max);
    let x_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };

    root.fill(&NO_DATA_COLOR)?;

    let mut builder = ChartBuilder::on(root);
    if options.labels {
        builder
            .caption("Plant area density", ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50);
    }
    let mut chart = builder.build_cartesian_2d(0.0..x_max, 0.0..max_height)?;

    if options.labels {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("PAVD")
            .y_desc("Height above ground")
            .draw()?;
    }

    if hist {
        chart.draw_series(visible.iter().map(|(zbin, pavd)| {
            let top = (zbin + 1.0).min(max_height);
            Rectangle::new([(0.0, *zbin), (*pavd, top)], PROFILE_COLOR.mix(0.4).filled())
        }))?;
    }

    chart.draw_series(LineSeries::new(
        visible.iter().map(|(zbin, pavd)| (*pavd, bin_height(*zbin))),
        PROFILE_COLOR.stroke_width(2),
    ))?;

    root.present()?;
    Ok(())
}

pub fn plot_pavd(
    path: &Path,
    summary: &TransectSummary,
    hist: bool,
    options: &RenderOptions,
) -> Result<()> {
    let profile = pavd_profile(summary);
    let (w, h) = options.size;
    // the profile is tall and narrow
    let root = BitMapBackend::new(path, (h, w)).into_drawing_area();
    draw_pavd(&root, &profile, hist, options).map_err(|e| ExportError::Plot {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    log::info!("wrote PAVD profile: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use pcl_core::pointcloud::{
        aggregation::{MeanLeafHeightAggregator, TransectAggregator as _},
        transect::{Transect, TransectCell},
    };

    use super::*;

    fn summary(cells: Vec<TransectCell>) -> TransectSummary {
        MeanLeafHeightAggregator.aggregate(&Transect::new(0, cells))
    }

    #[test]
    fn profile_sums_to_one() {
        let s = summary(vec![
            TransectCell::new(0.0, 0.0, Some(1.0)),
            TransectCell::new(1.0, 0.0, Some(1.0)),
            TransectCell::new(1.0, 2.0, Some(2.0)),
            TransectCell::new(2.0, 2.0, None),
        ]);
        let profile = pavd_profile(&s);
        assert_eq!(profile, vec![(0.0, 0.5), (2.0, 0.5)]);
    }

    #[test]
    fn bare_transect_has_no_profile() {
        let s = summary(vec![TransectCell::new(0.0, 0.0, Some(0.0))]);
        assert!(pavd_profile(&s).is_empty());
    }

    #[test]
    fn writes_png_with_and_without_bars() {
        let dir = tempfile::tempdir().unwrap();
        let options = RenderOptions {
            size: (300, 200),
            labels: false,
            ..Default::default()
        };
        let s = summary(vec![
            TransectCell::new(0.0, 0.0, Some(1.0)),
            TransectCell::new(0.0, 3.0, Some(4.0)),
        ]);

        for hist in [false, true] {
            let path = dir.path().join(format!("pavd_{}.png", hist));
            plot_pavd(&path, &s, hist, &options).unwrap();
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }

    #[test]
    fn empty_summary_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty_pavd.png");
        let options = RenderOptions {
            size: (300, 200),
            labels: false,
            ..Default::default()
        };
        plot_pavd(&path, &TransectSummary::default(), false, &options).unwrap();
        assert!(path.exists());
    }
}
