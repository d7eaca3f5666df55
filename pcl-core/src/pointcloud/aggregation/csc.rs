use serde::{Deserialize, Serialize};

use super::summary::{bin_height, TransectSummary};

/// Canopy structural complexity variables of one transect.
///
/// Statistics that are undefined for the given transect (for example the
/// mean height of a transect without vegetation) are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CscVariables {
    pub name: String,
    pub slice: i64,
    pub transect_length: usize,
    pub mean_height: f64,
    pub height_2: f64,
    pub mean_height_var: f64,
    pub mean_height_rms: f64,
    pub mode_el: f64,
    pub mean_max_ht: f64,
    pub max_ht: f64,
    pub mean_vai: f64,
    pub max_vai: f64,
    pub deep_gaps: usize,
    pub deep_gap_fraction: f64,
    pub porosity: f64,
    pub std_std: f64,
    pub mean_std: f64,
    pub rugosity: f64,
    pub top_rugosity: f64,
    pub rumple: f64,
    pub sky_fraction: f64,
    pub cover_fraction: f64,
}

impl CscVariables {
    pub fn from_summary(name: &str, slice: i64, summary: &TransectSummary) -> Self {
        let columns = &summary.columns;
        let transect_length = columns.len();

        let heights: Vec<f64> = columns.iter().filter_map(|c| c.height_bin).collect();
        let stds: Vec<f64> = columns.iter().filter_map(|c| c.std_bin).collect();
        let max_hts: Vec<f64> = columns.iter().map(|c| c.max_ht).collect();
        let sums: Vec<f64> = columns.iter().map(|c| c.sum_vai).collect();

        let std_std = sample_std(&stds);
        let mean_std = mean(&stds);

        let deep_gaps = columns.iter().filter(|c| c.sum_vai <= 0.0).count();

        let canopy_cells: usize = columns.iter().map(|c| c.canopy_cells).sum();
        let canopy_gaps: usize = columns.iter().map(|c| c.canopy_gaps).sum();

        let cells: usize = columns.iter().map(|c| c.cells()).sum();
        let sky_fraction = ratio(summary.missing_cells(), cells);

        let rumple = if transect_length == 0 {
            f64::NAN
        } else {
            let surface: f64 = max_hts.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
            (surface + transect_length as f64) / transect_length as f64
        };

        CscVariables {
            name: name.to_string(),
            slice,
            transect_length,
            mean_height: mean(&heights),
            height_2: sample_std(&heights),
            mean_height_var: sample_variance(&heights),
            mean_height_rms: (heights.iter().map(|h| h * h).sum::<f64>() / heights.len() as f64)
                .sqrt(),
            mode_el: mode_elevation(summary),
            mean_max_ht: mean(&max_hts),
            max_ht: max(&max_hts),
            mean_vai: mean(&sums),
            max_vai: max(&sums),
            deep_gaps,
            deep_gap_fraction: ratio(deep_gaps, transect_length),
            porosity: ratio(canopy_gaps, canopy_cells),
            std_std,
            mean_std,
            rugosity: (std_std.powi(2) + mean_std.powi(2)).sqrt(),
            top_rugosity: sample_std(&max_hts),
            rumple,
            sky_fraction,
            cover_fraction: 1.0 - sky_fraction,
        }
    }
}

// Height of the layer carrying the most vegetation; the lowest layer wins ties.
fn mode_elevation(summary: &TransectSummary) -> f64 {
    summary
        .height_profile()
        .into_iter()
        .filter(|(_, total)| *total > 0.0)
        .fold(None, |best: Option<(f64, f64)>, (zbin, total)| match best {
            Some((_, t)) if t >= total => best,
            _ => Some((zbin, total)),
        })
        .map_or(f64::NAN, |(zbin, _)| bin_height(zbin))
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        f64::NAN
    } else {
        num as f64 / den as f64
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn max(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().copied().fold(f64::MIN, f64::max)
}

fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

fn sample_std(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}
