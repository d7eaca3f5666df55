use plotters::style::RGBColor;

pub mod hit_grid;
pub mod pavd;

pub use hit_grid::{draw_hit_grid, plot_hit_grid};
pub use pavd::{draw_pavd, pavd_profile, plot_pavd};

/// Fixed colour scale of the hit grid.
pub const VAI_SCALE: (f64, f64) = (0.0, 8.0);

pub const DEFAULT_MAX_HEIGHT: f64 = 41.0;

const NO_DATA_COLOR: RGBColor = RGBColor(255, 255, 255);

// viridis at 33 evenly spaced stops
const VIRIDIS: [(u8, u8, u8); 33] = [
    (68, 1, 84),
    (72, 13, 96),
    (72, 24, 106),
    (72, 34, 115),
    (71, 45, 123),
    (69, 55, 129),
    (67, 64, 134),
    (64, 74, 137),
    (61, 82, 140),
    (57, 91, 141),
    (52, 99, 142),
    (48, 107, 142),
    (43, 114, 142),
    (39, 122, 142),
    (35, 129, 141),
    (33, 137, 140),
    (31, 144, 139),
    (31, 152, 138),
    (33, 159, 135),
    (36, 166, 132),
    (42, 174, 128),
    (50, 181, 123),
    (61, 188, 116),
    (74, 194, 107),
    (90, 200, 97),
    (108, 206, 86),
    (128, 211, 73),
    (149, 216, 60),
    (172, 220, 48),
    (194, 223, 37),
    (216, 226, 29),
    (236, 229, 27),
    (253, 231, 37),
];

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Heights at or above this value are cut from the plots.
    pub max_height: f64,
    pub size: (u32, u32),
    /// Draw captions and axis labels. Needs a system font.
    pub labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_height: DEFAULT_MAX_HEIGHT,
            size: (1200, 600),
            labels: true,
        }
    }
}

/// Colour of a VAI value on the fixed scale; out-of-range values clamp.
pub fn vai_color(vai: f64) -> RGBColor {
    let (lo, hi) = VAI_SCALE;
    let t = ((vai - lo) / (hi - lo)).clamp(0.0, 1.0);

    let pos = t * (VIRIDIS.len() - 1) as f64;
    let i = (pos.floor() as usize).min(VIRIDIS.len() - 2);
    let f = pos - i as f64;

    let (a, b) = (VIRIDIS[i], VIRIDIS[i + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * f).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
