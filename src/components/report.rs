/// What a component produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// Monospace text, usually a column-aligned table.
    Text(String),
    Lines(LinePlot),
    Grid(HeatGrid),
}

impl Report {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// One labelled line of a [`LinePlot`].
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePlot {
    pub series: Vec<Series>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Evenly spaced labels spanning `x_bounds`.
    pub x_labels: Vec<String>,
}

impl LinePlot {
    /// Build a plot whose y range covers every point (and zero).
    pub fn new(series: Vec<Series>, x_bounds: [f64; 2], x_labels: Vec<String>) -> Self {
        let top = series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, y)| y))
            .fold(0.0_f64, f64::max);
        Self {
            series,
            x_bounds,
            y_bounds: [0.0, if top > 0.0 { top } else { 1.0 }],
            x_labels,
        }
    }
}

/// Counts laid out on a labelled grid, drawn with a single-hue color map.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatGrid {
    pub values: Vec<Vec<u32>>,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub hue: f64,
}

impl HeatGrid {
    /// Position of `value` between the smallest and largest cell, in `[0, 1]`.
    pub fn intensity(&self, value: u32) -> f64 {
        let cells = self.values.iter().flatten().copied();
        let (min, max) = cells.fold((u32::MAX, 0), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if max <= min {
            return 0.0;
        }
        f64::from(value.saturating_sub(min)) / f64::from(max - min)
    }

    pub fn color(&self, value: u32) -> (u8, u8, u8) {
        // the palette has 255 steps, the last one just short of full saturation
        hue_color(self.hue, self.intensity(value) * 254.0 / 255.0)
    }
}

/// HSV color with full value: `hue` and `saturation` in `[0, 1]`.
pub fn hue_color(hue: f64, saturation: f64) -> (u8, u8, u8) {
    let s = saturation.clamp(0.0, 1.0);
    let h = hue.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = 1.0 - s;
    let q = 1.0 - s * f;
    let t = 1.0 - s * (1.0 - f);

    let (r, g, b) = match sector as u8 {
        0 => (1.0, t, p),
        1 => (q, 1.0, p),
        2 => (p, 1.0, t),
        3 => (p, q, 1.0),
        4 => (t, p, 1.0),
        _ => (1.0, p, q),
    };
    let channel = |c: f64| (c * 255.0).round() as u8;
    (channel(r), channel(g), channel(b))
}
