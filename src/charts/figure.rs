//! Chart Figure Module
//! Renderer-independent description of every chart the report produces.

use crate::stats::BoxSpread;

/// Color ramp for a chart's series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Blues,
    BluesDark,
    GreensDark,
    Viridis,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub label: String,
}

impl AxisTick {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// One box in a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    pub position: f64,
    pub label: String,
    pub values: Vec<f64>,
    pub spread: BoxSpread,
}

/// Connected overlay line, e.g. per-group means.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLine {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlotChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub groups: Vec<BoxGroup>,
    pub x_ticks: Vec<AxisTick>,
    /// Empty means automatic ticks
    pub y_ticks: Vec<AxisTick>,
    pub overlay: Option<OverlayLine>,
    pub palette: Palette,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
}

impl PieSlice {
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
    pub palette: Palette,
    /// Degrees; slices run counter-clockwise from here
    pub start_angle: f64,
}

impl PieChart {
    /// Build a pie from `(label, count)` pairs in slice order.
    pub fn from_counts(title: &str, counts: Vec<(String, usize)>, palette: Palette) -> Self {
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        let slices = counts
            .into_iter()
            .map(|(label, count)| PieSlice {
                label,
                count,
                fraction: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                },
            })
            .collect();

        Self {
            title: title.to_string(),
            slices,
            palette,
            start_angle: 90.0,
        }
    }

    /// `(start, end)` angle of each slice in degrees.
    pub fn sector_angles(&self) -> Vec<(f64, f64)> {
        let mut start = self.start_angle;
        self.slices
            .iter()
            .map(|s| {
                let end = start + s.fraction * 360.0;
                let sector = (start, end);
                start = end;
                sector
            })
            .collect()
    }
}

/// One displayed figure.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    BoxPlot(BoxPlotChart),
    /// Charts shown side by side
    PieRow(Vec<PieChart>),
}

impl Figure {
    pub fn title(&self) -> String {
        match self {
            Figure::BoxPlot(chart) => chart.title.clone(),
            Figure::PieRow(pies) => pies
                .iter()
                .map(|p| p.title.as_str())
                .collect::<Vec<_>>()
                .join(" / "),
        }
    }
}
