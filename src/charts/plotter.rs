//! Chart Plotter Module
//! Draws figures interactively using egui_plot.

use crate::charts::{AxisTick, BoxPlotChart, Palette, PieChart};
use egui::{Align2, Color32, RichText, Stroke};
use egui_plot::{
    BoxElem, BoxPlot, BoxSpread as PlotSpread, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints,
    Points, Polygon, Text,
};

const MEAN_COLOR: Color32 = Color32::from_rgb(214, 39, 40); // Red
const PIE_EDGE: Color32 = Color32::WHITE;

/// Arc resolution for pie sectors, in degrees per segment
const ARC_STEP: f64 = 2.0;

/// Ramp endpoints (light → dark, or along the colormap)
fn ramp(palette: Palette) -> &'static [(u8, u8, u8)] {
    match palette {
        Palette::Blues => &[(198, 219, 239), (8, 81, 156)],
        Palette::BluesDark => &[(107, 174, 214), (8, 48, 107)],
        Palette::GreensDark => &[(116, 196, 118), (0, 68, 27)],
        Palette::Viridis => &[(68, 1, 84), (33, 145, 140), (253, 231, 37)],
    }
}

/// Draws figures with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for series `idx` of `n`, sampled evenly along the palette.
    pub fn palette_color(palette: Palette, idx: usize, n: usize) -> Color32 {
        let stops = ramp(palette);
        let t = if n <= 1 {
            0.5
        } else {
            idx as f64 / (n - 1) as f64
        };

        let segments = (stops.len() - 1) as f64;
        let pos = t.clamp(0.0, 1.0) * segments;
        let seg = (pos.floor() as usize).min(stops.len() - 2);
        let frac = pos - seg as f64;

        let (r0, g0, b0) = stops[seg];
        let (r1, g1, b1) = stops[seg + 1];
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        Color32::from_rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }

    fn tick_marks(ticks: &[AxisTick]) -> Vec<GridMark> {
        ticks
            .iter()
            .map(|t| GridMark {
                value: t.value,
                step_size: 1.0,
            })
            .collect()
    }

    fn tick_label(ticks: &[AxisTick], value: f64) -> String {
        ticks
            .iter()
            .find(|t| (t.value - value).abs() < 1e-6)
            .map(|t| t.label.clone())
            .unwrap_or_default()
    }

    /// Draw a box plot with its optional mean overlay.
    pub fn draw_box_plot(ui: &mut egui::Ui, chart: &BoxPlotChart, id: &str, height: f32) {
        let x_ticks = chart.x_ticks.clone();
        let x_ticks_fmt = chart.x_ticks.clone();
        let y_ticks = chart.y_ticks.clone();
        let y_ticks_fmt = chart.y_ticks.clone();

        let mut plot = Plot::new(format!("boxplot_{}", id))
            .height(height)
            .allow_zoom(true)
            .allow_drag(true)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .x_grid_spacer(move |_input| Self::tick_marks(&x_ticks))
            .x_axis_formatter(move |mark, _range| Self::tick_label(&x_ticks_fmt, mark.value));

        if !y_ticks.is_empty() {
            plot = plot
                .y_grid_spacer(move |_input| Self::tick_marks(&y_ticks))
                .y_axis_formatter(move |mark, _range| Self::tick_label(&y_ticks_fmt, mark.value));
        }

        let n = chart.groups.len();
        plot.show(ui, |plot_ui| {
            for (i, group) in chart.groups.iter().enumerate() {
                let color = Self::palette_color(chart.palette, i, n);
                let spread = group.spread;

                let elem = BoxElem::new(
                    group.position,
                    PlotSpread::new(
                        spread.lower_whisker,
                        spread.q1,
                        spread.median,
                        spread.q3,
                        spread.upper_whisker,
                    ),
                )
                .name(&group.label)
                .box_width(0.6)
                .fill(color)
                .stroke(Stroke::new(1.5, Color32::from_gray(60)));

                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&group.label));

                let observed: PlotPoints = group
                    .values
                    .iter()
                    .map(|&v| [group.position, v])
                    .collect();
                plot_ui.points(
                    Points::new(observed)
                        .radius(2.0)
                        .color(Color32::from_gray(90).gamma_multiply(0.6)),
                );
            }

            if let Some(overlay) = &chart.overlay {
                let line_points: PlotPoints = overlay.points.iter().copied().collect();
                plot_ui.line(
                    Line::new(line_points)
                        .color(MEAN_COLOR)
                        .width(2.0)
                        .name(&overlay.name),
                );

                let markers: PlotPoints = overlay.points.iter().copied().collect();
                plot_ui.points(
                    Points::new(markers)
                        .radius(5.0)
                        .color(MEAN_COLOR)
                        .name(&overlay.name),
                );
            }
        });
    }

    /// Outline of a pie sector from `start` to `end` degrees, unit radius.
    pub fn sector_points(start: f64, end: f64) -> Vec<[f64; 2]> {
        let steps = (((end - start) / ARC_STEP).ceil() as usize).max(1);
        let mut points = Vec::with_capacity(steps + 2);
        points.push([0.0, 0.0]);
        for k in 0..=steps {
            let angle = (start + (end - start) * k as f64 / steps as f64).to_radians();
            points.push([angle.cos(), angle.sin()]);
        }
        points
    }

    /// Draw a pie with semantic labels outside and percentages inside each slice.
    pub fn draw_pie(ui: &mut egui::Ui, pie: &PieChart, id: &str, height: f32) {
        let sectors = pie.sector_angles();
        let n = pie.slices.len();

        Plot::new(format!("pie_{}", id))
            .height(height)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(-1.4)
            .include_x(1.4)
            .include_y(-1.3)
            .include_y(1.3)
            .show(ui, |plot_ui| {
                for (i, (slice, &(start, end))) in pie.slices.iter().zip(&sectors).enumerate() {
                    if slice.count == 0 {
                        continue;
                    }
                    let color = Self::palette_color(pie.palette, i, n);

                    let outline: PlotPoints = Self::sector_points(start, end).into_iter().collect();
                    plot_ui.polygon(
                        Polygon::new(outline)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, PIE_EDGE))
                            .name(&slice.label),
                    );

                    let mid = ((start + end) / 2.0).to_radians();
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(1.15 * mid.cos(), 1.15 * mid.sin()),
                            RichText::new(&slice.label).size(12.0),
                        )
                        .anchor(Align2::CENTER_CENTER),
                    );
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                            RichText::new(slice.percent_label())
                                .size(11.0)
                                .color(Color32::WHITE),
                        )
                        .anchor(Align2::CENTER_CENTER),
                    );
                }
            });
    }
}
