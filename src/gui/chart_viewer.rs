//! Chart Viewer Widget
//! Scrollable list of figure cards; pie rows are laid out side by side.

use crate::charts::{ChartPlotter, Figure};
use egui::{RichText, ScrollArea};

const CARD_SPACING: f32 = 15.0;
const BOX_PLOT_HEIGHT: f32 = 420.0;
const PIE_HEIGHT: f32 = 320.0;

/// Scrollable display of every rendered figure.
pub struct ChartViewer {
    pub figures: Vec<Figure>,
}

impl ChartViewer {
    pub fn new(figures: Vec<Figure>) -> Self {
        Self { figures }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        if self.figures.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (idx, figure) in self.figures.iter().enumerate() {
                    Self::draw_card(ui, figure, idx);
                    ui.add_space(CARD_SPACING);
                }
            });
    }

    fn draw_card(ui: &mut egui::Ui, figure: &Figure, idx: usize) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| match figure {
                Figure::BoxPlot(chart) => {
                    ui.label(RichText::new(&chart.title).size(16.0).strong());
                    ui.add_space(8.0);
                    ChartPlotter::draw_box_plot(ui, chart, &idx.to_string(), BOX_PLOT_HEIGHT);
                }
                Figure::PieRow(pies) => {
                    let count = pies.len().max(1) as f32;
                    let width = (ui.available_width() - CARD_SPACING * (count - 1.0)) / count;
                    ui.horizontal(|ui| {
                        for (i, pie) in pies.iter().enumerate() {
                            ui.vertical(|ui| {
                                ui.set_width(width);
                                ui.label(RichText::new(&pie.title).size(14.0).strong());
                                ChartPlotter::draw_pie(
                                    ui,
                                    pie,
                                    &format!("{}_{}", idx, i),
                                    PIE_HEIGHT,
                                );
                            });
                            ui.add_space(CARD_SPACING);
                        }
                    });
                }
            });
    }
}
