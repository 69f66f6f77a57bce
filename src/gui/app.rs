//! Fitness Analyser Window
//! Native window holding every figure produced by the report.

use crate::charts::{ChartRenderer, Figure, RenderError};
use crate::gui::ChartViewer;
use eframe::egui;
use tracing::info;

/// Main application window.
pub struct FitnessApp {
    chart_viewer: ChartViewer,
}

impl FitnessApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, figures: Vec<Figure>) -> Self {
        Self {
            chart_viewer: ChartViewer::new(figures),
        }
    }
}

impl eframe::App for FitnessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

/// Queues figures and shows them in one window on `finish`.
///
/// `finish` blocks until the window is closed.
pub struct WindowRenderer {
    title: String,
    figures: Vec<Figure>,
}

impl WindowRenderer {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            figures: Vec::new(),
        }
    }
}

impl ChartRenderer for WindowRenderer {
    fn render(&mut self, figure: Figure) -> Result<(), RenderError> {
        info!("Queued chart: {}", figure.title());
        self.figures.push(figure);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        if self.figures.is_empty() {
            return Ok(());
        }

        let figures = std::mem::take(&mut self.figures);
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1200.0, 900.0])
                .with_min_inner_size([800.0, 600.0])
                .with_title(self.title.clone()),
            ..Default::default()
        };

        eframe::run_native(
            &self.title,
            options,
            Box::new(move |cc| Ok(Box::new(FitnessApp::new(cc, figures)))),
        )
        .map_err(|e| RenderError::Window(e.to_string()))
    }
}
