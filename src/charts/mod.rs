//! Charts module - Figure construction and rendering

mod figure;
mod plotter;
mod renderer;

pub use figure::{AxisTick, BoxGroup, BoxPlotChart, Figure, OverlayLine, Palette, PieChart};
pub use plotter::ChartPlotter;
pub use renderer::{ChartRenderer, RenderError};
#[cfg(test)]
pub use renderer::RecordingRenderer;
