//! Chart Renderer Module
//! Seam between report construction and chart display.

use crate::charts::Figure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to open chart window: {0}")]
    Window(String),
}

/// Receives finished figures from the reporter.
pub trait ChartRenderer {
    fn render(&mut self, figure: Figure) -> Result<(), RenderError>;

    /// Called once after the last figure.
    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Keeps figures in memory instead of drawing them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub figures: Vec<Figure>,
    pub finished: usize,
}

#[cfg(test)]
impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, figure: Figure) -> Result<(), RenderError> {
        self.figures.push(figure);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.finished += 1;
        Ok(())
    }
}
