use std::fmt;

use crate::core::{Candle, Viewport};
use crate::error::ChartResult;
use crate::render::{PixelBuffer, RasterRenderer, Renderer};

use super::ChartEngineConfig;

/// One chart instance: fixed viewport, title, candle history and a sample
/// series, drawn through a pluggable `Renderer`.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) config: ChartEngineConfig,
    pub(super) title: String,
    pub(super) candles: Vec<Candle>,
    pub(super) series: Vec<f64>,
    pub(super) renders: u64,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    #[must_use]
    pub fn series(&self) -> &[f64] {
        &self.series
    }

    /// Number of completed render passes.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

impl<R: Renderer> fmt::Debug for ChartEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartEngine")
            .field("viewport", &self.viewport)
            .field("title", &self.title)
            .field("candles", &self.candles.len())
            .field("series_len", &self.series.len())
            .field("renders", &self.renders)
            .finish_non_exhaustive()
    }
}

impl ChartEngine<RasterRenderer> {
    /// Creates an engine drawing into fresh RGBA buffers cleared to the
    /// configured background color.
    pub fn new_raster(viewport: Viewport, config: ChartEngineConfig) -> ChartResult<Self> {
        let renderer = RasterRenderer::with_clear_color(config.style.background_color)?;
        Self::new(renderer, viewport, config)
    }

    /// Renders and hands the RGBA bytes to the caller.
    pub fn render_rgba(&mut self) -> ChartResult<Vec<u8>> {
        self.render().map(PixelBuffer::into_bytes)
    }
}
