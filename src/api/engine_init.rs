use tracing::debug;

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::Renderer;

use super::validation::validate_viewport;
use super::{ChartEngine, ChartEngineConfig};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an empty chart bound to `viewport`.
    ///
    /// Fails for zero dimensions, for dimensions above the configured maximum
    /// and for an invalid config.
    pub fn new(renderer: R, viewport: Viewport, config: ChartEngineConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let viewport = validate_viewport(viewport, &config)?;
        debug!(
            width = viewport.width,
            height = viewport.height,
            "chart engine created"
        );

        Ok(Self {
            renderer,
            viewport,
            config,
            title: String::new(),
            candles: Vec::new(),
            series: Vec::new(),
            renders: 0,
        })
    }
}
