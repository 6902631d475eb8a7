use std::sync::{Mutex, MutexGuard};

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::api::{ChartEngine, ChartEngineConfig, EngineSnapshot};
use crate::core::{Candle, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::RasterRenderer;

use super::{ChartHandle, HandleTable};

type RasterChart = ChartEngine<RasterRenderer>;

/// A loaded engine instance: every live chart plus the boundary operations
/// that address them by handle.
///
/// Charts sit behind one mutex, so mutation and render calls from several
/// consumers of a shared module are serialized.
#[derive(Debug)]
pub struct EngineModule {
    name: String,
    config: ChartEngineConfig,
    metadata: IndexMap<String, String>,
    charts: Mutex<HandleTable<RasterChart>>,
}

impl EngineModule {
    pub fn new(name: impl Into<String>, config: ChartEngineConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let name = name.into();
        info!(module = %name, max_live_charts = config.max_live_charts, "engine module ready");
        Ok(Self {
            name,
            charts: Mutex::new(HandleTable::new(config.max_live_charts)),
            config,
            metadata: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: IndexMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn metadata(&self) -> &IndexMap<String, String> {
        &self.metadata
    }

    /// Allocates a chart bound to `width x height` pixels.
    pub fn create(&self, width: u32, height: u32) -> ChartResult<ChartHandle> {
        let engine = ChartEngine::new_raster(Viewport::new(width, height), self.config)?;
        let handle = self.lock()?.insert(engine)?;
        debug!(%handle, width, height, "chart created");
        Ok(handle)
    }

    pub fn set_title(&self, handle: ChartHandle, title: &str) -> ChartResult<()> {
        self.with_chart(handle, |chart| chart.set_title(title))
    }

    pub fn add_candle(&self, handle: ChartHandle, candle: Candle) -> ChartResult<()> {
        self.with_chart(handle, |chart| chart.append_candle(candle))
    }

    pub fn set_series(&self, handle: ChartHandle, samples: &[f64]) -> ChartResult<()> {
        self.with_chart(handle, |chart| chart.set_series(samples.to_vec()))
    }

    /// Renders the chart and returns `width * height * 4` RGBA bytes.
    pub fn render(&self, handle: ChartHandle) -> ChartResult<Vec<u8>> {
        self.with_chart(handle, RasterChart::render_rgba)
    }

    pub fn snapshot(&self, handle: ChartHandle) -> ChartResult<EngineSnapshot> {
        self.with_chart(handle, |chart| chart.snapshot())
    }

    pub fn viewport(&self, handle: ChartHandle) -> ChartResult<Viewport> {
        self.with_chart(handle, |chart| Ok(chart.viewport()))
    }

    /// Releases the chart. Destroying the same handle again yields
    /// `StaleHandle` and leaves other charts untouched.
    pub fn destroy(&self, handle: ChartHandle) -> ChartResult<()> {
        let chart = self.lock()?.remove(handle)?;
        debug!(
            %handle,
            candles = chart.candles().len(),
            renders = chart.render_count(),
            "chart destroyed"
        );
        Ok(())
    }

    pub fn live_charts(&self) -> ChartResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn contains(&self, handle: ChartHandle) -> ChartResult<bool> {
        Ok(self.lock()?.contains(handle))
    }

    fn with_chart<T>(
        &self,
        handle: ChartHandle,
        operation: impl FnOnce(&mut RasterChart) -> ChartResult<T>,
    ) -> ChartResult<T> {
        let mut charts = self.lock()?;
        operation(charts.get_mut(handle)?)
    }

    fn lock(&self) -> ChartResult<MutexGuard<'_, HandleTable<RasterChart>>> {
        self.charts
            .lock()
            .map_err(|_| ChartError::EngineUnavailable(format!("module `{}` lock poisoned", self.name)))
    }
}
