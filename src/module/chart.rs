use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::EngineSnapshot;
use crate::core::Candle;
use crate::error::ChartResult;

use super::{ChartHandle, EngineModule};

/// Owned chart handle.
///
/// The chart is released exactly once: either through [`Chart::destroy`] or,
/// if the wrapper goes out of scope first, on drop.
#[derive(Debug)]
pub struct Chart {
    module: Arc<EngineModule>,
    handle: ChartHandle,
    width: u32,
    height: u32,
    released: bool,
}

impl Chart {
    pub fn create(module: Arc<EngineModule>, width: u32, height: u32) -> ChartResult<Self> {
        let handle = module.create(width, height)?;
        Ok(Self {
            module,
            handle,
            width,
            height,
            released: false,
        })
    }

    #[must_use]
    pub fn handle(&self) -> ChartHandle {
        self.handle
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn module(&self) -> &Arc<EngineModule> {
        &self.module
    }

    pub fn set_title(&self, title: &str) -> ChartResult<()> {
        self.module.set_title(self.handle, title)
    }

    pub fn add_candle(&self, candle: Candle) -> ChartResult<()> {
        self.module.add_candle(self.handle, candle)
    }

    pub fn set_series(&self, samples: &[f64]) -> ChartResult<()> {
        self.module.set_series(self.handle, samples)
    }

    /// RGBA bytes, `width * height * 4` long.
    pub fn render(&self) -> ChartResult<Vec<u8>> {
        self.module.render(self.handle)
    }

    pub fn snapshot(&self) -> ChartResult<EngineSnapshot> {
        self.module.snapshot(self.handle)
    }

    /// Releases the chart and reports the boundary result.
    pub fn destroy(mut self) -> ChartResult<()> {
        self.release()
    }

    fn release(&mut self) -> ChartResult<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.module.destroy(self.handle)
    }
}

impl Drop for Chart {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        debug!(handle = %self.handle, "releasing chart on drop");
        if let Err(err) = self.release() {
            warn!(handle = %self.handle, error = %err, "chart release failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ChartEngineConfig;

    fn module() -> Arc<EngineModule> {
        Arc::new(EngineModule::new("test", ChartEngineConfig::default()).expect("module"))
    }

    #[test]
    fn drop_releases_handle() {
        let module = module();
        let handle = {
            let chart = Chart::create(Arc::clone(&module), 16, 8).expect("chart");
            chart.handle()
        };

        assert_eq!(module.live_charts().expect("live"), 0);
        assert!(!module.contains(handle).expect("contains"));
    }

    #[test]
    fn destroy_releases_once() {
        let module = module();
        let chart = Chart::create(Arc::clone(&module), 16, 8).expect("chart");
        let keep = Chart::create(Arc::clone(&module), 4, 4).expect("chart");

        chart.destroy().expect("destroy");
        assert_eq!(module.live_charts().expect("live"), 1);
        assert_eq!(keep.render().expect("render").len(), 4 * 4 * 4);
    }
}
