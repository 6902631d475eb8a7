use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::module::{Chart, ChartHandle, ModuleLoader};

use super::{DemoConfig, LogSink, SampleGenerator, Surface};

/// Result of one controller action, mirrored by the log line it wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    /// Skipped by a state guard; a notice was logged.
    Guarded,
    /// The engine rejected the action; the error was logged.
    Failed,
}

/// The demo's user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoAction {
    Init,
    AddCandle,
    AddMany,
    Render,
    Destroy,
}

impl DemoAction {
    pub const ALL: [Self; 5] = [
        Self::Init,
        Self::AddCandle,
        Self::AddMany,
        Self::Render,
        Self::Destroy,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::AddCandle => "add-candle",
            Self::AddMany => "add-many",
            Self::Render => "render",
            Self::Destroy => "destroy",
        }
    }
}

impl fmt::Display for DemoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DemoAction {
    type Err = ChartError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == input.trim())
            .ok_or_else(|| ChartError::InvalidData(format!("unknown demo action `{input}`")))
    }
}

/// Drives at most one chart on behalf of a user, logging every action.
///
/// State guards never surface as errors: acting on a missing chart or
/// initializing twice logs a notice and returns [`ActionOutcome::Guarded`].
pub struct DemoController<S: LogSink> {
    loader: Arc<ModuleLoader>,
    config: DemoConfig,
    samples: SampleGenerator,
    surface: Surface,
    log: S,
    chart: Option<Chart>,
}

impl<S: LogSink> DemoController<S> {
    pub fn new(loader: Arc<ModuleLoader>, config: DemoConfig, log: S) -> ChartResult<Self> {
        let config = config.validate()?;
        let surface = Surface::new(config.surface_width, config.surface_height)?;
        Ok(Self {
            loader,
            samples: SampleGenerator::new(config.seed),
            config,
            surface,
            log,
            chart: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    #[must_use]
    pub fn loader(&self) -> &Arc<ModuleLoader> {
        &self.loader
    }

    #[must_use]
    pub fn log(&self) -> &S {
        &self.log
    }

    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[must_use]
    pub fn chart(&self) -> Option<&Chart> {
        self.chart.as_ref()
    }

    #[must_use]
    pub fn handle(&self) -> Option<ChartHandle> {
        self.chart.as_ref().map(Chart::handle)
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.chart.is_some()
    }

    pub async fn run(&mut self, action: DemoAction) -> ActionOutcome {
        match action {
            DemoAction::Init => self.init().await,
            DemoAction::AddCandle => self.add_candle(),
            DemoAction::AddMany => self.add_many(),
            DemoAction::Render => self.render(),
            DemoAction::Destroy => self.destroy(),
        }
    }

    /// Loads the engine module on first use and creates the chart.
    pub async fn init(&mut self) -> ActionOutcome {
        if self.chart.is_some() {
            self.log.append("Chart already initialized");
            return ActionOutcome::Guarded;
        }

        match self.open_chart().await {
            Ok(chart) => {
                self.log.append(&format!(
                    "Chart initialized ({}x{})",
                    chart.width(),
                    chart.height()
                ));
                self.chart = Some(chart);
                ActionOutcome::Applied
            }
            Err(err) => {
                self.log.append(&format!("Init error: {err}"));
                ActionOutcome::Failed
            }
        }
    }

    pub fn add_candle(&mut self) -> ActionOutcome {
        let Some(chart) = self.chart.as_ref() else {
            self.log.append("Initialize the chart first");
            return ActionOutcome::Guarded;
        };

        let result = self
            .samples
            .next_candle()
            .and_then(|candle| chart.add_candle(candle).map(|()| candle));
        match result {
            Ok(candle) => {
                self.log.append(&format!(
                    "Added candle: open={:.2} close={:.2}",
                    candle.open, candle.close
                ));
                ActionOutcome::Applied
            }
            Err(err) => self.failed("Add candle", &err),
        }
    }

    /// Replaces the chart's series with `series_len` fresh samples.
    pub fn add_many(&mut self) -> ActionOutcome {
        let Some(chart) = self.chart.as_ref() else {
            self.log.append("Initialize the chart first");
            return ActionOutcome::Guarded;
        };

        let samples = self.samples.series(self.config.series_len);
        match chart.set_series(&samples) {
            Ok(()) => {
                self.log
                    .append(&format!("Stored {} sample points", samples.len()));
                ActionOutcome::Applied
            }
            Err(err) => self.failed("Add many", &err),
        }
    }

    /// Renders the chart and paints the bytes onto the surface.
    pub fn render(&mut self) -> ActionOutcome {
        let Some(chart) = self.chart.as_ref() else {
            self.log.append("Initialize the chart first");
            return ActionOutcome::Guarded;
        };

        match chart.render() {
            Ok(pixels) => {
                self.log
                    .append(&format!("Render returned {} bytes", pixels.len()));
                self.surface.paint_wrapping(&pixels);
                ActionOutcome::Applied
            }
            Err(err) => self.failed("Render", &err),
        }
    }

    pub fn destroy(&mut self) -> ActionOutcome {
        let Some(chart) = self.chart.take() else {
            self.log.append("Chart is not initialized");
            return ActionOutcome::Guarded;
        };

        match chart.destroy() {
            Ok(()) => {
                self.log.append("Chart destroyed");
                ActionOutcome::Applied
            }
            Err(err) => self.failed("Destroy", &err),
        }
    }

    /// Releases any live chart without logging. Returns `true` if a chart
    /// was released.
    pub fn teardown(&mut self) -> bool {
        match self.chart.take() {
            Some(chart) => {
                let handle = chart.handle();
                if let Err(err) = chart.destroy() {
                    debug!(%handle, error = %err, "teardown release failed");
                }
                true
            }
            None => false,
        }
    }

    async fn open_chart(&mut self) -> ChartResult<Chart> {
        let first_load = !self.loader.is_loaded();
        let module = self.loader.get().await?;
        if first_load {
            self.log.append("Engine module loaded");
        }

        let chart = Chart::create(module, self.config.width, self.config.height)?;
        chart.set_title(&self.config.title)?;
        Ok(chart)
    }

    fn failed(&mut self, action: &str, err: &ChartError) -> ActionOutcome {
        self.log.append(&format!("{action} error: {err}"));
        ActionOutcome::Failed
    }
}

impl<S: LogSink> fmt::Debug for DemoController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoController")
            .field("config", &self.config)
            .field("chart", &self.chart)
            .finish_non_exhaustive()
    }
}

impl<S: LogSink> Drop for DemoController<S> {
    fn drop(&mut self) {
        if self.teardown() {
            debug!("demo controller released its chart on drop");
        }
    }
}
