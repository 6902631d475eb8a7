use tracing::{debug, trace};

use crate::core::Candle;
use crate::error::ChartResult;
use crate::render::Renderer;

use super::ChartEngine;
use super::validation::{validate_series, validate_title};

impl<R: Renderer> ChartEngine<R> {
    /// Replaces the chart title.
    pub fn set_title(&mut self, title: impl Into<String>) -> ChartResult<()> {
        let title = title.into();
        validate_title(&title, &self.config)?;
        debug!(chars = title.chars().count(), "set title");
        self.title = title;
        Ok(())
    }

    /// Appends one candle to the history after applying the configured
    /// OHLC tolerance. Rejected candles leave the history untouched.
    pub fn append_candle(&mut self, candle: Candle) -> ChartResult<()> {
        let candle = self.config.ohlc_tolerance.apply(candle)?;
        self.candles.push(candle);
        trace!(
            count = self.candles.len(),
            timestamp = candle.timestamp,
            "append candle"
        );
        Ok(())
    }

    /// Replaces the secondary series wholesale.
    ///
    /// A series with a non-finite or out-of-range sample is rejected and the
    /// stored series is kept.
    pub fn set_series(&mut self, samples: Vec<f64>) -> ChartResult<()> {
        validate_series(&samples)?;
        debug!(
            previous_len = self.series.len(),
            len = samples.len(),
            "set series"
        );
        self.series = samples;
        Ok(())
    }
}
