use serde::{Deserialize, Serialize};

use crate::core::{Candle, CandleGeometry, Viewport, project_candles};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::ChartEngine;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub title: String,
    pub candles: Vec<Candle>,
    pub series: Vec<f64>,
    pub price_domain: (f64, f64),
    /// First and last candle timestamps, `None` without candles.
    #[serde(default)]
    pub time_range: Option<(i64, i64)>,
    pub candle_geometry: Vec<CandleGeometry>,
    pub render_count: u64,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn snapshot(&self) -> ChartResult<EngineSnapshot> {
        let layout = self.layout()?;
        let candle_geometry = project_candles(
            &self.candles,
            layout.slots,
            layout.price_scale,
            self.config.style.candle_body_ratio,
        )?;
        let time_range = self
            .candles
            .first()
            .zip(self.candles.last())
            .map(|(first, last)| (first.timestamp, last.timestamp));

        Ok(EngineSnapshot {
            viewport: self.viewport,
            title: self.title.clone(),
            candles: self.candles.clone(),
            series: self.series.clone(),
            price_domain: layout.price_scale.domain(),
            time_range,
            candle_geometry,
            render_count: self.renders,
        })
    }
}
