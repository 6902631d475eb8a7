use serde::{Deserialize, Serialize};

use crate::core::{OhlcTolerance, PriceScaleTuning};

use super::RenderStyle;

pub const DEFAULT_MAX_DIMENSION_PX: u32 = 8192;
pub const DEFAULT_MAX_TITLE_CHARS: usize = 256;
pub const DEFAULT_MAX_LIVE_CHARTS: usize = 64;

/// Engine-wide limits and presentation settings.
///
/// This type is serializable so module descriptors can carry engine setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    #[serde(default = "default_max_dimension")]
    pub max_width: u32,
    #[serde(default = "default_max_dimension")]
    pub max_height: u32,
    #[serde(default = "default_max_title_chars")]
    pub max_title_chars: usize,
    #[serde(default = "default_max_live_charts")]
    pub max_live_charts: usize,
    #[serde(default)]
    pub ohlc_tolerance: OhlcTolerance,
    #[serde(default)]
    pub price_scale_tuning: PriceScaleTuning,
    #[serde(default)]
    pub style: RenderStyle,
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_dimension(),
            max_height: default_max_dimension(),
            max_title_chars: default_max_title_chars(),
            max_live_charts: default_max_live_charts(),
            ohlc_tolerance: OhlcTolerance::default(),
            price_scale_tuning: PriceScaleTuning::default(),
            style: RenderStyle::default(),
        }
    }
}

impl ChartEngineConfig {
    /// Sets the largest accepted chart dimensions.
    #[must_use]
    pub fn with_max_dimensions(mut self, max_width: u32, max_height: u32) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    #[must_use]
    pub fn with_max_title_chars(mut self, max_title_chars: usize) -> Self {
        self.max_title_chars = max_title_chars;
        self
    }

    #[must_use]
    pub fn with_max_live_charts(mut self, max_live_charts: usize) -> Self {
        self.max_live_charts = max_live_charts;
        self
    }

    /// Sets how candles with open/close outside `[low, high]` are treated.
    #[must_use]
    pub fn with_ohlc_tolerance(mut self, tolerance: OhlcTolerance) -> Self {
        self.ohlc_tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_price_scale_tuning(mut self, tuning: PriceScaleTuning) -> Self {
        self.price_scale_tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }
}

fn default_max_dimension() -> u32 {
    DEFAULT_MAX_DIMENSION_PX
}

fn default_max_title_chars() -> usize {
    DEFAULT_MAX_TITLE_CHARS
}

fn default_max_live_charts() -> usize {
    DEFAULT_MAX_LIVE_CHARTS
}
