use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{Candle, LinearScale, PlotArea};
use crate::error::{ChartError, ChartResult};

/// Tuning controls for price-domain autoscaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScaleTuning {
    pub top_padding_ratio: f64,
    pub bottom_padding_ratio: f64,
    pub min_span_absolute: f64,
}

impl Default for PriceScaleTuning {
    fn default() -> Self {
        Self {
            top_padding_ratio: 0.10,
            bottom_padding_ratio: 0.10,
            min_span_absolute: 0.000_001,
        }
    }
}

impl PriceScaleTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.top_padding_ratio.is_finite()
            || !self.bottom_padding_ratio.is_finite()
            || self.top_padding_ratio < 0.0
            || self.bottom_padding_ratio < 0.0
        {
            return Err(ChartError::InvalidData(
                "price scale padding ratios must be finite and >= 0".to_owned(),
            ));
        }

        if !self.min_span_absolute.is_finite() || self.min_span_absolute <= 0.0 {
            return Err(ChartError::InvalidData(
                "price scale min span must be finite and > 0".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Price axis mapped onto an inverted Y pixel axis inside a plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    linear: LinearScale,
}

impl PriceScale {
    /// Creates a price scale from explicit min/max values.
    pub fn new(price_min: f64, price_max: f64, plot: PlotArea) -> ChartResult<Self> {
        let min_span = PriceScaleTuning::default().min_span_absolute;
        let (min, max) = normalize_range(price_min, price_max, min_span)?;
        Ok(Self {
            linear: LinearScale::new(min, max, plot.bottom(), plot.top)?,
        })
    }

    /// Fits the domain to candle extremes and series values.
    ///
    /// Empty data falls back to `[0, 1]`.
    pub fn from_data(
        candles: &[Candle],
        series: &[f64],
        plot: PlotArea,
        tuning: PriceScaleTuning,
    ) -> ChartResult<Self> {
        let tuning = tuning.validate()?;

        let lows = candles
            .iter()
            .map(|candle| candle.low)
            .chain(series.iter().copied());
        let highs = candles
            .iter()
            .map(|candle| candle.high)
            .chain(series.iter().copied());
        let (Some(min), Some(max)) = (
            lows.map(OrderedFloat).min(),
            highs.map(OrderedFloat).max(),
        ) else {
            return Self::new(0.0, 1.0, plot);
        };

        let (min, max) = normalize_range(min.0, max.0, tuning.min_span_absolute)?;
        let span = max - min;
        let padded = (
            min - span * tuning.bottom_padding_ratio,
            max + span * tuning.top_padding_ratio,
        );
        // Oversized padding ratios fall back to the tight range.
        if padded.0.is_finite() && padded.1.is_finite() {
            Self::new(padded.0, padded.1, plot)
        } else {
            Self::new(min, max, plot)
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    pub fn price_to_pixel(self, price: f64) -> ChartResult<f64> {
        self.linear.domain_to_pixel(price)
    }

    pub fn pixel_to_price(self, pixel: f64) -> ChartResult<f64> {
        self.linear.pixel_to_domain(pixel)
    }
}

fn normalize_range(start: f64, end: f64, min_span: f64) -> ChartResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData(
            "price range must be finite".to_owned(),
        ));
    }

    let (low, high) = (start.min(end), start.max(end));
    if high - low < min_span {
        let center = (low + high) / 2.0;
        let half = (center.abs() * 0.05).max(min_span) / 2.0;
        return Ok((center - half, center + half));
    }

    Ok((low, high))
}
