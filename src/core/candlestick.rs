use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64};
use crate::core::{PriceScale, SlotScale};
use crate::error::{ChartError, ChartResult};

/// Largest accepted magnitude for prices, volumes and series samples.
///
/// Keeps autoscale padding and pixel projection inside `f64` range.
pub const MAX_ABS_VALUE: f64 = 1e150;

/// OHLCV sample for one interval. `timestamp` is in Unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Builds a validated candle.
    ///
    /// Invariants:
    /// - all prices and volume are finite
    /// - `volume >= 0`
    /// - `low <= high`, and `open`/`close` are within `[low, high]`
    pub fn new(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> ChartResult<Self> {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
        .validate()
    }

    /// Converts strongly-typed temporal/decimal input into a validated candle.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            datetime_to_unix_millis(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
            decimal_to_f64(volume, "volume")?,
        )
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.validate_values()?;

        if self.low > self.high {
            return Err(ChartError::InvalidData(
                "ohlc low must be <= high".to_owned(),
            ));
        }

        if self.open < self.low
            || self.open > self.high
            || self.close < self.low
            || self.close > self.high
        {
            return Err(ChartError::InvalidData(
                "ohlc open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(self)
    }

    /// Widens `high`/`low` so they enclose `open` and `close`.
    pub fn widened(self) -> ChartResult<Self> {
        self.validate_values()?;
        let high = self.high.max(self.low).max(self.open).max(self.close);
        let low = self.low.min(self.high).min(self.open).min(self.close);
        Ok(Self { high, low, ..self })
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }

    fn validate_values(self) -> ChartResult<()> {
        if !self.open.is_finite()
            || !self.high.is_finite()
            || !self.low.is_finite()
            || !self.close.is_finite()
        {
            return Err(ChartError::InvalidData(
                "ohlc values must be finite".to_owned(),
            ));
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(ChartError::InvalidData(
                "volume must be finite and >= 0".to_owned(),
            ));
        }
        let values = [self.open, self.high, self.low, self.close, self.volume];
        if values.iter().any(|value| value.abs() > MAX_ABS_VALUE) {
            return Err(ChartError::InvalidData(format!(
                "ohlcv magnitudes must be <= {MAX_ABS_VALUE:e}"
            )));
        }
        Ok(())
    }
}

/// How the engine treats candles whose open/close fall outside `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OhlcTolerance {
    /// Reject the candle with `ChartError::InvalidData`.
    #[default]
    Reject,
    /// Accept the candle after widening high/low to enclose open/close.
    Widen,
}

impl OhlcTolerance {
    pub fn apply(self, candle: Candle) -> ChartResult<Candle> {
        match self {
            Self::Reject => candle.validate(),
            Self::Widen => candle.widened(),
        }
    }
}

/// Projected candle geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub center_x: f64,
    pub body_left: f64,
    pub body_right: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub is_bullish: bool,
}

/// Projects candles into deterministic render geometry, one slot per candle.
///
/// `body_ratio` is the share of the slot width covered by the body; bodies
/// never shrink below one pixel.
pub fn project_candles(
    candles: &[Candle],
    slots: SlotScale,
    price_scale: PriceScale,
    body_ratio: f64,
) -> ChartResult<Vec<CandleGeometry>> {
    if !body_ratio.is_finite() || body_ratio <= 0.0 || body_ratio > 1.0 {
        return Err(ChartError::InvalidData(
            "candle body ratio must be in (0, 1]".to_owned(),
        ));
    }
    let body_width = (slots.spacing() * body_ratio).max(1.0);

    #[cfg(feature = "parallel-projection")]
    {
        let projected: Vec<ChartResult<CandleGeometry>> = candles
            .par_iter()
            .enumerate()
            .map(|(index, candle)| {
                project_single_candle(index, *candle, slots, price_scale, body_width)
            })
            .collect();
        projected.into_iter().collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        let mut out = Vec::with_capacity(candles.len());
        for (index, candle) in candles.iter().enumerate() {
            out.push(project_single_candle(
                index,
                *candle,
                slots,
                price_scale,
                body_width,
            )?);
        }
        Ok(out)
    }
}

fn project_single_candle(
    index: usize,
    candle: Candle,
    slots: SlotScale,
    price_scale: PriceScale,
    body_width: f64,
) -> ChartResult<CandleGeometry> {
    let half = body_width / 2.0;
    let center_x = slots.slot_center(index)?;
    let open_y = price_scale.price_to_pixel(candle.open)?;
    let close_y = price_scale.price_to_pixel(candle.close)?;
    let wick_top = price_scale.price_to_pixel(candle.high)?;
    let wick_bottom = price_scale.price_to_pixel(candle.low)?;

    Ok(CandleGeometry {
        center_x,
        body_left: center_x - half,
        body_right: center_x + half,
        body_top: open_y.min(close_y),
        body_bottom: open_y.max(close_y),
        wick_top,
        wick_bottom,
        is_bullish: candle.is_bullish(),
    })
}
