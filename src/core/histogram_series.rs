use crate::core::{Candle, PlotArea, SlotScale};
use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Deterministic bar geometry for the volume band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBar {
    pub x_left: f64,
    pub x_right: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    pub is_bullish: bool,
}

/// Projects candle volumes into bars growing up from the bottom of `band`.
///
/// Heights are relative to the largest volume on the chart. An all-zero
/// history yields no bars.
pub fn project_volume_bars(
    candles: &[Candle],
    slots: SlotScale,
    band: PlotArea,
    bar_ratio: f64,
) -> ChartResult<Vec<VolumeBar>> {
    if !bar_ratio.is_finite() || bar_ratio <= 0.0 || bar_ratio > 1.0 {
        return Err(ChartError::InvalidData(
            "volume bar ratio must be in (0, 1]".to_owned(),
        ));
    }

    let max_volume = candles
        .iter()
        .map(|candle| candle.volume)
        .fold(0.0_f64, f64::max);
    if max_volume <= 0.0 || band.height <= 0.0 {
        return Ok(Vec::new());
    }

    let half_width = (slots.spacing() * bar_ratio).max(1.0) * 0.5;
    let mut bars = Vec::with_capacity(candles.len());
    for (index, candle) in candles.iter().enumerate() {
        let x_center = slots.slot_center(index)?;
        let height = band.height * (candle.volume / max_volume);
        bars.push(VolumeBar {
            x_left: x_center - half_width,
            x_right: x_center + half_width,
            y_top: band.bottom() - height,
            y_bottom: band.bottom(),
            is_bullish: candle.is_bullish(),
        });
    }

    Ok(bars)
}
