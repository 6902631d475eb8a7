use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Style contract for the rendered chart.
///
/// Every field has a serde default so partial JSON style blocks stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub background_color: Color,
    pub grid_line_color: Color,
    /// Horizontal grid divisions inside the price plot. `0` disables the grid.
    pub grid_rows: u32,
    pub bullish_color: Color,
    pub bearish_color: Color,
    pub volume_bullish_color: Color,
    pub volume_bearish_color: Color,
    pub series_line_color: Color,
    pub series_line_width: f64,
    pub title_band_color: Color,
    pub title_text_color: Color,
    pub title_font_size_px: f64,
    pub title_band_height_px: f64,
    pub plot_padding_px: f64,
    /// Share of a slot covered by a candle body, in `(0, 1]`.
    pub candle_body_ratio: f64,
    /// Share of the plot height reserved for volume bars, in `[0, 1)`.
    pub volume_band_ratio: f64,
    /// Minimum number of candle slots across the plot.
    pub min_slots: usize,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: Color::from_rgba8(0x13, 0x17, 0x22, 0xff),
            grid_line_color: Color::from_rgba8(0x2a, 0x2e, 0x39, 0xff),
            grid_rows: 4,
            bullish_color: Color::from_rgba8(0x26, 0xa6, 0x9a, 0xff),
            bearish_color: Color::from_rgba8(0xef, 0x53, 0x50, 0xff),
            volume_bullish_color: Color::from_rgba8(0x26, 0xa6, 0x9a, 0x60),
            volume_bearish_color: Color::from_rgba8(0xef, 0x53, 0x50, 0x60),
            series_line_color: Color::from_rgba8(0xf5, 0xc5, 0x42, 0xff),
            series_line_width: 1.5,
            title_band_color: Color::from_rgba8(0x1e, 0x22, 0x2d, 0xff),
            title_text_color: Color::from_rgba8(0xd1, 0xd4, 0xdc, 0xff),
            title_font_size_px: 10.0,
            title_band_height_px: 24.0,
            plot_padding_px: 8.0,
            candle_body_ratio: 0.7,
            volume_band_ratio: 0.2,
            min_slots: 32,
        }
    }
}
