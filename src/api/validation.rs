use crate::core::{MAX_ABS_VALUE, Viewport};
use crate::error::{ChartError, ChartResult};

use super::{ChartEngineConfig, RenderStyle};

pub(crate) fn validate_viewport(
    viewport: Viewport,
    config: &ChartEngineConfig,
) -> ChartResult<Viewport> {
    let viewport = viewport.ensure_valid()?;
    if viewport.width > config.max_width || viewport.height > config.max_height {
        return Err(ChartError::ViewportTooLarge {
            width: viewport.width,
            height: viewport.height,
            max_width: config.max_width,
            max_height: config.max_height,
        });
    }
    Ok(viewport)
}

pub(crate) fn validate_title(title: &str, config: &ChartEngineConfig) -> ChartResult<()> {
    let len = title.chars().count();
    if len > config.max_title_chars {
        return Err(ChartError::TitleTooLong {
            len,
            max: config.max_title_chars,
        });
    }
    Ok(())
}

pub(crate) fn validate_series(samples: &[f64]) -> ChartResult<()> {
    if let Some(index) = samples.iter().position(|sample| !sample.is_finite()) {
        return Err(ChartError::InvalidData(format!(
            "series sample at index {index} must be finite"
        )));
    }
    if let Some(index) = samples.iter().position(|sample| sample.abs() > MAX_ABS_VALUE) {
        return Err(ChartError::InvalidData(format!(
            "series sample at index {index} exceeds {MAX_ABS_VALUE:e}"
        )));
    }
    Ok(())
}

impl ChartEngineConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(ChartError::InvalidData(
                "maximum chart dimensions must be > 0".to_owned(),
            ));
        }
        if self.max_live_charts == 0 {
            return Err(ChartError::InvalidData(
                "maximum live charts must be > 0".to_owned(),
            ));
        }
        self.price_scale_tuning.validate()?;
        self.style.validate()?;
        Ok(self)
    }
}

impl RenderStyle {
    pub fn validate(self) -> ChartResult<Self> {
        for color in [
            self.background_color,
            self.grid_line_color,
            self.bullish_color,
            self.bearish_color,
            self.volume_bullish_color,
            self.volume_bearish_color,
            self.series_line_color,
            self.title_band_color,
            self.title_text_color,
        ] {
            color.validate()?;
        }

        for (name, value) in [
            ("series line width", self.series_line_width),
            ("title font size", self.title_font_size_px),
            ("title band height", self.title_band_height_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }

        if !self.plot_padding_px.is_finite() || self.plot_padding_px < 0.0 {
            return Err(ChartError::InvalidData(
                "plot padding must be finite and >= 0".to_owned(),
            ));
        }
        if !self.candle_body_ratio.is_finite()
            || self.candle_body_ratio <= 0.0
            || self.candle_body_ratio > 1.0
        {
            return Err(ChartError::InvalidData(
                "candle body ratio must be in (0, 1]".to_owned(),
            ));
        }
        if !self.volume_band_ratio.is_finite() || !(0.0..1.0).contains(&self.volume_band_ratio) {
            return Err(ChartError::InvalidData(
                "volume band ratio must be in [0, 1)".to_owned(),
            ));
        }
        if self.min_slots == 0 {
            return Err(ChartError::InvalidData(
                "minimum slot count must be > 0".to_owned(),
            ));
        }

        Ok(self)
    }
}
