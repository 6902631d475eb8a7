use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Straight-alpha color with channels in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        let [red, green, blue, alpha] = [red, green, blue, alpha].map(|v| f64::from(v) / 255.0);
        Self::rgba(red, green, blue, alpha)
    }

    /// 8-bit channels, rounded to nearest.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        self.channels()
            .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    fn channels(self) -> [f64; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    pub fn validate(self) -> ChartResult<()> {
        if self
            .channels()
            .iter()
            .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
        {
            Ok(())
        } else {
            Err(ChartError::InvalidData(format!(
                "color channels must be finite and in [0, 1], got {:?}",
                self.channels()
            )))
        }
    }
}

fn ensure_finite(what: &str, values: &[f64]) -> ChartResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        return Ok(());
    }
    Err(ChartError::InvalidData(format!("{what} must be finite")))
}

fn ensure_size(what: &str, value: f64, allow_zero: bool) -> ChartResult<()> {
    let ok = value.is_finite() && (value > 0.0 || (allow_zero && value == 0.0));
    if ok {
        return Ok(());
    }
    let bound = if allow_zero { ">= 0" } else { "> 0" };
    Err(ChartError::InvalidData(format!(
        "{what} must be finite and {bound}"
    )))
}

/// Stroked segment; `stroke_width` is the full width in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite("line endpoints", &[self.x1, self.y1, self.x2, self.y2])?;
        ensure_size("line stroke width", self.stroke_width, false)?;
        self.color.validate()
    }
}

/// Filled axis-aligned rectangle; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite("rect origin", &[self.x, self.y])?;
        ensure_size("rect width", self.width, true)?;
        ensure_size("rect height", self.height, true)?;
        self.fill_color.validate()
    }
}

/// Which edge of the text run `TextPrimitive::x` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// One text run; `y` is the top edge of the glyph box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text run must not be empty".to_owned(),
            ));
        }
        ensure_finite("text anchor", &[self.x, self.y])?;
        ensure_size("font size", self.font_size_px, false)?;
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_round_trips() {
        let color = Color::from_rgba8(0x13, 0x80, 0xff, 0x60);
        assert_eq!(color.to_rgba8(), [0x13, 0x80, 0xff, 0x60]);
    }

    #[test]
    fn out_of_range_channel_is_rejected() {
        assert!(Color::rgb(1.2, 0.0, 0.0).validate().is_err());
        assert!(Color::rgb(0.0, 0.0, 0.0).with_alpha(f64::NAN).validate().is_err());
    }

    #[test]
    fn zero_sized_rect_is_allowed_but_zero_width_line_is_not() {
        let black = Color::rgb(0.0, 0.0, 0.0);
        assert!(RectPrimitive::new(0.0, 0.0, 0.0, 4.0, black).validate().is_ok());
        assert!(RectPrimitive::new(0.0, 0.0, -1.0, 4.0, black).validate().is_err());
        assert!(LinePrimitive::new(0.0, 0.0, 1.0, 1.0, 0.0, black).validate().is_err());
    }
}
