use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Number of bytes in one RGBA frame of this viewport.
    #[must_use]
    pub fn rgba_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    pub fn ensure_valid(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Pixel rectangle that series are projected into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> ChartResult<Self> {
        if !left.is_finite() || !top.is_finite() {
            return Err(ChartError::InvalidData(
                "plot origin must be finite".to_owned(),
            ));
        }
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidData(
                "plot size must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    /// Plot covering the whole viewport.
    pub fn full(viewport: Viewport) -> ChartResult<Self> {
        let viewport = viewport.ensure_valid()?;
        Self::new(
            0.0,
            0.0,
            f64::from(viewport.width),
            f64::from(viewport.height),
        )
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Splits off the bottom `ratio` of the plot, returning `(upper, lower)`.
    pub fn split_bottom(self, ratio: f64) -> ChartResult<(Self, Self)> {
        if !ratio.is_finite() || !(0.0..1.0).contains(&ratio) {
            return Err(ChartError::InvalidData(
                "plot split ratio must be in [0, 1)".to_owned(),
            ));
        }
        let lower_height = self.height * ratio;
        let upper = Self::new(self.left, self.top, self.width, self.height - lower_height)?;
        if lower_height <= 0.0 {
            let empty = Self {
                top: upper.bottom(),
                height: 0.0,
                ..upper
            };
            return Ok((upper, empty));
        }
        let lower = Self::new(self.left, upper.bottom(), self.width, lower_height)?;
        Ok((upper, lower))
    }
}
