use serde::{Deserialize, Serialize};

use crate::core::types::PlotArea;
use crate::error::{ChartError, ChartResult};

/// Affine mapping from a domain interval onto a pixel interval.
///
/// The pixel interval may be reversed (`range_start > range_end`), which is
/// how price axes grow upwards on a top-left-origin raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() || range_start == range_end {
            return Err(ChartError::InvalidData(
                "scale range must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

/// Logical-index x axis: candle `i` sits in the centre of slot `i`.
///
/// The plot is divided into `max(count, min_slots)` equal slots so a short
/// history does not stretch a single candle across the whole chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotScale {
    slots: usize,
    linear: LinearScale,
}

impl SlotScale {
    pub fn new(count: usize, min_slots: usize, plot: PlotArea) -> ChartResult<Self> {
        let slots = count.max(min_slots).max(1);
        let linear = LinearScale::new(-0.5, slots as f64 - 0.5, plot.left, plot.right())?;
        Ok(Self { slots, linear })
    }

    #[must_use]
    pub fn slots(self) -> usize {
        self.slots
    }

    /// Pixel width of one slot.
    #[must_use]
    pub fn spacing(self) -> f64 {
        let (left, right) = self.linear.range();
        (right - left) / self.slots as f64
    }

    pub fn slot_center(self, index: usize) -> ChartResult<f64> {
        self.linear.domain_to_pixel(index as f64)
    }

    /// Slot index under `pixel`, `None` outside the plot.
    pub fn slot_at(self, pixel: f64) -> ChartResult<Option<usize>> {
        let logical = self.linear.pixel_to_domain(pixel)?.round();
        if logical < 0.0 || logical >= self.slots as f64 {
            return Ok(None);
        }
        Ok(Some(logical as usize))
    }
}
