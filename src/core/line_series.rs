use crate::core::{PlotArea, PriceScale};
use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Projects a sample series into adjacent line segments.
///
/// Samples are spread evenly from the left to the right edge of `plot`, so
/// the series is independent of how many candles are on the chart.
pub fn project_series(
    samples: &[f64],
    plot: PlotArea,
    price_scale: PriceScale,
) -> ChartResult<Vec<LineSegment>> {
    if samples.len() < 2 {
        return Ok(Vec::new());
    }

    let step = plot.width / (samples.len() - 1) as f64;
    let mut mapped = Vec::with_capacity(samples.len());
    for (index, sample) in samples.iter().enumerate() {
        if !sample.is_finite() {
            return Err(ChartError::InvalidData(
                "series samples must be finite".to_owned(),
            ));
        }
        let x = plot.left + step * index as f64;
        let y = price_scale.price_to_pixel(*sample)?;
        mapped.push((x, y));
    }

    let mut segments = Vec::with_capacity(mapped.len() - 1);
    for pair in mapped.windows(2) {
        segments.push(LineSegment {
            x1: pair[0].0,
            y1: pair[0].1,
            x2: pair[1].0,
            y2: pair[1].1,
        });
    }

    Ok(segments)
}
