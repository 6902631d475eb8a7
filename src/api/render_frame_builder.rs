use tracing::debug;

use crate::core::{
    PlotArea, PriceScale, SlotScale, project_candles, project_series, project_volume_bars,
};
use crate::error::ChartResult;
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

use super::ChartEngine;

/// Resolved pixel layout for one draw pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    /// Title band height; zero when the title is empty.
    pub title_band_px: f64,
    pub price_plot: PlotArea,
    pub volume_band: PlotArea,
    pub slots: SlotScale,
    pub price_scale: PriceScale,
}

impl<R: Renderer> ChartEngine<R> {
    /// Computes plot areas and scales for the current data.
    ///
    /// Padding and the title band shrink on tiny viewports so every valid
    /// viewport yields a non-empty plot.
    pub fn layout(&self) -> ChartResult<ChartLayout> {
        let style = self.config.style;
        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);

        let title_band_px = if self.title.is_empty() {
            0.0
        } else {
            style.title_band_height_px.min(height / 4.0)
        };
        let padding = style
            .plot_padding_px
            .min(width / 8.0)
            .min((height - title_band_px) / 8.0);
        let plot = PlotArea::new(
            padding,
            title_band_px + padding,
            width - 2.0 * padding,
            height - title_band_px - 2.0 * padding,
        )?;
        let (price_plot, volume_band) = plot.split_bottom(style.volume_band_ratio)?;

        let slots = SlotScale::new(self.candles.len(), style.min_slots, plot)?;
        let price_scale = PriceScale::from_data(
            &self.candles,
            &self.series,
            price_plot,
            self.config.price_scale_tuning,
        )?;

        Ok(ChartLayout {
            title_band_px,
            price_plot,
            volume_band,
            slots,
            price_scale,
        })
    }

    /// Current price domain after autoscaling to candles and series.
    pub fn price_domain(&self) -> ChartResult<(f64, f64)> {
        Ok(self.layout()?.price_scale.domain())
    }

    /// Materializes the backend-agnostic frame for the current state.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let style = self.config.style;
        let layout = self.layout()?;
        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);

        let mut frame = RenderFrame::new(self.viewport);
        frame.push_rect(RectPrimitive::new(0.0, 0.0, width, height, style.background_color));

        // Grid rows are 1px rects so they stay underneath candles and series.
        let plot = layout.price_plot;
        for row in 1..style.grid_rows {
            let y = plot.top + plot.height * f64::from(row) / f64::from(style.grid_rows);
            frame.push_rect(RectPrimitive::new(
                plot.left,
                y.floor(),
                plot.width,
                1.0,
                style.grid_line_color,
            ));
        }

        let bars = project_volume_bars(
            &self.candles,
            layout.slots,
            layout.volume_band,
            style.candle_body_ratio,
        )?;
        for bar in bars {
            let color = if bar.is_bullish {
                style.volume_bullish_color
            } else {
                style.volume_bearish_color
            };
            frame.push_rect(RectPrimitive::new(
                bar.x_left,
                bar.y_top,
                bar.x_right - bar.x_left,
                bar.y_bottom - bar.y_top,
                color,
            ));
        }

        let candles = project_candles(
            &self.candles,
            layout.slots,
            layout.price_scale,
            style.candle_body_ratio,
        )?;
        for candle in candles {
            let color = if candle.is_bullish {
                style.bullish_color
            } else {
                style.bearish_color
            };
            frame.push_line(LinePrimitive::new(
                candle.center_x,
                candle.wick_top,
                candle.center_x,
                candle.wick_bottom,
                1.0,
                color,
            ));
            frame.push_rect(RectPrimitive::new(
                candle.body_left,
                candle.body_top,
                candle.body_right - candle.body_left,
                (candle.body_bottom - candle.body_top).max(1.0),
                color,
            ));
        }

        for segment in project_series(&self.series, plot, layout.price_scale)? {
            frame.push_line(LinePrimitive::new(
                segment.x1,
                segment.y1,
                segment.x2,
                segment.y2,
                style.series_line_width,
                style.series_line_color,
            ));
        }

        if layout.title_band_px > 0.0 {
            let font_size_px = style.title_font_size_px.min(layout.title_band_px);
            frame.push_rect(RectPrimitive::new(
                0.0,
                0.0,
                width,
                layout.title_band_px,
                style.title_band_color,
            ));
            frame.push_text(TextPrimitive::new(
                self.title.clone(),
                plot.left,
                ((layout.title_band_px - font_size_px) / 2.0).max(0.0),
                font_size_px,
                style.title_text_color,
                TextHAlign::Left,
            ));
        }

        Ok(frame)
    }

    /// Builds the current frame and hands it to the renderer.
    pub fn render(&mut self) -> ChartResult<R::Output> {
        let frame = self.build_render_frame()?;
        let output = self.renderer.render(&frame)?;
        self.renders += 1;
        debug!(
            candles = self.candles.len(),
            series_len = self.series.len(),
            rects = frame.rects.len(),
            lines = frame.lines.len(),
            render_count = self.renders,
            "rendered chart"
        );
        Ok(output)
    }
}
