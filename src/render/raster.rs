use tracing::trace;

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::font::{GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, dot_size, glyph, text_width_px};
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

/// Owned RGBA frame: row-major, top-left origin, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocates a buffer filled with one color.
    pub fn filled(viewport: Viewport, rgba: [u8; 4]) -> ChartResult<Self> {
        let viewport = viewport.ensure_valid()?;
        let pixel_count = viewport.width as usize * viewport.height as usize;
        let mut data = Vec::with_capacity(viewport.rgba_len());
        for _ in 0..pixel_count {
            data.extend_from_slice(&rgba);
        }
        Ok(Self {
            width: viewport.width,
            height: viewport.height,
            data,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = self.offset(x, y);
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.data[offset..offset + 4]);
        Some(rgba)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Source-over blend of `color` into one pixel. Caller guarantees bounds.
    fn blend(&mut self, x: u32, y: u32, color: Color) {
        let offset = self.offset(x, y);
        let alpha = color.alpha;
        let src = [color.red, color.green, color.blue];
        for (channel, value) in src.into_iter().enumerate() {
            let dst = f64::from(self.data[offset + channel]) / 255.0;
            let mixed = value * alpha + dst * (1.0 - alpha);
            self.data[offset + channel] = (mixed.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        let dst_alpha = f64::from(self.data[offset + 3]) / 255.0;
        let out_alpha = alpha + dst_alpha * (1.0 - alpha);
        self.data[offset + 3] = (out_alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub glyphs_drawn: usize,
}

/// Software rasterizer producing a fresh `PixelBuffer` for every frame.
///
/// Lines are covered by distance to the segment, so every pixel is blended
/// at most once per primitive even for translucent colors.
#[derive(Debug)]
pub struct RasterRenderer {
    clear_color: Color,
    last_stats: RasterStats,
}

impl Default for RasterRenderer {
    fn default() -> Self {
        Self {
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: RasterStats::default(),
        }
    }
}

impl RasterRenderer {
    pub fn with_clear_color(color: Color) -> ChartResult<Self> {
        let mut renderer = Self::default();
        renderer.set_clear_color(color)?;
        Ok(renderer)
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> RasterStats {
        self.last_stats
    }
}

impl Renderer for RasterRenderer {
    type Output = PixelBuffer;

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<PixelBuffer> {
        frame.validate()?;
        let mut buffer = PixelBuffer::filled(frame.viewport, self.clear_color.to_rgba8())?;
        let mut stats = RasterStats::default();

        for rect in &frame.rects {
            fill_rect(&mut buffer, *rect);
            stats.rects_drawn += 1;
        }
        for line in &frame.lines {
            stroke_line(&mut buffer, *line);
            stats.lines_drawn += 1;
        }
        for text in &frame.texts {
            stats.glyphs_drawn += draw_text(&mut buffer, text);
        }

        trace!(
            rects = stats.rects_drawn,
            lines = stats.lines_drawn,
            glyphs = stats.glyphs_drawn,
            "rasterized frame"
        );
        self.last_stats = stats;
        Ok(buffer)
    }
}

/// Clamps a pixel span `[start, end)` to `[0, limit)`; zero-size spans with a
/// positive extent still cover one pixel.
fn pixel_span(start: f64, extent: f64, limit: u32) -> Option<(u32, u32)> {
    let first = start.round();
    let mut last = (start + extent).round();
    if extent > 0.0 && last <= first {
        last = first + 1.0;
    }
    let first = first.clamp(0.0, f64::from(limit));
    let last = last.clamp(0.0, f64::from(limit));
    if last <= first {
        return None;
    }
    Some((first as u32, last as u32))
}

fn fill_rect(buffer: &mut PixelBuffer, rect: RectPrimitive) {
    let Some((x0, x1)) = pixel_span(rect.x, rect.width, buffer.width) else {
        return;
    };
    let Some((y0, y1)) = pixel_span(rect.y, rect.height, buffer.height) else {
        return;
    };
    for y in y0..y1 {
        for x in x0..x1 {
            buffer.blend(x, y, rect.fill_color);
        }
    }
}

fn stroke_line(buffer: &mut PixelBuffer, line: LinePrimitive) {
    let half = (line.stroke_width / 2.0).max(0.5);
    let min_x = line.x1.min(line.x2) - half;
    let max_x = line.x1.max(line.x2) + half;
    let min_y = line.y1.min(line.y2) - half;
    let max_y = line.y1.max(line.y2) + half;

    let Some((x0, x1)) = pixel_span(min_x.floor(), max_x.ceil() - min_x.floor(), buffer.width)
    else {
        return;
    };
    let Some((y0, y1)) = pixel_span(min_y.floor(), max_y.ceil() - min_y.floor(), buffer.height)
    else {
        return;
    };

    let dx = line.x2 - line.x1;
    let dy = line.y2 - line.y1;
    let length_sq = dx * dx + dy * dy;

    for y in y0..y1 {
        for x in x0..x1 {
            let px = f64::from(x) + 0.5;
            let py = f64::from(y) + 0.5;
            let t = if length_sq == 0.0 {
                0.0
            } else {
                (((px - line.x1) * dx + (py - line.y1) * dy) / length_sq).clamp(0.0, 1.0)
            };
            let cx = line.x1 + t * dx;
            let cy = line.y1 + t * dy;
            let distance_sq = (px - cx).powi(2) + (py - cy).powi(2);
            if distance_sq <= half * half {
                buffer.blend(x, y, line.color);
            }
        }
    }
}

fn draw_text(buffer: &mut PixelBuffer, text: &TextPrimitive) -> usize {
    let dot = dot_size(text.font_size_px);
    let width = text_width_px(&text.text, text.font_size_px);
    let origin_x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - width / 2.0,
        TextHAlign::Right => text.x - width,
    };

    let dot_px = f64::from(dot);
    let mut glyphs = 0;
    for (index, ch) in text.text.chars().enumerate() {
        let glyph_x = origin_x + index as f64 * f64::from(GLYPH_ADVANCE) * dot_px;
        for (row, bits) in glyph(ch).into_iter().enumerate().take(GLYPH_HEIGHT as usize) {
            for column in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - column)) == 0 {
                    continue;
                }
                fill_rect(
                    buffer,
                    RectPrimitive::new(
                        glyph_x + f64::from(column) * dot_px,
                        text.y + row as f64 * dot_px,
                        dot_px,
                        dot_px,
                        text.color,
                    ),
                );
            }
        }
        glyphs += 1;
    }
    glyphs
}
