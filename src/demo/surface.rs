use crate::core::Viewport;
use crate::error::ChartResult;

/// Channel values used when the source runs out mid-pixel: opaque red.
pub const MISSING_CHANNEL_FILL: [u8; 4] = [0xff, 0x00, 0x00, 0xff];

/// Fixed-size RGBA destination the demo paints rendered charts onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Transparent black surface.
    pub fn new(width: u32, height: u32) -> ChartResult<Self> {
        let viewport = Viewport::new(width, height).ensure_valid()?;
        Ok(Self {
            width,
            height,
            data: vec![0; viewport.rgba_len()],
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
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.data[offset..offset + 4]);
        Some(rgba)
    }

    /// Copies `source` onto the whole surface.
    ///
    /// Destination byte offset `i` reads from source offset `i % source.len()`,
    /// so a source smaller than the surface repeats and a larger one is
    /// truncated. Channels past the end of the source take
    /// [`MISSING_CHANNEL_FILL`]; an empty source paints the surface red.
    pub fn paint_wrapping(&mut self, source: &[u8]) {
        for (offset, pixel) in self.data.chunks_exact_mut(4).enumerate() {
            let start = if source.is_empty() {
                0
            } else {
                (offset * 4) % source.len()
            };
            for (channel, byte) in pixel.iter_mut().enumerate() {
                *byte = source
                    .get(start + channel)
                    .copied()
                    .unwrap_or(MISSING_CHANNEL_FILL[channel]);
            }
        }
    }
}
