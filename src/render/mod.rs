pub mod font;
mod frame;
mod null_renderer;
mod primitives;
mod raster;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};
pub use raster::{PixelBuffer, RasterRenderer, RasterStats};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart domain logic. `Output` is what
/// one draw pass hands back to the engine caller.
pub trait Renderer {
    type Output;

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<Self::Output>;
}
