//! candle-canvas: a candlestick chart engine behind an opaque handle boundary.
//!
//! Charts are created inside an [`module::EngineModule`], addressed by
//! [`module::ChartHandle`] and rendered into fresh RGBA byte buffers. The
//! [`demo`] module drives one chart the way an interactive front-end would.

pub mod api;
pub mod core;
pub mod demo;
pub mod error;
pub mod module;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, EngineSnapshot, RenderStyle};
pub use crate::core::{Candle, OhlcTolerance, Viewport};
pub use error::{ChartError, ChartResult};
pub use module::{Chart, ChartHandle, EngineModule, ModuleLoader, ModuleSource};
