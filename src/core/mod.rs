pub mod candlestick;
pub mod histogram_series;
pub mod line_series;
pub mod price_scale;
pub mod primitives;
pub mod scale;
pub mod types;

pub use candlestick::{Candle, CandleGeometry, MAX_ABS_VALUE, OhlcTolerance, project_candles};
pub use histogram_series::{VolumeBar, project_volume_bars};
pub use line_series::{LineSegment, project_series};
pub use price_scale::{PriceScale, PriceScaleTuning};
pub use scale::{LinearScale, SlotScale};
pub use types::{PlotArea, Viewport};
