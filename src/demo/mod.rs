//! Headless demo front-end: one chart, random data, a text log and a
//! destination surface.

mod config;
mod controller;
mod log;
mod sample;
mod surface;

pub use config::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_SERIES_LEN, DEFAULT_TITLE, DemoConfig,
};
pub use controller::{ActionOutcome, DemoAction, DemoController};
pub use log::{LogSink, TextLog};
pub use sample::SampleGenerator;
pub use surface::{MISSING_CHANNEL_FILL, Surface};
