use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error(
        "viewport {width}x{height} exceeds engine maximum {max_width}x{max_height}"
    )]
    ViewportTooLarge {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("title has {len} characters, maximum is {max}")]
    TitleTooLong { len: usize, max: usize },

    #[error("unknown chart handle {index}:{generation}")]
    UnknownHandle { index: u32, generation: u32 },

    #[error("chart handle {index}:{generation} was already destroyed")]
    StaleHandle { index: u32, generation: u32 },

    #[error("live chart limit of {max} reached")]
    HandleLimit { max: usize },

    #[error("failed to load engine module from {origin}: {reason}")]
    ModuleLoad { origin: String, reason: String },

    #[error("engine unavailable: {0}")]
    EngineUnavailable(String),
}
