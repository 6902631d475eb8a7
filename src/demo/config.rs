use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_CHART_WIDTH: u32 = 800;
pub const DEFAULT_CHART_HEIGHT: u32 = 480;
pub const DEFAULT_TITLE: &str = "Tiger Style Price Action";
pub const DEFAULT_SERIES_LEN: usize = 256;

/// Settings for the demo controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
    /// Destination surface size; independent of the chart size.
    #[serde(default = "default_chart_width")]
    pub surface_width: u32,
    #[serde(default = "default_chart_height")]
    pub surface_height: u32,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_series_len")]
    pub series_len: usize,
    /// Fixed RNG seed; `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            surface_width: default_chart_width(),
            surface_height: default_chart_height(),
            title: default_title(),
            series_len: default_series_len(),
            seed: None,
        }
    }
}

impl DemoConfig {
    #[must_use]
    pub fn with_chart_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_surface_size(mut self, width: u32, height: u32) -> Self {
        self.surface_width = width;
        self.surface_height = height;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_series_len(mut self, series_len: usize) -> Self {
        self.series_len = series_len;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Chart dimensions are checked against engine limits at `create`; only
    /// the surface is fully validated here.
    pub fn validate(self) -> ChartResult<Self> {
        Viewport::new(self.surface_width, self.surface_height).ensure_valid()?;
        if self.series_len == 0 {
            return Err(ChartError::InvalidData(
                "demo series_len must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse demo config: {e}")))?;
        config.validate()
    }
}

fn default_chart_width() -> u32 {
    DEFAULT_CHART_WIDTH
}

fn default_chart_height() -> u32 {
    DEFAULT_CHART_HEIGHT
}

fn default_title() -> String {
    DEFAULT_TITLE.to_owned()
}

fn default_series_len() -> usize {
    DEFAULT_SERIES_LEN
}
