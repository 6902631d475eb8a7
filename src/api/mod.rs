mod data_controller;
mod engine;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod json_contract;
mod render_frame_builder;
mod render_style;
mod validation;

pub use engine::ChartEngine;
pub use engine_config::{
    ChartEngineConfig, DEFAULT_MAX_DIMENSION_PX, DEFAULT_MAX_LIVE_CHARTS, DEFAULT_MAX_TITLE_CHARS,
};
pub use engine_snapshot::EngineSnapshot;
pub use json_contract::{ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshotJsonContractV1};
pub use render_frame_builder::ChartLayout;
pub use render_style::RenderStyle;
