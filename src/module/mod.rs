//! Handle boundary: engine modules, their chart tables and the async loader.

mod chart;
mod engine_module;
mod handle_table;
mod loader;

pub use chart::Chart;
pub use engine_module::EngineModule;
pub use handle_table::{ChartHandle, HandleTable};
pub use loader::{
    BUILTIN_MODULE_NAME, MODULE_DESCRIPTOR_SCHEMA_V1, ModuleDescriptor, ModuleLoader,
    ModuleSource, load_module,
};
