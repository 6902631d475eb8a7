use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::api::ChartEngineConfig;
use crate::error::{ChartError, ChartResult};

use super::EngineModule;

pub const MODULE_DESCRIPTOR_SCHEMA_V1: u32 = 1;
pub const BUILTIN_MODULE_NAME: &str = "candle-canvas";

/// Where an engine module comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleSource {
    /// Engine compiled into this crate.
    Builtin {
        name: String,
        config: ChartEngineConfig,
    },
    /// JSON descriptor on disk.
    Descriptor(PathBuf),
}

impl ModuleSource {
    #[must_use]
    pub fn builtin(config: ChartEngineConfig) -> Self {
        Self::Builtin {
            name: BUILTIN_MODULE_NAME.to_owned(),
            config,
        }
    }

    #[must_use]
    pub fn descriptor(path: impl Into<PathBuf>) -> Self {
        Self::Descriptor(path.into())
    }

    fn origin(&self) -> String {
        match self {
            Self::Builtin { name, .. } => format!("builtin:{name}"),
            Self::Descriptor(path) => path.display().to_string(),
        }
    }
}

impl Default for ModuleSource {
    fn default() -> Self {
        Self::builtin(ChartEngineConfig::default())
    }
}

/// On-disk module description.
///
/// ```json
/// { "schema_version": 1, "name": "desk", "config": { "max_live_charts": 4 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub schema_version: u32,
    pub name: String,
    #[serde(default)]
    pub config: ChartEngineConfig,
    #[serde(default)]
    pub metadata: IndexMap<String, String>,
}

impl ModuleDescriptor {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let descriptor: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse module descriptor: {e}"))
        })?;
        if descriptor.schema_version != MODULE_DESCRIPTOR_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported module descriptor schema version: {}",
                descriptor.schema_version
            )));
        }
        if descriptor.name.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "module descriptor name must not be empty".to_owned(),
            ));
        }
        Ok(descriptor)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize module descriptor: {e}"))
        })
    }

    pub fn instantiate(self) -> ChartResult<EngineModule> {
        Ok(EngineModule::new(self.name, self.config)?.with_metadata(self.metadata))
    }
}

/// Loads one engine module from `source`. Every failure is reported as
/// `ChartError::ModuleLoad`.
pub async fn load_module(source: &ModuleSource) -> ChartResult<EngineModule> {
    let origin = source.origin();
    let load_error = |reason: String| ChartError::ModuleLoad {
        origin: origin.clone(),
        reason,
    };

    match source {
        ModuleSource::Builtin { name, config } => {
            EngineModule::new(name.clone(), *config).map_err(|e| load_error(e.to_string()))
        }
        ModuleSource::Descriptor(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| load_error(e.to_string()))?;
            ModuleDescriptor::from_json_str(&text)
                .and_then(ModuleDescriptor::instantiate)
                .map_err(|e| load_error(e.to_string()))
        }
    }
}

/// Memoized, write-once module loading.
///
/// Concurrent callers of [`ModuleLoader::get`] share one in-flight load and
/// receive the same module. A failed load leaves the loader empty so a later
/// call can retry.
#[derive(Debug)]
pub struct ModuleLoader {
    source: ModuleSource,
    module: OnceCell<Arc<EngineModule>>,
    attempts: AtomicUsize,
}

impl ModuleLoader {
    #[must_use]
    pub fn new(source: ModuleSource) -> Self {
        Self {
            source,
            module: OnceCell::new(),
            attempts: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn source(&self) -> &ModuleSource {
        &self.source
    }

    pub async fn get(&self) -> ChartResult<Arc<EngineModule>> {
        let module = self
            .module
            .get_or_try_init(|| async {
                let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
                debug!(attempt, origin = %self.source.origin(), "loading engine module");
                match load_module(&self.source).await {
                    Ok(module) => {
                        info!(module = module.name(), attempt, "engine module loaded");
                        Ok(Arc::new(module))
                    }
                    Err(err) => {
                        warn!(attempt, error = %err, "engine module load failed");
                        Err(err)
                    }
                }
            })
            .await?;
        Ok(Arc::clone(module))
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.module.initialized()
    }

    /// The module, if a load has completed.
    #[must_use]
    pub fn loaded(&self) -> Option<Arc<EngineModule>> {
        self.module.get().cloned()
    }

    /// Number of load attempts started so far.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Default for ModuleLoader {
    fn default() -> Self {
        Self::new(ModuleSource::default())
    }
}
