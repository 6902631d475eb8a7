use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

use super::EngineSnapshot;

pub const ENGINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Versioned envelope around an [`EngineSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: EngineSnapshot,
}

#[derive(Serialize)]
struct ContractRef<'a> {
    schema_version: u32,
    snapshot: &'a EngineSnapshot,
}

impl EngineSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&ContractRef {
            schema_version: ENGINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self,
        })
        .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot v1: {e}")))
    }

    /// Parses either a bare snapshot or a versioned envelope.
    ///
    /// A payload carrying `schema_version` is always treated as an envelope,
    /// so a newer schema is rejected rather than misread as a bare snapshot.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("snapshot json is malformed: {e}")))?;

        let Some(version) = value.get("schema_version") else {
            return serde_json::from_value(value).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse bare snapshot: {e}"))
            });
        };
        if version.as_u64() != Some(u64::from(ENGINE_SNAPSHOT_JSON_SCHEMA_V1)) {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {version}"
            )));
        }

        let contract: EngineSnapshotJsonContractV1 = serde_json::from_value(value)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse snapshot v1: {e}")))?;
        Ok(contract.snapshot)
    }
}
