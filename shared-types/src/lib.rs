//! Shared types between the explorer UI and trace servers
//!
//! These types are used by both:
//! - Trace server clients (native Rust)
//! - Dioxus components (WASM)
//!
//! Serializable with serde for JSON over WebSocket/HTTP

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============================================================================
// Explorer Records
// ============================================================================

/// A single data source within an experiment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../explorer-ui/src/types/generated.ts")]
pub struct Trace {
    /// Unique within one experiment; used as the render key
    pub uuid: String,
    pub name: String,
}

impl Trace {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
        }
    }
}

/// A named collection of traces, shown as one explorer list entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../explorer-ui/src/types/generated.ts")]
pub struct Experiment {
    pub uuid: String,
    pub name: String,
    pub traces: Vec<Trace>,
}

impl Experiment {
    /// Create an experiment with a freshly generated identifier
    pub fn new(name: impl Into<String>, traces: Vec<Trace>) -> Self {
        Self {
            uuid: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            traces,
        }
    }
}

// ============================================================================
// Signal Payloads
// ============================================================================

/// Live rename preview, fired on every keystroke while an experiment name is edited
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../explorer-ui/src/types/generated.ts")]
pub struct TabChanged {
    pub name: String,
    pub experiment_uuid: String,
}

/// An experiment row was selected in the explorer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../explorer-ui/src/types/generated.ts")]
pub struct ExperimentSelected {
    pub experiment_uuid: String,
}
