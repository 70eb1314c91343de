//! Event record and identity template types.
//!
//! An [`EventRecord`] is one synthetic pod-log event: a fixed set of
//! identity fields copied from an [`EventTemplate`], a logical `timestamp`,
//! and a randomized `data` payload. Records are built once, delivered to a
//! sink, and dropped; nothing mutates a record after construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Timestamp format used for the record's logical time: microsecond
/// precision plus a trailing zero, i.e. 100ns ticks as emitted by the
/// upstream collector (`2026-01-01T12:34:56.1234560Z`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f0Z";

/// Format a logical event timestamp.
pub fn format_event_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Error loading an identity template from disk.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to read template file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse template JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The fixed identity fields of an event: container, host and pod metadata.
///
/// A template always carries the full identity field set; per-record
/// variability is limited to the whitelist the record builder overwrites
/// (namespace, pod, severity, pod IP, host).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTemplate {
    pub category: Value,
    pub container: String,
    pub container_id: String,
    pub container_image: String,
    pub container_image_id: String,
    pub file: String,
    pub host: String,
    pub namespace: String,
    pub pod: String,
    pub pod_ip: String,
    pub pod_owner: String,
    pub resource: String,
    pub resource_group: String,
    pub severity: String,
    pub source: String,
    pub subscription: String,
    #[serde(rename = "type")]
    pub record_type: String,
}

impl EventTemplate {
    /// Load a template from a JSON file. Keys beyond the identity field set
    /// (e.g. `timestamp` or `data` in a captured sample event) are ignored.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl Default for EventTemplate {
    fn default() -> Self {
        Self {
            category: Value::Object(Map::new()),
            container: "fabrikam-orders".to_string(),
            container_id: "containerd://a9f1c3b2d7e84c0aa4b2f9f8b1a4d3e29f0c1b2a3c4d5e6f708192a3b4c5d6e7"
                .to_string(),
            container_image: "crfabrikamprod.azurecr.io/ordersvc:5.1.7421".to_string(),
            container_image_id:
                "crfabrikamprod.azurecr.io/ordersvc@sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
                    .to_string(),
            file: "/var/log/pods/prod-fabrikam_fabrikam-orders-api-7d8c9fbbcc-9k2lm_b1a2c3d4-e5f6-47a8-b9c0-1d2e3f4a5b6c/fabrikam-orders/0.log"
                .to_string(),
            host: "aks-apps-92c1d2ab-vmss0001ab".to_string(),
            namespace: "prod-fabrikam".to_string(),
            pod: "fabrikam-orders-api-7d8c9fbbcc-9k2lm".to_string(),
            pod_ip: "10.7.24.36".to_string(),
            pod_owner: "ReplicaSet/fabrikam-orders-api-7d8c9fbbcc".to_string(),
            resource: "aks-fabrikam-eus".to_string(),
            resource_group: "rg-fabrikam-prod-eus".to_string(),
            severity: "info".to_string(),
            source: "kubernetes".to_string(),
            subscription: "9f1c3b2d-7e84-4c0a-a4b2-f9f8b1a4d3e2".to_string(),
            record_type: "pod".to_string(),
        }
    }
}

/// One synthetic log event.
///
/// Serializes to a flat JSON object: the identity fields, then `timestamp`,
/// then the nested `data` payload. Downstream consumers extract `data`
/// verbatim, so it is kept as a structured JSON object here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(flatten)]
    pub identity: EventTemplate,
    pub timestamp: String,
    pub data: Map<String, Value>,
}

impl EventRecord {
    /// Serialize to a compact single-line JSON string (no whitespace
    /// between keys and values).
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
