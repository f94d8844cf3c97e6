//! The endpoint catalog served at `GET /api`.
//!
//! The catalog is a JSON object keyed by `"METHOD /path"`, embedded into the
//! binary from `endpoints.json` and parsed once at startup.

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use utoipa::ToSchema;

const ENDPOINTS_JSON: &str = include_str!("../../../endpoints.json");

#[derive(Debug, Clone)]
pub struct EndpointCatalog(Arc<Value>);

impl EndpointCatalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_json(ENDPOINTS_JSON)
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let value: Value = serde_json::from_str(raw).context("Failed to parse endpoint catalog")?;
        if !value.is_object() {
            bail!("Endpoint catalog must be a JSON object keyed by \"METHOD /path\"");
        }
        Ok(Self(Arc::new(value)))
    }

    /// The `"METHOD /path"` keys listed in the catalog
    #[cfg(test)]
    pub fn routes(&self) -> Vec<&str> {
        self.0
            .as_object()
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// `{"endpoints": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EndpointsEnvelope {
    #[schema(value_type = Object)]
    pub endpoints: Value,
}
