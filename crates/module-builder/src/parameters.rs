//! # Deployment Parameters
//!
//! Values for module parameters, supplied by whoever runs the deployment. The
//! file format is a JSON object keyed by module name:
//!
//! ```json
//! {
//!   "CounterModule": { "start": 10 },
//!   "$global": { "owner": "0x5FbDB2315678afecb367f032d93F642f64180aa3" }
//! }
//! ```
//!
//! Entries under `$global` apply to every module that does not set the
//! parameter itself.

use crate::descriptor::ModuleDescriptor;
use crate::error::ParametersError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

pub const GLOBAL_PARAMETERS: &str = "$global";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentParameters(BTreeMap<String, BTreeMap<String, Value>>);

impl DeploymentParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ParametersError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ParametersError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading deployment parameters");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Sets one value, builder style.
    pub fn with(mut self, module: &str, name: &str, value: impl Into<Value>) -> Self {
        self.0
            .entry(module.to_string())
            .or_default()
            .insert(name.to_string(), value.into());
        self
    }

    /// The value for `name` in `module`, falling back to `$global`.
    pub fn get(&self, module: &str, name: &str) -> Option<&Value> {
        self.0
            .get(module)
            .and_then(|values| values.get(name))
            .or_else(|| self.0.get(GLOBAL_PARAMETERS)?.get(name))
    }

    /// Required parameters of `module` and its submodules that have no value,
    /// as `(module, parameter)` pairs.
    pub fn missing_for(&self, module: &ModuleDescriptor) -> Vec<(String, String)> {
        module
            .modules()
            .into_iter()
            .flat_map(|m| {
                m.parameters()
                    .iter()
                    .filter(|(_, default)| default.is_none())
                    .map(move |(name, _)| (m.name(), name.as_str()))
            })
            .filter(|(module, name)| self.get(module, name).is_none())
            .map(|(module, name)| (module.to_string(), name.to_string()))
            .collect()
    }
}
