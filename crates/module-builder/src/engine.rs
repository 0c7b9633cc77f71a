//! # Deployment Engine Seam
//!
//! Executing a descriptor (ordering futures, sending transactions, waiting for
//! confirmations, journaling) is the job of an external engine. This module only
//! defines the boundary: the [`DeploymentEngine`] trait an engine adapter
//! implements, the [`DeploymentResult`] it reports back, and [`deploy_module`],
//! which checks what can be checked on this side before and after the handoff.
//!
//! For tests, [`MockEngine`](crate::mock::MockEngine) implements the trait with
//! scripted responses.

use crate::descriptor::ModuleDescriptor;
use crate::error::EngineError;
use crate::handle::FutureId;
use crate::parameters::DeploymentParameters;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// A contract the engine deployed (or bound to) for a module output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeployedContract {
    pub id: FutureId,
    pub contract_name: String,
    pub address: String,
}

/// What the engine reports for a finished deployment, keyed by output name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentResult {
    pub module: String,
    pub contracts: BTreeMap<String, DeployedContract>,
}

impl DeploymentResult {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            contracts: BTreeMap::new(),
        }
    }

    /// Adds a deployed contract under `output`, builder style.
    pub fn with_contract(
        mut self,
        output: impl Into<String>,
        id: FutureId,
        contract_name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        self.contracts.insert(
            output.into(),
            DeployedContract {
                id,
                contract_name: contract_name.into(),
                address: address.into(),
            },
        );
        self
    }

    pub fn address_of(&self, output: &str) -> Option<&str> {
        self.contracts.get(output).map(|c| c.address.as_str())
    }
}

/// Adapter to an external deployment engine.
#[async_trait]
pub trait DeploymentEngine: Send + Sync {
    /// Resolves and executes `module` against the engine's target network.
    async fn deploy(
        &self,
        module: &ModuleDescriptor,
        parameters: &DeploymentParameters,
    ) -> Result<DeploymentResult, EngineError>;
}

/// Hands `module` to `engine`.
///
/// Fails before the handoff if a required parameter has no value, and after it
/// if the engine's result lacks any of the module outputs or reports a different
/// future under one of them.
#[tracing::instrument(skip_all, fields(module = %module.name()))]
pub async fn deploy_module<E>(
    engine: &E,
    module: &ModuleDescriptor,
    parameters: &DeploymentParameters,
) -> Result<DeploymentResult, EngineError>
where
    E: DeploymentEngine + ?Sized,
{
    if let Some((module_name, name)) = parameters.missing_for(module).into_iter().next() {
        warn!(parameter = %name, in_module = %module_name, "Missing parameter");
        return Err(EngineError::MissingParameter {
            module: module_name,
            name,
        });
    }

    info!(
        resources = module.resources().len(),
        actions = module.actions().len(),
        "Handing module to engine"
    );
    let result = engine.deploy(module, parameters).await.inspect_err(|e| {
        warn!(error = %e, "Engine failed");
    })?;

    for (output, handle) in module.outputs().iter() {
        match result.contracts.get(output) {
            Some(deployed) if &deployed.id == handle.id() => {
                debug!(%output, id = %handle.id(), address = %deployed.address, "Output deployed")
            }
            Some(deployed) => {
                warn!(%output, expected = %handle.id(), found = %deployed.id, "Output mismatch");
                return Err(EngineError::MismatchedOutput {
                    module: module.name().to_string(),
                    output: output.to_string(),
                    expected: handle.id().clone(),
                    found: deployed.id.clone(),
                });
            }
            None => {
                warn!(%output, "Output missing from engine result");
                return Err(EngineError::IncompleteResult {
                    module: module.name().to_string(),
                    output: output.to_string(),
                });
            }
        }
    }

    info!(contracts = result.contracts.len(), "Module deployed");
    Ok(result)
}
