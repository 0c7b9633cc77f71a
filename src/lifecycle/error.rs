//! Error type for the deployment workflow.

use module_builder::{EngineError, ModuleError, ParametersError};
use thiserror::Error;

/// Errors that can occur while building and deploying the counter module.
#[derive(Debug, Error)]
pub enum DeploymentError {
    /// The module descriptor could not be built.
    #[error("Module build error: {0}")]
    Module(#[from] ModuleError),

    /// The deployment parameters could not be loaded.
    #[error("Parameters error: {0}")]
    Parameters(#[from] ParametersError),

    /// The engine refused or failed the deployment.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}
