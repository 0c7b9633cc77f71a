//! # Builder Errors
//!
//! This module defines the error types raised while declaring a module and while
//! handing a finished module to a deployment engine. Declaration errors are
//! detected eagerly: the offending `contract`/`call` returns the error and the
//! callback can propagate it with `?`.

use crate::handle::FutureId;

/// Errors raised by [`ModuleBuilder`](crate::ModuleBuilder) and [`build_module`](crate::build_module).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModuleError {
    /// A handle was used in a module that neither declared it nor imported it
    /// through `use_module`.
    #[error("Unknown handle {id} in module {module}")]
    UnknownHandle { module: String, id: FutureId },

    /// Two resources were declared under the same id.
    #[error("Duplicate resource name {id} in module {module}")]
    DuplicateResourceName { module: String, id: FutureId },

    /// Two actions resolved to the same id. Pass an explicit id to disambiguate.
    #[error("Duplicate action id {id} in module {module}")]
    DuplicateActionId { module: String, id: FutureId },

    #[error("Invalid module name: {0:?}")]
    InvalidModuleName(String),

    #[error("Invalid contract name: {0:?}")]
    InvalidContractName(String),

    #[error("Invalid method name: {0:?}")]
    InvalidMethodName(String),

    /// A user-supplied id, parameter name or output name is not an identifier.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// `contract_at` was given something that cannot resolve to an address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The same parameter was read twice with different defaults.
    #[error("Conflicting defaults for parameter {name} in module {module}")]
    ConflictingParameter { module: String, name: String },

    /// Two different descriptors were used under the same module name.
    #[error("Conflicting submodule {0}")]
    ConflictingSubmodule(String),
}

/// Errors surfaced at the boundary with a deployment engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Missing parameter {name} for module {module}")]
    MissingParameter { module: String, name: String },
    /// The engine reported success but did not deploy one of the module outputs.
    #[error("Deployment of {module} returned no contract for output {output}")]
    IncompleteResult { module: String, output: String },
    /// The engine deployed a different future under one of the module outputs.
    #[error("Deployment of {module} returned {found} for output {output}, expected {expected}")]
    MismatchedOutput {
        module: String,
        output: String,
        expected: FutureId,
        found: FutureId,
    },
    #[error("Engine rejected module: {0}")]
    Rejected(String),
    #[error("Execution failed: {0}")]
    Execution(String),
}

/// Errors loading deployment parameters.
#[derive(Debug, thiserror::Error)]
pub enum ParametersError {
    #[error("Failed to read parameters file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid parameters JSON: {0}")]
    Json(#[from] serde_json::Error),
}
