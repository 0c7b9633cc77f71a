//! # Handles
//!
//! Handles are what the builder gives back when something is declared. They are
//! plain back-references: a module name plus the [`FutureId`] of the declared
//! item. They carry no live value and are only meaningful to the module that
//! produced them (or to a parent module that imported them with
//! [`use_module`](crate::ModuleBuilder::use_module)).

use serde::Serialize;
use std::fmt::Display;

/// Identifier of a declared item, formatted `<Module>#<local id>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FutureId(String);

impl FutureId {
    pub(crate) fn new(module: &str, local: &str) -> Self {
        Self(format!("{module}#{local}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The module part of the id.
    pub fn module(&self) -> &str {
        self.0.split_once('#').map(|(m, _)| m).unwrap_or(&self.0)
    }

    /// The part after `#`.
    pub fn local(&self) -> &str {
        self.0.split_once('#').map(|(_, l)| l).unwrap_or("")
    }
}

impl Display for FutureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that can be listed as an explicit `after` dependency.
pub trait DeclaredFuture {
    fn future_id(&self) -> &FutureId;
}

/// Reference to a contract declared with `contract`, `contract_with` or `contract_at`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContractHandle {
    pub(crate) module: String,
    pub(crate) id: FutureId,
    pub(crate) contract_name: String,
}

impl ContractHandle {
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn id(&self) -> &FutureId {
        &self.id
    }

    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }
}

impl DeclaredFuture for ContractHandle {
    fn future_id(&self) -> &FutureId {
        &self.id
    }
}

/// Reference to a declared call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ActionHandle {
    pub(crate) module: String,
    pub(crate) id: FutureId,
}

impl ActionHandle {
    pub fn id(&self) -> &FutureId {
        &self.id
    }
}

impl DeclaredFuture for ActionHandle {
    fn future_id(&self) -> &FutureId {
        &self.id
    }
}

/// The value a `static_call` will produce once the engine runs it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReadHandle {
    pub(crate) module: String,
    pub(crate) id: FutureId,
}

impl ReadHandle {
    pub fn id(&self) -> &FutureId {
        &self.id
    }
}

impl DeclaredFuture for ReadHandle {
    fn future_id(&self) -> &FutureId {
        &self.id
    }
}

/// Index into the account list of the engine's target network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Account(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn future_id_parts() {
        let id = FutureId::new("CounterModule", "Counter.incBy");
        assert_eq!(id.as_str(), "CounterModule#Counter.incBy");
        assert_eq!(id.module(), "CounterModule");
        assert_eq!(id.local(), "Counter.incBy");
        assert_eq!(id.to_string(), "CounterModule#Counter.incBy");
    }
}
