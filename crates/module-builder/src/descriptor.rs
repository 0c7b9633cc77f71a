//! # Module Descriptor
//!
//! The immutable value produced by [`build_module`](crate::build_module). It lists
//! what a module declares, in declaration order, and the handles it exposes.
//! The descriptor is pure data: deterministic, cloneable, comparable and
//! serializable, so a deployment engine can consume it as-is.

use crate::handle::{Account, ContractHandle, FutureId};
use crate::value::{ArgumentValue, U256};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// How a resource comes into existence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceKind {
    /// Deploy a new instance with the given constructor arguments.
    Deploy { args: Vec<ArgumentValue> },
    /// Bind to a contract that already exists at `address`.
    Existing { address: ArgumentValue },
}

/// A declared contract instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceDecl {
    pub id: FutureId,
    pub contract_name: String,
    pub kind: ResourceKind,
    /// Native value sent with the deployment transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Account>,
    /// Futures that must complete first: handles found in the arguments plus
    /// explicit `after` entries.
    pub dependencies: BTreeSet<FutureId>,
}

impl ResourceDecl {
    /// Constructor arguments, empty for existing contracts.
    pub fn args(&self) -> &[ArgumentValue] {
        match &self.kind {
            ResourceKind::Deploy { args } => args,
            ResourceKind::Existing { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// State-changing transaction.
    Call,
    /// Read-only call whose result can feed later arguments.
    StaticCall,
}

/// A declared method invocation on a resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionDecl {
    pub id: FutureId,
    pub kind: ActionKind,
    pub contract: FutureId,
    pub method: String,
    pub args: Vec<ArgumentValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Account>,
    pub dependencies: BTreeSet<FutureId>,
}

/// Named outputs exposed by a module, ordered by name.
///
/// Inserting an existing name replaces the previous handle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Outputs(BTreeMap<String, ContractHandle>);

impl Outputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an output, builder style.
    pub fn with(mut self, name: impl Into<String>, handle: &ContractHandle) -> Self {
        self.insert(name, handle);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, handle: &ContractHandle) {
        self.0.insert(name.into(), handle.clone());
    }

    pub fn get(&self, name: &str) -> Option<&ContractHandle> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContractHandle)> {
        self.0.iter().map(|(name, handle)| (name.as_str(), handle))
    }
}

/// The finished, immutable description of one deployment module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDescriptor {
    pub(crate) name: String,
    pub(crate) resources: Vec<ResourceDecl>,
    pub(crate) actions: Vec<ActionDecl>,
    /// Parameter name to default, `None` when the parameter is required.
    pub(crate) parameters: BTreeMap<String, Option<ArgumentValue>>,
    pub(crate) submodules: Vec<ModuleDescriptor>,
    pub(crate) outputs: Outputs,
}

impl ModuleDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resources(&self) -> &[ResourceDecl] {
        &self.resources
    }

    pub fn actions(&self) -> &[ActionDecl] {
        &self.actions
    }

    pub fn parameters(&self) -> &BTreeMap<String, Option<ArgumentValue>> {
        &self.parameters
    }

    pub fn submodules(&self) -> &[ModuleDescriptor] {
        &self.submodules
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn resource(&self, id: &FutureId) -> Option<&ResourceDecl> {
        self.resources.iter().find(|r| &r.id == id)
    }

    pub fn action(&self, id: &FutureId) -> Option<&ActionDecl> {
        self.actions.iter().find(|a| &a.id == id)
    }

    /// Actions targeting the given contract, in declaration order.
    pub fn actions_on<'a>(
        &'a self,
        contract: &'a ContractHandle,
    ) -> impl Iterator<Item = &'a ActionDecl> + 'a {
        self.actions.iter().filter(move |a| &a.contract == contract.id())
    }

    /// This module followed by every transitively used submodule, each once.
    pub fn modules(&self) -> Vec<&ModuleDescriptor> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        self.collect_modules(&mut seen, &mut out);
        out
    }

    fn collect_modules<'a>(
        &'a self,
        seen: &mut BTreeSet<&'a str>,
        out: &mut Vec<&'a ModuleDescriptor>,
    ) {
        if !seen.insert(self.name.as_str()) {
            return;
        }
        out.push(self);
        for sub in &self.submodules {
            sub.collect_modules(seen, out);
        }
    }
}
