//! # Module Builder
//!
//! [`build_module`] is the entry point. It validates the module name, creates a
//! fresh [`ModuleBuilder`] scoped to this one call, hands it to the callback,
//! and finalizes whatever the callback declared into a [`ModuleDescriptor`].
//!
//! ## Build Context
//!
//! The builder is the only state involved. It is created by `build_module`,
//! lent to the callback as `&mut ModuleBuilder`, and consumed by finalization,
//! so nothing can be declared outside the building phase and nothing survives
//! it except the returned descriptor.
//!
//! ## Validation
//!
//! Every declaration is checked when it is made:
//! - ids must be unique within the module ([`ModuleError::DuplicateResourceName`],
//!   [`ModuleError::DuplicateActionId`])
//! - every handle used as a call target, an argument, an `after` dependency or an
//!   output must come from this builder or from a module imported with
//!   [`ModuleBuilder::use_module`] ([`ModuleError::UnknownHandle`])
//!
//! ```rust
//! use module_builder::{args, build_module, Outputs};
//!
//! let module = build_module("CounterModule", |m| {
//!     let counter = m.contract("Counter")?;
//!     m.call(&counter, "incBy", args![5u64])?;
//!     Ok(Outputs::new().with("counter", &counter))
//! })
//! .unwrap();
//!
//! assert_eq!(module.actions()[0].id.as_str(), "CounterModule#Counter.incBy");
//! ```

use crate::descriptor::{
    ActionDecl, ActionKind, ModuleDescriptor, Outputs, ResourceDecl, ResourceKind,
};
use crate::error::ModuleError;
use crate::handle::{Account, ActionHandle, ContractHandle, DeclaredFuture, FutureId, ReadHandle};
use crate::names;
use crate::value::{ArgumentValue, U256};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Options for [`ModuleBuilder::contract_with`].
#[derive(Debug, Clone, Default)]
pub struct ContractOptions {
    id: Option<String>,
    after: Vec<FutureId>,
    value: Option<U256>,
    from: Option<Account>,
}

impl ContractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the local id, needed to deploy the same contract twice.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn after(mut self, dependency: &impl DeclaredFuture) -> Self {
        self.after.push(dependency.future_id().clone());
        self
    }

    pub fn value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    pub fn from_account(mut self, account: Account) -> Self {
        self.from = Some(account);
        self
    }
}

/// Options for [`ModuleBuilder::call_with`].
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    id: Option<String>,
    after: Vec<FutureId>,
    value: Option<U256>,
    from: Option<Account>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn after(mut self, dependency: &impl DeclaredFuture) -> Self {
        self.after.push(dependency.future_id().clone());
        self
    }

    pub fn value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    pub fn from_account(mut self, account: Account) -> Self {
        self.from = Some(account);
        self
    }
}

/// Options for declarations that send no transaction: [`ModuleBuilder::contract_at`]
/// and [`ModuleBuilder::static_call`].
#[derive(Debug, Clone, Default)]
pub struct ReferenceOptions {
    id: Option<String>,
    after: Vec<FutureId>,
}

impl ReferenceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn after(mut self, dependency: &impl DeclaredFuture) -> Self {
        self.after.push(dependency.future_id().clone());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FutureKind {
    Contract,
    Action,
    Read,
}

/// Per-call build context handed to the [`build_module`] callback.
#[derive(Debug)]
pub struct ModuleBuilder {
    name: String,
    resources: Vec<ResourceDecl>,
    actions: Vec<ActionDecl>,
    parameters: BTreeMap<String, Option<ArgumentValue>>,
    submodules: Vec<ModuleDescriptor>,
    known: BTreeMap<FutureId, FutureKind>,
    contract_names: BTreeMap<FutureId, String>,
}

impl ModuleBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            resources: Vec::new(),
            actions: Vec::new(),
            parameters: BTreeMap::new(),
            submodules: Vec::new(),
            known: BTreeMap::new(),
            contract_names: BTreeMap::new(),
        }
    }

    pub fn module_name(&self) -> &str {
        &self.name
    }

    /// Declares a new instance of `contract_name` with no constructor arguments.
    pub fn contract(&mut self, contract_name: &str) -> Result<ContractHandle, ModuleError> {
        self.contract_with(contract_name, Vec::new(), ContractOptions::default())
    }

    /// Declares a new contract instance with constructor arguments and options.
    pub fn contract_with(
        &mut self,
        contract_name: &str,
        args: Vec<ArgumentValue>,
        options: ContractOptions,
    ) -> Result<ContractHandle, ModuleError> {
        names::validate_contract_name(contract_name).map_err(|e| self.reject(e))?;
        let id = self.resource_id(options.id.as_deref(), contract_name)?;

        let mut dependencies = self.argument_dependencies(&args)?;
        self.add_after(&options.after, &mut dependencies)?;

        debug!(module = %self.name, %id, contract_name, args = args.len(), "Contract declared");
        self.resources.push(ResourceDecl {
            id: id.clone(),
            contract_name: contract_name.to_string(),
            kind: ResourceKind::Deploy { args },
            value: options.value,
            from: options.from,
            dependencies,
        });
        Ok(self.register_contract(id, contract_name))
    }

    /// Binds to a contract that already exists at `address`.
    ///
    /// The address is either a `0x` literal, a static call result, or a parameter.
    pub fn contract_at(
        &mut self,
        contract_name: &str,
        address: impl Into<ArgumentValue>,
        options: ReferenceOptions,
    ) -> Result<ContractHandle, ModuleError> {
        let address = address.into();
        names::validate_contract_name(contract_name).map_err(|e| self.reject(e))?;
        match &address {
            ArgumentValue::String(s) if names::is_address(s) => {}
            ArgumentValue::Read(_) | ArgumentValue::Parameter { .. } => {}
            other => {
                let err = ModuleError::InvalidAddress(format!("{other:?}"));
                return Err(self.reject(err));
            }
        }
        let id = self.resource_id(options.id.as_deref(), contract_name)?;

        let mut dependencies = self.argument_dependencies(std::slice::from_ref(&address))?;
        self.add_after(&options.after, &mut dependencies)?;

        debug!(module = %self.name, %id, contract_name, "Existing contract declared");
        self.resources.push(ResourceDecl {
            id: id.clone(),
            contract_name: contract_name.to_string(),
            kind: ResourceKind::Existing { address },
            value: None,
            from: None,
            dependencies,
        });
        Ok(self.register_contract(id, contract_name))
    }

    /// Declares a call of `method` on `contract`, executed after the contract exists.
    pub fn call(
        &mut self,
        contract: &ContractHandle,
        method: &str,
        args: Vec<ArgumentValue>,
    ) -> Result<ActionHandle, ModuleError> {
        self.call_with(contract, method, args, CallOptions::default())
    }

    pub fn call_with(
        &mut self,
        contract: &ContractHandle,
        method: &str,
        args: Vec<ArgumentValue>,
        options: CallOptions,
    ) -> Result<ActionHandle, ModuleError> {
        let id = self.declare_action(
            ActionKind::Call,
            contract,
            method,
            args,
            options.id.as_deref(),
            &options.after,
            options.value,
            options.from,
        )?;
        self.known.insert(id.clone(), FutureKind::Action);
        Ok(ActionHandle {
            module: self.name.clone(),
            id,
        })
    }

    /// Declares a read-only call. The returned handle can be passed as an argument.
    pub fn static_call(
        &mut self,
        contract: &ContractHandle,
        method: &str,
        args: Vec<ArgumentValue>,
        options: ReferenceOptions,
    ) -> Result<ReadHandle, ModuleError> {
        let id = self.declare_action(
            ActionKind::StaticCall,
            contract,
            method,
            args,
            options.id.as_deref(),
            &options.after,
            None,
            None,
        )?;
        self.known.insert(id.clone(), FutureKind::Read);
        Ok(ReadHandle {
            module: self.name.clone(),
            id,
        })
    }

    /// Reads a module parameter, falling back to `default` when none is supplied.
    pub fn get_parameter(
        &mut self,
        name: &str,
        default: impl Into<ArgumentValue>,
    ) -> Result<ArgumentValue, ModuleError> {
        self.declare_parameter(name, Some(default.into()))
    }

    /// Reads a module parameter that deployment configuration must supply.
    pub fn get_required_parameter(&mut self, name: &str) -> Result<ArgumentValue, ModuleError> {
        self.declare_parameter(name, None)
    }

    pub fn get_account(&self, index: u32) -> Account {
        Account(index)
    }

    /// Composes `module` into this one and returns its outputs.
    ///
    /// Every future of the submodule (and of its own submodules) becomes a valid
    /// handle here. Using the same descriptor twice is a no-op.
    ///
    /// A module name must map to one descriptor across the whole tree: reaching
    /// a different descriptor under a name already used, at any depth, fails.
    pub fn use_module(&mut self, module: &ModuleDescriptor) -> Result<Outputs, ModuleError> {
        let mut reachable: BTreeMap<&str, &ModuleDescriptor> = BTreeMap::new();
        for sub in &self.submodules {
            for m in sub.modules() {
                reachable.entry(m.name()).or_insert(m);
            }
        }
        for m in module.modules() {
            let conflicting = m.name() == self.name
                || reachable
                    .get(m.name())
                    .is_some_and(|existing| *existing != m);
            if conflicting {
                return Err(self.reject(ModuleError::ConflictingSubmodule(m.name.clone())));
            }
        }
        if self.submodules.iter().any(|m| m == module) {
            return Ok(module.outputs.clone());
        }

        for sub in module.modules() {
            for resource in &sub.resources {
                self.known.insert(resource.id.clone(), FutureKind::Contract);
                self.contract_names.insert(resource.id.clone(), resource.contract_name.clone());
            }
            for action in &sub.actions {
                let kind = match action.kind {
                    ActionKind::Call => FutureKind::Action,
                    ActionKind::StaticCall => FutureKind::Read,
                };
                self.known.insert(action.id.clone(), kind);
            }
        }
        debug!(module = %self.name, submodule = %module.name, "Submodule used");
        self.submodules.push(module.clone());
        Ok(module.outputs.clone())
    }

    // --- internals ---

    #[allow(clippy::too_many_arguments)]
    fn declare_action(
        &mut self,
        kind: ActionKind,
        contract: &ContractHandle,
        method: &str,
        args: Vec<ArgumentValue>,
        user_id: Option<&str>,
        after: &[FutureId],
        value: Option<U256>,
        from: Option<Account>,
    ) -> Result<FutureId, ModuleError> {
        self.require_contract(contract)?;
        names::validate_method_name(method).map_err(|e| self.reject(e))?;

        let local = match user_id {
            Some(user_id) => {
                names::validate_identifier(user_id).map_err(|e| self.reject(e))?;
                user_id.to_string()
            }
            None => self.default_action_id(contract, method),
        };
        let id = FutureId::new(&self.name, &local);
        if self.known.contains_key(&id) {
            let err = ModuleError::DuplicateActionId {
                module: self.name.clone(),
                id,
            };
            return Err(self.reject(err));
        }

        let mut dependencies = self.argument_dependencies(&args)?;
        dependencies.insert(contract.id().clone());
        self.add_after(after, &mut dependencies)?;

        debug!(module = %self.name, %id, ?kind, method, args = args.len(), "Action declared");
        self.actions.push(ActionDecl {
            id: id.clone(),
            kind,
            contract: contract.id().clone(),
            method: method.to_string(),
            args,
            value,
            from,
            dependencies,
        });
        Ok(id)
    }

    fn default_action_id(&self, contract: &ContractHandle, method: &str) -> String {
        let method = names::bare_method(method);
        if contract.module() == self.name {
            format!("{}.{}", contract.id().local(), method)
        } else {
            format!("{}~{}.{}", contract.module(), contract.id().local(), method)
        }
    }

    fn resource_id(
        &self,
        user_id: Option<&str>,
        contract_name: &str,
    ) -> Result<FutureId, ModuleError> {
        let local = match user_id {
            Some(user_id) => {
                names::validate_identifier(user_id).map_err(|e| self.reject(e))?;
                user_id
            }
            None => names::default_contract_id(contract_name),
        };
        let id = FutureId::new(&self.name, local);
        if self.known.contains_key(&id) {
            let err = ModuleError::DuplicateResourceName {
                module: self.name.clone(),
                id,
            };
            return Err(self.reject(err));
        }
        Ok(id)
    }

    fn register_contract(&mut self, id: FutureId, contract_name: &str) -> ContractHandle {
        self.known.insert(id.clone(), FutureKind::Contract);
        self.contract_names.insert(id.clone(), contract_name.to_string());
        ContractHandle {
            module: self.name.clone(),
            id,
            contract_name: contract_name.to_string(),
        }
    }

    fn declare_parameter(
        &mut self,
        name: &str,
        default: Option<ArgumentValue>,
    ) -> Result<ArgumentValue, ModuleError> {
        names::validate_identifier(name).map_err(|e| self.reject(e))?;
        if let Some(existing) = self.parameters.get(name) {
            if existing != &default {
                let err = ModuleError::ConflictingParameter {
                    module: self.name.clone(),
                    name: name.to_string(),
                };
                return Err(self.reject(err));
            }
        } else {
            debug!(module = %self.name, parameter = name, required = default.is_none(), "Parameter declared");
            self.parameters.insert(name.to_string(), default.clone());
        }
        Ok(ArgumentValue::Parameter {
            module: self.name.clone(),
            name: name.to_string(),
            default: default.map(Box::new),
        })
    }

    /// Futures referenced inside an argument list.
    fn argument_dependencies(
        &self,
        args: &[ArgumentValue],
    ) -> Result<BTreeSet<FutureId>, ModuleError> {
        let mut contracts = Vec::new();
        let mut reads = Vec::new();
        for arg in args {
            arg.walk(&mut |value: &ArgumentValue| match value {
                ArgumentValue::Contract(handle) => contracts.push(handle.clone()),
                ArgumentValue::Read(handle) => reads.push(handle.id().clone()),
                _ => {}
            });
        }

        let mut dependencies = BTreeSet::new();
        for handle in contracts {
            self.require_contract(&handle)?;
            dependencies.insert(handle.id().clone());
        }
        for id in reads {
            self.require(&id, FutureKind::Read)?;
            dependencies.insert(id);
        }
        Ok(dependencies)
    }

    fn add_after(
        &self,
        after: &[FutureId],
        dependencies: &mut BTreeSet<FutureId>,
    ) -> Result<(), ModuleError> {
        for id in after {
            if !self.known.contains_key(id) {
                return Err(self.unknown(id));
            }
            dependencies.insert(id.clone());
        }
        Ok(())
    }

    fn require(&self, id: &FutureId, kind: FutureKind) -> Result<(), ModuleError> {
        match self.known.get(id) {
            Some(found) if *found == kind => Ok(()),
            _ => Err(self.unknown(id)),
        }
    }

    /// A contract handle must also name the contract its id was declared with.
    fn require_contract(&self, handle: &ContractHandle) -> Result<(), ModuleError> {
        self.require(handle.id(), FutureKind::Contract)?;
        match self.contract_names.get(handle.id()) {
            Some(name) if name == handle.contract_name() => Ok(()),
            _ => Err(self.unknown(handle.id())),
        }
    }

    fn unknown(&self, id: &FutureId) -> ModuleError {
        self.reject(ModuleError::UnknownHandle {
            module: self.name.clone(),
            id: id.clone(),
        })
    }

    fn reject(&self, err: ModuleError) -> ModuleError {
        warn!(module = %self.name, error = %err, "Declaration rejected");
        err
    }

    fn finalize(self, outputs: Outputs) -> Result<ModuleDescriptor, ModuleError> {
        for (name, handle) in outputs.iter() {
            names::validate_identifier(name).map_err(|e| self.reject(e))?;
            self.require_contract(handle)?;
        }

        info!(
            module = %self.name,
            resources = self.resources.len(),
            actions = self.actions.len(),
            outputs = outputs.len(),
            "Module built"
        );
        Ok(ModuleDescriptor {
            name: self.name,
            resources: self.resources,
            actions: self.actions,
            parameters: self.parameters,
            submodules: self.submodules,
            outputs,
        })
    }
}

/// Builds an immutable [`ModuleDescriptor`] named `name`.
///
/// The callback declares resources and actions on the builder and returns the
/// outputs the module exposes. Any error it returns aborts the build.
#[tracing::instrument(skip_all, fields(module = %name))]
pub fn build_module<F>(name: &str, build: F) -> Result<ModuleDescriptor, ModuleError>
where
    F: FnOnce(&mut ModuleBuilder) -> Result<Outputs, ModuleError>,
{
    if let Err(e) = names::validate_module_name(name) {
        warn!(error = %e, "Module build failed");
        return Err(e);
    }

    let mut builder = ModuleBuilder::new(name);
    let outputs = match build(&mut builder) {
        Ok(outputs) => outputs,
        Err(e) => {
            warn!(error = %e, "Module build failed");
            return Err(e);
        }
    };
    builder.finalize(outputs)
}
