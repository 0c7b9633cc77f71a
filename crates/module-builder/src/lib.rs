//! # Module Builder
//!
//! Declarative deployment modules for smart contracts.
//!
//! A *module* is a named unit that declares contract instances (resources) and
//! method invocations on them (actions), and exposes some of its contracts as
//! named outputs. Building a module produces an immutable [`ModuleDescriptor`];
//! nothing is deployed here. Executing a descriptor is the job of an external
//! engine, reached through the [`DeploymentEngine`] trait.
//!
//! ## Architecture Overview
//!
//! 1. **Declaration** ([`build_module`], [`ModuleBuilder`]): a callback declares
//!    contracts and calls and returns its [`Outputs`]. Each declaration is
//!    validated immediately.
//! 2. **Description** ([`ModuleDescriptor`]): the finished, serializable value.
//!    Deterministic: building the same module twice yields equal descriptors.
//! 3. **Handoff** ([`deploy_module`], [`DeploymentEngine`]): parameters are
//!    checked and the descriptor is passed to an engine adapter.
//!
//! ## Handles
//!
//! Declaring something returns a handle ([`ContractHandle`], [`ActionHandle`],
//! [`ReadHandle`]). Handles are back-references by [`FutureId`], never live
//! values, and are only accepted by the module that produced them or by a
//! parent that imported that module with [`ModuleBuilder::use_module`].
//!
//! ```rust
//! use module_builder::{args, build_module, ModuleError, Outputs};
//!
//! fn counter_module() -> Result<module_builder::ModuleDescriptor, ModuleError> {
//!     build_module("CounterModule", |m| {
//!         let counter = m.contract("Counter")?;
//!         m.call(&counter, "incBy", args![5u64])?;
//!         Ok(Outputs::new().with("counter", &counter))
//!     })
//! }
//!
//! let first = counter_module().unwrap();
//! let second = counter_module().unwrap();
//! assert_eq!(first, second);
//! assert_eq!(first.outputs().get("counter").unwrap().contract_name(), "Counter");
//! ```
//!
//! ## Testing
//!
//! [`mock::MockEngine`] is a scripted engine for exercising code that deploys
//! modules without a network.

pub mod builder;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod handle;
pub mod mock;
mod names;
pub mod parameters;
pub mod tracing;
pub mod value;

// Re-export core types for convenience
pub use builder::{build_module, CallOptions, ContractOptions, ModuleBuilder, ReferenceOptions};
pub use descriptor::{ActionDecl, ActionKind, ModuleDescriptor, Outputs, ResourceDecl, ResourceKind};
pub use engine::{deploy_module, DeployedContract, DeploymentEngine, DeploymentResult};
pub use error::{EngineError, ModuleError, ParametersError};
pub use handle::{Account, ActionHandle, ContractHandle, DeclaredFuture, FutureId, ReadHandle};
pub use parameters::DeploymentParameters;
pub use value::{ArgumentValue, U256};
