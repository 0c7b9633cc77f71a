//! # Deployment Lifecycle
//!
//! Wires the counter module to a deployment engine.
//!
//! The module itself is pure data. Deploying it means building the descriptor,
//! resolving parameters, and passing both to an engine adapter:
//!
//! 1. **Build** - [`counter_module::descriptor`](crate::counter_module::descriptor)
//! 2. **Configure** - [`DeploymentParameters`](module_builder::DeploymentParameters),
//!    inline or from a JSON file
//! 3. **Hand off** - [`deploy_counter`] through any
//!    [`DeploymentEngine`](module_builder::DeploymentEngine)
//!
//! Errors from all three steps are collected in [`DeploymentError`].

pub mod deployment;
pub mod error;

pub use deployment::*;
pub use error::*;
