//! # Counter Deployment
//!
//! > **A declarative deployment module for the `Counter` contract.**
//!
//! The module deploys one `Counter`, calls `incBy(5)` on it, and exposes the
//! contract as output `counter`. It is written against the
//! [`module_builder`] crate, which turns the declaration into an immutable
//! [`ModuleDescriptor`](module_builder::ModuleDescriptor) for an external
//! deployment engine.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Module ([`counter_module`])
//! - **Role**: The declaration itself: one contract, one call, one output.
//! - **Key items**: [`descriptor`](counter_module::descriptor), [`MODULE_NAME`](counter_module::MODULE_NAME).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Role**: Hands the descriptor and its parameters to a
//!   [`DeploymentEngine`](module_builder::DeploymentEngine).
//! - **Key items**: [`deploy_counter`](lifecycle::deploy_counter), [`DeploymentError`](lifecycle::DeploymentError).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Print the descriptor as JSON
//! cargo run
//!
//! # Run the tests
//! cargo test
//! ```

pub mod counter_module;
pub mod lifecycle;
