//! # Counter Module
//!
//! The deployment module for the `Counter` contract: deploy one instance, bump it
//! by five, and expose it as output `counter` so other modules can build on it.
//!
//! ## Usage
//!
//! ```rust
//! use counter_deployment::counter_module::{self, COUNTER_OUTPUT};
//!
//! let module = counter_module::descriptor().unwrap();
//! let counter = module.outputs().get(COUNTER_OUTPUT).unwrap();
//! assert_eq!(counter.contract_name(), "Counter");
//! ```
//!
//! Constructor arguments for `Counter` and the target network are not part of
//! the module; the engine's environment supplies them.

use module_builder::{args, build_module, ModuleDescriptor, ModuleError, Outputs};

pub const MODULE_NAME: &str = "CounterModule";
pub const CONTRACT_NAME: &str = "Counter";
pub const COUNTER_OUTPUT: &str = "counter";

/// Amount passed to `incBy` right after deployment.
pub const INITIAL_INCREMENT: u64 = 5;

/// Builds the `CounterModule` descriptor.
pub fn descriptor() -> Result<ModuleDescriptor, ModuleError> {
    build_module(MODULE_NAME, |m| {
        let counter = m.contract(CONTRACT_NAME)?;

        m.call(&counter, "incBy", args![INITIAL_INCREMENT])?;

        Ok(Outputs::new().with(COUNTER_OUTPUT, &counter))
    })
}
