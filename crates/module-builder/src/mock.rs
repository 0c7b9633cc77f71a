//! # Mock Engine & Testing Guide
//!
//! [`MockEngine`] implements [`DeploymentEngine`] entirely in memory. Queue the
//! responses you expect, run the code under test, then [`verify`](MockEngine::verify)
//! that every expectation was consumed.
//!
//! | | MockEngine | Real engine |
//! |---|---|---|
//! | **Speed** | Instant | Network bound |
//! | **Determinism** | Scripted responses | Depends on the chain |
//! | **Error Injection** | `return_err` | Hard |
//!
//! ```rust
//! use module_builder::mock::MockEngine;
//! use module_builder::{build_module, deploy_module, DeploymentParameters, DeploymentResult, Outputs};
//!
//! #[tokio::main]
//! async fn main() {
//!     let module = build_module("CounterModule", |m| {
//!         let counter = m.contract("Counter")?;
//!         Ok(Outputs::new().with("counter", &counter))
//!     })
//!     .unwrap();
//!     let counter = module.outputs().get("counter").unwrap();
//!
//!     let engine = MockEngine::new();
//!     engine.expect_deploy("CounterModule").return_ok(
//!         DeploymentResult::new("CounterModule").with_contract(
//!             "counter",
//!             counter.id().clone(),
//!             "Counter",
//!             "0x5FbDB2315678afecb367f032d93F642f64180aa3",
//!         ),
//!     );
//!
//!     let result = deploy_module(&engine, &module, &DeploymentParameters::new())
//!         .await
//!         .unwrap();
//!     assert_eq!(result.address_of("counter"), Some("0x5FbDB2315678afecb367f032d93F642f64180aa3"));
//!     engine.verify();
//! }
//! ```

use crate::descriptor::ModuleDescriptor;
use crate::engine::{DeploymentEngine, DeploymentResult};
use crate::error::EngineError;
use crate::parameters::DeploymentParameters;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

struct Expectation {
    module: String,
    response: Result<DeploymentResult, EngineError>,
}

/// A scripted [`DeploymentEngine`].
///
/// Panics when it receives a module it was not told to expect.
#[derive(Clone, Default)]
pub struct MockEngine {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    received: Arc<Mutex<Vec<ModuleDescriptor>>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects the next deployment to be of module `module`.
    pub fn expect_deploy(&self, module: &str) -> DeployExpectationBuilder {
        DeployExpectationBuilder {
            module: module.to_string(),
            expectations: self.expectations.clone(),
        }
    }

    /// Every descriptor handed to this engine, in order.
    pub fn received(&self) -> Vec<ModuleDescriptor> {
        self.received.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl DeploymentEngine for MockEngine {
    async fn deploy(
        &self,
        module: &ModuleDescriptor,
        _parameters: &DeploymentParameters,
    ) -> Result<DeploymentResult, EngineError> {
        self.received.lock().unwrap().push(module.clone());
        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(expectation) if expectation.module == module.name() => expectation.response,
            Some(expectation) => panic!(
                "Expected deployment of {}, got {}",
                expectation.module,
                module.name()
            ),
            None => panic!("Unexpected deployment of {}", module.name()),
        }
    }
}

/// Builder for `deploy` expectations.
pub struct DeployExpectationBuilder {
    module: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl DeployExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, result: DeploymentResult) {
        self.expectations.lock().unwrap().push_back(Expectation {
            module: self.module,
            response: Ok(result),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: EngineError) {
        self.expectations.lock().unwrap().push_back(Expectation {
            module: self.module,
            response: Err(error),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args, build_module, deploy_module, Outputs};

    fn module() -> ModuleDescriptor {
        build_module("CounterModule", |m| {
            let counter = m.contract("Counter")?;
            m.call(&counter, "incBy", args![5u64])?;
            Ok(Outputs::new().with("counter", &counter))
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_mock_engine_records_modules() {
        let module = module();
        let engine = MockEngine::new();
        engine
            .expect_deploy("CounterModule")
            .return_err(EngineError::Rejected("network unavailable".into()));

        let err = deploy_module(&engine, &module, &DeploymentParameters::new())
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::Rejected("network unavailable".into()));
        assert_eq!(engine.received(), vec![module]);
        engine.verify();
    }

    #[tokio::test]
    async fn test_incomplete_result_is_rejected() {
        let module = module();
        let engine = MockEngine::new();
        engine
            .expect_deploy("CounterModule")
            .return_ok(DeploymentResult::new("CounterModule"));

        let err = deploy_module(&engine, &module, &DeploymentParameters::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::IncompleteResult {
                module: "CounterModule".into(),
                output: "counter".into()
            }
        );
    }

    #[tokio::test]
    async fn test_output_with_wrong_future_is_rejected() {
        let module = build_module("CounterModule", |m| {
            let counter = m.contract("Counter")?;
            let token = m.contract("Token")?;
            Ok(Outputs::new().with("counter", &counter).with("token", &token))
        })
        .unwrap();
        let counter = module.outputs().get("counter").unwrap().id().clone();
        let token = module.outputs().get("token").unwrap().id().clone();

        let engine = MockEngine::new();
        engine.expect_deploy("CounterModule").return_ok(
            DeploymentResult::new("CounterModule")
                .with_contract("counter", token.clone(), "Token", "0x01")
                .with_contract("token", token.clone(), "Token", "0x01"),
        );

        let err = deploy_module(&engine, &module, &DeploymentParameters::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::MismatchedOutput {
                module: "CounterModule".into(),
                output: "counter".into(),
                expected: counter,
                found: token,
            }
        );
        engine.verify();
    }

    #[tokio::test]
    async fn test_missing_parameter_never_reaches_engine() {
        let module = build_module("Owned", |m| {
            let owner = m.get_required_parameter("owner")?;
            let counter = m.contract_with("Counter", vec![owner], Default::default())?;
            Ok(Outputs::new().with("counter", &counter))
        })
        .unwrap();
        let engine = MockEngine::new();

        let err = deploy_module(&engine, &module, &DeploymentParameters::new())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingParameter { ref name, .. } if name == "owner"));
        assert!(engine.received().is_empty());
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_panics_on_unmet_expectations() {
        let engine = MockEngine::new();
        engine
            .expect_deploy("CounterModule")
            .return_ok(DeploymentResult::new("CounterModule"));
        engine.verify();
    }
}
