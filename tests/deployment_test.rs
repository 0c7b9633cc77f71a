use counter_deployment::counter_module::{self, COUNTER_OUTPUT};
use counter_deployment::lifecycle::{deploy_counter, deploy_counter_with_file, DeploymentError};
use module_builder::mock::MockEngine;
use module_builder::{DeploymentParameters, DeploymentResult, EngineError, ParametersError};

const COUNTER_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

fn counter_result() -> DeploymentResult {
    let module = counter_module::descriptor().unwrap();
    let counter = module.outputs().get(COUNTER_OUTPUT).unwrap();
    DeploymentResult::new("CounterModule").with_contract(
        COUNTER_OUTPUT,
        counter.id().clone(),
        "Counter",
        COUNTER_ADDRESS,
    )
}

/// The engine receives exactly the descriptor the module builds.
#[tokio::test]
async fn test_deploy_counter_hands_descriptor_to_engine() {
    let engine = MockEngine::new();
    engine.expect_deploy("CounterModule").return_ok(counter_result());

    let result = deploy_counter(&engine, &DeploymentParameters::new())
        .await
        .expect("deployment failed");

    assert_eq!(result.address_of(COUNTER_OUTPUT), Some(COUNTER_ADDRESS));
    assert_eq!(
        engine.received(),
        vec![counter_module::descriptor().unwrap()]
    );
    engine.verify();
}

#[tokio::test]
async fn test_engine_failure_is_surfaced() {
    let engine = MockEngine::new();
    engine
        .expect_deploy("CounterModule")
        .return_err(EngineError::Execution("incBy reverted".into()));

    let err = deploy_counter(&engine, &DeploymentParameters::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DeploymentError::Engine(EngineError::Execution(ref msg)) if msg == "incBy reverted"
    ));
    engine.verify();
}

#[tokio::test]
async fn test_missing_parameters_file() {
    let engine = MockEngine::new();

    let err = deploy_counter_with_file(&engine, "/nonexistent/counter-parameters.json")
        .await
        .unwrap_err();
    assert!(matches!(err, DeploymentError::Parameters(ParametersError::Io(_))));
    assert!(engine.received().is_empty());
}

/// Concurrent deployments through one shared engine each get their own result.
#[tokio::test]
async fn test_concurrent_deployments() {
    let engine = MockEngine::new();
    for _ in 0..4 {
        engine.expect_deploy("CounterModule").return_ok(counter_result());
    }

    let mut handles = vec![];
    for _ in 0..4 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            deploy_counter(&engine, &DeploymentParameters::new()).await
        }));
    }
    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.address_of(COUNTER_OUTPUT), Some(COUNTER_ADDRESS));
    }

    assert_eq!(engine.received().len(), 4);
    engine.verify();
}
