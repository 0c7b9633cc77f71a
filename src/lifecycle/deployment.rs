use crate::counter_module;
use crate::lifecycle::DeploymentError;
use module_builder::{deploy_module, DeploymentEngine, DeploymentParameters, DeploymentResult};
use std::path::Path;
use tracing::{info, instrument};

/// Builds `CounterModule` and hands it to `engine`.
///
/// # Example
///
/// ```ignore
/// let engine = MyEngineAdapter::connect(rpc_url).await?;
/// let result = deploy_counter(&engine, &DeploymentParameters::new()).await?;
/// println!("counter at {}", result.address_of("counter").unwrap());
/// ```
#[instrument(skip_all)]
pub async fn deploy_counter<E>(
    engine: &E,
    parameters: &DeploymentParameters,
) -> Result<DeploymentResult, DeploymentError>
where
    E: DeploymentEngine + ?Sized,
{
    let module = counter_module::descriptor()?;
    let result = deploy_module(engine, &module, parameters).await?;
    if let Some(address) = result.address_of(counter_module::COUNTER_OUTPUT) {
        info!(address, "Counter deployed");
    }
    Ok(result)
}

/// Same as [`deploy_counter`], reading parameters from a JSON file.
pub async fn deploy_counter_with_file<E>(
    engine: &E,
    parameters_path: impl AsRef<Path>,
) -> Result<DeploymentResult, DeploymentError>
where
    E: DeploymentEngine + ?Sized,
{
    let parameters = DeploymentParameters::from_path(parameters_path)?;
    deploy_counter(engine, &parameters).await
}
