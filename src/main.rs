//! # Counter Deployment
//!
//! Prints the `CounterModule` descriptor as JSON, the form a deployment engine
//! consumes.
//!
//! ```bash
//! cargo run                     # descriptor only
//! RUST_LOG=debug cargo run      # plus every declaration on stderr
//! ```

use counter_deployment::counter_module;
use module_builder::tracing::setup_tracing;
use tracing::info;

fn main() -> Result<(), String> {
    setup_tracing();

    let module = counter_module::descriptor().map_err(|e| e.to_string())?;
    info!(
        module = module.name(),
        resources = module.resources().len(),
        actions = module.actions().len(),
        "Descriptor ready"
    );

    let json = serde_json::to_string_pretty(&module).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
