//! # Observability
//!
//! Builder and engine-seam events are emitted with `tracing`:
//!
//! - `debug`: every declaration (`Contract declared`, `Action declared`, ...)
//! - `info`: `Module built`, `Handing module to engine`, `Module deployed`
//! - `warn`: rejected declarations and failed deployments
//!
//! `build_module` and `deploy_module` open a span carrying the module name, so
//! nested events show which module they belong to.
//!
//! ```bash
//! RUST_LOG=info cargo run     # one line per module
//! RUST_LOG=debug cargo run    # every declaration
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, writing to
/// stderr so stdout stays free for program output.
///
/// Call once, at the start of a binary. Panics if a global subscriber is
/// already installed.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
