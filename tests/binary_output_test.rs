use std::process::Command;

/// Log lines go to stderr, so stdout parses as the descriptor even with logging on.
#[test]
fn test_stdout_is_descriptor_json_with_logging_enabled() {
    let output = Command::new(env!("CARGO_BIN_EXE_counter-deployment"))
        .env("RUST_LOG", "debug")
        .output()
        .expect("failed to run binary");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(json["name"], "CounterModule");
    assert_eq!(json["actions"][0]["method"], "incBy");

    let logs = String::from_utf8_lossy(&output.stderr);
    assert!(logs.contains("Module built"));
}
