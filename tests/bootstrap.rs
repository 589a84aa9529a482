//! Integration tests that run the server binary.

fn bin() -> std::process::Command {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_steptutor"));
    for var in [
        "OPENROUTER_API_KEY",
        "OPENROUTER_BASE_URL",
        "LANGUAGE_MODEL",
        "MAX_TOKENS",
        "LINE_CHANNEL_SECRET",
        "LINE_CHANNEL_ACCESS_TOKEN",
        "PORT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn missing_api_key_exits_with_readable_error() {
    let output = bin()
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("OPENROUTER_API_KEY is not set"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn missing_line_credentials_exit_with_readable_error() {
    let output = bin()
        .env("OPENROUTER_API_KEY", "test-key")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("LINE_CHANNEL_SECRET is not set"),
        "stderr: {}",
        stderr
    );
}
