use std::path::{Path, PathBuf};
use std::process::Output;

use tokio::process::Command;
use wiremock::MockServer;

/// Base URL of a mock API server.
pub fn api_url(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}", server.address().port())
}

/// Credential file the CLI uses for `server` when data lives under `home`.
pub fn credentials_file(home: &Path, server: &MockServer) -> PathBuf {
    home.join("data")
        .join("sessio")
        .join("credentials")
        .join(format!("http_127.0.0.1_{}.json", server.address().port()))
}

/// Run the CLI with a custom HOME directory for isolated credential storage.
pub async fn run_cli_with_env(args: &[&str], home: &Path, api: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sessio"));
    if let Some(api) = api {
        cmd.args(["--api", api]);
    }
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env_remove("SESSIO_API_URL");
    cmd.env_remove("SESSIO_CREDENTIAL_TTL_HOURS");
    cmd.env_remove("RUST_LOG");
    cmd.output().await.expect("Failed to execute CLI")
}

/// Run the CLI with a custom HOME and expect success.
pub async fn run_cli_with_env_success(args: &[&str], home: &Path, api: &str) -> String {
    let output = run_cli_with_env(args, home, Some(api)).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI with a custom HOME and expect failure, returning stderr.
pub async fn run_cli_with_env_failure(args: &[&str], home: &Path, api: Option<&str>) -> String {
    let output = run_cli_with_env(args, home, api).await;
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
