//! End-to-end CLI runs against a mock Zephyr Scale API.
//!
//! Each test starts a wiremock server, writes a config whose profile points
//! at it, and runs the binary off the async runtime so the server keeps
//! answering while the process blocks.

use std::path::PathBuf;
use std::process::Output;

use assert_cmd::Command;
use serde_json::{json, Value};
use wiremock::MockServer;

fn zephyr() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("zephyr").unwrap()
}

/// Temp dir holding a config for `server`; keep it alive for the test.
fn config_for(server: &MockServer) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let config = json!({
        "currentProfile": "mock",
        "profiles": {
            "mock": {
                "apiToken": "test-token",
                "projectKey": "P",
                "baseUrl": format!("{}/v2", server.uri())
            }
        }
    });
    std::fs::write(&path, config.to_string()).unwrap();
    (dir, path)
}

async fn run(config: &std::path::Path, args: &[&str]) -> Output {
    let config = config.to_path_buf();
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    tokio::task::spawn_blocking(move || {
        zephyr()
            .env_remove("ZEPHYR_API_TOKEN")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(config)
            .args(args)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

/// A single-page listing.
fn page(values: Value) -> Value {
    json!({ "values": values, "startAt": 0, "maxResults": 100, "isLast": true, "next": null })
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[path = "offline/folder_tree.rs"]
mod folder_tree;
#[path = "offline/cycle_tree.rs"]
mod cycle_tree;
#[path = "offline/updates.rs"]
mod updates;
