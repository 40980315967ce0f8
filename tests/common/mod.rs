// Shared test helpers for integration tests.
// Used by cli_contract.rs and cli_flows.rs.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub fn binary_path() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_dox-hooks"));
    assert!(path.exists(), "binary not found at {}", path.display());
    path
}

/// Captured result of one hook process.
pub struct HookRun {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// A scratch working directory; logs land under `.claude/hooks/logs`.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace {
            dir: TempDir::new().expect("failed to create temp workspace"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn log_path(&self, file: &str) -> PathBuf {
        self.path().join(".claude/hooks/logs").join(file)
    }

    /// Parsed entries of a log file, or `None` when it was never written.
    pub fn log_entries(&self, file: &str) -> Option<Vec<serde_json::Value>> {
        let content = std::fs::read_to_string(self.log_path(file)).ok()?;
        let value: serde_json::Value =
            serde_json::from_str(&content).expect("log file should be valid JSON");
        Some(value.as_array().expect("log file should be an array").clone())
    }

    pub fn run(&self, subcommand: &str, stdin_input: &str) -> HookRun {
        self.run_args(subcommand, stdin_input, &[])
    }

    /// Runs the binary in this workspace with the given stdin and extra args.
    pub fn run_args(&self, subcommand: &str, stdin_input: &str, extra_args: &[&str]) -> HookRun {
        let mut cmd = Command::new(binary_path());
        cmd.arg(subcommand).args(extra_args).current_dir(self.path());
        let output = cmd
            .env_remove("DOX_HOOKS_LOG")
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .and_then(|mut child| {
                use std::io::{ErrorKind, Write};
                let write_result = child
                    .stdin
                    .take()
                    .unwrap()
                    .write_all(stdin_input.as_bytes());
                if let Err(e) = write_result {
                    if e.kind() != ErrorKind::BrokenPipe {
                        return Err(e);
                    }
                }
                child.wait_with_output()
            })
            .expect("failed to execute binary");

        HookRun {
            stdout: String::from_utf8(output.stdout).expect("stdout not valid UTF-8"),
            stderr: String::from_utf8(output.stderr).expect("stderr not valid UTF-8"),
            exit_code: output.status.code().unwrap_or(-1),
        }
    }
}

pub fn tool_input_json(tool_name: &str, tool_input: serde_json::Value) -> String {
    serde_json::json!({
        "session_id": "sess-e2e-test",
        "timestamp": "2025-01-15T10:00:00",
        "hook_event_name": "PreToolUse",
        "tool_name": tool_name,
        "tool_input": tool_input
    })
    .to_string()
}

pub fn bash_input_json(command: &str) -> String {
    tool_input_json("Bash", serde_json::json!({"command": command}))
}

pub fn tool_result_json(
    tool_name: &str,
    tool_input: serde_json::Value,
    tool_response: serde_json::Value,
) -> String {
    serde_json::json!({
        "session_id": "sess-e2e-test",
        "timestamp": "2025-01-15T10:00:00",
        "hook_event_name": "PostToolUse",
        "tool_name": tool_name,
        "tool_input": tool_input,
        "tool_response": tool_response
    })
    .to_string()
}

pub fn prompt_json(prompt: &str) -> String {
    serde_json::json!({
        "session_id": "sess-e2e-test",
        "timestamp": "2025-01-15T10:00:00",
        "hook_event_name": "UserPromptSubmit",
        "prompt": prompt
    })
    .to_string()
}
