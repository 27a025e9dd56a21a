//! Task source backed by the Taskwarrior CLI.
//!
//! Runs `task rc.confirmation=off rc.verbose=nothing <filter...> export`
//! and parses the JSON array it prints.

use std::path::PathBuf;
use std::time::Duration;

use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use crate::error::{TaskCalError, TaskCalResult};
use crate::store::TaskSource;
use crate::task::Task;

const EXPORT_TIMEOUT: Duration = Duration::from_secs(30);

/// Overrides that keep `task` from prompting or decorating its output.
const QUIET_OVERRIDES: &[&str] = &["rc.confirmation=off", "rc.verbose=nothing", "rc.json.array=on"];

#[derive(Debug, Clone)]
pub struct Taskwarrior {
    command: String,
}

impl Taskwarrior {
    pub fn new(command: impl Into<String>) -> Self {
        Taskwarrior {
            command: command.into(),
        }
    }

    fn binary_path(&self) -> TaskCalResult<PathBuf> {
        let expanded = shellexpand::tilde(&self.command).into_owned();
        which::which(&expanded).map_err(|_| TaskCalError::TaskSourceNotInstalled(expanded))
    }

    /// Full argv after the binary for a given filter.
    pub fn export_args(filter: &str) -> TaskCalResult<Vec<String>> {
        let filter_words = shell_words::split(filter)
            .map_err(|e| TaskCalError::TaskSource(format!("Invalid filter '{filter}': {e}")))?;

        let mut args: Vec<String> = QUIET_OVERRIDES.iter().map(|s| s.to_string()).collect();
        args.extend(filter_words);
        args.push("export".to_string());
        Ok(args)
    }

    async fn run_export(&self, filter: &str) -> TaskCalResult<Vec<Task>> {
        let binary_path = self.binary_path()?;
        let args = Self::export_args(filter)?;
        tracing::debug!(command = %binary_path.display(), ?args, "exporting tasks");

        let output = TokioCommand::new(&binary_path)
            .args(&args)
            .stdin(std::process::Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                TaskCalError::TaskSource(format!("Failed to run {}: {}", binary_path.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TaskCalError::TaskSource(format!(
                "task exited with status {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        parse_export(&String::from_utf8_lossy(&output.stdout))
    }
}

impl TaskSource for Taskwarrior {
    async fn export(&self, filter: &str) -> TaskCalResult<Vec<Task>> {
        timeout(EXPORT_TIMEOUT, self.run_export(filter))
            .await
            .map_err(|_| TaskCalError::TaskSourceTimeout(EXPORT_TIMEOUT.as_secs()))?
    }
}

/// Parse the output of `task export`. An empty output means no tasks.
pub fn parse_export(output: &str) -> TaskCalResult<Vec<Task>> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(trimmed)
        .map_err(|e| TaskCalError::Serialization(format!("Failed to parse task export: {e}")))
}
