//! Provider subprocess protocol.
//!
//! This module handles communication with external provider binaries
//! (e.g., `taskcal-provider-google`) using JSON over stdin/stdout.
//!
//! Providers manage their own credentials and sessions. Core just passes
//! provider-specific parameters from the remote config.

use crate::error::{TaskCalError, TaskCalResult};
use crate::remote::protocol::{Command, ProviderCommand, Request, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Provider(String);

impl Provider {
    pub fn from_name(name: &str) -> Self {
        Provider(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn binary_name(&self) -> String {
        format!("taskcal-provider-{}", self.0)
    }

    fn binary_path(&self) -> TaskCalResult<std::path::PathBuf> {
        let binary_name = self.binary_name();
        which::which(&binary_name).map_err(|_| TaskCalError::ProviderNotInstalled(self.0.clone()))
    }

    /// Call a typed provider command and return the result.
    ///
    /// The response type is inferred from the command's associated type.
    pub async fn call<C: ProviderCommand>(&self, cmd: C) -> TaskCalResult<C::Response> {
        timeout(PROVIDER_TIMEOUT, self.call_raw(C::command(), cmd))
            .await
            .map_err(|_| TaskCalError::ProviderTimeout(PROVIDER_TIMEOUT.as_secs()))?
    }

    /// Low-level call that sends a command with params and deserializes the response.
    async fn call_raw<P: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> TaskCalResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| TaskCalError::Serialization(e.to_string()))?;
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| TaskCalError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;
        tracing::debug!(provider = %self.0, ?command, "calling provider");

        let mut child = TokioCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                TaskCalError::Provider(format!("Failed to spawn {}: {}", binary_path.display(), e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| TaskCalError::Provider("Provider stdin unavailable".into()))?;
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(TaskCalError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(TaskCalError::Provider(
                "Provider returned no response".into(),
            ));
        }

        let response: Response<R> = serde_json::from_str(&response_str)
            .map_err(|e| TaskCalError::Provider(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(TaskCalError::Provider(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_names_provider_once() {
        let provider = Provider::from_name("nosuchcal");
        let err = provider.binary_path().unwrap_err();

        assert!(matches!(err, TaskCalError::ProviderNotInstalled(ref name) if name == "nosuchcal"));
        assert_eq!(
            err.to_string(),
            "Provider 'taskcal-provider-nosuchcal' not found in PATH. Install it with:\n  cargo install taskcal-provider-nosuchcal"
        );
    }
}
