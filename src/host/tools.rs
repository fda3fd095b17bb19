use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use super::command::{CommandOutput, run_command};
use super::{ActionParams, HostError, Model, Status};
use crate::config::ConfigSnapshot;

/// How long a single hook tool invocation may take.
const TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// [`Model`] implementation backed by the hook-tool binaries.
///
/// Inside a dispatch environment the orchestrator puts `config-get`,
/// `status-set`, `action-get`, `action-set` and `action-fail` on `PATH`;
/// this host shells out to them and decodes their JSON output.
#[derive(Debug, Default)]
pub struct ToolHost;

impl ToolHost {
    /// Creates a hook-tool backed host.
    pub fn new() -> Self {
        Self
    }

    async fn run_tool(&self, tool: &str, args: &[String]) -> Result<CommandOutput, HostError> {
        debug!(tool, "invoking hook tool");

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(tool.to_string());
        argv.extend_from_slice(args);

        let output = run_command(&argv, TOOL_TIMEOUT)
            .await
            .map_err(|err| HostError::Tool {
                tool: tool.to_string(),
                details: err.to_string(),
            })?;

        if output.success() {
            Ok(output)
        } else {
            let details = if output.stderr.trim().is_empty() {
                format!("exit code {}", output.code)
            } else {
                output.stderr.trim().to_string()
            };
            Err(HostError::Tool {
                tool: tool.to_string(),
                details,
            })
        }
    }
}

fn parse_object(tool: &str, payload: &str) -> Result<Map<String, Value>, HostError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str(trimmed) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(Map::new()),
        Ok(other) => Err(HostError::Decode {
            tool: tool.to_string(),
            details: format!("expected a JSON object, got {other}"),
        }),
        Err(err) => Err(HostError::Decode {
            tool: tool.to_string(),
            details: err.to_string(),
        }),
    }
}

/// Renders a result value the way `action-set` expects it on the command
/// line: strings bare, everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Model for ToolHost {
    async fn config(&self) -> Result<ConfigSnapshot, HostError> {
        let output = self
            .run_tool("config-get", &["--format=json".to_string()])
            .await?;
        parse_object("config-get", &output.stdout)
    }

    async fn set_status(&self, status: Status) -> Result<(), HostError> {
        let args = [status.level().to_string(), status.message().to_string()];
        self.run_tool("status-set", &args).await?;
        Ok(())
    }

    async fn action_params(&self) -> Result<ActionParams, HostError> {
        let output = self
            .run_tool("action-get", &["--format=json".to_string()])
            .await?;
        parse_object("action-get", &output.stdout)
    }

    async fn set_action_results(&self, results: Map<String, Value>) -> Result<(), HostError> {
        if results.is_empty() {
            return Ok(());
        }

        let args: Vec<String> = results
            .iter()
            .map(|(key, value)| format!("{key}={}", render(value)))
            .collect();
        self.run_tool("action-set", &args).await?;
        Ok(())
    }

    async fn fail_action(&self, message: &str) -> Result<(), HostError> {
        self.run_tool("action-fail", &[message.to_string()]).await?;
        Ok(())
    }
}
