use std::time::Duration;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::events::{ActionName, Dispatch, Event, Handler, HookContext, HookError};
use crate::host::run_command;

/// Time limit for the history capture run by the debug action.
const HISTORY_TIMEOUT: Duration = Duration::from_secs(600);

/// Parameters of the `test-fortune` action, as declared in `actions.yaml`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct FortuneParams {
    /// Echoed back when the action succeeds.
    #[serde(default)]
    pub some: Option<String>,

    /// Echoed back when the action fails.
    #[serde(default)]
    pub fail: Option<String>,
}

fn field_display(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

/// Handles the `debug` action: captures shell history for inspection.
#[derive(Debug)]
pub struct DebugAction {
    command: Vec<String>,
}

impl Default for DebugAction {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugAction {
    /// Creates the handler with the stock `history` capture command.
    pub fn new() -> Self {
        Self {
            command: vec!["history".to_string()],
        }
    }

    /// Overrides the history capture command.
    #[must_use]
    pub fn with_history_command(mut self, command: Vec<String>) -> Self {
        self.command = command;
        self
    }
}

#[async_trait]
impl Handler for DebugAction {
    fn event(&self) -> Event {
        Event::Action(ActionName::Debug)
    }

    async fn handle(&self, ctx: &mut HookContext<'_>) -> Result<Dispatch, HookError> {
        let output = run_command(&self.command, HISTORY_TIMEOUT).await?;

        if !output.success() {
            let msg = format!(
                "Failed to run \"{}\": {} ({})",
                self.command.join(" "),
                output.stderr,
                output.code
            );
            ctx.model.fail_action(&msg).await?;
            error!("{msg}");
            // The action failure channel does not short-circuit the
            // dispatch failure; both get reported.
            return Err(HookError::ActionFailed(msg));
        }

        let mut results = Map::new();
        results.insert("buginfo".to_string(), Value::String(output.stdout));
        ctx.model.set_action_results(results).await?;
        debug!("buginfo collected successfully");

        Ok(Dispatch::Completed)
    }
}

/// Handles the `test-fortune` action: demonstrates parameter handling and
/// failure reporting.
#[derive(Debug, Default)]
pub struct TestFortuneAction;

impl TestFortuneAction {
    /// Creates the handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for TestFortuneAction {
    fn event(&self) -> Event {
        Event::Action(ActionName::TestFortune)
    }

    async fn handle(&self, ctx: &mut HookContext<'_>) -> Result<Dispatch, HookError> {
        let params = ctx.model.action_params().await?;
        let params: FortuneParams = serde_json::from_value(Value::Object(params))
            .map_err(|err| HookError::BadParams(err.to_string()))?;

        let succeeded = false;
        // TODO: nothing ever sets succeeded; the success branch below is
        // dead until something does.
        if succeeded {
            let msg = format!("the value of SOME field: \n{}", field_display(&params.some));
            let mut results = Map::new();
            results.insert("result".to_string(), Value::String(msg));
            ctx.model.set_action_results(results).await?;
        } else {
            let msg = format!("the value of FAIL field: \n{}", field_display(&params.fail));
            ctx.model.fail_action(&msg).await?;
            error!("{msg}");
        }

        Ok(Dispatch::Completed)
    }
}
