use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

/// Errors from running a host command.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The argument vector was empty.
    #[error("cannot run an empty command line")]
    EmptyCommandLine,

    /// The process could not be started.
    #[error("failed to spawn '{command}': {details}")]
    Spawn {
        /// The command line that failed to start
        command: String,
        /// Spawn error details
        details: String,
    },

    /// The process did not finish in time.
    #[error("'{command}' did not finish within {timeout_secs}s")]
    Timeout {
        /// The command line that timed out
        command: String,
        /// The limit that was exceeded, in seconds
        timeout_secs: u64,
    },

    /// The process wrote bytes that are not valid UTF-8.
    #[error("'{command}' produced non-UTF-8 output on {stream}")]
    NonUtf8Output {
        /// The command line that produced the output
        command: String,
        /// Which stream carried the bad bytes
        stream: &'static str,
    },
}

/// Captured output of a finished host command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Standard output, decoded as UTF-8.
    pub stdout: String,
    /// Standard error, decoded as UTF-8.
    pub stderr: String,
    /// Exit code; `-1` when the process was killed by a signal.
    pub code: i32,
}

impl CommandOutput {
    /// Whether the command exited with status zero.
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Runs `argv` to completion and captures its output.
///
/// A non-zero exit is not an error here; callers inspect
/// [`CommandOutput::code`] and decide what failure means for them. Only
/// spawn failures, timeouts and undecodable output come back as `Err`.
///
/// # Errors
/// Returns [`CommandError`] when the process cannot be started, exceeds
/// `limit`, or writes output that is not UTF-8.
pub async fn run_command(argv: &[String], limit: Duration) -> Result<CommandOutput, CommandError> {
    let (program, args) = argv.split_first().ok_or(CommandError::EmptyCommandLine)?;
    let command_line = argv.join(" ");

    let result = tokio::time::timeout(limit, Command::new(program).args(args).output()).await;

    let output = match result {
        Ok(Ok(output)) => output,
        Ok(Err(err)) => {
            return Err(CommandError::Spawn {
                command: command_line,
                details: err.to_string(),
            });
        }
        Err(_) => {
            return Err(CommandError::Timeout {
                command: command_line,
                timeout_secs: limit.as_secs(),
            });
        }
    };

    let stdout = String::from_utf8(output.stdout).map_err(|_| CommandError::NonUtf8Output {
        command: command_line.clone(),
        stream: "stdout",
    })?;
    let stderr = String::from_utf8(output.stderr).map_err(|_| CommandError::NonUtf8Output {
        command: command_line.clone(),
        stream: "stderr",
    })?;

    Ok(CommandOutput {
        stdout,
        stderr,
        code: output.status.code().unwrap_or(-1),
    })
}
