//! Shell runner: executes commands with `std::process::Command`

use std::process::{Command, Stdio};

use crate::domain::ports::{CommandOutput, CommandRunner, CommandSpec, RunnerError};

/// Runs commands for real, capturing stdout and stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }

    /// Whether `program` can be spawned at all.
    ///
    /// Used for pre-flight checks; the exit status is irrelevant.
    pub fn is_available(program: &str) -> bool {
        Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput, RunnerError> {
        tracing::info!("$ {command}");

        let output = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| RunnerError::Spawn {
                program: command.program().to_string(),
                message: e.to_string(),
            })?;

        let result = CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.is_success() {
            tracing::debug!("`{}` exited with {}", command.program(), result.exit_code);
        }
        Ok(result)
    }
}
