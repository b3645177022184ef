//! CommandRunner port - the only place external processes are invoked
//!
//! The runner executes and reports; it never interprets what a command means.
//! Classifying the outcome is the upload use case's job.

use std::fmt;
use std::path::Path;

/// An external command and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandSpec {
    /// Shell-style rendering used for logs and dry runs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `-1` when the process was killed by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Text recorded in the ledger when the command failed
    pub fn failure_detail(&self) -> String {
        let stderr = self.stderr.trim();
        let stdout = self.stdout.trim();
        let output = if !stderr.is_empty() { stderr } else { stdout };
        if output.is_empty() {
            format!("exit code {}", self.exit_code)
        } else {
            format!("exit code {}: {}", self.exit_code, output)
        }
    }
}

/// Failure to run a command at all (as opposed to a non-zero exit)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunnerError {
    #[error("failed to start `{program}`: {message}")]
    Spawn { program: String, message: String },
}

/// Executes external commands
pub trait CommandRunner {
    /// Run a command to completion, capturing its output
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput, RunnerError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput, RunnerError> {
        (**self).run(command)
    }
}

/// Quote an argument for display when it contains shell-special characters
fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_alphanumeric() || "-_./:=@%+,".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_command_line() {
        let cmd = CommandSpec::new("docker").arg("load").arg("-i").arg("/data/app_1.0.tar");
        assert_eq!(cmd.to_string(), "docker load -i /data/app_1.0.tar");
    }

    #[test]
    fn display_quotes_special_arguments() {
        let cmd = CommandSpec::new("docker").arg("load").arg("-i").arg("/data/it's here.tar");
        assert_eq!(cmd.to_string(), "docker load -i '/data/it'\\''s here.tar'");
    }

    #[test]
    fn failure_detail_prefers_stderr() {
        let output = CommandOutput {
            exit_code: 1,
            stdout: "partial".to_string(),
            stderr: "denied: access forbidden\n".to_string(),
        };
        assert_eq!(output.failure_detail(), "exit code 1: denied: access forbidden");
    }

    #[test]
    fn failure_detail_falls_back_to_stdout_then_code() {
        let output = CommandOutput {
            exit_code: 2,
            stdout: "usage".to_string(),
            stderr: String::new(),
        };
        assert_eq!(output.failure_detail(), "exit code 2: usage");

        let output = CommandOutput {
            exit_code: 125,
            ..CommandOutput::default()
        };
        assert_eq!(output.failure_detail(), "exit code 125");
    }
}
