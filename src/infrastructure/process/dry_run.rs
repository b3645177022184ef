//! Dry-run runner: prints commands instead of executing them

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{CommandOutput, CommandRunner, CommandSpec, RunnerError};

/// Prints `$ <command line>` for every command and reports success
pub struct DryRunRunner {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl DryRunRunner {
    /// Print planned commands to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Print planned commands to stderr (keeps stdout clean for `--json`)
    pub fn stderr() -> Self {
        Self::with_writer(io::stderr())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput, RunnerError> {
        tracing::debug!("dry run: {command}");
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "$ {command}");
            let _ = writer.flush();
        }
        Ok(CommandOutput::success())
    }
}
