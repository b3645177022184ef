//! Process Runners
//!
//! Concrete implementations of the CommandRunner port.

mod dry_run;
mod shell;

pub use dry_run::DryRunRunner;
pub use shell::ShellRunner;
