//! Command handlers for the `stevedore` binary
//!
//! Each handler wires infrastructure into the application layer and
//! renders the result. Handlers return `Ok(false)` when the command ran
//! but the outcome should exit non-zero.

mod context;
mod reset;
mod status;
mod upload;
mod validate;

pub use context::RunContext;
pub use reset::cmd_reset;
pub use status::cmd_status;
pub use upload::cmd_upload;
pub use validate::cmd_validate;
