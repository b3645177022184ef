//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod progress;

pub use progress::{JsonProgressRepository, LedgerLock, DEFAULT_PROGRESS_FILE, LEDGER_VERSION};
