//! Presentation Layer
//!
//! Output formatting (text/JSON) for the CLI.

pub mod output;

pub use output::{JsonRenderer, OutputFormat, TextRenderer};
