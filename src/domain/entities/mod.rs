//! Domain Entities
//!
//! Core data structures of the upload pipeline. Entities are pure data;
//! persistence lives behind the ports.

mod asset;
mod ledger;

pub use asset::{Asset, ManifestEntry};
pub use ledger::{
    parse_ledger_key, partition_key, Ledger, LedgerKey, ProgressRecord, RecordDetail,
};
