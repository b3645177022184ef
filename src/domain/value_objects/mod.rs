//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod asset_id;
mod partition;
mod phase;
mod status;

pub use asset_id::{AssetId, InvalidAssetId};
pub use partition::Partition;
pub use phase::{Phase, Step};
pub use status::Status;
