//! Domain Layer
//!
//! Pure upload-pipeline logic without process or network access.
//!
//! ## Structure
//!
//! - `entities/` - Assets, manifest entries and the progress ledger
//! - `value_objects/` - Immutable value types (AssetId, Partition, Status, Phase)
//! - `services/` - Manifest parsing, filename naming rules, validation, registry refs
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No side effects** - External commands and file writes go through ports
//! 2. **Pure Functions** - Naming and parsing are stateless and testable
//! 3. **Ports & Adapters** - Infrastructure provides the concrete implementations

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
