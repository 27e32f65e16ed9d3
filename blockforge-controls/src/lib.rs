//! Control catalog and registry for Blockforge
//!
//! `blockforge-controls` is a standalone, schema-only crate that owns the
//! catalog of field controls (text, toggle, repeater, ...). It knows nothing
//! about blocks or templates — consumers look controls up by name and seed
//! fresh fields from each control's default settings.
//!
//! # Architecture
//!
//! - **Static catalog**: controls are declared once at startup, read-only after
//! - **Closed kind set**: `ControlKind` enumerates the built-ins so downstream
//!   dispatch is exhaustive at compile time
//! - **Loosely-typed settings**: setting defaults are `serde_json::Value`,
//!   matching the persisted definition documents

pub mod catalog;
pub mod error;
pub mod registry;
pub mod types;

pub use catalog::built_in_controls;
pub use error::{ControlsError, Result};
pub use registry::ControlRegistry;
pub use types::{Control, ControlKind, SelectOption, SettingDescriptor, SettingKind, ValueKind};
