//! Block definition model and field mutation engine for Blockforge
//!
//! `blockforge-blocks` owns the block definition data model: a tree of named
//! fields, each bound to a control, grouped by location, optionally nested
//! under repeater fields. All edits go through the mutation engine — pure
//! functions from a definition to a new definition — and definitions persist
//! wholesale as one YAML document per block.
//!
//! # Architecture
//!
//! - **Schema-only**: owns field definitions, never runtime field values
//! - **Immutable updates**: every mutation returns a new `Block`; callers
//!   persist the result as one atomic document
//! - **Name-keyed tree**: sibling scopes (top level, each repeater) are
//!   independent namespaces; parent linkage is a back-reference by name
//!
//! Concurrent edits are not coordinated: persistence is last-write-wins at
//! whole-document granularity, which matches the single-editor-at-a-time
//! usage model.

pub mod error;
pub mod mutate;
pub mod storage;
pub mod tree;
pub mod types;

pub use error::{BlockError, Result};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
pub use tree::{fields_as_map, fields_as_vec};
pub use types::{Block, Category, Field, FieldMap, FieldPath, Location, Settings};
