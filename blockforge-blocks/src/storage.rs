//! Persisted-definition codec and storage backends.
//!
//! Block definitions persist as one YAML document per block with the
//! top-level keys `name, title, icon, category, keywords, fields, excluded`.
//! Loading validates the document against the control registry and the
//! structural invariants before anything is returned — a document that
//! fails validation is rejected whole as `MalformedDefinition`, never
//! partially applied.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use blockforge_controls::ControlRegistry;

use crate::error::{BlockError, Result};
use crate::types::{Block, FieldMap, Location};

impl Block {
    /// Parse and validate a persisted block definition.
    pub fn from_yaml(yaml: &str, registry: &ControlRegistry) -> Result<Block> {
        let block: Block =
            serde_yaml::from_str(yaml).map_err(|e| BlockError::MalformedDefinition {
                reason: e.to_string(),
            })?;
        block.validate(registry)?;
        Ok(block)
    }

    /// Serialize this definition to its persisted YAML form.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check the structural invariants of the field tree.
    ///
    /// Violations are reported as `MalformedDefinition`: a map key that
    /// disagrees with its field's `name`, a control missing from the
    /// registry, a broken or empty parent linkage, or a (location, parent)
    /// group whose `order` values are not a contiguous 0-based ranking.
    pub fn validate(&self, registry: &ControlRegistry) -> Result<()> {
        validate_scope(&self.fields, None, registry)?;
        for field in self.fields.values() {
            if let Some(children) = &field.sub_fields {
                if children.is_empty() {
                    return Err(BlockError::MalformedDefinition {
                        reason: format!("field '{}' has empty sub_fields", field.name),
                    });
                }
                validate_scope(children, Some(&field.name), registry)?;
            }
        }
        Ok(())
    }
}

fn validate_scope(
    fields: &FieldMap,
    parent: Option<&str>,
    registry: &ControlRegistry,
) -> Result<()> {
    for (key, field) in fields {
        if key != &field.name {
            return Err(BlockError::MalformedDefinition {
                reason: format!("map key '{key}' does not match field name '{}'", field.name),
            });
        }
        if registry.get(&field.control).is_none() {
            return Err(BlockError::MalformedDefinition {
                reason: format!("field '{}' references unknown control '{}'", key, field.control),
            });
        }
        if field.parent.as_deref() != parent {
            return Err(BlockError::MalformedDefinition {
                reason: format!("field '{key}' has inconsistent parent reference"),
            });
        }
        if parent.is_some() && field.sub_fields.is_some() {
            return Err(BlockError::MalformedDefinition {
                reason: format!("nested field '{key}' cannot own sub_fields"),
            });
        }
    }

    for location in [Location::Editor, Location::Inspector] {
        let mut orders: Vec<usize> = fields
            .values()
            .filter(|f| f.location == location)
            .map(|f| f.order)
            .collect();
        orders.sort_unstable();
        if orders.iter().enumerate().any(|(rank, &order)| rank != order) {
            return Err(BlockError::MalformedDefinition {
                reason: format!(
                    "orders in location '{location}' are not a contiguous ranking: {orders:?}"
                ),
            });
        }
    }
    Ok(())
}

/// Trait for storage backends that persist and retrieve block definitions,
/// keyed by block name.
pub trait StorageBackend {
    /// Store a block definition under its name
    fn store(&mut self, block: &Block) -> Result<()>;

    /// Retrieve a block definition by name
    fn get(&self, name: &str) -> Result<Option<Block>>;

    /// List all stored block names
    fn list_names(&self) -> Result<Vec<String>>;

    /// Remove a block definition by name
    fn remove(&mut self, name: &str) -> Result<bool>;

    /// Check if a block definition exists
    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.get(name)?.is_some())
    }

    /// Get the total number of stored block definitions
    fn count(&self) -> Result<usize> {
        Ok(self.list_names()?.len())
    }
}

/// In-memory storage backend for block definitions.
///
/// The default backend for tests and editor sessions; definitions are lost
/// when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blocks: HashMap<String, Block>,
}

impl MemoryStorage {
    /// Create a new memory storage backend
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn store(&mut self, block: &Block) -> Result<()> {
        self.blocks.insert(block.name.clone(), block.clone());
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<Block>> {
        Ok(self.blocks.get(name).cloned())
    }

    fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.blocks.keys().cloned().collect())
    }

    fn remove(&mut self, name: &str) -> Result<bool> {
        Ok(self.blocks.remove(name).is_some())
    }

    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.blocks.contains_key(name))
    }
}

/// File-based storage backend: one `{name}.yaml` per block under a base
/// directory. Documents are validated against the registry on every read.
#[derive(Debug)]
pub struct FileStorage {
    base_path: PathBuf,
    registry: ControlRegistry,
}

impl FileStorage {
    /// Create a file storage backend over the given base directory.
    pub fn new(base_path: impl AsRef<Path>, registry: ControlRegistry) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            registry,
        }
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{name}.yaml"))
    }
}

impl StorageBackend for FileStorage {
    fn store(&mut self, block: &Block) -> Result<()> {
        std::fs::create_dir_all(&self.base_path)?;
        let path = self.file_path(&block.name);
        std::fs::write(&path, block.to_yaml()?)?;
        debug!(block = %block.name, ?path, "stored block definition");
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<Block>> {
        let path = self.file_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        match Block::from_yaml(&content, &self.registry) {
            Ok(block) => Ok(Some(block)),
            Err(e) => {
                warn!(?path, %e, "rejecting invalid block definition");
                Err(e)
            }
        }
    }

    fn list_names(&self) -> Result<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn remove(&mut self, name: &str) -> Result<bool> {
        let path = self.file_path(name);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)?;
        Ok(true)
    }

    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.file_path(name).exists())
    }
}
