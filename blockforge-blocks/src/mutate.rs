//! Field mutation engine.
//!
//! Every operation is a pure function from a block definition and its
//! arguments to a new definition — callers persist the result as a whole,
//! so no partial update is ever visible. Sibling `order` values stay a
//! contiguous 0-based ranking per (location, parent) group after every
//! operation.
//!
//! Deleted field names are tombstoned in the block's `excluded` set; the
//! unique-name allocator treats tombstones as taken, so a freed slug's
//! numeric suffix is never handed out again.

use std::collections::BTreeSet;

use tracing::debug;

use blockforge_controls::ControlRegistry;

use crate::error::{BlockError, Result};
use crate::types::{Block, Field, FieldMap, FieldPath, Location, Settings};

/// Base slug for fields created by `add_field`.
const NEW_FIELD_BASE: &str = "new-field";
/// Label seeded onto fields created by `add_field`.
const NEW_FIELD_LABEL: &str = "New Field";
/// Control a fresh field starts as.
const DEFAULT_CONTROL: &str = "text";
/// The control whose fields own `sub_fields`.
const REPEATER_CONTROL: &str = "repeater";

impl Block {
    /// Add a new field at `location`, optionally nested under a repeater.
    ///
    /// The field is named with the next unused `new-field` suffix, seeded
    /// from the default control's settings, and appended last in its
    /// (location, parent) group. Returns the new definition and the
    /// generated name.
    pub fn add_field(
        &self,
        registry: &ControlRegistry,
        location: Location,
        parent: Option<&str>,
    ) -> Result<(Block, String)> {
        let mut block = self.clone();

        let siblings_view: FieldMap = match parent {
            None => block.fields.clone(),
            Some(p) => block
                .fields
                .get(p)
                .ok_or_else(|| BlockError::FieldNotFound { name: p.into() })?
                .sub_fields
                .clone()
                .unwrap_or_default(),
        };

        let name = next_unique_name(NEW_FIELD_BASE, &siblings_view, &block.excluded);
        let control = registry.require(DEFAULT_CONTROL)?;

        let mut settings = control.default_settings();
        // Placement is tracked as an attribute, not a setting.
        settings.remove("location");

        let order = siblings_view
            .values()
            .filter(|f| f.location == location)
            .count();

        let field = Field {
            name: name.clone(),
            label: NEW_FIELD_LABEL.into(),
            control: control.name.clone(),
            value_kind: control.value_kind,
            order,
            location,
            parent: parent.map(String::from),
            settings,
            sub_fields: None,
        };

        match parent {
            None => {
                block.fields.insert(name.clone(), field);
            }
            Some(p) => {
                let parent_field = block
                    .fields
                    .get_mut(p)
                    .ok_or_else(|| BlockError::FieldNotFound { name: p.into() })?;
                parent_field
                    .sub_fields
                    .get_or_insert_with(FieldMap::new)
                    .insert(name.clone(), field);
            }
        }

        debug!(block = %block.name, field = %name, ?location, "added field");
        Ok((block, name))
    }

    /// Bind a field to a different control.
    ///
    /// Prior settings are discarded and reseeded from the new control's
    /// defaults; name, label, location, order, and parent linkage are
    /// preserved. Leaving the repeater control drops any sub-fields.
    pub fn change_control(
        &self,
        path: &FieldPath,
        control_name: &str,
        registry: &ControlRegistry,
    ) -> Result<Block> {
        let control = registry.require(control_name)?.clone();

        let mut block = self.clone();
        let field = field_mut(&mut block, path)?;
        field.control = control.name.clone();
        field.value_kind = control.value_kind;
        let mut settings = control.default_settings();
        settings.remove("location");
        field.settings = settings;
        if control.name != REPEATER_CONTROL {
            field.sub_fields = None;
        }

        debug!(block = %block.name, field = %path.name, control = %control_name, "changed control");
        Ok(block)
    }

    /// Merge new settings over a field's existing settings.
    ///
    /// Two keys are special: `location` relocates the field to another
    /// location group (both groups re-ranked contiguously), and `name`
    /// renames it (map key, own name, and every child's parent
    /// back-reference; colliding with an existing sibling is rejected).
    /// All other keys overwrite shallowly.
    pub fn change_field_settings(&self, path: &FieldPath, new_settings: Settings) -> Result<Block> {
        let mut block = self.clone();
        let mut new_settings = new_settings;

        if block.field(path).is_none() {
            return Err(BlockError::FieldNotFound {
                name: path.name.clone(),
            });
        }

        if let Some(value) = new_settings.remove("location") {
            let target = value
                .as_str()
                .and_then(|s| s.parse::<Location>().ok())
                .ok_or_else(|| BlockError::InvalidLocation {
                    location: value.as_str().unwrap_or_default().to_string(),
                })?;
            relocate(&mut block, path, target)?;
        }

        let mut path = path.clone();
        if let Some(value) = new_settings.remove("name") {
            let new_name = value
                .as_str()
                .ok_or_else(|| BlockError::MalformedDefinition {
                    reason: format!("field name must be a string, got {value}"),
                })?
                .to_string();
            rename(&mut block, &path, &new_name)?;
            path.name = new_name;
        }

        if !new_settings.is_empty() {
            let field = field_mut(&mut block, &path)?;
            for (key, value) in new_settings {
                field.settings.insert(key, value);
            }
        }

        debug!(block = %block.name, field = %path.name, "changed field settings");
        Ok(block)
    }

    /// Remove a field from its sibling scope.
    ///
    /// The remaining (location, parent) group is re-ranked contiguously,
    /// the deleted name is tombstoned in `excluded`, and a repeater whose
    /// last child was removed loses its `sub_fields` entirely.
    ///
    /// `excluded` is one set for the whole block while names are only
    /// unique per sibling scope, so a tombstone retires its suffix in
    /// every scope: deleting a nested `new-field` makes the next
    /// top-level add start at `new-field-2`.
    pub fn delete_field(&self, path: &FieldPath) -> Result<Block> {
        let mut block = self.clone();
        let parent = path.parent.as_deref();

        let removed = siblings_mut(&mut block, parent)?
            .shift_remove(&path.name)
            .ok_or_else(|| BlockError::FieldNotFound {
                name: path.name.clone(),
            })?;

        if let Ok(siblings) = siblings_mut(&mut block, parent) {
            rerank(siblings, removed.location);
        }

        if let Some(p) = parent {
            if let Some(parent_field) = block.fields.get_mut(p) {
                if parent_field
                    .sub_fields
                    .as_ref()
                    .is_some_and(|m| m.is_empty())
                {
                    parent_field.sub_fields = None;
                }
            }
        }

        block.excluded.insert(path.name.clone());
        debug!(block = %block.name, field = %path.name, "deleted field");
        Ok(block)
    }

    /// Copy a field, appending the copy last in its (location, parent)
    /// group under the next unused `{name}-{n}` suffix (starting at 2,
    /// never reusing a freed suffix). Sub-fields are deep-copied with
    /// their parent back-references repointed at the copy.
    pub fn duplicate_field(&self, path: &FieldPath) -> Result<(Block, String)> {
        let mut block = self.clone();
        let parent = path.parent.as_deref();

        let source = block
            .field(path)
            .cloned()
            .ok_or_else(|| BlockError::FieldNotFound {
                name: path.name.clone(),
            })?;
        let siblings_view = block.siblings(parent).cloned().unwrap_or_default();

        let new_name = next_unique_name(&source.name, &siblings_view, &block.excluded);
        let order = siblings_view
            .values()
            .filter(|f| f.location == source.location)
            .count();

        let mut copy = source;
        copy.name = new_name.clone();
        copy.order = order;
        if let Some(children) = copy.sub_fields.as_mut() {
            for child in children.values_mut() {
                child.parent = Some(new_name.clone());
            }
        }

        siblings_mut(&mut block, parent)?.insert(new_name.clone(), copy);
        debug!(block = %block.name, source = %path.name, copy = %new_name, "duplicated field");
        Ok((block, new_name))
    }

    /// Swap the fields at two positions of a location's ordered sequence.
    ///
    /// A true positional swap, not an insert: only the pair's `order`
    /// values change, and fields in other locations are untouched.
    pub fn reorder_fields(
        &self,
        from: usize,
        to: usize,
        location: Location,
        parent: Option<&str>,
    ) -> Result<Block> {
        let mut block = self.clone();

        let ordered: Vec<(String, usize)> = block
            .fields_for_location(location, parent)
            .iter()
            .map(|f| (f.name.clone(), f.order))
            .collect();

        let (from_entry, to_entry) = match (ordered.get(from), ordered.get(to)) {
            (Some(a), Some(b)) => (a.clone(), b.clone()),
            _ => {
                return Err(BlockError::FieldNotFound {
                    name: format!("field at position {}", from.max(to)),
                })
            }
        };
        if from == to {
            return Ok(block);
        }

        let siblings = siblings_mut(&mut block, parent)?;
        if let Some(field) = siblings.get_mut(&from_entry.0) {
            field.order = to_entry.1;
        }
        if let Some(field) = siblings.get_mut(&to_entry.0) {
            field.order = from_entry.1;
        }

        debug!(block = %block.name, from, to, ?location, "reordered fields");
        Ok(block)
    }
}

/// Next unused name for `base` among live siblings and tombstoned names:
/// the bare base when no suffix was ever used, otherwise one past the
/// highest suffix seen (the bare base counts as suffix 1).
fn next_unique_name(base: &str, siblings: &FieldMap, tombstones: &BTreeSet<String>) -> String {
    let max = siblings
        .keys()
        .chain(tombstones.iter())
        .filter_map(|name| suffix_rank(base, name))
        .max()
        .unwrap_or(0);
    match max {
        0 => base.to_string(),
        n => format!("{base}-{}", n + 1),
    }
}

/// The numeric suffix `candidate` occupies for `base`: the bare base is 1,
/// `{base}-{n}` is n, anything else is not a suffix of this base.
fn suffix_rank(base: &str, candidate: &str) -> Option<usize> {
    if candidate == base {
        return Some(1);
    }
    candidate
        .strip_prefix(base)?
        .strip_prefix('-')?
        .parse()
        .ok()
}

fn field_mut<'a>(block: &'a mut Block, path: &FieldPath) -> Result<&'a mut Field> {
    match path.parent.as_deref() {
        None => block.fields.get_mut(&path.name),
        Some(p) => block
            .fields
            .get_mut(p)
            .and_then(|f| f.sub_fields.as_mut())
            .and_then(|m| m.get_mut(&path.name)),
    }
    .ok_or_else(|| BlockError::FieldNotFound {
        name: path.name.clone(),
    })
}

fn siblings_mut<'a>(block: &'a mut Block, parent: Option<&str>) -> Result<&'a mut FieldMap> {
    match parent {
        None => Ok(&mut block.fields),
        Some(p) => block
            .fields
            .get_mut(p)
            .and_then(|f| f.sub_fields.as_mut())
            .ok_or_else(|| BlockError::FieldNotFound { name: p.into() }),
    }
}

/// Reassign a location group's `order` values to a contiguous 0-based
/// ranking, preserving the current relative order.
fn rerank(siblings: &mut FieldMap, location: Location) {
    let mut group: Vec<(usize, String)> = siblings
        .values()
        .filter(|f| f.location == location)
        .map(|f| (f.order, f.name.clone()))
        .collect();
    group.sort();
    for (rank, (_, name)) in group.into_iter().enumerate() {
        if let Some(field) = siblings.get_mut(&name) {
            field.order = rank;
        }
    }
}

/// Rename a field in place: the map key (keeping its insertion position),
/// the field's own `name`, and every child's `parent` back-reference.
/// Renaming onto an existing sibling is a `DuplicateName` error.
fn rename(block: &mut Block, path: &FieldPath, new_name: &str) -> Result<()> {
    if new_name == path.name {
        return Ok(());
    }
    let siblings = siblings_mut(block, path.parent.as_deref())?;
    if !siblings.contains_key(&path.name) {
        return Err(BlockError::FieldNotFound {
            name: path.name.clone(),
        });
    }
    if siblings.contains_key(new_name) {
        return Err(BlockError::DuplicateName {
            name: new_name.to_string(),
        });
    }

    let mut renamed = FieldMap::with_capacity(siblings.len());
    for (key, mut field) in std::mem::take(siblings) {
        if key == path.name {
            field.name = new_name.to_string();
            if let Some(children) = field.sub_fields.as_mut() {
                for child in children.values_mut() {
                    child.parent = Some(new_name.to_string());
                }
            }
            renamed.insert(new_name.to_string(), field);
        } else {
            renamed.insert(key, field);
        }
    }
    *siblings = renamed;
    Ok(())
}

/// Move a field to another location group within the same parent scope:
/// removed from its old group (re-ranked contiguously) and appended last
/// to the target group (re-ranked contiguously).
fn relocate(block: &mut Block, path: &FieldPath, target: Location) -> Result<()> {
    let parent = path.parent.as_deref();
    let current = block
        .field(path)
        .ok_or_else(|| BlockError::FieldNotFound {
            name: path.name.clone(),
        })?
        .location;
    if current == target {
        return Ok(());
    }

    let target_len = block
        .siblings(parent)
        .map(|s| s.values().filter(|f| f.location == target).count())
        .unwrap_or(0);

    {
        let field = field_mut(block, path)?;
        field.location = target;
        field.order = target_len;
    }

    let siblings = siblings_mut(block, parent)?;
    rerank(siblings, current);
    rerank(siblings, target);
    Ok(())
}
