//! Core block and field types.
//!
//! All types serialize to/from YAML via serde. A block definition owns a
//! tree of named fields; a field belongs to a location group, references a
//! control by name, and may own nested `sub_fields` when it is a repeater.
//! Field values (runtime content) are never part of these types — they are
//! supplied separately at render time.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use blockforge_controls::ValueKind;

/// Loosely-typed, control-specific field settings.
pub type Settings = serde_json::Map<String, Value>;

/// Name-keyed, insertion-ordered field mapping.
pub type FieldMap = IndexMap<String, Field>;

/// A named placement group fields are ordered within.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    /// The main editor area — the implicit default when unset.
    #[default]
    Editor,
    /// The side inspector panel.
    Inspector,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Editor => "editor",
            Location::Inspector => "inspector",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "editor" => Ok(Location::Editor),
            "inspector" => Ok(Location::Inspector),
            _ => Err(()),
        }
    }
}

/// Addresses one field in a block's tree: its name plus the enclosing
/// repeater's name, or no parent for a top-level field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    pub name: String,
    pub parent: Option<String>,
}

impl FieldPath {
    /// Path to a top-level field.
    pub fn top(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    /// Path to a field nested under a repeater.
    pub fn nested(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent.into()),
        }
    }
}

/// One named, ordered unit of a block's data schema, bound to a control.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub name: String,
    pub label: String,
    /// Name of the control this field is bound to.
    pub control: String,
    /// Value shape, denormalized from the control for value coercion.
    #[serde(rename = "type")]
    pub value_kind: ValueKind,
    /// Rank within the field's (location, parent) group.
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub location: Location,
    /// Name of the enclosing repeater, absent for top-level fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Control-specific settings, seeded from the control's defaults.
    #[serde(default, skip_serializing_if = "Settings::is_empty")]
    pub settings: Settings,
    /// Present only while this repeater has at least one child.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_fields: Option<FieldMap>,
}

impl Field {
    /// A single setting value by key.
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// The field's declared default value, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.settings.get("default")
    }

    /// Whether this field currently owns sub-fields.
    pub fn is_repeater(&self) -> bool {
        self.sub_fields.is_some()
    }
}

/// The category a block is filed under in the editor's block picker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Default for Category {
    fn default() -> Self {
        Self {
            slug: "common".into(),
            title: "Common".into(),
            icon: None,
        }
    }
}

/// A block definition — one named, reusable content block and its field tree.
///
/// The `excluded` set records the names of deleted fields. The unique-name
/// allocator treats those names as taken, so a freed slug's numeric suffix
/// is never handed out again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Block {
    pub name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub fields: FieldMap,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub excluded: BTreeSet<String>,
}

impl Block {
    /// Create an empty block definition.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            icon: None,
            category: Category::default(),
            keywords: Vec::new(),
            fields: FieldMap::new(),
            excluded: BTreeSet::new(),
        }
    }
}
