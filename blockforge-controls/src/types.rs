//! Core control-catalog types.
//!
//! All types serialize to/from YAML and JSON via serde. A control is a
//! reusable field-type template: it declares which settings a field of that
//! control carries and what each setting defaults to. The catalog is built
//! once at startup and read-only afterwards.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The shape of the value a control produces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    String,
    Array,
    Number,
    Boolean,
}

/// A single option in a select, multiselect, or radio control.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectOption {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The human-facing text for this option: the label when set, else the value.
    pub fn display(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

/// The editor widget used to edit a setting itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SettingKind {
    Text,
    Textarea,
    Number,
    Checkbox,
    Select,
}

/// Describes one setting a control exposes: its key, label, widget, and
/// the value a fresh field is seeded with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingDescriptor {
    pub name: String,
    pub label: String,
    pub kind: SettingKind,
    pub default: Value,
}

impl SettingDescriptor {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        kind: SettingKind,
        default: Value,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            default,
        }
    }
}

/// A control definition — the complete schema for one field type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Control {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub value_kind: ValueKind,
    pub settings: Vec<SettingDescriptor>,
}

impl Control {
    /// The settings mapping a freshly created field of this control starts from.
    pub fn default_settings(&self) -> serde_json::Map<String, Value> {
        self.settings
            .iter()
            .map(|s| (s.name.clone(), s.default.clone()))
            .collect()
    }

    /// Look up a single setting descriptor by key.
    pub fn setting(&self, name: &str) -> Option<&SettingDescriptor> {
        self.settings.iter().find(|s| s.name == name)
    }
}

/// The closed set of built-in controls.
///
/// Value resolution dispatches exhaustively on this enum; a control string
/// that doesn't parse resolves to empty representations rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Text,
    Textarea,
    Url,
    Email,
    Number,
    Range,
    Color,
    Select,
    Multiselect,
    Radio,
    Checkbox,
    Toggle,
    Repeater,
}

impl ControlKind {
    /// All built-in kinds, in catalog order.
    pub const ALL: [ControlKind; 13] = [
        ControlKind::Text,
        ControlKind::Textarea,
        ControlKind::Url,
        ControlKind::Email,
        ControlKind::Number,
        ControlKind::Range,
        ControlKind::Color,
        ControlKind::Select,
        ControlKind::Multiselect,
        ControlKind::Radio,
        ControlKind::Checkbox,
        ControlKind::Toggle,
        ControlKind::Repeater,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlKind::Text => "text",
            ControlKind::Textarea => "textarea",
            ControlKind::Url => "url",
            ControlKind::Email => "email",
            ControlKind::Number => "number",
            ControlKind::Range => "range",
            ControlKind::Color => "color",
            ControlKind::Select => "select",
            ControlKind::Multiselect => "multiselect",
            ControlKind::Radio => "radio",
            ControlKind::Checkbox => "checkbox",
            ControlKind::Toggle => "toggle",
            ControlKind::Repeater => "repeater",
        }
    }

    /// The value shape fields of this kind produce.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            ControlKind::Text
            | ControlKind::Textarea
            | ControlKind::Url
            | ControlKind::Email
            | ControlKind::Color
            | ControlKind::Select
            | ControlKind::Radio => ValueKind::String,
            ControlKind::Number | ControlKind::Range => ValueKind::Number,
            ControlKind::Checkbox | ControlKind::Toggle => ValueKind::Boolean,
            ControlKind::Multiselect | ControlKind::Repeater => ValueKind::Array,
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ControlKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or(())
    }
}
