//! Built-in control catalog.
//!
//! One constructor per control, each declaring its settings schema and the
//! defaults a fresh field of that control is seeded with. Every control
//! carries the shared placement settings (`location`, `width`, `help`)
//! ahead of its own.

use crate::types::{Control, ControlKind, SettingDescriptor, SettingKind};
use serde_json::{json, Value};

/// Settings every control exposes, regardless of kind.
fn placement_settings() -> Vec<SettingDescriptor> {
    vec![
        SettingDescriptor::new(
            "location",
            "Field Location",
            SettingKind::Select,
            json!("editor"),
        ),
        SettingDescriptor::new("width", "Field Width", SettingKind::Select, json!("100")),
        SettingDescriptor::new("help", "Help Text", SettingKind::Text, json!("")),
    ]
}

fn with_placement(extra: Vec<SettingDescriptor>) -> Vec<SettingDescriptor> {
    let mut settings = placement_settings();
    settings.extend(extra);
    settings
}

/// Build the full built-in catalog, in registration order.
pub fn built_in_controls() -> Vec<Control> {
    ControlKind::ALL.iter().map(|k| control_for(*k)).collect()
}

fn control_for(kind: ControlKind) -> Control {
    let (label, extra) = match kind {
        ControlKind::Text => (
            "Text",
            vec![
                SettingDescriptor::new("default", "Default Value", SettingKind::Text, json!("")),
                SettingDescriptor::new("placeholder", "Placeholder Text", SettingKind::Text, json!("")),
                SettingDescriptor::new("maxlength", "Character Limit", SettingKind::Number, Value::Null),
            ],
        ),
        ControlKind::Textarea => (
            "Textarea",
            vec![
                SettingDescriptor::new("default", "Default Value", SettingKind::Textarea, json!("")),
                SettingDescriptor::new("placeholder", "Placeholder Text", SettingKind::Text, json!("")),
                SettingDescriptor::new("maxlength", "Character Limit", SettingKind::Number, Value::Null),
                SettingDescriptor::new("number_rows", "Number of Rows", SettingKind::Number, json!(4)),
                SettingDescriptor::new("new_lines", "New Lines", SettingKind::Select, json!("autop")),
            ],
        ),
        ControlKind::Url => (
            "URL",
            vec![
                SettingDescriptor::new("default", "Default Value", SettingKind::Text, json!("")),
                SettingDescriptor::new("placeholder", "Placeholder Text", SettingKind::Text, json!("")),
            ],
        ),
        ControlKind::Email => (
            "Email",
            vec![
                SettingDescriptor::new("default", "Default Value", SettingKind::Text, json!("")),
                SettingDescriptor::new("placeholder", "Placeholder Text", SettingKind::Text, json!("")),
            ],
        ),
        ControlKind::Number => (
            "Number",
            vec![
                SettingDescriptor::new("default", "Default Value", SettingKind::Number, Value::Null),
                SettingDescriptor::new("placeholder", "Placeholder Text", SettingKind::Text, json!("")),
                SettingDescriptor::new("min", "Minimum Value", SettingKind::Number, Value::Null),
                SettingDescriptor::new("max", "Maximum Value", SettingKind::Number, Value::Null),
                SettingDescriptor::new("step", "Step Size", SettingKind::Number, json!(1)),
            ],
        ),
        ControlKind::Range => (
            "Range",
            vec![
                SettingDescriptor::new("default", "Default Value", SettingKind::Number, Value::Null),
                SettingDescriptor::new("min", "Minimum Value", SettingKind::Number, json!(0)),
                SettingDescriptor::new("max", "Maximum Value", SettingKind::Number, json!(100)),
                SettingDescriptor::new("step", "Step Size", SettingKind::Number, json!(1)),
            ],
        ),
        ControlKind::Color => (
            "Color",
            vec![SettingDescriptor::new(
                "default",
                "Default Value",
                SettingKind::Text,
                json!(""),
            )],
        ),
        ControlKind::Select => (
            "Select",
            vec![
                SettingDescriptor::new("options", "Choices", SettingKind::Textarea, json!([])),
                SettingDescriptor::new("default", "Default Value", SettingKind::Text, json!("")),
            ],
        ),
        ControlKind::Multiselect => (
            "Multi-Select",
            vec![
                SettingDescriptor::new("options", "Choices", SettingKind::Textarea, json!([])),
                SettingDescriptor::new("default", "Default Value", SettingKind::Textarea, json!([])),
            ],
        ),
        ControlKind::Radio => (
            "Radio",
            vec![
                SettingDescriptor::new("options", "Choices", SettingKind::Textarea, json!([])),
                SettingDescriptor::new("default", "Default Value", SettingKind::Text, json!("")),
            ],
        ),
        ControlKind::Checkbox => (
            "Checkbox",
            vec![SettingDescriptor::new(
                "default",
                "Checked by default",
                SettingKind::Checkbox,
                json!("0"),
            )],
        ),
        ControlKind::Toggle => (
            "Toggle",
            vec![SettingDescriptor::new(
                "default",
                "On by default",
                SettingKind::Checkbox,
                json!("0"),
            )],
        ),
        ControlKind::Repeater => (
            "Repeater",
            vec![
                SettingDescriptor::new("min", "Minimum Rows", SettingKind::Number, Value::Null),
                SettingDescriptor::new("max", "Maximum Rows", SettingKind::Number, Value::Null),
            ],
        ),
    };

    Control {
        name: kind.as_str().to_string(),
        label: label.to_string(),
        value_kind: kind.value_kind(),
        settings: with_placement(extra),
    }
}
