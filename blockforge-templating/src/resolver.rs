//! Per-control value resolution.
//!
//! For every control, two pure functions of the stored raw value (or its
//! absence) and the field's settings: `resolve_display` produces the
//! human-facing text, `resolve_value` the representation template logic
//! works with. A field with no supplied runtime value falls back to its
//! declared `default` setting; an explicit value always wins, and an
//! unknown control resolves to empty representations rather than erroring.

use serde_json::Value;

use blockforge_blocks::Field;
use blockforge_controls::ControlKind;

/// The human-facing text representation of a field's current value.
pub fn resolve_display(field: &Field, raw: Option<&Value>) -> String {
    let Ok(kind) = field.control.parse::<ControlKind>() else {
        return String::new();
    };
    let effective = raw.or_else(|| field.default_value());

    match kind {
        ControlKind::Checkbox | ControlKind::Toggle => {
            if is_truthy(effective) {
                "Yes".to_string()
            } else {
                "No".to_string()
            }
        }
        ControlKind::Select | ControlKind::Radio => {
            let value = scalar_text(effective);
            option_label(field, &value).unwrap_or(value)
        }
        ControlKind::Multiselect => selected_values(effective)
            .iter()
            .map(|v| option_label(field, v).unwrap_or_else(|| v.clone()))
            .collect::<Vec<_>>()
            .join(", "),
        ControlKind::Repeater => String::new(),
        ControlKind::Text
        | ControlKind::Textarea
        | ControlKind::Url
        | ControlKind::Email
        | ControlKind::Number
        | ControlKind::Range
        | ControlKind::Color => scalar_text(effective),
    }
}

/// The value representation used by conditional and template logic:
/// `"1"` or empty for boolean controls, the structured array for
/// multi-valued controls, and the display string for scalar controls.
pub fn resolve_value(field: &Field, raw: Option<&Value>) -> Value {
    let Ok(kind) = field.control.parse::<ControlKind>() else {
        return Value::String(String::new());
    };
    let effective = raw.or_else(|| field.default_value());

    match kind {
        ControlKind::Checkbox | ControlKind::Toggle => {
            if is_truthy(effective) {
                Value::String("1".into())
            } else {
                Value::String(String::new())
            }
        }
        ControlKind::Multiselect => Value::Array(
            selected_values(effective)
                .into_iter()
                .map(Value::String)
                .collect(),
        ),
        ControlKind::Repeater => match effective {
            Some(Value::Array(rows)) => Value::Array(rows.clone()),
            _ => Value::Array(Vec::new()),
        },
        ControlKind::Select | ControlKind::Radio => Value::String(scalar_text(effective)),
        ControlKind::Text
        | ControlKind::Textarea
        | ControlKind::Url
        | ControlKind::Email
        | ControlKind::Number
        | ControlKind::Range
        | ControlKind::Color => Value::String(scalar_text(effective)),
    }
}

/// Boolean-control truthiness over the loose stored shapes (`1`, `"1"`,
/// `true`). Absent, `"0"`, `0`, `false`, and empty all read as false.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !(s.is_empty() || s == "0" || s == "false"),
        _ => false,
    }
}

/// Render a scalar stored value as text. Arrays and objects have no scalar
/// text; they render empty.
fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// The selected values of a multi-valued control: the stored array's
/// string items, or a single stored string as a one-element selection.
fn selected_values(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// The label of the option whose value matches, from the field's `options`
/// setting. Options may be plain strings or `{value, label}` mappings.
fn option_label(field: &Field, value: &str) -> Option<String> {
    let options = field.setting("options")?.as_array()?;
    options.iter().find_map(|option| match option {
        Value::String(s) if s == value => Some(s.clone()),
        Value::Object(map) if map.get("value").and_then(Value::as_str) == Some(value) => map
            .get("label")
            .and_then(Value::as_str)
            .map(String::from)
            .or_else(|| Some(value.to_string())),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockforge_blocks::{Location, Settings};
    use blockforge_controls::ValueKind;
    use serde_json::json;

    fn field(control: &str, kind: ValueKind) -> Field {
        Field {
            name: "sample".into(),
            label: "Sample".into(),
            control: control.into(),
            value_kind: kind,
            order: 0,
            location: Location::Editor,
            parent: None,
            settings: Settings::new(),
            sub_fields: None,
        }
    }

    #[test]
    fn checkbox_default_one_renders_yes() {
        let mut f = field("checkbox", ValueKind::Boolean);
        f.settings.insert("default".into(), json!("1"));
        assert_eq!(resolve_display(&f, None), "Yes");
        assert_eq!(resolve_value(&f, None), json!("1"));
    }

    #[test]
    fn checkbox_default_zero_renders_no() {
        let mut f = field("checkbox", ValueKind::Boolean);
        f.settings.insert("default".into(), json!("0"));
        assert_eq!(resolve_display(&f, None), "No");
        assert_eq!(resolve_value(&f, None), json!(""));
    }

    #[test]
    fn toggle_explicit_value_wins_over_default() {
        let mut f = field("toggle", ValueKind::Boolean);
        f.settings.insert("default".into(), json!("1"));
        assert_eq!(resolve_display(&f, Some(&json!("0"))), "No");
        assert_eq!(resolve_value(&f, Some(&json!("0"))), json!(""));
    }

    #[test]
    fn boolean_truthiness_accepts_loose_shapes() {
        let f = field("toggle", ValueKind::Boolean);
        assert_eq!(resolve_display(&f, Some(&json!(1))), "Yes");
        assert_eq!(resolve_display(&f, Some(&json!(true))), "Yes");
        assert_eq!(resolve_display(&f, Some(&json!("yes"))), "Yes");
        assert_eq!(resolve_display(&f, Some(&json!(0))), "No");
        assert_eq!(resolve_display(&f, Some(&json!(false))), "No");
        assert_eq!(resolve_display(&f, Some(&json!(""))), "No");
        assert_eq!(resolve_display(&f, None), "No");
    }

    #[test]
    fn text_falls_back_to_default() {
        let mut f = field("text", ValueKind::String);
        f.settings.insert("default".into(), json!("fallback"));
        assert_eq!(resolve_display(&f, None), "fallback");
        assert_eq!(resolve_display(&f, Some(&json!("explicit"))), "explicit");
        assert_eq!(resolve_value(&f, None), json!("fallback"));
    }

    #[test]
    fn text_without_default_is_empty() {
        let f = field("text", ValueKind::String);
        assert_eq!(resolve_display(&f, None), "");
        assert_eq!(resolve_value(&f, None), json!(""));
    }

    #[test]
    fn number_renders_as_string() {
        let f = field("number", ValueKind::Number);
        assert_eq!(resolve_display(&f, Some(&json!(42))), "42");
        assert_eq!(resolve_value(&f, Some(&json!(42))), json!("42"));
        assert_eq!(resolve_display(&f, Some(&json!(2.5))), "2.5");
    }

    #[test]
    fn select_prefers_option_label() {
        let mut f = field("select", ValueKind::String);
        f.settings.insert(
            "options".into(),
            json!([{"value": "sm", "label": "Small"}, {"value": "lg", "label": "Large"}]),
        );
        assert_eq!(resolve_display(&f, Some(&json!("lg"))), "Large");
        assert_eq!(resolve_value(&f, Some(&json!("lg"))), json!("lg"));
        // No matching option: raw value passes through.
        assert_eq!(resolve_display(&f, Some(&json!("xl"))), "xl");
    }

    #[test]
    fn multiselect_default_renders() {
        let mut f = field("multiselect", ValueKind::Array);
        f.settings
            .insert("default".into(), json!(["example-default"]));
        assert_eq!(resolve_display(&f, None), "example-default");
        assert_eq!(resolve_value(&f, None), json!(["example-default"]));
    }

    #[test]
    fn multiselect_joins_labels() {
        let mut f = field("multiselect", ValueKind::Array);
        f.settings.insert(
            "options".into(),
            json!([{"value": "a", "label": "Alpha"}, {"value": "b", "label": "Beta"}]),
        );
        assert_eq!(resolve_display(&f, Some(&json!(["a", "b"]))), "Alpha, Beta");
        assert_eq!(resolve_value(&f, Some(&json!(["a", "b"]))), json!(["a", "b"]));
    }

    #[test]
    fn unknown_control_resolves_empty() {
        let mut f = field("carousel", ValueKind::String);
        f.settings.insert("default".into(), json!("anything"));
        assert_eq!(resolve_display(&f, Some(&json!("boom"))), "");
        assert_eq!(resolve_value(&f, Some(&json!("boom"))), json!(""));
    }

    #[test]
    fn repeater_value_is_row_array() {
        let f = field("repeater", ValueKind::Array);
        let rows = json!([{"caption": "one"}, {"caption": "two"}]);
        assert_eq!(resolve_display(&f, Some(&rows)), "");
        assert_eq!(resolve_value(&f, Some(&rows)), rows);
        assert_eq!(resolve_value(&f, None), json!([]));
    }
}
