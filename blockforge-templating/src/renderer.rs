//! Block template renderer.
//!
//! Computes, for every field in a block's tree, the name → representation
//! bindings from the value resolver and hands them to the liquid engine
//! along with the block-level attributes. Template lookup is behind the
//! `TemplateProvider` seam — where templates live is the host's concern.
//!
//! Binding layout, stable and derivable from field names:
//!
//! ```text
//! attributes.<key>        block-level attribute slots (e.g. class_name)
//! fields.<name>           display representation
//! values.<name>           value representation; repeater rows are an
//!                         array of row objects, each with its own
//!                         fields/values for the sub-fields
//! ```

use std::collections::HashMap;

use liquid_core::model::{KString, Value as LiquidValue};
use liquid_core::Object;
use serde_json::Value;
use tracing::debug;

use blockforge_blocks::{Block, Field, FieldMap};

use crate::engine::TemplateEngine;
use crate::error::{Result, TemplatingError};
use crate::resolver::{resolve_display, resolve_value};

/// Runtime field values for one block instance, keyed by field name.
/// Repeater values are arrays of row objects keyed by sub-field name.
pub type ValueBag = serde_json::Map<String, Value>;

/// Block-level attributes substituted into reserved template slots.
pub type Attributes = serde_json::Map<String, Value>;

/// Source of block templates, keyed by block name.
pub trait TemplateProvider {
    /// The template source for a block, or `None` when the block has none.
    fn template_for(&self, block_name: &str) -> Option<String>;
}

/// In-memory template provider for tests and embedded hosts.
#[derive(Debug, Default)]
pub struct MemoryTemplateProvider {
    templates: HashMap<String, String>,
}

impl MemoryTemplateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template for a block name.
    pub fn insert(&mut self, block_name: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(block_name.into(), template.into());
    }
}

impl TemplateProvider for MemoryTemplateProvider {
    fn template_for(&self, block_name: &str) -> Option<String> {
        self.templates.get(block_name).cloned()
    }
}

/// Renders block instances by binding resolved field representations into
/// the block's template.
pub struct BlockRenderer<P: TemplateProvider> {
    engine: TemplateEngine,
    provider: P,
}

impl<P: TemplateProvider> BlockRenderer<P> {
    /// Create a renderer over a template provider.
    pub fn new(provider: P) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            provider,
        })
    }

    /// Create a renderer with a custom engine.
    pub fn with_engine(engine: TemplateEngine, provider: P) -> Self {
        Self { engine, provider }
    }

    /// Render one block instance to markup.
    ///
    /// Fails only for a missing or broken template — a field that cannot
    /// be resolved binds as empty rather than aborting the render.
    pub fn render(
        &self,
        block: &Block,
        attributes: &Attributes,
        values: &ValueBag,
    ) -> Result<String> {
        let template_src =
            self.provider
                .template_for(&block.name)
                .ok_or_else(|| TemplatingError::TemplateNotFound {
                    block: block.name.clone(),
                })?;

        let globals = build_globals(block, attributes, values);
        debug!(block = %block.name, fields = block.fields.len(), "rendering block");
        self.engine.render(&template_src, &globals)
    }
}

fn build_globals(block: &Block, attributes: &Attributes, values: &ValueBag) -> Object {
    let mut globals = Object::new();
    globals.insert(
        "attributes".into(),
        json_to_liquid(&Value::Object(attributes.clone())),
    );

    let (fields, field_values) = scope_bindings(&block.fields, values);
    globals.insert("fields".into(), LiquidValue::Object(fields));
    globals.insert("values".into(), LiquidValue::Object(field_values));
    globals
}

/// The fields/values binding objects for one sibling scope.
fn scope_bindings(fields: &FieldMap, values: &ValueBag) -> (Object, Object) {
    let mut displays = Object::new();
    let mut resolved = Object::new();

    for field in fields.values() {
        let raw = values.get(&field.name);
        let key = KString::from_ref(field.name.as_str());

        displays.insert(key.clone(), LiquidValue::scalar(resolve_display(field, raw)));

        let value = match &field.sub_fields {
            Some(children) => repeater_rows(field, children, raw),
            None => json_to_liquid(&resolve_value(field, raw)),
        };
        resolved.insert(key, value);
    }

    (displays, resolved)
}

/// Bind a repeater's rows: each row becomes an object with its own
/// `fields`/`values` for the sub-field scope. A malformed row binds as an
/// empty row so the remaining rows still render.
fn repeater_rows(field: &Field, children: &FieldMap, raw: Option<&Value>) -> LiquidValue {
    let rows = match resolve_value(field, raw) {
        Value::Array(rows) => rows,
        _ => Vec::new(),
    };

    let bound: Vec<LiquidValue> = rows
        .iter()
        .map(|row| {
            let row_values = match row {
                Value::Object(map) => map.clone(),
                _ => ValueBag::new(),
            };
            let (fields, values) = scope_bindings(children, &row_values);
            let mut row_object = Object::new();
            row_object.insert("fields".into(), LiquidValue::Object(fields));
            row_object.insert("values".into(), LiquidValue::Object(values));
            LiquidValue::Object(row_object)
        })
        .collect();

    LiquidValue::Array(bound)
}

fn json_to_liquid(value: &Value) -> LiquidValue {
    match value {
        Value::Null => LiquidValue::Nil,
        Value::Bool(b) => LiquidValue::scalar(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                LiquidValue::scalar(i)
            } else {
                LiquidValue::scalar(n.as_f64().unwrap_or(0.0))
            }
        }
        Value::String(s) => LiquidValue::scalar(s.clone()),
        Value::Array(items) => LiquidValue::Array(items.iter().map(json_to_liquid).collect()),
        Value::Object(map) => LiquidValue::Object(
            map.iter()
                .map(|(k, v)| (KString::from_ref(k.as_str()), json_to_liquid(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockforge_blocks::{FieldPath, Location, Settings};
    use blockforge_controls::ControlRegistry;
    use serde_json::json;

    /// Hero block: text heading, toggle, and a gallery repeater with one
    /// caption sub-field, built through the mutation engine.
    fn hero_block() -> Block {
        let registry = ControlRegistry::built_in();
        let block = Block::new("hero", "Hero");

        let (block, name) = block.add_field(&registry, Location::Editor, None).unwrap();
        let mut s = Settings::new();
        s.insert("name".into(), json!("heading"));
        s.insert("default".into(), json!("Untitled"));
        let block = block
            .change_field_settings(&FieldPath::top(&name), s)
            .unwrap();

        let (block, name) = block.add_field(&registry, Location::Editor, None).unwrap();
        let block = block
            .change_control(&FieldPath::top(&name), "toggle", &registry)
            .unwrap();
        let mut s = Settings::new();
        s.insert("name".into(), json!("featured"));
        let block = block
            .change_field_settings(&FieldPath::top(&name), s)
            .unwrap();

        let (block, name) = block.add_field(&registry, Location::Editor, None).unwrap();
        let block = block
            .change_control(&FieldPath::top(&name), "repeater", &registry)
            .unwrap();
        let mut s = Settings::new();
        s.insert("name".into(), json!("gallery"));
        let block = block
            .change_field_settings(&FieldPath::top(&name), s)
            .unwrap();

        let (block, child) = block
            .add_field(&registry, Location::Editor, Some("gallery"))
            .unwrap();
        let mut s = Settings::new();
        s.insert("name".into(), json!("caption"));
        block
            .change_field_settings(&FieldPath::nested(&child, "gallery"), s)
            .unwrap()
    }

    fn renderer(template: &str) -> BlockRenderer<MemoryTemplateProvider> {
        let mut provider = MemoryTemplateProvider::new();
        provider.insert("hero", template);
        BlockRenderer::new(provider).unwrap()
    }

    #[test]
    fn renders_field_display_and_attributes() {
        let block = hero_block();
        let renderer = renderer(r#"<div class="{{ attributes.class_name }}"><h2>{{ fields.heading }}</h2></div>"#);

        let mut attributes = Attributes::new();
        attributes.insert("class_name".into(), json!("wp-block-hero"));
        let mut values = ValueBag::new();
        values.insert("heading".into(), json!("Welcome"));

        let html = renderer.render(&block, &attributes, &values).unwrap();
        assert_eq!(html, r#"<div class="wp-block-hero"><h2>Welcome</h2></div>"#);
    }

    #[test]
    fn missing_value_falls_back_to_field_default() {
        let block = hero_block();
        let renderer = renderer("{{ fields.heading }}");
        let html = renderer
            .render(&block, &Attributes::new(), &ValueBag::new())
            .unwrap();
        assert_eq!(html, "Untitled");
    }

    #[test]
    fn toggle_value_drives_conditionals() {
        let block = hero_block();
        let renderer =
            renderer("{% if values.featured == \"1\" %}featured{% else %}plain{% endif %}");

        let mut values = ValueBag::new();
        values.insert("featured".into(), json!("1"));
        assert_eq!(
            renderer.render(&block, &Attributes::new(), &values).unwrap(),
            "featured"
        );

        assert_eq!(
            renderer
                .render(&block, &Attributes::new(), &ValueBag::new())
                .unwrap(),
            "plain"
        );
    }

    #[test]
    fn repeater_rows_render_per_row() {
        let block = hero_block();
        let renderer =
            renderer("{% for row in values.gallery %}[{{ row.fields.caption }}]{% endfor %}");

        let mut values = ValueBag::new();
        values.insert(
            "gallery".into(),
            json!([{"caption": "one"}, {"caption": "two"}]),
        );
        let html = renderer.render(&block, &Attributes::new(), &values).unwrap();
        assert_eq!(html, "[one][two]");
    }

    #[test]
    fn malformed_row_binds_empty_without_aborting() {
        let block = hero_block();
        let renderer =
            renderer("{% for row in values.gallery %}[{{ row.fields.caption }}]{% endfor %}");

        let mut values = ValueBag::new();
        values.insert("gallery".into(), json!(["bogus", {"caption": "ok"}]));
        let html = renderer.render(&block, &Attributes::new(), &values).unwrap();
        assert_eq!(html, "[][ok]");
    }

    #[test]
    fn missing_template_is_an_error() {
        let block = hero_block();
        let renderer = BlockRenderer::new(MemoryTemplateProvider::new()).unwrap();
        let err = renderer
            .render(&block, &Attributes::new(), &ValueBag::new())
            .unwrap_err();
        assert!(matches!(err, TemplatingError::TemplateNotFound { .. }));
    }

    #[test]
    fn unresolvable_field_renders_empty() {
        let mut block = hero_block();
        // Simulate a stale definition whose control no longer exists.
        if let Some(field) = block.fields.get_mut("heading") {
            field.control = "carousel".into();
        }
        let renderer = renderer("<h2>{{ fields.heading }}</h2>");
        let mut values = ValueBag::new();
        values.insert("heading".into(), json!("Welcome"));

        let html = renderer.render(&block, &Attributes::new(), &values).unwrap();
        assert_eq!(html, "<h2></h2>");
    }
}
