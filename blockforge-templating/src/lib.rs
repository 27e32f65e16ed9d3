//! Value resolution and template rendering for Blockforge blocks
//!
//! `blockforge-templating` turns a block definition plus runtime values into
//! markup. The value resolver computes, per control type, a display and a
//! value representation for each field (falling back to declared defaults);
//! the renderer binds those representations under stable names and renders
//! the block's liquid template.
//!
//! Resolution fails closed: a field that cannot be resolved binds as empty
//! rather than aborting the render.

pub mod engine;
pub mod error;
pub mod renderer;
pub mod resolver;

pub use engine::TemplateEngine;
pub use error::{Result, TemplatingError};
pub use renderer::{
    Attributes, BlockRenderer, MemoryTemplateProvider, TemplateProvider, ValueBag,
};
pub use resolver::{resolve_display, resolve_value};
