//! Data-model plugin
//!
//! Extraction of classes, properties and relations from a model document,
//! and the renderers that turn the result into code or JSON.

mod database;
mod identifier;
mod parser;
mod renderer;

pub use database::{
    ClassEntry, Choices, MergeOutcome, ModelDatabase, PropertyEntry, RelationEntry,
};
pub use identifier::{ascii_fold, normalize_relation_id, snake_case};
pub use parser::{is_implicit_property, ModelParser};
pub use renderer::{JsonRenderer, TemplateRenderer};
