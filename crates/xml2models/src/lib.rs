//! xml2models - Generate data-model source code from XML model descriptions
//!
//! Reads a UML-like XML document (classes, properties, relations, controlled
//! vocabularies), extracts it into a [`model::ModelDatabase`] and renders a
//! Jinja template against it.
//!
//! # Quick Start
//!
//! ```rust
//! use xml2models::extract;
//!
//! let input = r#"<model><classes><class ID="Book"/></classes></model>"#;
//! let model = extract(input, "books.xml").unwrap();
//! assert!(model.class("Book").is_some());
//! ```
//!
//! # Advanced Usage
//!
//! ```rust
//! use xml2models::prelude::*;
//!
//! let input = r#"<model><classes><class ID="Book"/></classes></model>"#;
//!
//! let parser = ModelParser::new();
//! let mut database = ModelDatabase::new("books.xml");
//! parser.parse(input, &mut database).unwrap();
//!
//! let renderer = TemplateRenderer::from_source(
//!     "models.py.j2",
//!     "{% for id, cls in classes|items %}class {{ id }}: pass\n{% endfor %}",
//! )
//! .unwrap();
//! assert_eq!(renderer.render(&database).unwrap(), "class Book: pass\n");
//! ```

pub mod core;
pub mod model;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{DataType, Database, GeneratorConfig, ModelError, Parser, Renderer};
    pub use crate::model::{
        ClassEntry, JsonRenderer, ModelDatabase, ModelParser, PropertyEntry, RelationEntry,
        TemplateRenderer,
    };
}

/// Extract the model described by an XML document
///
/// `filename` is recorded in the result and exposed to templates.
///
/// # Example
/// ```rust
/// use xml2models::extract;
///
/// let model = extract(
///     r#"<model><classes><class ID="C1"><definition> A class </definition></class></classes></model>"#,
///     "model.xml",
/// )
/// .unwrap();
/// assert_eq!(model.class("C1").unwrap().definition, "A class");
/// assert_eq!(model.filename(), "model.xml");
/// ```
pub fn extract(input: &str, filename: &str) -> anyhow::Result<model::ModelDatabase> {
    use crate::core::Parser as _;
    use crate::model::{ModelDatabase, ModelParser};

    let mut database = ModelDatabase::new(filename);
    ModelParser::new().parse(input, &mut database)?;
    Ok(database)
}

/// Extract a model and render it with the template named in `config`
pub fn generate(input: &str, filename: &str, config: &GeneratorConfig) -> anyhow::Result<String> {
    use crate::core::Renderer as _;
    use crate::model::TemplateRenderer;

    let database = extract(input, filename)?;
    TemplateRenderer::from_config(config).render(&database)
}

/// Pretty-print an extracted model as JSON, three-space indented
pub fn to_json(database: &model::ModelDatabase) -> anyhow::Result<String> {
    use crate::core::Renderer as _;

    model::JsonRenderer::new().render(database)
}
