//! Model renderers
//!
//! [`TemplateRenderer`] produces the generated source code from a Jinja
//! template; [`JsonRenderer`] dumps the extracted model for inspection.
//! Both hand the whole [`ModelDatabase`] over as-is, so a template sees
//! `classes`, `relations` and `filename` as top-level variables.

use std::path::Path;

use anyhow::Result;
use minijinja::{path_loader, AutoEscape, Environment};
use serde::Serialize;
use tracing::{debug, info_span};

use super::database::ModelDatabase;
use crate::core::{GeneratorConfig, ModelError, Renderer};

/// Renders a Jinja template against the model
pub struct TemplateRenderer {
    env: Environment<'static>,
    template_name: String,
}

impl TemplateRenderer {
    /// Look templates up in `dir` and render the one called `template_name`
    pub fn from_dir(dir: impl AsRef<Path>, template_name: impl Into<String>) -> Self {
        let mut env = Self::environment();
        env.set_loader(path_loader(dir.as_ref()));
        Self {
            env,
            template_name: template_name.into(),
        }
    }

    /// Render an in-memory template source
    pub fn from_source(
        template_name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Self> {
        let template_name = template_name.into();
        let mut env = Self::environment();
        env.add_template_owned(template_name.clone(), source.into())
            .map_err(ModelError::from)?;
        Ok(Self {
            env,
            template_name,
        })
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::from_dir(&config.template_dir, config.template_name.clone())
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    fn environment() -> Environment<'static> {
        let mut env = Environment::new();
        // Generated code is not HTML
        env.set_auto_escape_callback(|_| AutoEscape::None);
        // Templates written for Jinja2 call `.items()`, `.keys()` and friends
        env.set_unknown_method_callback(minijinja_contrib::pycompat::unknown_method_callback);
        env
    }
}

impl Renderer<ModelDatabase> for TemplateRenderer {
    type Output = String;

    fn render(&self, database: &ModelDatabase) -> Result<String> {
        let span = info_span!("render_template", template = %self.template_name);
        let _enter = span.enter();

        let template = self
            .env
            .get_template(&self.template_name)
            .map_err(ModelError::from)?;
        let output = template.render(database).map_err(ModelError::from)?;
        debug!(bytes = output.len(), "Rendered template");
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "template"
    }

    fn format(&self) -> &'static str {
        "text"
    }
}

/// Indentation of the JSON dump, three spaces
const JSON_INDENT: &[u8] = b"   ";

/// Pretty-prints the model as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer<ModelDatabase> for JsonRenderer {
    type Output = String;

    fn render(&self, database: &ModelDatabase) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        database.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf)?)
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn format(&self) -> &'static str {
        "json"
    }
}
