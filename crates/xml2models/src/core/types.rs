//! Core type definitions for model extraction
//!
//! Property datatypes and the generator configuration.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Field type of a generated model property
///
/// The input document names datatypes in its own vocabulary
/// (`float`, `int`, `shortText`, `longText`, `choiceField`); the generated
/// code and the template see the field tags (`floatfield`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// `float` in the document
    FloatField,
    /// `int` in the document
    IntegerField,
    /// `shortText` in the document
    CharField,
    /// `longText` in the document
    TextField,
    /// `choiceField` in the document, a text field limited to a vocabulary
    ChoiceField,
}

impl DataType {
    /// Map a datatype name from the input document, `None` if unknown
    pub fn from_source(name: &str) -> Option<Self> {
        match name {
            "float" => Some(DataType::FloatField),
            "int" => Some(DataType::IntegerField),
            "shortText" => Some(DataType::CharField),
            "longText" => Some(DataType::TextField),
            "choiceField" => Some(DataType::ChoiceField),
            _ => None,
        }
    }

    /// The datatype name used in the input document
    pub fn source_name(&self) -> &'static str {
        match self {
            DataType::FloatField => "float",
            DataType::IntegerField => "int",
            DataType::CharField => "shortText",
            DataType::TextField => "longText",
            DataType::ChoiceField => "choiceField",
        }
    }

    /// The field tag handed to templates
    pub fn tag(&self) -> &'static str {
        match self {
            DataType::FloatField => "floatfield",
            DataType::IntegerField => "integerfield",
            DataType::CharField => "charfield",
            DataType::TextField => "textfield",
            DataType::ChoiceField => "choicefield",
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, DataType::ChoiceField)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Default directory searched for templates
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// Default template rendered against the model
pub const DEFAULT_TEMPLATE_NAME: &str = "models.py.j2";

/// Where the code generator finds its template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub template_dir: PathBuf,
    pub template_name: String,
}

impl GeneratorConfig {
    pub fn new(template_dir: impl Into<PathBuf>, template_name: impl Into<String>) -> Self {
        Self {
            template_dir: template_dir.into(),
            template_name: template_name.into(),
        }
    }

    /// Defaults, overridden by `XML2MODELS_TEMPLATE_DIR` and `XML2MODELS_TEMPLATE`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("XML2MODELS_TEMPLATE_DIR") {
            config.template_dir = dir.into();
        }
        if let Ok(name) = std::env::var("XML2MODELS_TEMPLATE") {
            config.template_name = name;
        }
        config
    }

    /// Full path of the configured template
    pub fn template_path(&self) -> PathBuf {
        self.template_dir.join(&self.template_name)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_DIR, DEFAULT_TEMPLATE_NAME)
    }
}
