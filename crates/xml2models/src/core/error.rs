//! Core error types for model extraction
//!
//! Every failure here is a malformed-input or rendering failure that aborts the run.
//! The one non-fatal condition (a relation reverse-name mismatch) is logged, not returned.

use thiserror::Error;

/// Core error types for model extraction and rendering
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("XML error: {message} at byte {position}")]
    XmlError { message: String, position: u64 },

    #[error("Missing element <{element}> in {context}")]
    MissingElement { context: String, element: String },

    #[error("Missing attribute @{attribute} on <{element}> in {context}")]
    MissingAttribute {
        context: String,
        element: String,
        attribute: String,
    },

    #[error("Missing text in <{element}> of {context}")]
    MissingText { context: String, element: String },

    #[error("Unknown datatype '{datatype}' on property {property}")]
    UnknownDatatype { property: String, datatype: String },

    #[error("Vocabulary '{vocab}' referenced by property {property} has no items")]
    EmptyVocabulary { property: String, vocab: String },

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl ModelError {
    /// Create a new XML error
    pub fn xml_error(message: impl Into<String>, position: u64) -> Self {
        Self::XmlError {
            message: message.into(),
            position,
        }
    }

    /// Create a new missing element error
    pub fn missing_element(context: impl Into<String>, element: impl Into<String>) -> Self {
        Self::MissingElement {
            context: context.into(),
            element: element.into(),
        }
    }

    /// Create a new missing attribute error
    pub fn missing_attribute(
        context: impl Into<String>,
        element: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self::MissingAttribute {
            context: context.into(),
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Create a new missing text error
    pub fn missing_text(context: impl Into<String>, element: impl Into<String>) -> Self {
        Self::MissingText {
            context: context.into(),
            element: element.into(),
        }
    }

    /// Create a new unknown datatype error
    pub fn unknown_datatype(property: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self::UnknownDatatype {
            property: property.into(),
            datatype: datatype.into(),
        }
    }

    /// Create a new empty vocabulary error
    pub fn empty_vocabulary(property: impl Into<String>, vocab: impl Into<String>) -> Self {
        Self::EmptyVocabulary {
            property: property.into(),
            vocab: vocab.into(),
        }
    }

    /// Create a new template error
    pub fn template_error(message: impl Into<String>) -> Self {
        Self::TemplateError {
            message: message.into(),
        }
    }
}

impl From<minijinja::Error> for ModelError {
    fn from(err: minijinja::Error) -> Self {
        Self::template_error(err.to_string())
    }
}
