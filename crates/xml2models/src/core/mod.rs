//! Core abstractions for model processing
//!
//! The traits every stage implements, plus the XML tree, error type,
//! logging setup and configuration they share.

mod database;
mod error;
pub mod logging;
mod parser;
mod renderer;
mod types;
pub mod xml;

pub use database::*;
pub use error::*;
pub use logging::*;
pub use parser::*;
pub use renderer::*;
pub use types::*;
pub use xml::{XmlDocument, XmlElement, XmlNode};
