//! Core parser trait for model documents

use anyhow::Result;

use super::Database;

/// Core trait for model parsers
///
/// A parser reads one input document and fills the provided database.
///
/// # Example
/// ```
/// use xml2models::core::{Database, Parser};
/// use xml2models::model::{ModelDatabase, ModelParser};
///
/// let parser = ModelParser::new();
/// let mut db = ModelDatabase::new("inline.xml");
/// parser
///     .parse("<model><classes><class ID=\"C1\"/></classes></model>", &mut db)
///     .unwrap();
/// assert_eq!(db.node_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse the document into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Cheap check whether the input looks like something this parser reads
    fn can_parse(&self, input: &str) -> bool;
}
