//! Core renderer trait for model output

use anyhow::Result;

use super::Database;

/// Core trait for model renderers
///
/// A renderer turns a filled database into output text: generated source
/// code, or a diagnostic dump of the database itself.
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the database into the output format
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
