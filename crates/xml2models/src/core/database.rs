//! Core database trait for extracted model data
//!
//! The extractor fills a database; renderers read from it. Nodes are the
//! modeled classes and edges are the named relations between them, both keyed
//! by their string identifier.

use anyhow::Result;

/// Core trait for model databases
///
/// Classes and relations never point at each other directly, only through
/// identifier strings, so a database is two keyed collections.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Add a node under the given identifier, replacing any node already stored there
    fn add_node(&mut self, id: &str, node: Self::Node) -> Result<()>;

    /// Add an edge under the given identifier
    ///
    /// Implementations decide how a repeated identifier is merged.
    fn add_edge(&mut self, id: &str, edge: Self::Edge) -> Result<()>;

    /// Get a node by ID
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Get an edge by ID
    fn get_edge(&self, id: &str) -> Option<&Self::Edge>;

    /// Iterate over all nodes in insertion order
    fn nodes(&self) -> impl Iterator<Item = (&str, &Self::Node)>;

    /// Iterate over all edges in insertion order
    fn edges(&self) -> impl Iterator<Item = (&str, &Self::Edge)>;

    /// Clear all data from the database
    fn clear(&mut self);

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;
}
