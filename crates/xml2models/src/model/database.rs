//! Model database
//!
//! Stores the classes and relations extracted from one model document.
//! Serializing the database yields the exact context handed to templates:
//! `{"classes": ..., "relations": ..., "filename": ...}`.

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::{DataType, Database};

/// Allowed values of a choice field and the width needed to store them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choices {
    /// Longest value, in characters
    pub length: usize,
    /// Values in document order, duplicates kept
    pub choices: Vec<String>,
}

impl Choices {
    /// Build from vocabulary items; `None` when there are no items to size from
    pub fn from_items(items: Vec<String>) -> Option<Self> {
        let length = items.iter().map(|item| item.chars().count()).max()?;
        Some(Self {
            length,
            choices: items,
        })
    }
}

/// A scalar or choice-valued property of a class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyEntry {
    pub name: String,
    pub note: String,
    pub datatype: DataType,
    /// Serialized inline as `length` and `choices`, so both appear or neither does
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<Choices>,
}

impl PropertyEntry {
    pub fn new(name: impl Into<String>, note: impl Into<String>, datatype: DataType) -> Self {
        Self {
            name: name.into(),
            note: note.into(),
            datatype,
            vocabulary: None,
        }
    }

    pub fn with_choices(mut self, choices: Choices) -> Self {
        self.vocabulary = Some(choices);
        self
    }

    pub fn length(&self) -> Option<usize> {
        self.vocabulary.as_ref().map(|v| v.length)
    }

    pub fn choices(&self) -> Option<&[String]> {
        self.vocabulary.as_ref().map(|v| v.choices.as_slice())
    }
}

/// A modeled class
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassEntry {
    pub definition: String,
    /// Keyed by property short name, document order
    pub properties: IndexMap<String, PropertyEntry>,
}

impl ClassEntry {
    pub fn new(definition: impl Into<String>) -> Self {
        Self {
            definition: definition.into(),
            properties: IndexMap::new(),
        }
    }

    /// Add a property; a repeated name replaces the earlier entry in place
    pub fn add_property(&mut self, name: impl Into<String>, property: PropertyEntry) {
        self.properties.insert(name.into(), property);
    }

    pub fn with_property(mut self, name: impl Into<String>, property: PropertyEntry) -> Self {
        self.add_property(name, property);
        self
    }
}

/// A named relationship between classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationEntry {
    pub name: String,
    pub name_reverse: String,
    pub subjects: Vec<String>,
    pub objects: Vec<String>,
    /// Relation ID as written in the document, ASCII-folded but not snake-cased
    pub orid: String,
}

impl RelationEntry {
    pub fn new(
        orid: impl Into<String>,
        name: impl Into<String>,
        name_reverse: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            name_reverse: name_reverse.into(),
            subjects: Vec::new(),
            objects: Vec::new(),
            orid: orid.into(),
        }
    }

    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects.extend(subjects.into_iter().map(Into::into));
        self
    }

    pub fn with_objects<I, S>(mut self, objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.objects.extend(objects.into_iter().map(Into::into));
        self
    }

    /// Fold another occurrence of the same relation into this one
    ///
    /// Subjects and objects not already present are appended; labels and
    /// `orid` stay as first seen.
    pub fn absorb(&mut self, other: &RelationEntry) {
        union_into(&mut self.subjects, &other.subjects);
        union_into(&mut self.objects, &other.objects);
    }
}

fn union_into(target: &mut Vec<String>, values: &[String]) {
    for value in values {
        if !target.contains(value) {
            target.push(value.clone());
        }
    }
}

/// What happened when a relation was added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First occurrence of the identifier
    Inserted,
    /// Same identifier and reverse name; subjects and objects were merged
    Merged,
    /// Same identifier but a different reverse name; the new data was dropped
    Conflict,
}

/// Model database
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDatabase {
    classes: IndexMap<String, ClassEntry>,
    relations: IndexMap<String, RelationEntry>,
    filename: String,
}

impl ModelDatabase {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            classes: IndexMap::new(),
            relations: IndexMap::new(),
            filename: filename.into(),
        }
    }

    /// Add a class; a repeated ID replaces the earlier entry in place
    pub fn add_class(&mut self, id: impl Into<String>, class: ClassEntry) {
        self.classes.insert(id.into(), class);
    }

    /// Add a relation under its normalized identifier, merging repeats
    pub fn add_relation(&mut self, id: impl Into<String>, relation: RelationEntry) -> MergeOutcome {
        let id = id.into();
        match self.relations.get_mut(&id) {
            None => {
                debug!(relation = %id, orid = %relation.orid, "Added relation");
                self.relations.insert(id, relation);
                MergeOutcome::Inserted
            }
            Some(existing) if existing.name_reverse != relation.name_reverse => {
                warn!(
                    relation = %id,
                    kept = %existing.name_reverse,
                    dropped = %relation.name_reverse,
                    "Reverse name mismatch for relation, keeping first occurrence"
                );
                MergeOutcome::Conflict
            }
            Some(existing) => {
                existing.absorb(&relation);
                debug!(
                    relation = %id,
                    subjects = existing.subjects.len(),
                    objects = existing.objects.len(),
                    "Merged relation"
                );
                MergeOutcome::Merged
            }
        }
    }

    pub fn classes(&self) -> &IndexMap<String, ClassEntry> {
        &self.classes
    }

    pub fn relations(&self) -> &IndexMap<String, RelationEntry> {
        &self.relations
    }

    pub fn class(&self, id: &str) -> Option<&ClassEntry> {
        self.classes.get(id)
    }

    pub fn relation(&self, id: &str) -> Option<&RelationEntry> {
        self.relations.get(id)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }
}

impl Default for ModelDatabase {
    fn default() -> Self {
        Self::new("")
    }
}

impl Database for ModelDatabase {
    type Node = ClassEntry;
    type Edge = RelationEntry;

    fn add_node(&mut self, id: &str, node: Self::Node) -> Result<()> {
        self.add_class(id, node);
        Ok(())
    }

    fn add_edge(&mut self, id: &str, edge: Self::Edge) -> Result<()> {
        // A conflict is a data inconsistency, not a failure; it has been logged
        self.add_relation(id, edge);
        Ok(())
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.class(id)
    }

    fn get_edge(&self, id: &str) -> Option<&Self::Edge> {
        self.relation(id)
    }

    fn nodes(&self) -> impl Iterator<Item = (&str, &Self::Node)> {
        self.classes.iter().map(|(id, class)| (id.as_str(), class))
    }

    fn edges(&self) -> impl Iterator<Item = (&str, &Self::Edge)> {
        self.relations.iter().map(|(id, rel)| (id.as_str(), rel))
    }

    fn clear(&mut self) {
        self.classes.clear();
        self.relations.clear();
    }

    fn node_count(&self) -> usize {
        self.classes.len()
    }

    fn edge_count(&self) -> usize {
        self.relations.len()
    }
}
