//! Model extractor
//!
//! Walks a model document and fills a [`ModelDatabase`]. Expected shape:
//!
//! ```text
//! model/classes/class[@ID]
//!     definition                      free text, may contain markup
//!     properties/property[@ID]
//!         name, note
//!         datatypeName[@target][@vocabRef]
//!     relations/relation[@ID]
//!         sourceClass[@target], targetClass[@target]
//!         name, reverseName
//! vocab[@ID]/values/list/item          anywhere in the document
//! ```

use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, info, info_span, trace, warn};

use super::database::{ClassEntry, Choices, ModelDatabase, PropertyEntry, RelationEntry};
use super::identifier::{ascii_fold, snake_case};
use crate::core::{DataType, ModelError, Parser, XmlDocument, XmlElement};

/// Property short names that are implicit in every generated model
const IMPLICIT_PROPERTY_NAME: &str = "name";

/// Property IDs containing this marker are bookkeeping fields
const IMPLICIT_PROPERTY_MARKER: &str = "date_written";

/// Item texts of every `vocab` element, keyed by vocabulary ID
#[derive(Debug, Default)]
struct VocabularyIndex {
    items: HashMap<String, Vec<String>>,
}

impl VocabularyIndex {
    fn build(doc: &XmlDocument) -> Self {
        let mut items: HashMap<String, Vec<String>> = HashMap::new();
        for vocab in doc.descendants("vocab") {
            let Some(id) = vocab.attribute("ID") else {
                continue;
            };
            // Vocabularies sharing an ID contribute to the same list
            let entry = items.entry(id.to_string()).or_default();
            for list in vocab.children("values").flat_map(|v| v.children("list")) {
                for item in list.children("item") {
                    entry.extend(item.texts().map(str::to_string));
                }
            }
        }
        trace!(vocabularies = items.len(), "Indexed vocabularies");
        Self { items }
    }

    fn items(&self, id: &str) -> Vec<String> {
        self.items.get(id).cloned().unwrap_or_default()
    }
}

/// Whether a property is skipped during extraction
///
/// The final `.`-separated segment of the ID is the property's short name.
pub fn is_implicit_property(property_id: &str) -> bool {
    property_id.contains(IMPLICIT_PROPERTY_MARKER)
        || short_name(property_id) == IMPLICIT_PROPERTY_NAME
}

fn short_name(property_id: &str) -> &str {
    property_id.rsplit('.').next().unwrap_or(property_id)
}

fn required_attribute<'a>(
    element: &'a XmlElement,
    attribute: &str,
    context: &str,
) -> Result<&'a str> {
    element
        .attribute(attribute)
        .ok_or_else(|| ModelError::missing_attribute(context, element.name(), attribute).into())
}

fn required_child<'a>(element: &'a XmlElement, child: &str, context: &str) -> Result<&'a XmlElement> {
    element
        .child(child)
        .ok_or_else(|| ModelError::missing_element(context, child).into())
}

fn required_text<'a>(element: &'a XmlElement, child: &str, context: &str) -> Result<&'a str> {
    required_child(element, child, context)?
        .text()
        .ok_or_else(|| ModelError::missing_text(context, child).into())
}

/// Model document parser
pub struct ModelParser;

impl ModelParser {
    pub fn new() -> Self {
        Self
    }

    /// Extract classes and relations from an already parsed document
    pub fn extract(&self, doc: &XmlDocument, database: &mut ModelDatabase) -> Result<()> {
        let span = info_span!("extract", filename = %database.filename());
        let _enter = span.enter();

        let vocabularies = VocabularyIndex::build(doc);

        let classes = doc
            .descendants("model")
            .into_iter()
            .flat_map(|model| model.children("classes"))
            .flat_map(|classes| classes.children("class"));

        for class in classes {
            let class_id = required_attribute(class, "ID", "class")?;
            let entry = self.parse_class(class, class_id, &vocabularies)?;
            debug!(
                class = class_id,
                properties = entry.properties.len(),
                "Extracted class"
            );
            database.add_class(class_id, entry);

            for relation in class
                .children("relations")
                .flat_map(|relations| relations.children("relation"))
            {
                let (id, entry) = self.parse_relation(relation, class_id)?;
                database.add_relation(id, entry);
            }
        }

        if database.class_count() == 0 {
            warn!("No model/classes/class elements found");
        }
        info!(
            classes = database.class_count(),
            relations = database.relation_count(),
            "Extraction completed"
        );
        Ok(())
    }

    fn parse_class(
        &self,
        class: &XmlElement,
        class_id: &str,
        vocabularies: &VocabularyIndex,
    ) -> Result<ClassEntry> {
        let definition: String = class
            .children("definition")
            .map(XmlElement::descendant_text)
            .collect();
        let mut entry = ClassEntry::new(definition.trim());

        let context = format!("class {}", class_id);
        for property in class
            .children("properties")
            .flat_map(|properties| properties.children("property"))
        {
            let property_id = required_attribute(property, "ID", &context)?;
            if is_implicit_property(property_id) {
                trace!(property = property_id, "Skipping implicit property");
                continue;
            }
            let parsed = self.parse_property(property, property_id, vocabularies)?;
            entry.add_property(short_name(property_id), parsed);
        }
        Ok(entry)
    }

    fn parse_property(
        &self,
        property: &XmlElement,
        property_id: &str,
        vocabularies: &VocabularyIndex,
    ) -> Result<PropertyEntry> {
        let context = format!("property {}", property_id);
        let datatype_element = required_child(property, "datatypeName", &context)?;
        let source_type = required_attribute(datatype_element, "target", &context)?;
        let name = required_text(property, "name", &context)?;
        let note = required_text(property, "note", &context)?;
        let datatype = DataType::from_source(source_type)
            .ok_or_else(|| ModelError::unknown_datatype(property_id, source_type))?;

        let mut entry = PropertyEntry::new(name, note, datatype);
        if datatype.is_choice() {
            if let Some(vocab_ref) = datatype_element.attribute("vocabRef") {
                let choices = Choices::from_items(vocabularies.items(vocab_ref))
                    .ok_or_else(|| ModelError::empty_vocabulary(property_id, vocab_ref))?;
                trace!(
                    property = property_id,
                    vocab = vocab_ref,
                    length = choices.length,
                    "Resolved vocabulary"
                );
                entry = entry.with_choices(choices);
            }
        }
        Ok(entry)
    }

    fn parse_relation(
        &self,
        relation: &XmlElement,
        class_id: &str,
    ) -> Result<(String, RelationEntry)> {
        let context = format!("relation of class {}", class_id);
        let raw_id = required_attribute(relation, "ID", &context)?;
        let context = format!("relation {}", raw_id);

        let source = required_attribute(
            required_child(relation, "sourceClass", &context)?,
            "target",
            &context,
        )?;
        let target = required_attribute(
            required_child(relation, "targetClass", &context)?,
            "target",
            &context,
        )?;
        let name = required_text(relation, "name", &context)?;
        let name_reverse = required_text(relation, "reverseName", &context)?;

        let orid = ascii_fold(raw_id);
        let id = snake_case(&orid);
        let entry = RelationEntry::new(orid, name, name_reverse)
            .with_subjects(source.split(' '))
            .with_objects(target.split(' '));
        Ok((id, entry))
    }
}

impl Default for ModelParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<ModelDatabase> for ModelParser {
    fn parse(&self, input: &str, database: &mut ModelDatabase) -> Result<()> {
        let doc = XmlDocument::parse(input)?;
        self.extract(&doc, database)
    }

    fn name(&self) -> &'static str {
        "model"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.contains("<model") || input.contains(":model")
    }
}
