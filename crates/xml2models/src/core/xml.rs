//! Owned XML element tree with path-style queries
//!
//! The model documents are small, so the whole file is read into a tree with
//! `quick-xml` and then queried the way an XPath expression would walk it:
//! `//model/classes/class` becomes `doc.descendants("model")` followed by
//! `children("classes")` and `children("class")`.

use anyhow::Result;
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

use super::ModelError;

/// A node inside an element: either a child element or a run of text
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its attributes and children in document order
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(&text.into());
        self
    }

    /// Local element name (namespace prefix stripped)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All child nodes, elements and text
    pub fn nodes(&self) -> &[XmlNode] {
        &self.children
    }

    /// Child elements, any name
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Child elements with the given name (`./name`)
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements().filter(move |element| element.name == name)
    }

    /// First child element with the given name (`./name[1]`)
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.name == name)
    }

    /// Direct text nodes (`./text()`)
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Text(text) => Some(text.as_str()),
            XmlNode::Element(_) => None,
        })
    }

    /// First direct text node, `None` for an empty element
    pub fn text(&self) -> Option<&str> {
        self.texts().next()
    }

    /// All descendant text concatenated (`.//text()` joined)
    pub fn descendant_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }

    /// This element and every descendant with the given name, in document order
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        if self.name == name {
            found.push(self);
        }
        for element in self.elements() {
            element.collect_descendants(name, found);
        }
    }

    /// Adjacent text runs (text, CDATA) are merged into one node
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }
}

/// A parsed XML document
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    /// Parse XML text into an owned tree
    pub fn parse(input: &str) -> Result<Self> {
        let mut reader = Reader::from_str(input);
        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| ModelError::xml_error(e.to_string(), position))?;

            match event {
                Event::Start(e) => {
                    if root.is_some() {
                        return Err(ModelError::xml_error("multiple root elements", position).into());
                    }
                    stack.push(Self::start_element(&e, position)?);
                }
                Event::Empty(e) => {
                    let element = Self::start_element(&e, position)?;
                    Self::close_element(element, &mut stack, &mut root, position)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| ModelError::xml_error("unexpected closing tag", position))?;
                    Self::close_element(element, &mut stack, &mut root, position)?;
                }
                Event::Text(e) => {
                    let text = e
                        .unescape()
                        .map_err(|err| ModelError::xml_error(err.to_string(), position))?;
                    match stack.last_mut() {
                        Some(parent) => parent.push_text(&text),
                        None if text.trim().is_empty() => {}
                        None => {
                            return Err(
                                ModelError::xml_error("text outside the root element", position)
                                    .into(),
                            )
                        }
                    }
                }
                Event::CData(e) => {
                    let raw = e.into_inner();
                    let text = String::from_utf8_lossy(&raw);
                    if let Some(parent) = stack.last_mut() {
                        parent.push_text(&text);
                    }
                }
                Event::Eof => break,
                // Comments, processing instructions, declarations and doctypes carry no model data
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(ModelError::xml_error(
                format!("unclosed element <{}>", open.name),
                reader.buffer_position() as u64,
            )
            .into());
        }

        let root = root.ok_or_else(|| ModelError::xml_error("document has no root element", 0))?;
        trace!(root = %root.name, "Parsed XML document");
        Ok(Self { root })
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Every element with the given name anywhere in the document (`//name`)
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        self.root.descendants(name)
    }

    fn start_element(e: &BytesStart<'_>, position: u64) -> Result<XmlElement> {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        let mut element = XmlElement::new(name);
        for attr in e.attributes() {
            let attr = attr.map_err(|err| ModelError::xml_error(err.to_string(), position))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| ModelError::xml_error(err.to_string(), position))?;
            element.attributes.insert(key, value.into_owned());
        }
        Ok(element)
    }

    fn close_element(
        element: XmlElement,
        stack: &mut [XmlElement],
        root: &mut Option<XmlElement>,
        position: u64,
    ) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(XmlNode::Element(element)),
            None if root.is_none() => *root = Some(element),
            None => return Err(ModelError::xml_error("multiple root elements", position).into()),
        }
        Ok(())
    }
}
