//! Owned XML element tree and the parsed catalog document.
//!
//! Bytes are decoded, parsed with `roxmltree` and copied into [`XmlNode`]s so the
//! document can outlive its source buffer and be shared across threads.
//! Only elements and their attributes are kept; text, comments and
//! processing instructions carry nothing the catalog mapping reads.

use roxmltree::{Node, ParsingOptions};
use tracing::debug;

use crate::constants::{
    CATALOG_TAG, CONTENTS_TAG, CUSTOM_FIELDS_PROPERTIES_TAG, MOVIE_TAG, PROPERTIES_TAG,
};
use crate::encoding::decode_catalog;
use crate::error::{CatalogError, Result};
use crate::types::AttributeMap;

/// One XML element: qualified tag name, attributes in document order, element children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub tag: String,
    pub attributes: AttributeMap,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// First direct child with the given tag, if any.
    pub fn first_child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Direct children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Removes and returns the first direct child with the given tag.
    fn take_first_child(&mut self, tag: &str) -> Option<XmlNode> {
        let idx = self.children.iter().position(|c| c.tag == tag)?;
        Some(self.children.remove(idx))
    }

    fn from_roxml(node: Node<'_, '_>) -> Self {
        let attributes = node
            .attributes()
            .map(|a| {
                (
                    qualified_name(node, a.namespace(), a.name()),
                    a.value().to_string(),
                )
            })
            .collect();
        let children = node
            .children()
            .filter(|c| c.is_element())
            .map(XmlNode::from_roxml)
            .collect();
        let tag = node.tag_name();
        Self {
            tag: qualified_name(node, tag.namespace(), tag.name()),
            attributes,
            children,
        }
    }
}

/// `prefix:local` as written in the document, or `local` when unprefixed.
/// Keeps `x:Number` and `Number` apart.
fn qualified_name(node: Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}

/// Decodes bytes and parses them into an owned element tree rooted at the document element.
pub fn parse_xml(bytes: &[u8], source_name: &str) -> Result<XmlNode> {
    let text = decode_catalog(bytes, source_name);

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc =
        roxmltree::Document::parse_with_options(&text, options).map_err(|e| CatalogError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;

    Ok(XmlNode::from_roxml(doc.root_element()))
}

/// A loaded catalog with its structural anchors located once.
///
/// Immutable after construction; a reload builds a fresh document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDocument {
    source_name: String,
    root: AttributeMap,
    properties: Option<XmlNode>,
    custom_fields_properties: Option<XmlNode>,
    contents: XmlNode,
}

impl CatalogDocument {
    /// Parses bytes and locates `Catalog`, `Contents`, `Properties` and
    /// `CustomFieldsProperties`. Only the first two are required.
    pub fn parse(bytes: &[u8], source_name: &str) -> Result<Self> {
        let root = parse_xml(bytes, source_name)?;
        Self::from_root(root, source_name)
    }

    pub fn from_root(root: XmlNode, source_name: &str) -> Result<Self> {
        let XmlNode {
            attributes,
            mut children,
            ..
        } = root;

        let idx = children
            .iter()
            .position(|c| c.tag == CATALOG_TAG)
            .ok_or_else(|| CatalogError::MalformedCatalog {
                source_name: source_name.to_string(),
                missing: CATALOG_TAG,
            })?;
        let mut catalog = children.swap_remove(idx);

        let contents = catalog
            .take_first_child(CONTENTS_TAG)
            .ok_or_else(|| CatalogError::MalformedCatalog {
                source_name: source_name.to_string(),
                missing: CONTENTS_TAG,
            })?;
        let properties = catalog.take_first_child(PROPERTIES_TAG);
        let custom_fields_properties = catalog.take_first_child(CUSTOM_FIELDS_PROPERTIES_TAG);

        if properties.is_none() {
            debug!(source = %source_name, "catalog has no <Properties> element");
        }

        Ok(Self {
            source_name: source_name.to_string(),
            root: attributes,
            properties,
            custom_fields_properties,
            contents,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Attributes of the document element.
    pub fn root_attributes(&self) -> &AttributeMap {
        &self.root
    }

    pub fn properties(&self) -> Option<&XmlNode> {
        self.properties.as_ref()
    }

    pub fn custom_fields_properties(&self) -> Option<&XmlNode> {
        self.custom_fields_properties.as_ref()
    }

    /// `Movie` elements under `Contents`, in document order.
    pub fn movie_nodes(&self) -> impl Iterator<Item = &XmlNode> + '_ {
        self.contents.children_named(MOVIE_TAG)
    }

    pub fn movie_count(&self) -> usize {
        self.movie_nodes().count()
    }
}
