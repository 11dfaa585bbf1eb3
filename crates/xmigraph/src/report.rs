//! Report shapes built on top of the graph view.
//!
//! - [`EntitySummary`]: recursive summary of an entity subtree
//! - [`MetaSummary`]: one line per meta node of the document
//! - [`TreeView`]: indented text listing of the containment tree
//!
//! Summaries derive [`serde::Serialize`] and are rendered as JSON by
//! [`ReportBuilder`](crate::ReportBuilder).

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{Document, Entity};

const NAME_ATTRIBUTE: &str = "name";

/// Summary of an entity and, recursively, its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySummary {
    /// Whether the entity is a meta node.
    pub is_meta: bool,
    /// Name of the entity's meta node, if it has one.
    pub meta_type: Option<String>,
    /// Logical attributes in document order.
    pub attributes: IndexMap<String, String>,
    /// Pointer name to the name of its target; `None` when unresolved.
    pub pointers: IndexMap<String, Option<String>>,
    /// Summaries of the structural children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EntitySummary>,
}

/// Summary of the whole containment tree under a named root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    /// Display name of the root.
    pub name: String,
    /// Summaries of the root's children.
    pub children: Vec<EntitySummary>,
}

/// Summary of one meta node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaSummary {
    /// The meta node's `name` attribute.
    pub name: Option<String>,
    /// Absolute path of the meta node.
    pub path: String,
    /// Number of immediate children.
    #[serde(rename = "nbrOfChildren")]
    pub children_count: usize,
    /// Name of the base entity, if any.
    pub base: Option<String>,
}

/// A complete report: the structure summary and the meta-node listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub structure: DocumentSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Vec<MetaSummary>>,
}

fn name_of(entity: Entity<'_>) -> Option<String> {
    entity.attribute(NAME_ATTRIBUTE).map(str::to_owned)
}

/// Summarize `entity` and its subtree.
pub fn summarize(entity: Entity<'_>) -> EntitySummary {
    let attributes = entity
        .attribute_names()
        .into_iter()
        .filter_map(|name| {
            entity
                .attribute(name)
                .map(|value| (name.to_owned(), value.to_owned()))
        })
        .collect();

    let pointers = entity
        .pointer_names()
        .into_iter()
        .map(|name| {
            let target = entity.pointer(name).and_then(name_of);
            (name.to_owned(), target)
        })
        .collect();

    EntitySummary {
        is_meta: entity.is_meta(),
        meta_type: entity.meta_node().and_then(name_of),
        attributes,
        pointers,
        children: entity.children(None).into_iter().map(summarize).collect(),
    }
}

/// Summarize the children of the document root under `root_name`.
pub fn summarize_document(document: &Document, root_name: &str) -> DocumentSummary {
    DocumentSummary {
        name: root_name.to_owned(),
        children: document
            .root()
            .children(None)
            .into_iter()
            .map(summarize)
            .collect(),
    }
}

/// One [`MetaSummary`] per meta node, in document order.
pub fn meta_summaries(document: &Document) -> Vec<MetaSummary> {
    document
        .all_meta_nodes()
        .into_iter()
        .map(|meta| MetaSummary {
            name: name_of(meta),
            path: meta.path(),
            children_count: meta.children_count(),
            base: meta.base().and_then(name_of),
        })
        .collect()
}

/// Indented text listing of a document's containment tree.
///
/// Each entity below the root is listed with its name, relid, guid and
/// attributes, followed by its children indented one level deeper.
pub struct TreeView<'a>(pub &'a Document);

impl TreeView<'_> {
    fn write_entity(f: &mut fmt::Formatter<'_>, entity: Entity<'_>, indent: usize) -> fmt::Result {
        let pad = " ".repeat(indent);
        writeln!(f, "{pad}{}", entity.attribute(NAME_ATTRIBUTE).unwrap_or("-"))?;
        writeln!(f, "{pad}  relid {}", entity.relid().as_deref().unwrap_or("-"))?;
        writeln!(f, "{pad}  guid {}", entity.guid().unwrap_or("-"))?;
        writeln!(f, "{pad}  attributes")?;
        for name in entity.attribute_names() {
            writeln!(f, "{pad}    {name} {}", entity.attribute(name).unwrap_or_default())?;
        }

        let children = entity.children(None);
        if !children.is_empty() {
            writeln!(f, "{pad}  children")?;
            for child in children {
                Self::write_entity(f, child, indent + 4)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TreeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in self.0.root().children(None) {
            Self::write_entity(f, child, 0)?;
        }
        Ok(())
    }
}
