//! Entity views over document nodes.
//!
//! An [`Entity`] pairs a node with the [`Document`] it belongs to. The
//! document reference is what lets any entity resolve guids held in its
//! pointers, sets, collections and `base` attribute, wherever in the tree
//! the targets live.
//!
//! Every lookup walks the tree from its search origin: the entity's own
//! subtree for [`Entity::node_by_guid`], its children for the `child_by_*`
//! lookups, and the document root for anything guid-based. Failed lookups
//! are reported as `None`; navigation never fails.

use std::{fmt, ptr};

use log::{debug, trace};

use xmigraph_parser::Span;

use crate::{
    document::{Document, Node},
    record::Record,
};

/// A lightweight view of one node of a [`Document`].
///
/// Two entities are equal when they view the same node of the same
/// document, regardless of how each view was obtained.
#[derive(Clone, Copy)]
pub struct Entity<'doc> {
    document: &'doc Document,
    node: &'doc Node,
}

impl<'doc> Entity<'doc> {
    pub(crate) fn new(document: &'doc Document, node: &'doc Node) -> Self {
        Self { document, node }
    }

    fn wrap(&self, node: &'doc Node) -> Self {
        Self::new(self.document, node)
    }

    /// The document this entity belongs to.
    pub fn document(&self) -> &'doc Document {
        self.document
    }

    /// The root entity of the document.
    pub fn root(&self) -> Entity<'doc> {
        self.document.root()
    }

    /// Whether this entity is the document root.
    pub fn is_root(&self) -> bool {
        ptr::eq(self.node, self.document.root_node())
    }

    /// The decoded attribute record.
    pub fn record(&self) -> &'doc Record {
        self.node.record()
    }

    /// The element tag (type name).
    pub fn tag(&self) -> &'doc str {
        self.node.tag()
    }

    /// A raw, undecoded attribute such as `id` or `rel-next-0`.
    pub fn raw_attribute(&self, key: &str) -> Option<&'doc str> {
        self.node.raw_attribute(key)
    }

    /// Source span of the element.
    pub fn span(&self) -> Span {
        self.node.span()
    }

    // -------------------------------------------------------------------------
    // Identity and attributes
    // -------------------------------------------------------------------------

    /// Whether this entity is a meta-type definition (`isMeta="true"`).
    pub fn is_meta(&self) -> bool {
        self.record().is_meta()
    }

    /// The document-unique identifier.
    pub fn guid(&self) -> Option<&'doc str> {
        self.record().guid()
    }

    /// The relid prefixed with `/`; `None` for the root.
    pub fn relid(&self) -> Option<String> {
        self.record().relid().map(|relid| format!("/{relid}"))
    }

    /// The value of the logical attribute `name` (key `atr-<name>`).
    pub fn attribute(&self, name: &str) -> Option<&'doc str> {
        self.record().attribute(name)
    }

    /// All logical attribute names.
    pub fn attribute_names(&self) -> Vec<&'doc str> {
        self.record().attribute_names().collect()
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Immediate children, optionally restricted to an exact tag.
    pub fn children(&self, type_filter: Option<&str>) -> Vec<Entity<'doc>> {
        self.node
            .children()
            .iter()
            .filter(|child| type_filter.is_none_or(|tag| child.tag() == tag))
            .map(|child| self.wrap(child))
            .collect()
    }

    /// Number of immediate children.
    pub fn children_count(&self) -> usize {
        self.node.children().len()
    }

    /// The structural parent, found by searching from the root.
    pub fn parent(&self) -> Option<Entity<'doc>> {
        let trail = self.document.root_node().trail_to(self.node)?;
        let parent = trail.len().checked_sub(2).map(|index| trail[index])?;
        Some(self.wrap(parent))
    }

    /// Immediate child whose raw relid equals `relid`.
    pub fn child_by_relid(&self, relid: &str) -> Option<Entity<'doc>> {
        self.node
            .children()
            .iter()
            .find(|child| child.record().relid() == Some(relid))
            .map(|child| self.wrap(child))
    }

    /// Immediate child whose guid equals `guid`.
    pub fn child_by_guid(&self, guid: &str) -> Option<Entity<'doc>> {
        self.node
            .children()
            .iter()
            .find(|child| child.record().guid() == Some(guid))
            .map(|child| self.wrap(child))
    }

    /// Descend through children by relid.
    ///
    /// `path` is split on `/` and empty segments are ignored, so `"a/b"`,
    /// `"/a/b"` and `"a//b/"` are the same path. The empty path resolves to
    /// this entity.
    pub fn node_by_relative_path(&self, path: &str) -> Option<Entity<'doc>> {
        let found = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(*self, |entity, segment| entity.child_by_relid(segment));
        if found.is_none() {
            trace!(path; "Relative path did not resolve");
        }
        found
    }

    /// Search this entity's subtree (itself included) for `guid`.
    ///
    /// The first match in pre-order wins. Only the root entity sees the
    /// whole document; guid references should be resolved from there.
    pub fn node_by_guid(&self, guid: &str) -> Option<Entity<'doc>> {
        self.node.find_by_guid(guid).map(|node| self.wrap(node))
    }

    /// Absolute path from the root: `/` followed by each relid on the way.
    ///
    /// The root's path is the empty string. A node without a relid below
    /// the root contributes an empty segment.
    pub fn path(&self) -> String {
        let Some(trail) = self.document.root_node().trail_to(self.node) else {
            return String::new();
        };
        trail
            .iter()
            .skip(1)
            .map(|node| format!("/{}", node.record().relid().unwrap_or_default()))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Inheritance
    // -------------------------------------------------------------------------

    /// The entity named by the `base` attribute.
    pub fn base(&self) -> Option<Entity<'doc>> {
        self.record().base().and_then(|guid| self.resolve(guid))
    }

    /// This entity if it is meta, otherwise its base (one hop).
    pub fn meta_node(&self) -> Option<Entity<'doc>> {
        if self.is_meta() {
            Some(*self)
        } else {
            self.base()
        }
    }

    // -------------------------------------------------------------------------
    // Pointers
    // -------------------------------------------------------------------------

    /// Target of the pointer `name`.
    pub fn pointer(&self, name: &str) -> Option<Entity<'doc>> {
        self.pointer_guid(name).and_then(|guid| self.resolve(guid))
    }

    /// Target guid of the pointer `name`, resolved or not.
    pub fn pointer_guid(&self, name: &str) -> Option<&'doc str> {
        self.record().pointer(name)
    }

    /// Path of the target of the pointer `name`.
    pub fn pointer_path(&self, name: &str) -> Option<String> {
        self.pointer(name).map(|target| target.path())
    }

    /// Names of all pointers.
    pub fn pointer_names(&self) -> Vec<&'doc str> {
        self.record().pointer_names().collect()
    }

    // -------------------------------------------------------------------------
    // Inverse collections
    // -------------------------------------------------------------------------

    /// Names of all inverse collections.
    pub fn collection_names(&self) -> Vec<&'doc str> {
        self.record().collection_names().collect()
    }

    /// Member guids of all collections, grouped by collection name.
    pub fn collection_guids(&self) -> Vec<&'doc str> {
        self.record().collection_guids().collect()
    }

    /// Resolved members of all collections; dangling guids are skipped.
    pub fn collection_nodes(&self) -> Vec<Entity<'doc>> {
        self.resolve_all(self.record().collection_guids())
    }

    /// Paths of the resolved members of all collections.
    pub fn collection_paths(&self) -> Vec<String> {
        self.collection_nodes()
            .iter()
            .map(|entity| entity.path())
            .collect()
    }

    /// Resolved members of the collection `name`.
    pub fn collection(&self, name: &str) -> Vec<Entity<'doc>> {
        self.record()
            .collection(name)
            .map(|guids| self.resolve_all(guids.iter().map(String::as_str)))
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Sets
    // -------------------------------------------------------------------------

    /// Names of all sets.
    pub fn set_names(&self) -> Vec<&'doc str> {
        self.record().set_names().collect()
    }

    /// Member guids of the set `set_name`, in order, duplicates included.
    pub fn set_members_guids(&self, set_name: &str) -> Option<Vec<&'doc str>> {
        self.record()
            .set(set_name)
            .map(|guids| guids.iter().map(String::as_str).collect())
    }

    /// Resolved members of the set `set_name`; dangling guids are skipped.
    pub fn set_members_nodes(&self, set_name: &str) -> Option<Vec<Entity<'doc>>> {
        self.record()
            .set(set_name)
            .map(|guids| self.resolve_all(guids.iter().map(String::as_str)))
    }

    /// Paths of the resolved members of the set `set_name`.
    pub fn set_members_paths(&self, set_name: &str) -> Option<Vec<String>> {
        self.set_members_nodes(set_name)
            .map(|members| members.iter().map(|entity| entity.path()).collect())
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    fn resolve(&self, guid: &str) -> Option<Entity<'doc>> {
        let resolved = self.document.node_by_guid(guid);
        if resolved.is_none() {
            debug!(guid, from = self.guid().unwrap_or_default(); "Dangling guid reference");
        }
        resolved
    }

    fn resolve_all<'g>(&self, guids: impl Iterator<Item = &'g str>) -> Vec<Entity<'doc>> {
        guids.filter_map(|guid| self.resolve(guid)).collect()
    }
}

impl PartialEq for Entity<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.document, other.document) && ptr::eq(self.node, other.node)
    }
}

impl Eq for Entity<'_> {}

impl fmt::Debug for Entity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("tag", &self.tag())
            .field("guid", &self.guid())
            .field("relid", &self.record().relid())
            .finish()
    }
}
